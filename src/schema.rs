//! Declared per-dataset schemas.
//!
//! Every dataset carries an explicit schema (named fields with declared types)
//! that is checked against the CSV header at load time, so a renamed or
//! missing column fails fast instead of propagating nulls into aggregation.

use crate::error::{Error, Result};

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Free-form categorical label (group key material).
    Categorical,
    /// Integer measure or key.
    Int,
    /// Floating-point measure.
    Float,
}

/// One declared field of a dataset schema.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub dtype: ColumnType,
}

/// Expected shape of one tabular input.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Dataset name, used in error messages.
    pub dataset: &'static str,
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(dataset: &'static str, fields: &[(&'static str, ColumnType)]) -> Self {
        Schema {
            dataset,
            fields: fields
                .iter()
                .map(|&(name, dtype)| Field { name, dtype })
                .collect(),
        }
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check a CSV header against the declared fields.
    ///
    /// Both directions are enforced: a declared field absent from the header
    /// and a header column with no declared field are schema mismatches.
    pub fn validate(&self, headers: &[String]) -> Result<()> {
        for field in &self.fields {
            if !headers.iter().any(|h| h == field.name) {
                return Err(Error::SchemaMismatch {
                    dataset: self.dataset.to_string(),
                    field: format!("missing column '{}'", field.name),
                });
            }
        }
        for header in headers {
            if self.field(header).is_none() {
                return Err(Error::SchemaMismatch {
                    dataset: self.dataset.to_string(),
                    field: format!("unexpected column '{}'", header),
                });
            }
        }
        Ok(())
    }
}
