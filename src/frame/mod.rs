//! Minimal column-ordered data frame.
//!
//! A [`DataFrame`] is an ordered set of equally long named columns whose cells
//! are typed [`Value`]s; `None` marks a missing cell. Datasets are loaded once
//! and only mutated by the explicit cleaning operations (`drop_na`,
//! `retain_rows`, `cast_column_to_int`) before aggregation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// One typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Str(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Total order over cells: numeric for Int/Float, lexical for Str.
    ///
    /// Mixed string/number comparisons fall back on the variant tag so that
    /// sorting never panics on a malformed key column.
    pub fn cmp_order(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Ordered named columns of equal length.
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    /// Column order, preserved from insertion.
    columns: Vec<String>,
    data: HashMap<String, Vec<Option<Value>>>,
    row_count: usize,
}

impl DataFrame {
    pub fn new() -> Self {
        DataFrame::default()
    }

    /// Append a column; its length must match the existing row count.
    pub fn add_column(&mut self, name: String, values: Vec<Option<Value>>) -> Result<()> {
        if self.data.contains_key(&name) {
            return Err(Error::Consistency(format!("duplicate column '{}'", name)));
        }
        if !self.columns.is_empty() && values.len() != self.row_count {
            return Err(Error::Consistency(format!(
                "column '{}' has length {} but the frame has {} rows",
                name,
                values.len(),
                self.row_count
            )));
        }
        self.row_count = values.len();
        self.columns.push(name.clone());
        self.data.insert(name, values);
        Ok(())
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Borrow one column's cells.
    pub fn column(&self, name: &str) -> Result<&[Option<Value>]> {
        self.data
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// One cell, `None` when missing or out of range.
    pub fn get(&self, name: &str, row: usize) -> Option<&Value> {
        self.data.get(name)?.get(row)?.as_ref()
    }

    /// Numeric view of a column. A non-numeric cell is a type error: numeric
    /// access is only meant for columns declared Int or Float.
    pub fn f64_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        self.column(name)?
            .iter()
            .map(|cell| match cell {
                None => Ok(None),
                Some(v) => v.as_f64().map(Some).ok_or_else(|| {
                    Error::Cast(format!("column '{}' holds non-numeric value '{}'", name, v))
                }),
            })
            .collect()
    }

    pub fn i64_column(&self, name: &str) -> Result<Vec<Option<i64>>> {
        self.column(name)?
            .iter()
            .map(|cell| match cell {
                None => Ok(None),
                Some(v) => v.as_i64().map(Some).ok_or_else(|| {
                    Error::Cast(format!("column '{}' holds non-integer value '{}'", name, v))
                }),
            })
            .collect()
    }

    /// Rename the column at `index`, keeping its position and cells.
    pub fn set_column_name(&mut self, index: usize, name: &str) -> Result<()> {
        let old = self
            .columns
            .get(index)
            .cloned()
            .ok_or_else(|| Error::ColumnNotFound(format!("column index {}", index)))?;
        if old == name {
            return Ok(());
        }
        if self.data.contains_key(name) {
            return Err(Error::Consistency(format!("duplicate column '{}'", name)));
        }
        let values = self.data.remove(&old).unwrap_or_default();
        self.data.insert(name.to_string(), values);
        self.columns[index] = name.to_string();
        Ok(())
    }

    /// Keep only the rows whose mask entry is true. Column order is untouched
    /// and surviving rows keep their relative order.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<()> {
        if keep.len() != self.row_count {
            return Err(Error::Consistency(format!(
                "row mask has length {} but the frame has {} rows",
                keep.len(),
                self.row_count
            )));
        }
        for values in self.data.values_mut() {
            let mut it = keep.iter();
            values.retain(|_| *it.next().unwrap_or(&false));
        }
        self.row_count = keep.iter().filter(|&&k| k).count();
        Ok(())
    }

    /// Drop every row with at least one missing cell.
    pub fn drop_na(&mut self) {
        let keep: Vec<bool> = (0..self.row_count)
            .map(|row| {
                self.columns
                    .iter()
                    .all(|c| self.data[c][row].is_some())
            })
            .collect();
        // Mask length always matches here.
        let _ = self.retain_rows(&keep);
    }

    /// Per-record difference of two paired numeric columns (`a - b`),
    /// order preserving. Integer columns yield integer differences; a row
    /// missing either measure yields a missing difference.
    pub fn pairwise_difference(&self, a: &str, b: &str) -> Result<Vec<Option<Value>>> {
        let ca = self.column(a)?;
        let cb = self.column(b)?;
        Ok(ca
            .iter()
            .zip(cb)
            .map(|(x, y)| match (x, y) {
                (Some(Value::Int(p)), Some(Value::Int(q))) => Some(Value::Int(p - q)),
                (Some(p), Some(q)) => match (p.as_f64(), q.as_f64()) {
                    (Some(p), Some(q)) => Some(Value::Float(p - q)),
                    _ => None,
                },
                _ => None,
            })
            .collect())
    }

    /// Coerce a column to Int cells in place.
    ///
    /// Accepts Int cells, whole Float cells, and strings that parse as
    /// integers (or as whole floats, as spreadsheet exports often render
    /// counts as `10.0`). Anything else is a type conversion error.
    pub fn cast_column_to_int(&mut self, name: &str) -> Result<()> {
        let values = self
            .data
            .get_mut(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        for cell in values.iter_mut() {
            let coerced = match cell {
                None => None,
                Some(Value::Int(v)) => Some(*v),
                Some(Value::Float(v)) if v.fract() == 0.0 => Some(*v as i64),
                Some(Value::Str(s)) => match s.parse::<i64>() {
                    Ok(v) => Some(v),
                    Err(_) => match s.parse::<f64>() {
                        Ok(v) if v.fract() == 0.0 => Some(v as i64),
                        _ => {
                            return Err(Error::Cast(format!(
                                "column '{}' value '{}' is not an integer",
                                name, s
                            )))
                        }
                    },
                },
                Some(other) => {
                    return Err(Error::Cast(format!(
                        "column '{}' value '{}' is not an integer",
                        name, other
                    )))
                }
            };
            *cell = coerced.map(Value::Int);
        }
        Ok(())
    }
}
