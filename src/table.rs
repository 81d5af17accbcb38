//! Tidy output tables.
//!
//! A [`Table`] is the final form of every computed result: a header of stable
//! column names plus string-formatted rows, ready for the CSV sink. Formatting
//! follows the conventions of the original spreadsheet exports: NaN cells
//! serialize as empty fields and whole floats keep a trailing `.0` so that a
//! mean of 25 reads `25.0` while a count reads `2`.

use crate::frame::Value;

/// One tidy result table.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format a float cell. NaN becomes an empty field; whole values keep `.0`.
pub fn fmt_float(x: f64) -> String {
    if x.is_nan() {
        return String::new();
    }
    let s = format!("{}", x);
    if s.contains('.') || s.contains('e') || s.contains("inf") {
        s
    } else {
        format!("{}.0", s)
    }
}

pub fn fmt_int(n: i64) -> String {
    n.to_string()
}

pub fn fmt_count(n: usize) -> String {
    n.to_string()
}

/// Format an optional typed cell; a missing cell serializes as an empty field.
pub fn fmt_cell(cell: &Option<Value>) -> String {
    match cell {
        None => String::new(),
        Some(Value::Str(s)) => s.clone(),
        Some(Value::Int(v)) => fmt_int(*v),
        Some(Value::Float(v)) => fmt_float(*v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_float() {
        assert_eq!(fmt_float(25.0), "25.0");
        assert_eq!(fmt_float(0.25), "0.25");
        assert_eq!(fmt_float(-5.0), "-5.0");
        assert_eq!(fmt_float(60.1), "60.1");
        assert_eq!(fmt_float(f64::NAN), "");
    }
}
