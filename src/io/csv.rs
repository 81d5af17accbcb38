//! CSV reading and writing.
//!
//! Inputs are CSV exports of the original sheets. [`read_csv`] checks the
//! header against a declared [`Schema`] and parses cells to typed values;
//! [`read_csv_raw`] reads everything as strings for sheets whose header is
//! known to be wrong and must be repaired by a cleaner. [`write_table`] is the
//! single output sink: header first, then rows, flushed before return.

use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};
use crate::frame::{DataFrame, Value};
use crate::schema::{ColumnType, Schema};
use crate::table::Table;

/// Read a CSV file into a typed DataFrame, validating it against `schema`.
pub fn read_csv<P: AsRef<Path>>(path: P, schema: &Schema) -> Result<DataFrame> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(Error::Csv)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    schema.validate(&headers)?;

    let mut columns: Vec<Vec<Option<Value>>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result.map_err(Error::Csv)?;
        for (i, header) in headers.iter().enumerate() {
            let raw = record.get(i).unwrap_or("");
            // Validation guarantees every header has a declared field.
            let dtype = schema
                .field(header)
                .map(|f| f.dtype)
                .unwrap_or(ColumnType::Categorical);
            columns[i].push(parse_cell(raw, dtype, header)?);
        }
    }

    let mut df = DataFrame::new();
    for (header, cells) in headers.into_iter().zip(columns) {
        df.add_column(header, cells)?;
    }
    Ok(df)
}

/// Read a CSV file with no schema: header names as found, every cell a string.
pub fn read_csv_raw<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(Error::Csv)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut columns: Vec<Vec<Option<Value>>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result.map_err(Error::Csv)?;
        for (i, cells) in columns.iter_mut().enumerate() {
            let raw = record.get(i).unwrap_or("");
            cells.push(if is_missing(raw) {
                None
            } else {
                Some(Value::Str(raw.to_string()))
            });
        }
    }

    let mut df = DataFrame::new();
    for (header, cells) in headers.into_iter().zip(columns) {
        df.add_column(header, cells)?;
    }
    Ok(df)
}

/// Write a tidy table: header row, then data rows.
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let mut wtr = Writer::from_path(path.as_ref()).map_err(Error::Csv)?;
    wtr.write_record(table.columns()).map_err(Error::Csv)?;
    for row in table.rows() {
        wtr.write_record(row).map_err(Error::Csv)?;
    }
    wtr.flush().map_err(Error::Io)?;
    Ok(())
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw == "NA" || raw == "NaN" || raw == "nan"
}

fn parse_cell(raw: &str, dtype: ColumnType, column: &str) -> Result<Option<Value>> {
    if is_missing(raw) {
        return Ok(None);
    }
    match dtype {
        ColumnType::Categorical => Ok(Some(Value::Str(raw.to_string()))),
        ColumnType::Int => match raw.parse::<i64>() {
            Ok(v) => Ok(Some(Value::Int(v))),
            // Spreadsheet exports often render integer counts as "10.0".
            Err(_) => match raw.parse::<f64>() {
                Ok(v) if v.fract() == 0.0 => Ok(Some(Value::Int(v as i64))),
                _ => Err(Error::Cast(format!(
                    "column '{}' value '{}' is not an integer",
                    column, raw
                ))),
            },
        },
        ColumnType::Float => raw
            .parse::<f64>()
            .map(|v| Some(Value::Float(v)))
            .map_err(|_| {
                Error::Cast(format!(
                    "column '{}' value '{}' is not numeric",
                    column, raw
                ))
            }),
    }
}
