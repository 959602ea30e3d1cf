//! Reading the spreadsheet-derived CSV exports into memory.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// One source table: a header row and its records, all as raw text.
/// Empty cells are `None` and become NULL when staged.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SourceTable {
    /// Read a single CSV file.
    pub fn from_csv_file(name: &str, path: impl AsRef<Path>) -> Result<SourceTable, Error> {
        Self::from_csv_files(name, std::slice::from_ref(&path.as_ref().to_path_buf()))
    }

    /// Read and concatenate several CSV files sharing one header row, in the
    /// order given (one file per depot sheet).
    pub fn from_csv_files(name: &str, paths: &[PathBuf]) -> Result<SourceTable, Error> {
        let (first, rest) = paths.split_first().ok_or_else(|| Error::NoFiles {
            table: name.to_string(),
        })?;

        let mut table = read_one(name, first)?;
        for path in rest {
            let next = read_one(name, path)?;
            if next.columns != table.columns {
                return Err(Error::HeaderMismatch {
                    path: path.clone(),
                    first: first.clone(),
                });
            }
            table.rows.extend(next.rows);
        }
        Ok(table)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }
}

fn read_one(name: &str, path: &Path) -> Result<SourceTable, Error> {
    let on_csv_error = |error| Error::Csv {
        path: path.to_path_buf(),
        error,
    };

    let mut reader = csv::Reader::from_path(path).map_err(on_csv_error)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(on_csv_error)?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(on_csv_error)?;
        rows.push(
            record
                .iter()
                .map(|cell| {
                    let cell = cell.trim();
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(SourceTable {
        name: name.to_string(),
        columns,
        rows,
    })
}
