//! Bulk import of addresses and stops from delimited files.
//!
//! Files carry a header row naming a subset of the target table's columns:
//! `id` is optional, `latitude` and `longitude` are required, and the order
//! is free. Every data row is appended inside a single transaction, so a
//! malformed row leaves the table untouched.
#![forbid(unsafe_code)]

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use rusqlite::Error as SqliteError;
use serde::Deserialize;
use thiserror::Error;

use crate::store::{LocationStore, LocationTable};

/// Options controlling how import files are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ImportOptions {
    /// Use `delimiter` to split fields.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Errors raised while importing a delimited file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The import file could not be opened.
    #[error("failed to open import file {path:?}")]
    Open {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The header row could not be read.
    #[error("failed to read header row of {path:?}")]
    ReadHeader {
        /// Import file path.
        path: Utf8PathBuf,
        /// Source error returned by `csv`.
        #[source]
        source: csv::Error,
    },
    /// The header names a column the target table does not have.
    #[error("{path:?} has column '{column}' which {table} does not define")]
    UnknownColumn {
        /// Import file path.
        path: Utf8PathBuf,
        /// Offending header entry.
        column: String,
        /// Target table.
        table: &'static str,
    },
    /// The header names the same column twice.
    #[error("{path:?} lists column '{column}' more than once")]
    DuplicateColumn {
        /// Import file path.
        path: Utf8PathBuf,
        /// Repeated header entry.
        column: String,
    },
    /// A required column is absent from the header.
    #[error("{path:?} is missing required column '{column}'")]
    MissingColumn {
        /// Import file path.
        path: Utf8PathBuf,
        /// Name of the absent column.
        column: &'static str,
    },
    /// A data row could not be parsed.
    #[error("failed to parse line {line} of {path:?}")]
    ParseRow {
        /// Import file path.
        path: Utf8PathBuf,
        /// One-based line number of the row.
        line: u64,
        /// Source error returned by `csv`.
        #[source]
        source: csv::Error,
    },
    /// SQLite rejected a data row.
    #[error("failed to insert line {line} of {path:?} into {table}")]
    InsertRow {
        /// Import file path.
        path: Utf8PathBuf,
        /// One-based line number of the row.
        line: u64,
        /// Target table.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Managing the import transaction failed.
    #[error("failed to {operation} while importing {path:?}")]
    Transaction {
        /// Import file path.
        path: Utf8PathBuf,
        /// Description of the failed step.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    #[serde(default)]
    id: Option<i64>,
    latitude: f64,
    longitude: f64,
}

impl LocationStore {
    /// Append every row of a comma-separated file to `addresses`.
    ///
    /// Returns the number of rows appended.
    pub fn import_addresses(&mut self, path: &Utf8Path) -> Result<u64, ImportError> {
        self.import_addresses_with(path, ImportOptions::default())
    }

    /// Append every row of a delimited file to `addresses`.
    pub fn import_addresses_with(
        &mut self,
        path: &Utf8Path,
        options: ImportOptions,
    ) -> Result<u64, ImportError> {
        self.import_file(LocationTable::Addresses, path, options)
    }

    /// Append every row of a comma-separated file to `stops`.
    ///
    /// Returns the number of rows appended.
    pub fn import_stops(&mut self, path: &Utf8Path) -> Result<u64, ImportError> {
        self.import_stops_with(path, ImportOptions::default())
    }

    /// Append every row of a delimited file to `stops`.
    pub fn import_stops_with(
        &mut self,
        path: &Utf8Path,
        options: ImportOptions,
    ) -> Result<u64, ImportError> {
        self.import_file(LocationTable::Stops, path, options)
    }

    fn import_file(
        &mut self,
        table: LocationTable,
        path: &Utf8Path,
        options: ImportOptions,
    ) -> Result<u64, ImportError> {
        let file = crate::fs::open_utf8_file(path).map_err(|source| ImportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let imported = self.import_reader(table, file, path, options)?;
        info!("imported {imported} {} rows from {path}", table.name());
        Ok(imported)
    }

    fn import_reader<R: Read>(
        &mut self,
        table: LocationTable,
        input: R,
        path: &Utf8Path,
        options: ImportOptions,
    ) -> Result<u64, ImportError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .trim(Trim::All)
            .from_reader(input);
        let headers = reader
            .headers()
            .map_err(|source| ImportError::ReadHeader {
                path: path.to_path_buf(),
                source,
            })?
            .clone();
        validate_header(&headers, table, path)?;

        let transaction_error = |operation: &'static str| {
            move |source| ImportError::Transaction {
                path: path.to_path_buf(),
                operation,
                source,
            }
        };

        let transaction = self
            .connection_mut()
            .transaction()
            .map_err(transaction_error("begin transaction"))?;
        let mut imported = 0_u64;
        {
            let mut insert = transaction
                .prepare(table.insert_sql())
                .map_err(transaction_error("prepare insert"))?;
            let mut record = StringRecord::new();
            while reader
                .read_record(&mut record)
                .map_err(|source| ImportError::ParseRow {
                    path: path.to_path_buf(),
                    line: csv_line(&source),
                    source,
                })?
            {
                let line = record.position().map_or(0, csv::Position::line);
                let row: LocationRecord =
                    record
                        .deserialize(Some(&headers))
                        .map_err(|source| ImportError::ParseRow {
                            path: path.to_path_buf(),
                            line,
                            source,
                        })?;
                insert
                    .execute((row.id, row.latitude, row.longitude))
                    .map_err(|source| ImportError::InsertRow {
                        path: path.to_path_buf(),
                        line,
                        table: table.name(),
                        source,
                    })?;
                imported += 1;
            }
        }
        transaction
            .commit()
            .map_err(transaction_error("commit transaction"))?;
        Ok(imported)
    }
}

fn validate_header(
    headers: &StringRecord,
    table: LocationTable,
    path: &Utf8Path,
) -> Result<(), ImportError> {
    let mut seen: Vec<&str> = Vec::with_capacity(headers.len());
    for column in headers {
        if !LocationTable::COLUMNS.contains(&column) {
            return Err(ImportError::UnknownColumn {
                path: path.to_path_buf(),
                column: column.to_owned(),
                table: table.name(),
            });
        }
        if seen.contains(&column) {
            return Err(ImportError::DuplicateColumn {
                path: path.to_path_buf(),
                column: column.to_owned(),
            });
        }
        seen.push(column);
    }

    match LocationTable::REQUIRED_COLUMNS
        .into_iter()
        .find(|required| !seen.contains(required))
    {
        Some(column) => Err(ImportError::MissingColumn {
            path: path.to_path_buf(),
            column,
        }),
        None => Ok(()),
    }
}

fn csv_line(error: &csv::Error) -> u64 {
    error.position().map_or(0, csv::Position::line)
}
