use camino::Utf8PathBuf;
use rusqlite::Error as SqliteError;
use thiserror::Error;

/// Errors raised when opening the store or running single-row operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Creating the directory that holds the database failed.
    #[error("failed to create parent directory {path:?}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Requested database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Inserting a single row failed.
    #[error("failed to insert into {table}")]
    Insert {
        /// Target table.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Running a lookup query failed.
    #[error("failed to query {operation}")]
    Query {
        /// Description of the failed lookup.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Every address already has a route (or there are no addresses).
    #[error("no address without a route was found")]
    NoAddressWithoutRoute,
    /// Closing the connection failed.
    #[error("failed to close SQLite connection")]
    Close {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}
