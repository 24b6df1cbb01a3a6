//! Table definitions for the location store.

use log::info;
use rusqlite::{Error as SqliteError, Transaction};
use thiserror::Error;

use super::LocationStore;

/// Tables holding bare coordinates, the targets of bulk imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationTable {
    /// Delivery or destination points.
    Addresses,
    /// Waypoints and depots.
    Stops,
}

impl LocationTable {
    /// SQLite table name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Addresses => "addresses",
            Self::Stops => "stops",
        }
    }

    /// Columns accepted from import files, in table order.
    pub const COLUMNS: [&'static str; 3] = ["id", "latitude", "longitude"];

    /// Columns every import file must provide.
    pub const REQUIRED_COLUMNS: [&'static str; 2] = ["latitude", "longitude"];

    pub(crate) const fn insert_sql(self) -> &'static str {
        match self {
            Self::Addresses => "INSERT INTO addresses (id, latitude, longitude) VALUES (?1, ?2, ?3)",
            Self::Stops => "INSERT INTO stops (id, latitude, longitude) VALUES (?1, ?2, ?3)",
        }
    }
}

impl LocationStore {
    /// Create the `addresses`, `stops` and `routes` tables if they are absent.
    ///
    /// All statements run in one transaction that is committed before
    /// returning. Calling this on an initialised database changes nothing.
    ///
    /// # Examples
    /// ```
    /// use locus_data::LocationStore;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut store = LocationStore::open_in_memory()?;
    /// store.initialise()?;
    /// store.initialise()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn initialise(&mut self) -> Result<(), SchemaError> {
        let transaction =
            self.connection_mut()
                .transaction()
                .map_err(|source| SchemaError::Migration {
                    step: "begin schema transaction",
                    source,
                })?;

        create_location_table(&transaction, LocationTable::Addresses)?;
        create_location_table(&transaction, LocationTable::Stops)?;
        create_routes_table(&transaction)?;

        transaction
            .commit()
            .map_err(|source| SchemaError::Migration {
                step: "commit schema transaction",
                source,
            })?;
        info!("location store schema ready");
        Ok(())
    }
}

fn create_location_table(
    transaction: &Transaction<'_>,
    table: LocationTable,
) -> Result<(), SchemaError> {
    let (step, sql) = match table {
        LocationTable::Addresses => (
            "create addresses",
            "CREATE TABLE IF NOT EXISTS addresses (
                id INTEGER PRIMARY KEY,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            )",
        ),
        LocationTable::Stops => (
            "create stops",
            "CREATE TABLE IF NOT EXISTS stops (
                id INTEGER PRIMARY KEY,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            )",
        ),
    };
    run_migration_step(transaction, step, sql)
}

fn create_routes_table(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    // Foreign keys are declared but the store disables enforcement on every
    // connection; dangling references are accepted.
    run_migration_step(
        transaction,
        "create routes",
        "CREATE TABLE IF NOT EXISTS routes (
            id INTEGER PRIMARY KEY,
            address_id INTEGER NOT NULL,
            stop_id INTEGER NOT NULL,
            distance INTEGER NOT NULL,
            time INTEGER NOT NULL,
            FOREIGN KEY (address_id) REFERENCES addresses(id),
            FOREIGN KEY (stop_id) REFERENCES stops(id)
        )",
    )
}

fn run_migration_step(
    transaction: &Transaction<'_>,
    step: &'static str,
    sql: &str,
) -> Result<(), SchemaError> {
    transaction
        .execute(sql, [])
        .map(|_| ())
        .map_err(|source| SchemaError::Migration { step, source })
}

/// Errors raised when creating the location schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A schema statement failed.
    #[error("failed to execute schema step '{step}'")]
    Migration {
        /// Name of the failed step.
        step: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}
