//! SQLite-backed location store.
//!
//! The store is split into focused submodules:
//! - [`schema`] materialises the three location tables.
//! - `persistence` inserts single addresses, stops and routes.
//! - `query` answers the unrouted-address lookup.
//!
//! Bulk imports live in [`crate::import`] and extend [`LocationStore`] with
//! their own methods.
#![forbid(unsafe_code)]

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use rusqlite::Connection;

mod error;
mod persistence;
mod query;
pub mod schema;

pub use error::StoreError;
pub use schema::{LocationTable, SchemaError};

/// Default database file name used when no path is supplied.
pub const DEFAULT_DATABASE: &str = "db.sqlite3";

const IN_MEMORY: &str = ":memory:";

/// A single SQLite connection holding addresses, stops and routes.
///
/// The connection is opened on construction and released when the store is
/// dropped or explicitly [closed](Self::close).
///
/// # Examples
/// ```
/// use locus_core::MapLocation;
/// use locus_data::LocationStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = LocationStore::open_in_memory()?;
/// store.initialise()?;
/// store.add_address(&MapLocation::new(1.0, 2.0))?;
///
/// let unrouted = store.address_without_route()?;
/// assert_eq!(unrouted, MapLocation::new(1.0, 2.0));
/// store.close()?;
/// # Ok(())
/// # }
/// ```
pub struct LocationStore {
    connection: Connection,
    path: Option<Utf8PathBuf>,
}

impl fmt::Debug for LocationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationStore")
            .field("path", &self.path.as_deref().unwrap_or(Utf8Path::new(IN_MEMORY)))
            .finish_non_exhaustive()
    }
}

impl LocationStore {
    /// Open (or create) the database file at `path`.
    ///
    /// Missing parent directories are created first. The schema is not
    /// touched; call [`initialise`](Self::initialise) before writing.
    pub fn open(path: &Utf8Path) -> Result<Self, StoreError> {
        let created =
            crate::fs::ensure_parent_dir(path).map_err(|source| StoreError::CreateDirectory {
                path: path
                    .parent()
                    .map_or_else(Utf8PathBuf::new, Utf8Path::to_path_buf),
                source,
            })?;
        if let Some(dir) = created {
            debug!("ensured database directory {dir}");
        }
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        disable_foreign_keys(&connection, path)?;
        debug!("opened location store at {path}");
        Ok(Self {
            connection,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: Utf8PathBuf::from(IN_MEMORY),
            source,
        })?;
        disable_foreign_keys(&connection, Utf8Path::new(IN_MEMORY))?;
        Ok(Self {
            connection,
            path: None,
        })
    }

    /// Location of the database on disk, or `None` when held in memory.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Close the connection, reporting any failure to flush it.
    pub fn close(self) -> Result<(), StoreError> {
        self.connection
            .close()
            .map_err(|(_, source)| StoreError::Close { source })
    }

    pub(crate) const fn connection(&self) -> &Connection {
        &self.connection
    }

    pub(crate) const fn connection_mut(&mut self) -> &mut Connection {
        &mut self.connection
    }
}

/// Routes may reference addresses and stops that do not exist. The bundled
/// SQLite build enables foreign-key enforcement by default, so switch it off
/// per connection.
fn disable_foreign_keys(connection: &Connection, path: &Utf8Path) -> Result<(), StoreError> {
    connection
        .pragma_update(None, "foreign_keys", false)
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests;
