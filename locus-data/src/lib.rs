//! Data access for the Locus location store.
//!
//! Responsibilities:
//! - Materialise the `addresses`, `stops` and `routes` tables.
//! - Bulk-load addresses and stops from delimited files.
//! - Insert single rows and answer the unrouted-address lookup.
//!
//! Boundaries:
//! - One connection per [`LocationStore`]; callers serialise access.
//! - Referential integrity between routes and their endpoints is not
//!   enforced here.
//!
//! Invariants:
//! - Schema creation is idempotent.
//! - Every single-row mutation commits before returning.
#![forbid(unsafe_code)]

mod fs;
pub mod import;
pub mod store;

pub use import::{ImportError, ImportOptions};
pub use store::{LocationStore, LocationTable, SchemaError, StoreError};
