//! Facade crate for the Locus location store.
//!
//! This crate re-exports the coordinate types and the SQLite-backed store so
//! applications depend on a single crate.

#![forbid(unsafe_code)]

pub use locus_core::{AddressId, Located, MapLocation, RouteId, StopId};
pub use locus_data::{
    ImportError, ImportOptions, LocationStore, LocationTable, SchemaError, StoreError,
};
