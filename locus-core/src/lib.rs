//! Core value types for the Locus location store.
//!
//! The crate holds the coordinate collaborator handed to and returned from
//! the store, together with typed row identifiers. It performs no I/O.

#![forbid(unsafe_code)]

pub mod ids;
pub mod location;

pub use ids::{AddressId, RouteId, StopId};
pub use location::{Located, MapLocation};
