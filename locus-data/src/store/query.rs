use locus_core::MapLocation;
use log::warn;
use rusqlite::OptionalExtension;

use super::{LocationStore, StoreError};

// The join matches route ids against address ids rather than
// `routes.address_id`. Kept as-is until the intended pairing is confirmed.
const ADDRESS_WITHOUT_ROUTE: &str = "SELECT addresses.latitude, addresses.longitude
    FROM addresses
    LEFT JOIN routes ON routes.id = addresses.id
    WHERE routes.id IS NULL
    ORDER BY addresses.id
    LIMIT 1";

impl LocationStore {
    /// Return the coordinates of the first address with no matching route.
    ///
    /// Fails with [`StoreError::NoAddressWithoutRoute`] when every address
    /// is matched, including when there are no addresses at all.
    pub fn address_without_route(&self) -> Result<MapLocation, StoreError> {
        let found = self
            .connection()
            .query_row(ADDRESS_WITHOUT_ROUTE, [], |row| {
                Ok(MapLocation::new(row.get(0)?, row.get(1)?))
            })
            .optional()
            .map_err(|source| StoreError::Query {
                operation: "address without route",
                source,
            })?;

        found.ok_or_else(|| {
            warn!("no address without a route is left");
            StoreError::NoAddressWithoutRoute
        })
    }
}
