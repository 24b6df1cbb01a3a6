use locus_core::{AddressId, Located, RouteId, StopId};
use log::debug;

use super::{LocationStore, LocationTable, StoreError};

impl LocationStore {
    /// Insert one address and commit it.
    ///
    /// Returns the id SQLite assigned to the new row.
    pub fn add_address<L: Located + ?Sized>(&self, location: &L) -> Result<AddressId, StoreError> {
        self.insert_location(LocationTable::Addresses, location)
            .map(AddressId::new)
    }

    /// Insert one stop and commit it.
    ///
    /// Returns the id SQLite assigned to the new row.
    pub fn add_stop<L: Located + ?Sized>(&self, location: &L) -> Result<StopId, StoreError> {
        self.insert_location(LocationTable::Stops, location)
            .map(StopId::new)
    }

    /// Insert one route linking an address to a stop and commit it.
    ///
    /// Neither endpoint is checked for existence, so a route may reference
    /// ids that are absent from `addresses` or `stops`.
    ///
    /// # Examples
    /// ```
    /// use locus_core::{AddressId, StopId};
    /// use locus_data::LocationStore;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut store = LocationStore::open_in_memory()?;
    /// store.initialise()?;
    /// let route = store.add_route(AddressId::new(1), StopId::new(9), 1_200, 300)?;
    /// assert_eq!(route.get(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_route(
        &self,
        address_id: AddressId,
        stop_id: StopId,
        distance: i64,
        time: i64,
    ) -> Result<RouteId, StoreError> {
        self.connection()
            .execute(
                "INSERT INTO routes (address_id, stop_id, distance, time) VALUES (?1, ?2, ?3, ?4)",
                (address_id.get(), stop_id.get(), distance, time),
            )
            .map_err(|source| StoreError::Insert {
                table: "routes",
                source,
            })?;
        let id = RouteId::new(self.connection().last_insert_rowid());
        debug!("added route {id} from address {address_id} to stop {stop_id}");
        Ok(id)
    }

    fn insert_location<L: Located + ?Sized>(
        &self,
        table: LocationTable,
        location: &L,
    ) -> Result<i64, StoreError> {
        let id: Option<i64> = None;
        self.connection()
            .execute(
                table.insert_sql(),
                (id, location.latitude(), location.longitude()),
            )
            .map_err(|source| StoreError::Insert {
                table: table.name(),
                source,
            })?;
        let row_id = self.connection().last_insert_rowid();
        debug!("added {} row {row_id}", table.name());
        Ok(row_id)
    }
}
