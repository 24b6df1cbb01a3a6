//! Unit tests for the location store.

use super::*;
use geo::Coord;
use locus_core::{AddressId, MapLocation, StopId};
use rstest::{fixture, rstest};

mod support {
    include!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/support/mod.rs"));
}

use support::{Scratch, count_rows, location_rows};

#[fixture]
fn store() -> LocationStore {
    let mut store = LocationStore::open_in_memory().expect("open in-memory store");
    store.initialise().expect("initialise schema");
    store
}

fn table_names(store: &LocationStore) -> Vec<String> {
    let mut statement = store
        .connection()
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .expect("prepare select");
    statement
        .query_map([], |row| row.get(0))
        .expect("query tables")
        .collect::<Result<_, _>>()
        .expect("collect tables")
}

fn route_rows(store: &LocationStore) -> Vec<(i64, i64, i64, i64, i64)> {
    let mut statement = store
        .connection()
        .prepare("SELECT id, address_id, stop_id, distance, time FROM routes ORDER BY id")
        .expect("prepare select");
    statement
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })
        .expect("query routes")
        .collect::<Result<_, _>>()
        .expect("collect routes")
}

#[rstest]
fn initialise_is_idempotent(mut store: LocationStore) -> Result<(), SchemaError> {
    store.initialise()?;
    store.initialise()?;

    assert_eq!(table_names(&store), vec!["addresses", "routes", "stops"]);
    Ok(())
}

#[rstest]
fn add_address_inserts_one_row() -> Result<(), StoreError> {
    let scratch = Scratch::new();
    let mut store = LocationStore::open(&scratch.database())?;
    store.initialise().expect("initialise schema");

    let id = store.add_address(&MapLocation::new(1.0, 2.0))?;
    store.close()?;

    assert_eq!(id, AddressId::new(1));
    assert_eq!(
        location_rows(&scratch.database(), "addresses"),
        vec![(1, 1.0, 2.0)]
    );
    assert_eq!(count_rows(&scratch.database(), "stops"), 0);
    Ok(())
}

#[rstest]
fn add_stop_accepts_geo_coordinates(store: LocationStore) -> Result<(), StoreError> {
    let first = store.add_stop(&Coord { x: 13.4, y: 52.5 })?;
    let second = store.add_stop(&geo::Point::new(-0.12, 51.5))?;

    assert_eq!((first, second), (StopId::new(1), StopId::new(2)));
    let stored: Vec<(f64, f64)> = {
        let mut statement = store
            .connection()
            .prepare("SELECT latitude, longitude FROM stops ORDER BY id")
            .expect("prepare select");
        statement
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .expect("query stops")
            .collect::<Result<_, _>>()
            .expect("collect stops")
    };
    assert_eq!(stored, vec![(52.5, 13.4), (51.5, -0.12)]);
    Ok(())
}

#[rstest]
fn add_route_stores_exact_values(store: LocationStore) -> Result<(), StoreError> {
    let address = store.add_address(&MapLocation::new(1.0, 2.0))?;
    let stop = store.add_stop(&MapLocation::new(3.0, 4.0))?;

    let route = store.add_route(address, stop, 1_500, 420)?;

    assert_eq!(route.get(), 1);
    assert_eq!(route_rows(&store), vec![(1, 1, 1, 1_500, 420)]);
    Ok(())
}

#[rstest]
fn add_route_accepts_dangling_references(store: LocationStore) -> Result<(), StoreError> {
    let route = store.add_route(AddressId::new(404), StopId::new(405), 10, 20)?;

    assert_eq!(route_rows(&store), vec![(route.get(), 404, 405, 10, 20)]);
    Ok(())
}

fn foreign_keys_enabled(store: &LocationStore) -> bool {
    store
        .connection()
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .expect("read foreign_keys pragma")
}

#[rstest]
fn foreign_key_enforcement_is_disabled() -> Result<(), StoreError> {
    let scratch = Scratch::new();
    let on_disk = LocationStore::open(&scratch.database())?;
    let in_memory = LocationStore::open_in_memory()?;

    assert!(!foreign_keys_enabled(&on_disk));
    assert!(!foreign_keys_enabled(&in_memory));
    Ok(())
}

#[rstest]
fn on_disk_store_accepts_dangling_routes() -> Result<(), StoreError> {
    let scratch = Scratch::new();
    let mut store = LocationStore::open(&scratch.database())?;
    store.initialise().expect("initialise schema");

    store.add_address(&MapLocation::new(1.0, 2.0))?;
    let route = store.add_route(AddressId::new(1), StopId::new(99), 5, 6)?;
    store.close()?;

    assert_eq!(route.get(), 1);
    assert_eq!(count_rows(&scratch.database(), "routes"), 1);
    Ok(())
}

#[rstest]
fn insert_without_schema_fails() {
    let store = LocationStore::open_in_memory().expect("open in-memory store");

    let err = store
        .add_address(&MapLocation::new(1.0, 2.0))
        .expect_err("addresses table is missing");
    assert!(matches!(
        err,
        StoreError::Insert {
            table: "addresses",
            ..
        }
    ));
}

#[rstest]
fn unrouted_address_is_returned(store: LocationStore) -> Result<(), StoreError> {
    store.add_address(&MapLocation::new(1.0, 2.0))?;

    assert_eq!(store.address_without_route()?, MapLocation::new(1.0, 2.0));
    Ok(())
}

#[rstest]
fn unrouted_lookup_takes_lowest_address_id(store: LocationStore) -> Result<(), StoreError> {
    store.add_address(&MapLocation::new(5.0, 6.0))?;
    store.add_address(&MapLocation::new(7.0, 8.0))?;

    assert_eq!(store.address_without_route()?, MapLocation::new(5.0, 6.0));
    Ok(())
}

#[rstest]
fn unrouted_lookup_matches_route_ids_against_address_ids(
    store: LocationStore,
) -> Result<(), StoreError> {
    let first = store.add_address(&MapLocation::new(1.0, 1.0))?;
    store.add_address(&MapLocation::new(2.0, 2.0))?;
    let stop = store.add_stop(&MapLocation::new(0.0, 0.0))?;
    // Route 1 points at address 2, yet it pairs with address 1 by id.
    store.add_route(AddressId::new(2), stop, 1, 1)?;

    assert_eq!(first.get(), 1);
    assert_eq!(store.address_without_route()?, MapLocation::new(2.0, 2.0));
    Ok(())
}

#[rstest]
fn unrouted_lookup_fails_on_empty_store(store: LocationStore) {
    let err = store
        .address_without_route()
        .expect_err("no addresses are stored");
    assert!(matches!(err, StoreError::NoAddressWithoutRoute));
}

#[rstest]
fn unrouted_lookup_fails_when_every_address_is_matched(
    store: LocationStore,
) -> Result<(), StoreError> {
    let address = store.add_address(&MapLocation::new(1.0, 2.0))?;
    let stop = store.add_stop(&MapLocation::new(3.0, 4.0))?;
    store.add_route(address, stop, 100, 60)?;

    let err = store
        .address_without_route()
        .expect_err("the only address is matched");
    assert!(matches!(err, StoreError::NoAddressWithoutRoute));
    Ok(())
}

#[rstest]
fn open_creates_nested_directories() -> Result<(), StoreError> {
    let scratch = Scratch::new();
    let nested = scratch.root().join("nested/deeper/db.sqlite3");

    let store = LocationStore::open(&nested)?;

    assert_eq!(store.path(), Some(nested.as_path()));
    assert!(nested.exists(), "database should be created at nested path");
    store.close()
}

/// Express `target` relative to the current directory, climbing to the root
/// with `..` segments.
fn relative_to_cwd(target: &Utf8Path) -> Utf8PathBuf {
    let cwd = std::env::current_dir().expect("current dir");
    let depth = cwd.components().count().saturating_sub(1);
    let mut relative: Utf8PathBuf = std::iter::repeat_n("..", depth).collect();
    relative.push(target.strip_prefix("/").expect("absolute temp path"));
    relative
}

#[rstest]
fn open_follows_parent_segments_in_relative_paths() -> Result<(), StoreError> {
    let scratch = Scratch::new();
    std::fs::create_dir(scratch.root().join("data").as_std_path()).expect("create data dir");
    let relative = relative_to_cwd(&scratch.root().join("data/db.sqlite3"));
    assert!(relative.starts_with(".."));

    let store = LocationStore::open(&relative)?;
    store.close()?;

    assert!(scratch.root().join("data/db.sqlite3").is_file());
    Ok(())
}

#[rstest]
fn in_memory_store_has_no_path() {
    let store = LocationStore::open_in_memory().expect("open in-memory store");
    assert_eq!(store.path(), None);
    assert!(format!("{store:?}").contains(":memory:"));
}
