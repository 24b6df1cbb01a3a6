//! Coordinate collaborator accepted and returned by the store.
//!
//! Coordinates are WGS84 degrees. When converting to and from `geo` types the
//! usual axis order applies: `x = longitude`, `y = latitude`.

use geo::{Coord, Point};

/// A value exposing a latitude and a longitude.
///
/// Store insert operations are bounded on this trait, so a value lacking
/// either coordinate is rejected by the compiler.
///
/// # Examples
/// ```
/// use locus_core::{Located, MapLocation};
///
/// struct Depot {
///     lat: f64,
///     lon: f64,
/// }
///
/// impl Located for Depot {
///     fn latitude(&self) -> f64 {
///         self.lat
///     }
///
///     fn longitude(&self) -> f64 {
///         self.lon
///     }
/// }
///
/// let depot = Depot { lat: 52.5, lon: 13.4 };
/// assert_eq!(MapLocation::from_located(&depot), MapLocation::new(52.5, 13.4));
/// ```
///
/// A type that only knows its latitude cannot satisfy the bound:
///
/// ```compile_fail
/// use locus_core::Located;
///
/// struct HalfKnown {
///     lat: f64,
/// }
///
/// impl Located for HalfKnown {
///     fn latitude(&self) -> f64 {
///         self.lat
///     }
/// }
/// ```
pub trait Located {
    /// Latitude in degrees.
    fn latitude(&self) -> f64;

    /// Longitude in degrees.
    fn longitude(&self) -> f64;
}

impl<T: Located + ?Sized> Located for &T {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }

    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
}

impl Located for Coord<f64> {
    fn latitude(&self) -> f64 {
        self.y
    }

    fn longitude(&self) -> f64 {
        self.x
    }
}

impl Located for Point<f64> {
    fn latitude(&self) -> f64 {
        self.y()
    }

    fn longitude(&self) -> f64 {
        self.x()
    }
}

/// A plain latitude/longitude pair.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::MapLocation;
///
/// let location = MapLocation::new(1.0, 2.0);
/// assert_eq!(location.to_coord(), Coord { x: 2.0, y: 1.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLocation {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl MapLocation {
    /// Construct a location from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Copy the coordinates out of any [`Located`] value.
    #[must_use]
    pub fn from_located<L: Located + ?Sized>(located: &L) -> Self {
        Self::new(located.latitude(), located.longitude())
    }

    /// Convert into a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl Located for MapLocation {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<Coord<f64>> for MapLocation {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<Point<f64>> for MapLocation {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<MapLocation> for Point<f64> {
    fn from(location: MapLocation) -> Self {
        Self::from(location.to_coord())
    }
}
