//! Types and functions for working with geographical positions.

use crate::mercator::{MAX_LONGITUDE, MIN_LONGITUDE};

/// Mean radius used by the Web Mercator projection, in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Geographical position with latitude and longitude, in degrees. Altitude is carried along, but
/// projections ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub altitude: Option<f64>,
}

/// Construct `Position` from latitude and longitude.
pub fn lat_lon(lat: f64, lon: f64) -> Position {
    Position {
        lat,
        lon,
        altitude: None,
    }
}

/// Construct `Position` from longitude and latitude. Note that it is common standard to write
/// coordinates starting with the latitude instead (e.g. `51.104465719934176, 17.075169894118684` is
/// the [Wroclaw's zoo](https://zoo.wroclaw.pl/en/)).
pub fn lon_lat(lon: f64, lat: f64) -> Position {
    lat_lon(lat, lon)
}

/// Bring any longitude into the [-180, 180) range.
pub fn wrap_longitude(lon: f64) -> f64 {
    let span = MAX_LONGITUDE - MIN_LONGITUDE;
    (lon - MIN_LONGITUDE).rem_euclid(span) + MIN_LONGITUDE
}

impl Position {
    pub fn with_altitude(self, altitude: f64) -> Self {
        Self {
            altitude: Some(altitude),
            ..self
        }
    }

    /// Same position, but with the longitude wrapped into [-180, 180).
    pub fn wrapped(self) -> Self {
        Self {
            lon: wrap_longitude(self.lon),
            ..self
        }
    }

    /// Great-circle distance in meters.
    /// <https://en.wikipedia.org/wiki/Haversine_formula>
    pub fn distance_to(&self, other: &Position) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let lon2 = other.lon.to_radians();

        let h = ((lat2 - lat1) / 2.).sin().powi(2)
            + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.).sin().powi(2);

        // Rounding errors may push `h` a bit above 1 for antipodal points.
        EARTH_RADIUS * 2. * h.sqrt().min(1.).asin()
    }

    /// Initial bearing towards `other`, in degrees within [0, 360).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = delta_lon.sin() * lat2.cos();
        let b = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

        (a.atan2(b).to_degrees() + 360.) % 360.
    }

    /// Position reached when travelling `distance` meters with the given initial `bearing`.
    /// <http://www.movable-type.co.uk/scripts/latlong.html>
    pub fn destination(&self, distance: f64, bearing: f64) -> Position {
        let angular = distance / EARTH_RADIUS;
        let bearing = bearing.to_radians();
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 =
            (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * lat2.sin());

        lat_lon(lat2.to_degrees(), lon2.to_degrees())
    }

    /// Plain average of both coordinates. Does not care about the date line.
    pub fn midpoint_with(&self, other: &Position) -> Position {
        lat_lon((self.lat + other.lat) / 2., (self.lon + other.lon) / 2.)
    }
}

impl From<geo_types::Point<f64>> for Position {
    fn from(point: geo_types::Point<f64>) -> Self {
        lon_lat(point.x(), point.y())
    }
}

impl From<Position> for geo_types::Point<f64> {
    fn from(position: Position) -> Self {
        geo_types::Point::new(position.lon, position.lat)
    }
}

impl From<geo_types::Coord<f64>> for Position {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        lon_lat(coord.x, coord.y)
    }
}
