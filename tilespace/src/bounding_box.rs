use crate::mercator::{MAX_LONGITUDE, MIN_LONGITUDE};
use crate::position::{Position, lat_lon, wrap_longitude};

/// Geographical area between two latitudes and two longitudes. When `west` is greater than `east`,
/// the box crosses the date line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct BoundingBox {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, east: f64, south: f64, west: f64) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    /// Smallest box enclosing all positions. `None` if there are none.
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        positions.into_iter().fold(None, |bbox, position| {
            Some(match bbox {
                None => Self::new(position.lat, position.lon, position.lat, position.lon),
                Some(bbox) => Self::new(
                    bbox.north.max(position.lat),
                    bbox.east.max(position.lon),
                    bbox.south.min(position.lat),
                    bbox.west.min(position.lon),
                ),
            })
        })
    }

    pub fn crosses_date_line(&self) -> bool {
        self.east < self.west
    }

    pub fn center_latitude(&self) -> f64 {
        (self.north + self.south) / 2.
    }

    pub fn center_longitude(&self) -> f64 {
        let mut longitude = (self.east + self.west) / 2.;
        if self.crosses_date_line() {
            longitude += MAX_LONGITUDE;
        }
        // The date line itself is reported as 180.
        if longitude == MAX_LONGITUDE {
            return longitude;
        }
        wrap_longitude(longitude)
    }

    pub fn center(&self) -> Position {
        lat_lon(self.center_latitude(), self.center_longitude())
    }

    pub fn lat_span(&self) -> f64 {
        (self.north - self.south).abs()
    }

    pub fn lon_span(&self) -> f64 {
        if self.crosses_date_line() {
            self.east - self.west + MAX_LONGITUDE - MIN_LONGITUDE
        } else {
            self.east - self.west
        }
    }

    /// Whether the position lies strictly inside. Positions on the edges are outside.
    pub fn contains(&self, position: &Position) -> bool {
        let latitude_inside = position.lat < self.north && position.lat > self.south;
        let longitude_inside = if self.crosses_date_line() {
            position.lon > self.west || position.lon < self.east
        } else {
            position.lon > self.west && position.lon < self.east
        };
        latitude_inside && longitude_inside
    }

    /// Box enclosing both. Does not try to be smart about the date line.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        Self::new(
            self.north.max(other.north),
            self.east.max(other.east),
            self.south.min(other.south),
            self.west.min(other.west),
        )
    }

    /// Box with the same center, but both spans multiplied by `scale`.
    pub fn increase_by_scale(&self, scale: f64) -> BoundingBox {
        let center = self.center();
        let half_lat = self.lat_span() * scale / 2.;
        let half_lon = self.lon_span() * scale / 2.;
        Self::new(
            center.lat + half_lat,
            center.lon + half_lon,
            center.lat - half_lat,
            center.lon - half_lon,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bounding_box_of_positions() {
        let positions = [
            lat_lon(51.1, 17.0),
            lat_lon(52.2, 21.0),
            lat_lon(50.0, 19.9),
        ];

        let bbox = BoundingBox::from_positions(&positions);
        assert_eq!(Some(BoundingBox::new(52.2, 21.0, 50.0, 17.0)), bbox);
        assert_eq!(None, BoundingBox::from_positions(&[]));
    }

    #[test]
    fn center_of_a_regular_box() {
        let bbox = BoundingBox::new(10., 20., -10., 0.);
        assert_relative_eq!(0., bbox.center().lat);
        assert_relative_eq!(10., bbox.center().lon);
        assert_relative_eq!(20., bbox.lat_span());
        assert_relative_eq!(20., bbox.lon_span());
    }

    #[test]
    fn center_of_a_box_crossing_date_line() {
        let bbox = BoundingBox::new(10., -170., -10., 170.);
        assert!(bbox.crosses_date_line());
        assert_relative_eq!(180., bbox.center_longitude());
        assert_relative_eq!(20., bbox.lon_span());

        let bbox = BoundingBox::new(10., -160., -10., 170.);
        assert_relative_eq!(-175., bbox.center_longitude());
        assert_relative_eq!(30., bbox.lon_span());
    }

    #[test]
    fn center_of_a_box_with_out_of_range_longitudes() {
        assert_relative_eq!(-170., BoundingBox::new(10., 560., -10., 540.).center_longitude());
        assert!(
            BoundingBox::new(10., f64::INFINITY, -10., 0.)
                .center_longitude()
                .is_nan()
        );
        assert!(
            BoundingBox::new(10., 0., -10., f64::NEG_INFINITY)
                .center_longitude()
                .is_nan()
        );
    }

    #[test]
    fn containment_is_exclusive() {
        let bbox = BoundingBox::new(10., 20., -10., 0.);
        assert!(bbox.contains(&lat_lon(0., 10.)));
        assert!(!bbox.contains(&lat_lon(10., 10.)));
        assert!(!bbox.contains(&lat_lon(0., 0.)));
        assert!(!bbox.contains(&lat_lon(0., 30.)));

        let across = BoundingBox::new(10., -170., -10., 170.);
        assert!(across.contains(&lat_lon(0., 175.)));
        assert!(across.contains(&lat_lon(0., -175.)));
        assert!(!across.contains(&lat_lon(0., 0.)));
    }

    #[test]
    fn union_and_scaling() {
        let a = BoundingBox::new(10., 20., 0., 10.);
        let b = BoundingBox::new(5., 30., -5., 15.);
        assert_eq!(BoundingBox::new(10., 30., -5., 10.), a.union(&b));

        let scaled = a.increase_by_scale(2.);
        assert_relative_eq!(15., scaled.north);
        assert_relative_eq!(-5., scaled.south);
        assert_relative_eq!(25., scaled.east);
        assert_relative_eq!(5., scaled.west);
    }
}
