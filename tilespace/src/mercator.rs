//! Project the lat/lon coordinates into a normalized [0, 1] plane using the Web Mercator.
//! <https://en.wikipedia.org/wiki/Web_Mercator_projection>
//! <https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames>
//!
//! Every function takes a `wrap` flag. When set, the input is clipped into the legal range before
//! being transformed, and so is the output. When not set, values are extrapolated, which is what
//! bounding box computations need when they deliberately go beyond the poles or the date line.

use std::f64::consts::PI;

// zoom level   tile coverage  number of tiles  tile size(*) in degrees
// 0            1 tile         1 tile           360° x 170.1022°
// 1            2 × 2 tiles    4 tiles          180° x 85.0511°
// 2            4 × 4 tiles    16 tiles         90° x [variable]

/// Latitude at which the Mercator square ends, `atan(sinh(π))` in degrees.
pub const MAX_LATITUDE: f64 = 85.05112877980659;
pub const MIN_LATITUDE: f64 = -MAX_LATITUDE;
pub const MAX_LONGITUDE: f64 = 180.;
pub const MIN_LONGITUDE: f64 = -180.;

pub fn clip(value: f64, min: f64, max: f64) -> f64 {
    value.clamp(min, max)
}

pub fn clip_latitude(latitude: f64) -> f64 {
    clip(latitude, MIN_LATITUDE, MAX_LATITUDE)
}

pub fn clip_longitude(longitude: f64) -> f64 {
    clip(longitude, MIN_LONGITUDE, MAX_LONGITUDE)
}

/// Floor a double into a long. Truncation (`as`) would round negative values the wrong way,
/// e.g. -0.4 must become -1, not 0.
pub fn floor_to_i64(value: f64) -> i64 {
    value.floor() as i64
}

pub fn x01_from_longitude(longitude: f64, wrap: bool) -> f64 {
    let longitude = if wrap {
        clip_longitude(longitude)
    } else {
        longitude
    };
    let result = (longitude - MIN_LONGITUDE) / (MAX_LONGITUDE - MIN_LONGITUDE);
    if wrap { clip(result, 0., 1.) } else { result }
}

pub fn y01_from_latitude(latitude: f64, wrap: bool) -> f64 {
    let latitude = if wrap {
        clip_latitude(latitude)
    } else {
        latitude
    };
    let sinus = latitude.to_radians().sin();
    let result = 0.5 - ((1. + sinus) / (1. - sinus)).ln() / (4. * PI);
    if wrap { clip(result, 0., 1.) } else { result }
}

pub fn longitude_from_x01(x01: f64, wrap: bool) -> f64 {
    let x01 = if wrap { clip(x01, 0., 1.) } else { x01 };
    let longitude = MIN_LONGITUDE + (MAX_LONGITUDE - MIN_LONGITUDE) * x01;
    if wrap {
        clip_longitude(longitude)
    } else {
        longitude
    }
}

/// Inverse of [`y01_from_latitude`], using the Gudermannian function.
pub fn latitude_from_y01(y01: f64, wrap: bool) -> f64 {
    let y01 = if wrap { clip(y01, 0., 1.) } else { y01 };
    let latitude = 90. - 360. * ((y01 - 0.5) * 2. * PI).exp().atan() / PI;
    if wrap {
        clip_latitude(latitude)
    } else {
        latitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const XY01_DELTA: f64 = 1e-10;
    const LAT_LON_DELTA: f64 = 1e-10;

    #[test]
    fn longitude_to_x01() {
        assert_eq!(1.0, x01_from_longitude(180., true));
        assert_eq!(0.0, x01_from_longitude(-180., true));
        assert_eq!(0.5, x01_from_longitude(0., true));

        let iterations = 10;
        for i in 0..=iterations {
            let longitude = MIN_LONGITUDE + i as f64 * 360. / iterations as f64;
            assert_abs_diff_eq!(
                i as f64 / iterations as f64,
                x01_from_longitude(longitude, true),
                epsilon = XY01_DELTA
            );
        }
    }

    #[test]
    fn latitude_to_y01() {
        assert_abs_diff_eq!(0., y01_from_latitude(MAX_LATITUDE, true), epsilon = XY01_DELTA);
        assert_abs_diff_eq!(0.5, y01_from_latitude(0., true), epsilon = XY01_DELTA);
        assert_abs_diff_eq!(1., y01_from_latitude(MIN_LATITUDE, true), epsilon = XY01_DELTA);
    }

    #[test]
    fn wrapping_clips_and_no_wrapping_extrapolates() {
        assert_eq!(1.0, x01_from_longitude(200., true));
        assert_abs_diff_eq!(
            x01_from_longitude(200., false),
            380. / 360.,
            epsilon = XY01_DELTA
        );

        assert_eq!(0.0, y01_from_latitude(89., true));
        assert!(y01_from_latitude(89., false) < 0.);
        assert!(y01_from_latitude(-89., false) > 1.);
    }

    #[test]
    fn x01_to_longitude() {
        assert_abs_diff_eq!(MIN_LONGITUDE, longitude_from_x01(0., true), epsilon = LAT_LON_DELTA);
        assert_abs_diff_eq!(0., longitude_from_x01(0.5, true), epsilon = LAT_LON_DELTA);
        assert_abs_diff_eq!(MAX_LONGITUDE, longitude_from_x01(1., true), epsilon = LAT_LON_DELTA);
        assert_abs_diff_eq!(MAX_LONGITUDE, longitude_from_x01(1.2, true), epsilon = LAT_LON_DELTA);
        assert_abs_diff_eq!(252., longitude_from_x01(1.2, false), epsilon = LAT_LON_DELTA);
    }

    #[test]
    fn y01_to_latitude() {
        assert_abs_diff_eq!(MAX_LATITUDE, latitude_from_y01(0., true), epsilon = LAT_LON_DELTA);
        assert_abs_diff_eq!(0., latitude_from_y01(0.5, true), epsilon = LAT_LON_DELTA);
        assert_abs_diff_eq!(MIN_LATITUDE, latitude_from_y01(1., true), epsilon = LAT_LON_DELTA);
    }

    #[test]
    fn there_and_back() {
        for i in 0..=100 {
            let latitude = MIN_LATITUDE + i as f64 * (MAX_LATITUDE - MIN_LATITUDE) / 100.;
            assert_abs_diff_eq!(
                latitude,
                latitude_from_y01(y01_from_latitude(latitude, true), true),
                epsilon = LAT_LON_DELTA
            );

            let longitude = MIN_LONGITUDE + i as f64 * 3.6;
            assert_abs_diff_eq!(
                longitude,
                longitude_from_x01(x01_from_longitude(longitude, true), true),
                epsilon = LAT_LON_DELTA
            );
        }
    }

    #[test]
    fn flooring_negative_values() {
        assert_eq!(-1, floor_to_i64(-0.4));
        assert_eq!(0, floor_to_i64(0.4));
        assert_eq!(-2, floor_to_i64(-1.5));
    }
}
