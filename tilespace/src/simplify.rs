//! Douglas-Peucker line simplification.

use crate::planar::PlanarPoint;
use crate::position::Position;

/// Anything with two planar coordinates. The tolerance passed to [`reduce_with_tolerance`] is
/// expressed in the same units.
pub trait Coordinates {
    fn coordinates(&self) -> (f64, f64);
}

impl Coordinates for PlanarPoint {
    fn coordinates(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

/// Degrees, longitude first.
impl Coordinates for Position {
    fn coordinates(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }
}

impl Coordinates for geo_types::Coord<f64> {
    fn coordinates(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Distance from `point` to the line going through `start` and `end`, computed from the area of
/// the triangle they make. Falls back to the distance to `start` when the line is degenerate.
pub fn orthogonal_distance<P: Coordinates>(point: &P, start: &P, end: &P) -> f64 {
    let (px, py) = point.coordinates();
    let (sx, sy) = start.coordinates();
    let (ex, ey) = end.coordinates();

    let bottom = (sx - ex).hypot(sy - ey);
    if bottom == 0. {
        return (px - sx).hypot(py - sy);
    }

    let area = ((sx * ey + ex * py + px * sy - ex * sy - px * ey - sx * py) / 2.).abs();
    area / bottom * 2.
}

/// Drop points which deviate from the shape by no more than `tolerance`. The first and the last
/// point are always kept. Shapes with less than three points, or a non-positive tolerance, are
/// returned as they are.
pub fn reduce_with_tolerance<P: Coordinates + Clone>(shape: &[P], tolerance: f64) -> Vec<P> {
    let n = shape.len();
    if tolerance <= 0. || n < 3 {
        return shape.to_vec();
    }

    let mut marked = vec![false; n];
    marked[0] = true;
    marked[n - 1] = true;

    let mut ranges = vec![(0, n - 1)];
    while let Some((first, last)) = ranges.pop() {
        if last <= first + 1 {
            continue;
        }

        let mut max_distance = 0.;
        let mut farthest = first;
        for (index, point) in shape.iter().enumerate().take(last).skip(first + 1) {
            let distance = orthogonal_distance(point, &shape[first], &shape[last]);
            if distance > max_distance {
                max_distance = distance;
                farthest = index;
            }
        }

        if max_distance > tolerance {
            marked[farthest] = true;
            ranges.push((first, farthest));
            ranges.push((farthest, last));
        }
    }

    shape
        .iter()
        .zip(marked)
        .filter_map(|(point, keep)| keep.then(|| point.clone()))
        .collect()
}
