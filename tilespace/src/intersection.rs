//! Intersection of two segments on the plane.
//!
//! Computations are done on `f64`, because cross products of large pixel coordinates overflow
//! even 64-bit integers.

use crate::planar::{PlanarPoint, round_half_up};

/// Intersection of segments AB and CD, if there is one.
pub fn intersection(
    a: &PlanarPoint,
    b: &PlanarPoint,
    c: &PlanarPoint,
    d: &PlanarPoint,
) -> Option<PlanarPoint> {
    intersection_f64(
        (a.x as f64, a.y as f64),
        (b.x as f64, b.y as f64),
        (c.x as f64, c.y as f64),
        (d.x as f64, d.y as f64),
    )
}

/// Intersection of segments AB and CD given as `(x, y)` pairs, rounded to the nearest pixel.
///
/// Overlapping collinear segments have infinitely many common points. The middle of the overlap
/// is returned then.
pub fn intersection_f64(
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
    d: (f64, f64),
) -> Option<PlanarPoint> {
    let segments = Segments { a, b, c, d };

    if let Some(parallel) = segments.parallel() {
        return parallel;
    }

    if let Some(point) = segments
        .vertical(false)
        .or_else(|| segments.vertical(true))
        .or_else(|| segments.horizontal(false))
        .or_else(|| segments.horizontal(true))
    {
        return Some(point);
    }

    let Segments { a, b, c, d } = segments;
    let det = (a.0 - b.0) * (c.1 - d.1) - (a.1 - b.1) * (c.0 - d.0);
    if det == 0. {
        return None;
    }

    let ab = a.0 * b.1 - a.1 * b.0;
    let cd = c.0 * d.1 - c.1 * d.0;
    let x = ((c.0 - d.0) * ab - (a.0 - b.0) * cd) / det;
    let y = ((c.1 - d.1) * ab - (a.1 - b.1) * cd) / det;
    segments.check(x, y)
}

#[derive(Clone, Copy)]
struct Segments {
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
    d: (f64, f64),
}

impl Segments {
    fn swapped(&self) -> Segments {
        Segments {
            a: self.c,
            b: self.d,
            c: self.a,
            d: self.b,
        }
    }

    /// `Some` when segments are parallel, in which case the inner value is the final answer.
    fn parallel(&self) -> Option<Option<PlanarPoint>> {
        let Segments { a, b, c, d } = *self;

        if a.0 == b.0 {
            return self.parallel_vertical();
        }
        if c.0 == d.0 {
            return self.swapped().parallel_vertical();
        }

        // Both can be written as "y = k * x + m".
        let k1 = (b.1 - a.1) / (b.0 - a.0);
        let k2 = (d.1 - c.1) / (d.0 - c.0);
        if k1 != k2 {
            return None;
        }

        let m1 = a.1 - k1 * a.0;
        let m2 = c.1 - k2 * c.0;
        if m1 != m2 {
            // Parallel, but not on the same line.
            return None;
        }

        Some(self.check(middle(a.0, b.0, c.0, d.0), middle(a.1, b.1, c.1, d.1)))
    }

    fn parallel_vertical(&self) -> Option<Option<PlanarPoint>> {
        let Segments { a, b, c, d } = *self;
        if a.0 != b.0 || c.0 != d.0 || a.0 != c.0 {
            return None;
        }
        Some(self.check(a.0, middle(a.1, b.1, c.1, d.1)))
    }

    /// Solve without the slope when the first (or, if `swap`, the second) segment is vertical.
    fn vertical(&self, swap: bool) -> Option<PlanarPoint> {
        let Segments { a, b, c, d } = if swap { self.swapped() } else { *self };
        if a.0 != b.0 || c.0 == d.0 {
            return None;
        }
        let k = (a.0 - c.0) / (d.0 - c.0);
        self.check(a.0, k * (d.1 - c.1) + c.1)
    }

    fn horizontal(&self, swap: bool) -> Option<PlanarPoint> {
        let Segments { a, b, c, d } = if swap { self.swapped() } else { *self };
        if a.1 != b.1 || c.1 == d.1 {
            return None;
        }
        let k = (a.1 - c.1) / (d.1 - c.1);
        self.check(k * (d.0 - c.0) + c.0, a.1)
    }

    /// Accept the point only if it belongs to both segments' bounding boxes.
    fn check(&self, x: f64, y: f64) -> Option<PlanarPoint> {
        let Segments { a, b, c, d } = *self;
        let within = |value: f64, first: f64, second: f64| {
            value >= first.min(second) && value <= first.max(second)
        };

        (within(x, a.0, b.0) && within(x, c.0, d.0) && within(y, a.1, b.1) && within(y, c.1, d.1))
            .then(|| PlanarPoint::new(round_half_up(x), round_half_up(y)))
    }
}

/// Middle of the overlap of [a, b] and [c, d].
fn middle(a: f64, b: f64, c: f64, d: f64) -> f64 {
    (a.max(b).min(c.max(d)) + a.min(b).max(c.min(d))) / 2.
}
