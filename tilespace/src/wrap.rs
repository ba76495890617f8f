//! World repetition.
//!
//! Longitude is periodic, so at low zoom levels a path can be drawn at several places, one world
//! apart. These functions pick the copy which is the most visible.

use crate::planar::{PlanarPoint, PlanarRect};

/// Which axes the world repeats along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct WrapMode {
    /// East-west repetition, across the date line.
    pub horizontal: bool,

    /// North-south repetition. Rarely wanted with Mercator, hence off by default.
    pub vertical: bool,
}

impl Default for WrapMode {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: false,
        }
    }
}

impl WrapMode {
    /// No repetition at all.
    pub const NONE: WrapMode = WrapMode {
        horizontal: false,
        vertical: false,
    };

    pub const BOTH: WrapMode = WrapMode {
        horizontal: true,
        vertical: true,
    };

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }
}

/// How good a shifted copy is: the overlap area with the viewport first, then the closeness of
/// both centers.
type Score = (f64, f64);

fn score(bounds: &PlanarRect, viewport: &PlanarRect, dx: i64, dy: i64) -> Score {
    let left = (bounds.left + dx).max(viewport.left);
    let right = (bounds.right + dx).min(viewport.right);
    let top = (bounds.top + dy).max(viewport.top);
    let bottom = (bounds.bottom + dy).min(viewport.bottom);

    let overlap = if left < right && top < bottom {
        (right - left) as f64 * (bottom - top) as f64
    } else {
        0.
    };

    let center_x = (bounds.left + bounds.right) as f64 / 2. + dx as f64;
    let center_y = (bounds.top + bounds.bottom) as f64 / 2. + dy as f64;
    let distance = crate::distance::squared_distance_to_point(
        center_x,
        center_y,
        (viewport.left + viewport.right) as f64 / 2.,
        (viewport.top + viewport.bottom) as f64 / 2.,
    );

    (overlap, -distance)
}

/// Walk in one direction for as long as the copy gets better. Both the overlap and the distance
/// change monotonically up to their optimum, so the first worse step ends the search.
fn best_steps(bounds: &PlanarRect, viewport: &PlanarRect, delta: PlanarPoint) -> (i64, Score) {
    let mut steps = 0;
    let mut best = score(bounds, viewport, 0, 0);
    loop {
        let next = score(
            bounds,
            viewport,
            delta.x * (steps + 1),
            delta.y * (steps + 1),
        );
        if next > best {
            best = next;
            steps += 1;
        } else {
            return (steps, best);
        }
    }
}

/// Offset along one axis, as a multiple of the world size.
fn best_axis_offset(
    bounds: &PlanarRect,
    viewport: &PlanarRect,
    world_size: i64,
    horizontal: bool,
) -> i64 {
    let delta = if horizontal {
        PlanarPoint::new(world_size, 0)
    } else {
        PlanarPoint::new(0, world_size)
    };
    let (forward, forward_score) = best_steps(bounds, viewport, delta);
    let (backward, backward_score) =
        best_steps(bounds, viewport, PlanarPoint::new(-delta.x, -delta.y));

    if forward_score > backward_score {
        forward * world_size
    } else if backward_score > forward_score {
        -backward * world_size
    } else {
        0
    }
}

/// Pixel offset moving a path with given `bounds` to its copy which is the most visible within
/// `viewport`. Axes are searched independently and only if `wrap` enables them.
pub fn best_offset(
    bounds: &PlanarRect,
    viewport: &PlanarRect,
    world_size: i64,
    wrap: WrapMode,
) -> PlanarPoint {
    if world_size <= 0 {
        return PlanarPoint::default();
    }

    PlanarPoint::new(
        if wrap.horizontal {
            best_axis_offset(bounds, viewport, world_size, true)
        } else {
            0
        },
        if wrap.vertical {
            best_axis_offset(bounds, viewport, world_size, false)
        } else {
            0
        },
    )
}

/// `next` moved by whole worlds so that it is as close to `previous` as possible. Keeps
/// consecutive points of a path within the same copy of the world, so that a line crossing the
/// date line does not go around the whole globe.
pub fn closer_value(previous: f64, next: f64, world_size: f64) -> f64 {
    if world_size <= 0. {
        return next;
    }

    let mut next = next;
    while (next - world_size - previous).abs() < (next - previous).abs() {
        next -= world_size;
    }
    while (next + world_size - previous).abs() < (next - previous).abs() {
        next += world_size;
    }
    next
}
