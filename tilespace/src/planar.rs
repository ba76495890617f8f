//! Points and rectangles with 64-bit signed coordinates.
//!
//! Pixel coordinates of the whole world at high zoom levels do not fit in 32 bits, so everything
//! that happens between the projection and the renderer is done on these types.

use std::ops::{Add, Sub};

/// Round to the nearest integer, with ties going towards positive infinity (so -2.5 becomes -2).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct PlanarPoint {
    pub x: i64,
    pub y: i64,
}

impl PlanarPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    pub fn offset(&mut self, dx: i64, dy: i64) {
        self.x += dx;
        self.y += dy;
    }

    /// Copy of this point moved by `delta`.
    pub fn offset_by(self, delta: PlanarPoint) -> Self {
        self + delta
    }

    pub fn squared_distance_to(&self, other: &PlanarPoint) -> f64 {
        crate::distance::squared_distance_to_point(
            self.x as f64,
            self.y as f64,
            other.x as f64,
            other.y as f64,
        )
    }
}

impl Add for PlanarPoint {
    type Output = PlanarPoint;

    fn add(self, rhs: Self) -> Self::Output {
        PlanarPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PlanarPoint {
    type Output = PlanarPoint;

    fn sub(self, rhs: Self) -> Self::Output {
        PlanarPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis aligned rectangle. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct PlanarRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl PlanarRect {
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Smallest rectangle with all `points` on its edges or inside. Empty for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a PlanarPoint>) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::default();
        };

        let mut rect = Self::new(first.x, first.y, first.x, first.y);
        for point in points {
            rect.left = rect.left.min(point.x);
            rect.top = rect.top.min(point.y);
            rect.right = rect.right.max(point.x);
            rect.bottom = rect.bottom.max(point.y);
        }
        rect
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> i64 {
        (self.left + self.right) / 2
    }

    pub fn center_y(&self) -> i64 {
        (self.top + self.bottom) / 2
    }

    pub fn center(&self) -> PlanarPoint {
        PlanarPoint::new(self.center_x(), self.center_y())
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && x >= self.left
            && x < self.right
            && y >= self.top
            && y < self.bottom
    }

    pub fn intersects(&self, other: &PlanarRect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Grow to enclose `other`. An empty rectangle on either side is not worth keeping, so then
    /// `other` is simply taken over.
    pub fn union(&mut self, other: &PlanarRect) {
        if self.is_empty() || other.is_empty() {
            *self = *other;
            return;
        }

        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }

    /// Grow so that the point ends up on the edge or inside.
    pub fn union_point(&mut self, x: i64, y: i64) {
        self.left = self.left.min(x);
        self.top = self.top.min(y);
        self.right = self.right.max(x);
        self.bottom = self.bottom.max(y);
    }

    pub fn offset(&mut self, dx: i64, dy: i64) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Shrink by `dx` and `dy` on each side. Negative values grow the rectangle.
    pub fn inset(&mut self, dx: i64, dy: i64) {
        self.left += dx;
        self.right -= dx;
        self.top += dy;
        self.bottom -= dy;
    }

    /// Smallest axis aligned rectangle that contains this one rotated by `degrees` around
    /// the given center.
    pub fn bounds_after_rotation(&self, center_x: i64, center_y: i64, degrees: f64) -> Self {
        if degrees == 0. {
            return *self;
        }

        let radians = degrees.to_radians();
        let (sin, cos) = radians.sin_cos();

        let corners = [
            (self.left, self.top),
            (self.right, self.top),
            (self.right, self.bottom),
            (self.left, self.bottom),
        ];

        let rotated: Vec<PlanarPoint> = corners
            .into_iter()
            .map(|(x, y)| {
                PlanarPoint::new(
                    rotated_x(x, y, center_x, center_y, cos, sin),
                    rotated_y(x, y, center_x, center_y, cos, sin),
                )
            })
            .collect();

        Self::from_points(&rotated)
    }
}

pub fn rotated_x(x: i64, y: i64, center_x: i64, center_y: i64, cos: f64, sin: f64) -> i64 {
    center_x + round_half_up((x - center_x) as f64 * cos - (y - center_y) as f64 * sin)
}

pub fn rotated_y(x: i64, y: i64, center_x: i64, center_y: i64, cos: f64, sin: f64) -> i64 {
    center_y + round_half_up((x - center_x) as f64 * sin + (y - center_y) as f64 * cos)
}

#[cfg(feature = "egui")]
impl From<egui::Pos2> for PlanarPoint {
    fn from(pos: egui::Pos2) -> Self {
        Self::new(round_half_up(pos.x as f64), round_half_up(pos.y as f64))
    }
}

#[cfg(feature = "egui")]
impl From<PlanarPoint> for egui::Pos2 {
    fn from(point: PlanarPoint) -> Self {
        egui::pos2(point.x as f32, point.y as f32)
    }
}

#[cfg(feature = "egui")]
impl From<egui::Rect> for PlanarRect {
    fn from(rect: egui::Rect) -> Self {
        Self::new(
            rect.min.x.floor() as i64,
            rect.min.y.floor() as i64,
            rect.max.x.ceil() as i64,
            rect.max.y.ceil() as i64,
        )
    }
}

#[cfg(feature = "egui")]
impl From<PlanarRect> for egui::Rect {
    fn from(rect: PlanarRect) -> Self {
        egui::Rect::from_min_max(
            egui::pos2(rect.left as f32, rect.top as f32),
            egui::pos2(rect.right as f32, rect.bottom as f32),
        )
    }
}
