//! Clipping of projected paths into a window the renderer can cope with.
//!
//! Pixel coordinates at high zoom levels are far beyond what renderers handle well. Every segment
//! of a path is therefore squeezed into a [`ClipWindow`] before it leaves this crate. Points flow
//! through [`PointAccepter`]s, so the clipper can be chained with other stages without collecting
//! intermediate vectors.

use crate::distance::squared_distance_to_segment;
use crate::intersection::intersection;
use crate::planar::{PlanarPoint, PlanarRect};

/// Receiver of a stream of points, e.g. the rasterizer or the next stage of the pipeline.
pub trait PointAccepter {
    /// Called before the first point of a new path.
    fn init(&mut self) {}

    fn add(&mut self, point: PlanarPoint);

    /// Called after the last point of a path.
    fn end(&mut self) {}
}

impl<A: PointAccepter + ?Sized> PointAccepter for &mut A {
    fn init(&mut self) {
        (**self).init();
    }

    fn add(&mut self, point: PlanarPoint) {
        (**self).add(point);
    }

    fn end(&mut self) {
        (**self).end();
    }
}

/// Raw recording, every point is kept.
impl PointAccepter for Vec<PlanarPoint> {
    fn init(&mut self) {
        self.clear();
    }

    fn add(&mut self, point: PlanarPoint) {
        self.push(point);
    }
}

/// Points of a path, without consecutive duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointList {
    points: Vec<PlanarPoint>,
}

impl PointList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing allocation. The buffer is cleared on [`PointAccepter::init`].
    pub fn with_buffer(points: Vec<PlanarPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PlanarPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<PlanarPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PointAccepter for PointList {
    fn init(&mut self) {
        self.points.clear();
    }

    fn add(&mut self, point: PlanarPoint) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }
}

/// Pairs incoming points into disjoint segments, for renderers which draw separate lines
/// rather than a connected path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentList {
    segments: Vec<(PlanarPoint, PlanarPoint)>,
    pending: Option<PlanarPoint>,
}

impl SegmentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[(PlanarPoint, PlanarPoint)] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<(PlanarPoint, PlanarPoint)> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl PointAccepter for SegmentList {
    fn init(&mut self) {
        self.segments.clear();
        self.pending = None;
    }

    fn add(&mut self, point: PlanarPoint) {
        match self.pending.take() {
            Some(start) => self.segments.push((start, point)),
            None => self.pending = Some(point),
        }
    }

    fn end(&mut self) {
        self.pending = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Different,
    SameX,
    SameY,
}

/// Collapses runs of consecutive points sharing the same x (or the same y) into at most three
/// points: the extremes of the run and its last point.
///
/// Clipping a mostly invisible polygon produces long runs of such points along the window border,
/// and drawing them one by one is a waste.
#[derive(Debug, Clone)]
pub struct SideOptimizer<A> {
    accepter: A,
    latest: Option<PlanarPoint>,
    start: PlanarPoint,
    min: i64,
    max: i64,
    side: Side,
}

impl<A: PointAccepter> SideOptimizer<A> {
    pub fn new(accepter: A) -> Self {
        Self {
            accepter,
            latest: None,
            start: PlanarPoint::default(),
            min: 0,
            max: 0,
            side: Side::Different,
        }
    }

    pub fn accepter(&self) -> &A {
        &self.accepter
    }

    pub fn into_inner(self) -> A {
        self.accepter
    }

    fn flush(&mut self) {
        let side = std::mem::replace(&mut self.side, Side::Different);
        let Some(latest) = self.latest else {
            return;
        };

        match side {
            Side::Different => {}
            Side::SameX => {
                let x = self.start.x;
                let (low, high) = ordered(self.start.y, latest.y);
                if self.min < low {
                    self.accepter.add(PlanarPoint::new(x, self.min));
                }
                if self.max > high {
                    self.accepter.add(PlanarPoint::new(x, self.max));
                }
                self.accepter.add(PlanarPoint::new(x, latest.y));
            }
            Side::SameY => {
                let y = self.start.y;
                let (low, high) = ordered(self.start.x, latest.x);
                if self.min < low {
                    self.accepter.add(PlanarPoint::new(self.min, y));
                }
                if self.max > high {
                    self.accepter.add(PlanarPoint::new(self.max, y));
                }
                self.accepter.add(PlanarPoint::new(latest.x, y));
            }
        }
    }

    fn begin_run(&mut self, side: Side, latest: PlanarPoint, value: i64, latest_value: i64) {
        self.flush();
        self.side = side;
        self.start = latest;
        self.min = value.min(latest_value);
        self.max = value.max(latest_value);
    }

    fn extend_run(&mut self, value: i64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

impl<A: PointAccepter> PointAccepter for SideOptimizer<A> {
    fn init(&mut self) {
        self.latest = None;
        self.side = Side::Different;
        self.accepter.init();
    }

    fn add(&mut self, point: PlanarPoint) {
        let Some(latest) = self.latest else {
            self.accepter.add(point);
            self.latest = Some(point);
            return;
        };

        if latest == point {
            return;
        }

        if latest.x == point.x {
            if self.side == Side::SameX {
                self.extend_run(point.y);
            } else {
                self.begin_run(Side::SameX, latest, point.y, latest.y);
            }
        } else if latest.y == point.y {
            if self.side == Side::SameY {
                self.extend_run(point.x);
            } else {
                self.begin_run(Side::SameY, latest, point.x, latest.x);
            }
        } else {
            self.flush();
            self.accepter.add(point);
        }
        self.latest = Some(point);
    }

    fn end(&mut self) {
        self.flush();
        self.accepter.end();
    }
}

const DEFAULT_CLIP_EXTENT: i64 = 1 << 28;

/// Margin added around the viewport by [`ClipWindow::around`].
const VIEWPORT_BORDER: f64 = 0.1;

/// Area in which clipped paths are kept. Its border belongs to the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct ClipWindow {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Default for ClipWindow {
    fn default() -> Self {
        Self::new(
            -DEFAULT_CLIP_EXTENT,
            -DEFAULT_CLIP_EXTENT,
            DEFAULT_CLIP_EXTENT,
            DEFAULT_CLIP_EXTENT,
        )
    }
}

impl ClipWindow {
    /// # Panics
    ///
    /// When the minimum corner is not strictly below the maximum one on both axes.
    pub fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        let window = Self {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        window.check();
        window
    }

    fn check(&self) {
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            log::error!("Clip window {self:?} has no inside.");
            panic!(
                "malformed clip window {},{} - {},{}",
                self.min_x, self.min_y, self.max_x, self.max_y
            );
        }
    }

    /// Window covering the viewport whatever its rotation is.
    ///
    /// It is built around the circle passing through the viewport's corners, with its radius
    /// doubled and a 10% margin. Smaller windows make clipped paths look rough when zooming out
    /// with an animation.
    pub fn around(viewport: &PlanarRect) -> Self {
        let half_width = viewport.width() / 2;
        let half_height = viewport.height() / 2;
        let radius = (half_width as f64).hypot(half_height as f64);
        let scaled_radius = ((2. * radius * (1. + VIEWPORT_BORDER)) as i64).max(1);
        let center_x = viewport.left + half_width;
        let center_y = viewport.top + half_height;
        Self::new(
            center_x - scaled_radius,
            center_y - scaled_radius,
            center_x + scaled_radius,
            center_y + scaled_radius,
        )
    }

    /// Whether the point is strictly inside.
    pub fn contains(&self, point: &PlanarPoint) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.y > self.min_y && point.y < self.max_y
    }

    /// Nearest point of the window, border included.
    pub fn clamp(&self, point: &PlanarPoint) -> PlanarPoint {
        PlanarPoint::new(
            clamp(point.x, self.min_x, self.max_x),
            clamp(point.y, self.min_y, self.max_y),
        )
    }

    fn corners(&self) -> [PlanarPoint; 4] {
        [
            PlanarPoint::new(self.min_x, self.min_y),
            PlanarPoint::new(self.min_x, self.max_y),
            PlanarPoint::new(self.max_x, self.min_y),
            PlanarPoint::new(self.max_x, self.max_y),
        ]
    }

    /// Left, right, top and bottom edges.
    fn edges(&self) -> [(PlanarPoint, PlanarPoint); 4] {
        let [top_left, bottom_left, top_right, bottom_right] = self.corners();
        [
            (top_left, bottom_left),
            (top_right, bottom_right),
            (top_left, top_right),
            (bottom_left, bottom_right),
        ]
    }

    /// Both ends beyond the same edge, so nothing of the segment is visible.
    fn both_outside_on_same_side(&self, p0: &PlanarPoint, p1: &PlanarPoint) -> bool {
        (p0.x < self.min_x && p1.x < self.min_x)
            || (p0.x > self.max_x && p1.x > self.max_x)
            || (p0.y < self.min_y && p1.y < self.min_y)
            || (p0.y > self.max_y && p1.y > self.max_y)
    }

    /// Corner closest to the segment. The first one wins a tie.
    fn closest_corner(&self, p0: &PlanarPoint, p1: &PlanarPoint) -> PlanarPoint {
        let mut closest = PlanarPoint::new(self.min_x, self.min_y);
        let mut min = f64::MAX;
        for corner in self.corners() {
            let distance = squared_distance_to_segment(
                corner.x as f64,
                corner.y as f64,
                p0.x as f64,
                p0.y as f64,
                p1.x as f64,
                p1.y as f64,
            );
            if min > distance {
                min = distance;
                closest = corner;
            }
        }
        closest
    }
}

fn clamp(value: i64, min: i64, max: i64) -> i64 {
    if value <= min {
        min
    } else if value >= max {
        max
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum ClipMode {
    /// Invisible parts of the path are projected onto the window border. Needed for polygons,
    /// since they still shape the filled area.
    #[default]
    Path,

    /// Invisible segments are dropped. For polylines drawn as separate lines.
    Lines,
}

/// Clips segments into a [`ClipWindow`] and passes the result to another [`PointAccepter`].
///
/// Fed point by point (as an accepter itself), it clips every segment between consecutive
/// points.
#[derive(Debug, Clone)]
pub struct SegmentClipper<A> {
    window: ClipWindow,
    mode: ClipMode,
    accepter: A,
    previous: Option<PlanarPoint>,
}

impl<A: PointAccepter> SegmentClipper<A> {
    /// # Panics
    ///
    /// When the window is malformed, which can slip past [`ClipWindow::new`] through its public
    /// fields or deserialization.
    pub fn new(window: ClipWindow, mode: ClipMode, accepter: A) -> Self {
        window.check();
        Self {
            window,
            mode,
            accepter,
            previous: None,
        }
    }

    pub fn window(&self) -> &ClipWindow {
        &self.window
    }

    pub fn mode(&self) -> ClipMode {
        self.mode
    }

    pub fn accepter(&self) -> &A {
        &self.accepter
    }

    pub fn into_inner(self) -> A {
        self.accepter
    }

    /// Clip a single segment.
    ///
    /// # Panics
    ///
    /// When one end is inside the window and the segment does not cross its border, which can
    /// only happen if the window itself is malformed.
    pub fn clip(&mut self, p0: PlanarPoint, p1: PlanarPoint) {
        let path_mode = self.mode == ClipMode::Path;

        // Degenerate segment, it has no direction to cross the border with.
        if p0 == p1 {
            if path_mode {
                self.accepter.add(self.window.clamp(&p0));
            }
            return;
        }

        if !path_mode && self.window.both_outside_on_same_side(&p0, &p1) {
            return;
        }

        match (self.window.contains(&p0), self.window.contains(&p1)) {
            (true, true) => {
                self.accepter.add(p0);
                self.accepter.add(p1);
            }
            (true, false) => {
                let crossing = self.border_crossing(&p0, &p1);
                self.accepter.add(p0);
                self.accepter.add(crossing);
                if path_mode {
                    self.accepter.add(self.window.clamp(&p1));
                }
            }
            (false, true) => {
                let crossing = self.border_crossing(&p0, &p1);
                if path_mode {
                    self.accepter.add(self.window.clamp(&p0));
                }
                self.accepter.add(crossing);
                self.accepter.add(p1);
            }
            (false, false) => self.clip_outside(p0, p1),
        }
    }

    fn border_crossing(&self, p0: &PlanarPoint, p1: &PlanarPoint) -> PlanarPoint {
        let crossing = self
            .window
            .edges()
            .iter()
            .find_map(|(c, d)| intersection(p0, p1, c, d));

        match crossing {
            Some(point) => point,
            None => {
                log::error!(
                    "Segment {p0:?} - {p1:?} has an end inside {:?}, but does not cross its border.",
                    self.window
                );
                panic!("cannot find the intersection of {p0:?} - {p1:?} with the clip window");
            }
        }
    }

    /// Both ends are outside, but the segment may still pass through the window.
    fn clip_outside(&mut self, p0: PlanarPoint, p1: PlanarPoint) {
        let path_mode = self.mode == ClipMode::Path;

        // A segment passing through a corner or running along an edge meets several edges
        // in the same points.
        let mut crossings = [PlanarPoint::default(); 4];
        let mut count = 0;
        for (c, d) in self.window.edges() {
            if let Some(point) = intersection(&p0, &p1, &c, &d)
                && !crossings[..count].contains(&point)
            {
                crossings[count] = point;
                count += 1;
            }
        }

        match &crossings[..count] {
            [] => {
                if path_mode {
                    // Going through the corner keeps two far away segments from being drawn
                    // as a diagonal across the whole window.
                    let corner = self.window.closest_corner(&p0, &p1);
                    self.accepter.add(self.window.clamp(&p0));
                    self.accepter.add(corner);
                    self.accepter.add(self.window.clamp(&p1));
                }
            }
            [single] => {
                if path_mode {
                    self.accepter.add(self.window.clamp(&p0));
                    self.accepter.add(*single);
                    self.accepter.add(self.window.clamp(&p1));
                }
            }
            crossings => {
                let distance = |point: &&PlanarPoint| point.squared_distance_to(&p0);
                let nearest = crossings
                    .iter()
                    .min_by(|a, b| distance(a).total_cmp(&distance(b)));
                let farthest = crossings
                    .iter()
                    .max_by(|a, b| distance(a).total_cmp(&distance(b)));
                let (Some(&nearest), Some(&farthest)) = (nearest, farthest) else {
                    return;
                };

                if path_mode {
                    self.accepter.add(self.window.clamp(&p0));
                }
                self.accepter.add(nearest);
                self.accepter.add(farthest);
                if path_mode {
                    self.accepter.add(self.window.clamp(&p1));
                }
            }
        }
    }
}

impl<A: PointAccepter> PointAccepter for SegmentClipper<A> {
    fn init(&mut self) {
        self.previous = None;
        self.accepter.init();
    }

    fn add(&mut self, point: PlanarPoint) {
        if let Some(previous) = self.previous.replace(point) {
            self.clip(previous, point);
        }
    }

    fn end(&mut self) {
        self.accepter.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[i64]) -> Vec<PlanarPoint> {
        values
            .chunks(2)
            .map(|pair| PlanarPoint::new(pair[0], pair[1]))
            .collect()
    }

    fn clip(mode: ClipMode, segment: [i64; 4]) -> Vec<PlanarPoint> {
        let mut clipper = SegmentClipper::new(
            ClipWindow::new(-600, -600, 1400, 1400),
            mode,
            Vec::new(),
        );
        clipper.clip(
            PlanarPoint::new(segment[0], segment[1]),
            PlanarPoint::new(segment[2], segment[3]),
        );
        clipper.into_inner()
    }

    #[test]
    fn clipping_in_path_mode() {
        assert_eq!(
            points(&[-600, -600, -600, -598, -145, -141]),
            clip(ClipMode::Path, [-2146, -2152, -145, -141])
        );
        assert_eq!(
            points(&[-145, -141, 310, -600, 855, -600]),
            clip(ClipMode::Path, [-145, -141, 855, -1150])
        );
        assert_eq!(
            points(&[1400, 267, 1400, 1312, 1361, 1400, -600, 1400]),
            clip(ClipMode::Path, [1856, 267, -2146, 9434])
        );
        assert_eq!(
            points(&[-30, 500, 700, 800]),
            clip(ClipMode::Path, [-30, 500, 700, 800])
        );
    }

    #[test]
    fn segment_missing_the_window_goes_through_the_closest_corner() {
        assert_eq!(
            points(&[-600, -600, 1400, -600, 1400, 1400]),
            clip(ClipMode::Path, [-1000, -10000, 10000, 10000])
        );
        assert_eq!(
            points(&[-600, -600, -600, 1400, 1400, 1400]),
            clip(ClipMode::Path, [-10000, -1000, 10000, 10000])
        );
    }

    #[test]
    fn clipping_in_lines_mode() {
        assert_eq!(
            points(&[-600, -598, -145, -141]),
            clip(ClipMode::Lines, [-2146, -2152, -145, -141])
        );
        assert_eq!(
            points(&[-145, -141, 310, -600]),
            clip(ClipMode::Lines, [-145, -141, 855, -1150])
        );
        assert_eq!(
            points(&[1400, 1312, 1361, 1400]),
            clip(ClipMode::Lines, [1856, 267, -2146, 9434])
        );
        assert_eq!(
            points(&[-30, 500, 700, 800]),
            clip(ClipMode::Lines, [-30, 500, 700, 800])
        );
        assert!(clip(ClipMode::Lines, [-1000, -10000, 10000, 10000]).is_empty());
        assert!(clip(ClipMode::Lines, [-10000, -1000, 10000, 10000]).is_empty());
        assert!(clip(ClipMode::Lines, [-1000, -1000, -700, 5000]).is_empty());
    }

    #[test]
    fn diagonal_through_corners() {
        let window = ClipWindow::new(-100, -100, 100, 100);
        let segment = (PlanarPoint::new(-500, -500), PlanarPoint::new(500, 500));

        let mut clipper = SegmentClipper::new(window, ClipMode::Path, PointList::new());
        clipper.clip(segment.0, segment.1);
        assert_eq!(
            &points(&[-100, -100, 100, 100]),
            clipper.accepter().points()
        );

        let mut clipper = SegmentClipper::new(window, ClipMode::Lines, Vec::new());
        clipper.clip(segment.0, segment.1);
        assert_eq!(points(&[-100, -100, 100, 100]), clipper.into_inner());
    }

    #[test]
    fn segment_running_along_an_edge() {
        let window = ClipWindow::new(0, 0, 100, 100);
        let mut clipper = SegmentClipper::new(window, ClipMode::Lines, Vec::new());
        clipper.clip(PlanarPoint::new(0, -50), PlanarPoint::new(0, 150));
        assert_eq!(points(&[0, 0, 0, 100]), clipper.into_inner());
    }

    #[test]
    fn clipped_output_stays_in_the_window() {
        let window = ClipWindow::default();
        let far = 1 << 40;
        let coordinates = [-far, -far / 3, -(1 << 28), -1000, 0, 7, 1 << 28, far / 5, far];

        for &x0 in &coordinates {
            for &y0 in &coordinates {
                for &x1 in &coordinates {
                    for &y1 in &coordinates {
                        let mut clipper =
                            SegmentClipper::new(window, ClipMode::Path, Vec::new());
                        clipper.clip(PlanarPoint::new(x0, y0), PlanarPoint::new(x1, y1));
                        for point in clipper.into_inner() {
                            assert!(
                                point.x >= window.min_x
                                    && point.x <= window.max_x
                                    && point.y >= window.min_y
                                    && point.y <= window.max_y,
                                "{point:?} from ({x0}, {y0}) - ({x1}, {y1})"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn streaming_a_polyline() {
        let window = ClipWindow::new(0, 0, 100, 100);
        let mut clipper = SegmentClipper::new(window, ClipMode::Path, PointList::new());

        clipper.init();
        for point in points(&[10, 10, 50, 50, 200, 50, 50, 90]) {
            clipper.add(point);
        }
        clipper.end();

        assert_eq!(
            &points(&[10, 10, 50, 50, 100, 50, 100, 77, 50, 90]),
            clipper.accepter().points()
        );
    }

    #[test]
    fn zero_length_segment() {
        assert_eq!(points(&[1400, 50]), clip(ClipMode::Path, [2000, 50, 2000, 50]));
        assert_eq!(points(&[10, 20]), clip(ClipMode::Path, [10, 20, 10, 20]));
        assert!(clip(ClipMode::Lines, [2000, 50, 2000, 50]).is_empty());
        assert!(clip(ClipMode::Lines, [10, 20, 10, 20]).is_empty());
    }

    #[test]
    fn repeated_vertex_outside_the_window() {
        let window = ClipWindow::new(0, 0, 100, 100);
        let mut clipper = SegmentClipper::new(window, ClipMode::Path, PointList::new());

        clipper.init();
        for point in points(&[50, 50, 200, 50, 200, 50, 50, 60]) {
            clipper.add(point);
        }
        clipper.end();

        assert_eq!(
            &points(&[50, 50, 100, 50, 100, 57, 50, 60]),
            clipper.accepter().points()
        );
    }

    #[test]
    #[should_panic(expected = "malformed clip window")]
    fn inverted_window() {
        ClipWindow::new(100, 100, 0, 0);
    }

    #[test]
    #[should_panic(expected = "malformed clip window")]
    fn empty_window() {
        ClipWindow::new(0, 0, 0, 100);
    }

    #[test]
    #[should_panic(expected = "malformed clip window")]
    fn inverted_window_built_from_fields() {
        let window = ClipWindow {
            min_x: 100,
            min_y: 100,
            max_x: 0,
            max_y: 0,
        };
        SegmentClipper::new(window, ClipMode::Path, Vec::new());
    }

    #[test]
    fn window_around_an_empty_viewport() {
        let window = ClipWindow::around(&PlanarRect::new(10, 10, 10, 10));
        assert_eq!(ClipWindow::new(9, 9, 11, 11), window);
    }

    #[test]
    fn window_around_viewport() {
        let window = ClipWindow::around(&PlanarRect::new(0, 0, 800, 600));
        assert_eq!(ClipWindow::new(-700, -800, 1500, 1400), window);
        assert!(window.contains(&PlanarPoint::new(400, 300)));
        assert!(!window.contains(&PlanarPoint::new(1500, 300)));
        assert_eq!(
            PlanarPoint::new(1500, -800),
            window.clamp(&PlanarPoint::new(5000, -5000))
        );
    }

    #[test]
    fn point_list_skips_duplicates() {
        let mut list = PointList::new();
        list.init();
        for point in points(&[1, 1, 1, 1, 2, 2, 1, 1, 1, 1]) {
            list.add(point);
        }
        assert_eq!(&points(&[1, 1, 2, 2, 1, 1]), list.points());
    }

    #[test]
    fn segment_list_pairs_points() {
        let mut list = SegmentList::new();
        list.init();
        for point in points(&[0, 0, 1, 1, 5, 5, 6, 6, 9, 9]) {
            list.add(point);
        }
        list.end();
        assert_eq!(
            &[
                (PlanarPoint::new(0, 0), PlanarPoint::new(1, 1)),
                (PlanarPoint::new(5, 5), PlanarPoint::new(6, 6)),
            ],
            list.segments()
        );
    }

    fn optimize(values: &[i64]) -> Vec<PlanarPoint> {
        let mut optimizer = SideOptimizer::new(Vec::new());
        optimizer.init();
        for point in points(values) {
            optimizer.add(point);
        }
        optimizer.end();
        optimizer.into_inner()
    }

    #[test]
    fn side_optimizer_leaves_zigzags_alone() {
        let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        assert_eq!(points(&values), optimize(&values));
    }

    #[test]
    fn side_optimizer_collapses_columns() {
        #[rustfmt::skip]
        let values = [
            1, 2, 3, 4,
            50, 6, 50, 20, 50, 4, 50, 15, 50, 18, 50, 5,
            12, 2, 12, 78, 12, 3, 12, 1, 12, 1, 12, 4,
            2, 12,
        ];
        #[rustfmt::skip]
        let expected = [
            1, 2, 3, 4,
            50, 6, 50, 4, 50, 20, 50, 5,
            12, 2, 12, 1, 12, 78, 12, 4,
            2, 12,
        ];
        assert_eq!(points(&expected), optimize(&values));
    }

    #[test]
    fn side_optimizer_collapses_rows() {
        #[rustfmt::skip]
        let values = [
            0, 1, 2, 3,
            4, 50, 6, 50, 20, 50, 4, 50, 15, 50, 18, 50,
            45, 10, 16, 10, 2, 10, 14, 10, 1, 10, 8, 10,
            5, 2,
        ];
        #[rustfmt::skip]
        let expected = [
            0, 1, 2, 3,
            4, 50, 20, 50, 18, 50,
            45, 10, 1, 10, 8, 10,
            5, 2,
        ];
        assert_eq!(points(&expected), optimize(&values));
    }

    #[test]
    fn side_optimizer_with_a_long_oscillating_column() {
        let mut values = vec![1, 2, 3, 4, 50, 6, 50, 20, 50, 4];
        for _ in 0..7 {
            values.extend([50, 15, 50, 6, 50, 23]);
        }
        values.extend([50, 18, 50, 5, 2, 12]);

        assert_eq!(
            points(&[1, 2, 3, 4, 50, 6, 50, 4, 50, 23, 50, 5, 2, 12]),
            optimize(&values)
        );
    }

    #[test]
    fn side_optimizer_around_a_rectangle() {
        #[rustfmt::skip]
        let values = [
            1, 2, 3, 4,
            50, 6, 50, 20, 50, 4, 50, 15, 50, 18, 50, 5,
            4, 50, 6, 50, 20, 50, 4, 50, 15, 50, 18, 50,
            12, 2, 12, 78, 12, 3, 12, 1, 12, 1, 12, 4,
            5, 5,
            45, 10, 16, 10, 2, 10, 14, 10, 1, 10, 8, 10,
            2, 12,
        ];
        #[rustfmt::skip]
        let expected = [
            1, 2, 3, 4,
            50, 6, 50, 4, 50, 20, 50, 5,
            4, 50, 20, 50, 18, 50,
            12, 2, 12, 1, 12, 78, 12, 4,
            5, 5,
            45, 10, 1, 10, 8, 10,
            2, 12,
        ];
        assert_eq!(points(&expected), optimize(&values));
    }
}
