//! Turning geographical polylines and polygons into pixels ready to be drawn.
//!
//! Positions are projected once, at the world size of the maximum zoom, and only scaled on each
//! frame. Scaled points are then moved to the most visible copy of the world, clipped, optimized
//! and simplified.

use crate::bounding_box::BoundingBox;
use crate::clipper::{
    ClipMode, ClipWindow, PointAccepter, PointList, SegmentClipper, SegmentList, SideOptimizer,
};
use crate::distance::{projection_factor_to_segment, squared_distance_to_projection};
use crate::planar::{PlanarPoint, PlanarRect, round_half_up};
use crate::position::Position;
use crate::projector::Projector;
use crate::simplify::reduce_with_tolerance;
use crate::tile_system::TileSystem;
use crate::wrap::{best_offset, closer_value};

/// Controls how paths are turned into pixels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct PathOptions {
    /// Window to clip into. When not set, it is derived from the viewport, see
    /// [`ClipWindow::around`].
    pub clip_window: Option<ClipWindow>,

    /// Douglas-Peucker tolerance, in pixels. Zero keeps all points.
    pub simplification_tolerance: f64,

    /// Collapse consecutive points along the same vertical or horizontal line, which clipping
    /// produces a lot of when most of a polygon is off the screen.
    pub side_optimization: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            clip_window: None,
            simplification_tolerance: 0.,
            side_optimization: true,
        }
    }
}

impl PathOptions {
    pub fn with_clip_window(mut self, clip_window: ClipWindow) -> Self {
        self.clip_window = Some(clip_window);
        self
    }

    pub fn with_simplification_tolerance(mut self, tolerance: f64) -> Self {
        self.simplification_tolerance = tolerance;
        self
    }

    pub fn with_side_optimization(mut self, side_optimization: bool) -> Self {
        self.side_optimization = side_optimization;
        self
    }

    fn window(&self, projector: &Projector) -> ClipWindow {
        self.clip_window
            .unwrap_or_else(|| projector.clip_window())
    }
}

/// Points of a path in the intrinsic pixels of the viewport, already clipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedPath {
    pub points: Vec<PlanarPoint>,

    /// Offset, in whole worlds, which was applied to the points. Pass it when building holes of
    /// a polygon, so that they end up in the same copy of the world as the outline.
    pub offset: PlanarPoint,
}

/// Recycles point buffers between frames.
#[derive(Debug, Default)]
pub struct PointPool {
    buffers: Vec<Vec<PlanarPoint>>,
}

impl PointPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty buffer, possibly with some capacity left from a previous use.
    pub fn take(&mut self) -> Vec<PlanarPoint> {
        self.buffers.pop().unwrap_or_default()
    }

    pub fn recycle(&mut self, mut buffer: Vec<PlanarPoint>) {
        buffer.clear();
        self.buffers.push(buffer);
    }

    /// Number of buffers ready to be taken.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

/// Polyline or polygon outline, projected once and rendered many times.
#[derive(Debug, Clone)]
pub struct ProjectedPath {
    positions: Vec<Position>,
    projected: Vec<PlanarPoint>,
    bounds: PlanarRect,
    reference_size: f64,
    tile_system: TileSystem,
    closed: bool,
}

impl ProjectedPath {
    /// Project positions at the world size of the maximum zoom of `tile_system`, which needs to
    /// be the one of the projectors used later. Consecutive points are kept in the same copy of
    /// the world, so a path crossing the date line does not go around the globe.
    pub fn new(
        tile_system: &TileSystem,
        positions: impl IntoIterator<Item = Position>,
        closed: bool,
    ) -> Self {
        let positions: Vec<Position> = positions.into_iter().collect();
        let zoom = tile_system.max_zoom() as f64;
        let reference_size = tile_system.map_size(zoom);

        let mut projected: Vec<PlanarPoint> = Vec::with_capacity(positions.len());
        for position in &positions {
            let mut current = tile_system.mercator_from_geo(*position, zoom, true);
            if let Some(previous) = projected.last() {
                current.x =
                    closer_value(previous.x as f64, current.x as f64, reference_size).round()
                        as i64;
            }
            projected.push(current);
        }

        let bounds = PlanarRect::from_points(&projected);

        Self {
            positions,
            projected,
            bounds,
            reference_size,
            tile_system: *tile_system,
            closed,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Points at the reference world size.
    pub fn projected(&self) -> &[PlanarPoint] {
        &self.projected
    }

    /// Bounds of the projected points, inclusive on all edges.
    pub fn projected_bounds(&self) -> PlanarRect {
        self.bounds
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_positions(&self.positions)
    }

    /// Great circle length of the path in meters, closing segment included for polygons.
    pub fn length(&self) -> f64 {
        let open: f64 = self
            .positions
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum();

        match (self.closed, self.positions.first(), self.positions.last()) {
            (true, Some(first), Some(last)) => open + last.distance_to(first),
            _ => open,
        }
    }

    /// Points scaled to the projector's zoom, in its intrinsic pixels, without any wrapping
    /// offset.
    pub fn pixels(&self, projector: &Projector) -> Vec<PlanarPoint> {
        self.projected
            .iter()
            .map(|point| projector.pixels_from_projected(point))
            .collect()
    }

    /// Offset moving this path to its most visible copy of the world.
    pub fn best_offset(&self, projector: &Projector) -> PlanarPoint {
        if self.projected.is_empty() {
            return PlanarPoint::default();
        }

        let top_left =
            projector.pixels_from_projected(&PlanarPoint::new(self.bounds.left, self.bounds.top));
        let bottom_right = projector
            .pixels_from_projected(&PlanarPoint::new(self.bounds.right, self.bounds.bottom));
        let bounds = PlanarRect::new(
            top_left.x,
            top_left.y,
            bottom_right.x + 1,
            bottom_right.y + 1,
        );

        best_offset(
            &bounds,
            &projector.intrinsic_screen_bounds(),
            projector.world_size(),
            projector.wrap(),
        )
    }

    /// Pixels of a connected path, clipped in [`ClipMode::Path`] so that polygons keep their
    /// filled area. `offset` is computed when not given.
    pub fn build_path(
        &self,
        projector: &Projector,
        options: &PathOptions,
        offset: Option<PlanarPoint>,
    ) -> RenderedPath {
        let mut rendered = self.build_clipped(projector, options, offset, Vec::new());
        if options.simplification_tolerance > 0. {
            rendered.points =
                reduce_with_tolerance(&rendered.points, options.simplification_tolerance);
        }
        rendered
    }

    /// Like [`ProjectedPath::build_path`], but reusing buffers of the pool. Return the points to
    /// the pool once they are drawn.
    pub fn build_path_pooled(
        &self,
        projector: &Projector,
        options: &PathOptions,
        offset: Option<PlanarPoint>,
        pool: &mut PointPool,
    ) -> RenderedPath {
        let mut rendered = self.build_clipped(projector, options, offset, pool.take());
        if options.simplification_tolerance > 0. {
            let mut simplified = pool.take();
            simplified.extend(reduce_with_tolerance(
                &rendered.points,
                options.simplification_tolerance,
            ));
            pool.recycle(std::mem::replace(&mut rendered.points, simplified));
        }
        rendered
    }

    fn build_clipped(
        &self,
        projector: &Projector,
        options: &PathOptions,
        offset: Option<PlanarPoint>,
        mut buffer: Vec<PlanarPoint>,
    ) -> RenderedPath {
        let offset = offset.unwrap_or_else(|| self.best_offset(projector));

        // Nothing to draw.
        if self.projected.len() < 2 {
            buffer.clear();
            return RenderedPath {
                points: buffer,
                offset,
            };
        }

        let window = options.window(projector);
        let list = PointList::with_buffer(buffer);
        let points = if options.side_optimization {
            let clipper = SegmentClipper::new(window, ClipMode::Path, SideOptimizer::new(list));
            self.feed(projector, offset, clipper)
                .into_inner()
                .into_inner()
                .into_points()
        } else {
            let clipper = SegmentClipper::new(window, ClipMode::Path, list);
            self.feed(projector, offset, clipper)
                .into_inner()
                .into_points()
        };

        log::trace!(
            "Path of {} points clipped into {}.",
            self.projected.len(),
            points.len()
        );

        RenderedPath { points, offset }
    }

    /// Disjoint segments clipped in [`ClipMode::Lines`], for renderers which draw lines one by
    /// one. Segments entirely outside of the clip window are dropped.
    pub fn build_lines(
        &self,
        projector: &Projector,
        options: &PathOptions,
    ) -> Vec<(PlanarPoint, PlanarPoint)> {
        if self.projected.len() < 2 {
            return Vec::new();
        }

        let offset = self.best_offset(projector);
        let mut pixels = self.pixels(projector);
        for pixel in &mut pixels {
            *pixel = *pixel + offset;
        }
        if self.closed {
            pixels.push(pixels[0]);
        }
        if options.simplification_tolerance > 0. {
            pixels = reduce_with_tolerance(&pixels, options.simplification_tolerance);
        }

        let mut clipper =
            SegmentClipper::new(options.window(projector), ClipMode::Lines, SegmentList::new());
        clipper.init();
        for pixel in pixels {
            clipper.add(pixel);
        }
        clipper.end();

        let segments = clipper.into_inner().into_segments();
        log::trace!(
            "Path of {} points clipped into {} segments.",
            self.projected.len(),
            segments.len()
        );
        segments
    }

    /// Whether the path passes within `tolerance` pixels from the given screen pixel.
    pub fn is_close_to(&self, projector: &Projector, pixel: PlanarPoint, tolerance: f64) -> bool {
        self.close_to(projector, pixel, tolerance).is_some()
    }

    /// Position on the path closest to the first of its segments passing within `tolerance`
    /// pixels from the given screen pixel.
    pub fn close_to(
        &self,
        projector: &Projector,
        pixel: PlanarPoint,
        tolerance: f64,
    ) -> Option<Position> {
        let offset = self.best_offset(projector);
        let mut pixels: Vec<PlanarPoint> = self
            .pixels(projector)
            .into_iter()
            .map(|point| point + offset)
            .collect();
        let mut projected = self.projected.clone();
        if self.closed
            && let (Some(&first_pixel), Some(&first_projected)) =
                (pixels.first(), projected.first())
        {
            pixels.push(first_pixel);
            projected.push(first_projected);
        }

        let touched = projector.unrotate(pixel);
        let world_size = projector.world_size().max(1);
        let screen = projector.screen();
        let squared_tolerance = tolerance * tolerance;

        // The touched pixel may be any of the copies of the world visible on the screen.
        let wrap = projector.wrap();
        let mut start_x = touched.x;
        while wrap.horizontal && start_x - world_size >= screen.left {
            start_x -= world_size;
        }
        let mut start_y = touched.y;
        while wrap.vertical && start_y - world_size >= screen.top {
            start_y -= world_size;
        }
        let end_x = if wrap.horizontal { screen.right } else { start_x + 1 };
        let end_y = if wrap.vertical { screen.bottom } else { start_y + 1 };

        for (index, pair) in pixels.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            let mut x = start_x;
            while x < end_x {
                let mut y = start_y;
                while y < end_y {
                    let factor = projection_factor_to_segment(
                        x as f64, y as f64, a.x as f64, a.y as f64, b.x as f64, b.y as f64,
                    );
                    let squared_distance = squared_distance_to_projection(
                        x as f64, y as f64, a.x as f64, a.y as f64, b.x as f64, b.y as f64,
                        factor,
                    );
                    if squared_tolerance > squared_distance {
                        return Some(self.position_between(
                            &projected[index],
                            &projected[index + 1],
                            factor,
                        ));
                    }
                    y += world_size;
                }
                x += world_size;
            }
        }
        None
    }

    fn position_between(&self, a: &PlanarPoint, b: &PlanarPoint, factor: f64) -> Position {
        let x = round_half_up(a.x as f64 + (b.x - a.x) as f64 * factor);
        let y = round_half_up(a.y as f64 + (b.y - a.y) as f64 * factor);
        let world = self.reference_size as i64;
        self.tile_system.geo_from_mercator(
            PlanarPoint::new(x.rem_euclid(world.max(1)), y),
            self.tile_system.max_zoom() as f64,
            true,
            true,
        )
    }

    /// Outline of the path fitted in a `size` by `size` square centered at zero, e.g. for an
    /// icon. `None` for an empty path or one without any extent.
    pub fn thumbnail(&self, size: u32) -> Option<Vec<PlanarPoint>> {
        let extent = self.bounds.width().max(self.bounds.height());
        if size == 0 || extent == 0 {
            return None;
        }

        let factor = extent as f64 / size as f64;
        let center = self.bounds.center();
        let mut optimizer = SideOptimizer::new(PointList::new());
        optimizer.init();
        for point in &self.projected {
            optimizer.add(PlanarPoint::new(
                ((point.x - center.x) as f64 / factor).round() as i64,
                ((point.y - center.y) as f64 / factor).round() as i64,
            ));
        }
        optimizer.end();
        Some(optimizer.into_inner().into_points())
    }

    fn feed<A: PointAccepter>(
        &self,
        projector: &Projector,
        offset: PlanarPoint,
        mut accepter: A,
    ) -> A {
        accepter.init();
        for point in &self.projected {
            accepter.add(projector.pixels_from_projected(point) + offset);
        }
        if self.closed
            && let Some(first) = self.projected.first()
        {
            accepter.add(projector.pixels_from_projected(first) + offset);
        }
        accepter.end();
        accepter
    }
}
