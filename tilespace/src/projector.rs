use crate::clipper::ClipWindow;
use crate::mercator::floor_to_i64;
use crate::planar::{PlanarPoint, PlanarRect, rotated_x, rotated_y};
use crate::position::Position;
use crate::tile_region::TileRegion;
use crate::tile_system::TileSystem;
use crate::wrap::{WrapMode, closer_value};
use crate::zoom::{InvalidZoom, Zoom};

/// Projects geographical positions into pixels of the viewport and back.
///
/// Pixels come in two flavours. Intrinsic pixels are those of the map before it gets rotated
/// by the orientation, and that's what paths are built in. Rotated pixels are what ends up on
/// the screen.
#[derive(Debug, Clone)]
pub struct Projector {
    tile_system: TileSystem,
    screen: PlanarRect,
    center: Position,
    zoom: Zoom,
    orientation: f64,
    wrap: WrapMode,

    /// Mercator pixel at the top left corner of the unrotated screen.
    offset: PlanarPoint,
    map_size: f64,
}

impl Projector {
    /// Viewport showing `screen`, with the `center` position in its middle.
    pub fn new(tile_system: TileSystem, screen: PlanarRect, center: Position, zoom: Zoom) -> Self {
        let map_size = tile_system.map_size(zoom.value());
        let center_pixel = tile_system.mercator_from_geo(center, zoom.value(), true);
        Self {
            tile_system,
            screen,
            center,
            zoom,
            orientation: 0.,
            wrap: WrapMode::default(),
            offset: center_pixel - screen.center(),
            map_size,
        }
    }

    /// Clockwise rotation of the map, in degrees.
    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees;
        self
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn tile_system(&self) -> &TileSystem {
        &self.tile_system
    }

    pub fn screen(&self) -> &PlanarRect {
        &self.screen
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Size of the whole world map at the current zoom, in pixels.
    pub fn world_size(&self) -> i64 {
        self.map_size.round() as i64
    }

    /// Mercator pixel which ends up in the top left corner of the unrotated screen.
    pub fn mercator_offset(&self) -> PlanarPoint {
        self.offset
    }

    /// Position in pixels of the unrotated map. Positions which are visible in several copies of
    /// the world get the copy closest to the screen center.
    pub fn intrinsic_pixels(&self, position: Position) -> PlanarPoint {
        let pixel = self
            .tile_system
            .mercator_from_geo(position, self.zoom.value(), true);
        self.adjust_for_wrap(pixel - self.offset)
    }

    /// Position in pixels of the screen, with the orientation applied.
    pub fn pixels(&self, position: Position) -> PlanarPoint {
        self.rotate(self.intrinsic_pixels(position))
    }

    /// Geographical position shown at the given screen pixel, e.g. to handle touch input.
    pub fn position_at(&self, pixel: PlanarPoint) -> Position {
        let mut mercator = self.unrotate(pixel) + self.offset;
        if self.wrap.horizontal {
            mercator.x = mercator.x.rem_euclid(self.world_size().max(1));
        }
        self.tile_system.geo_from_mercator(
            mercator,
            self.zoom.value(),
            true,
            self.wrap.horizontal,
        )
    }

    /// Intrinsic pixel from a point projected at the world size of the maximum zoom.
    pub fn pixels_from_projected(&self, projected: &PlanarPoint) -> PlanarPoint {
        let scale = self.map_size / self.reference_map_size();
        PlanarPoint::new(
            floor_to_i64(projected.x as f64 * scale) - self.offset.x,
            floor_to_i64(projected.y as f64 * scale) - self.offset.y,
        )
    }

    /// Inverse of [`Projector::pixels_from_projected`], used to project viewport pixels back to
    /// the reference world size.
    pub fn projected_from_pixels(&self, pixel: &PlanarPoint) -> PlanarPoint {
        let scale = self.reference_map_size() / self.map_size;
        PlanarPoint::new(
            floor_to_i64((pixel.x + self.offset.x) as f64 * scale),
            floor_to_i64((pixel.y + self.offset.y) as f64 * scale),
        )
    }

    pub(crate) fn reference_map_size(&self) -> f64 {
        self.tile_system.map_size(self.tile_system.max_zoom() as f64)
    }

    /// Screen rectangle in intrinsic pixels, enlarged so that it covers the rotated screen.
    pub fn intrinsic_screen_bounds(&self) -> PlanarRect {
        let center = self.screen.center();
        self.screen
            .bounds_after_rotation(center.x, center.y, -self.orientation)
    }

    /// Tiles covering the screen, at the zoom level closest to the current one.
    pub fn visible_tiles(&self) -> Result<TileRegion, InvalidZoom> {
        let level = self.zoom.round().min(self.tile_system.max_zoom());
        let scale = self.tile_system.map_size(level as f64) / self.map_size;

        let mut bounds = self.intrinsic_screen_bounds();
        bounds.offset(self.offset.x, self.offset.y);

        let rect = PlanarRect::new(
            floor_to_i64(bounds.left as f64 * scale),
            floor_to_i64(bounds.top as f64 * scale),
            (bounds.right as f64 * scale).ceil() as i64,
            (bounds.bottom as f64 * scale).ceil() as i64,
        );
        self.tile_system.tile_region_for(level, &rect)
    }

    /// Window in which paths get clipped before being drawn.
    pub fn clip_window(&self) -> ClipWindow {
        ClipWindow::around(&self.screen)
    }

    /// What is the local scale of the map at the provided position and given the current zoom
    /// level?
    pub fn scale_pixel_per_meter(&self, position: Position) -> f64 {
        self.tile_system
            .ground_resolution(position.lat, self.zoom.value())
            .recip()
    }

    /// Apply the orientation to an intrinsic pixel.
    pub fn rotate(&self, pixel: PlanarPoint) -> PlanarPoint {
        self.rotate_by(pixel, self.orientation)
    }

    pub fn unrotate(&self, pixel: PlanarPoint) -> PlanarPoint {
        self.rotate_by(pixel, -self.orientation)
    }

    fn rotate_by(&self, pixel: PlanarPoint, degrees: f64) -> PlanarPoint {
        if degrees == 0. {
            return pixel;
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        let center = self.screen.center();
        PlanarPoint::new(
            rotated_x(pixel.x, pixel.y, center.x, center.y, cos, sin),
            rotated_y(pixel.x, pixel.y, center.x, center.y, cos, sin),
        )
    }

    fn adjust_for_wrap(&self, pixel: PlanarPoint) -> PlanarPoint {
        let center = self.screen.center();
        PlanarPoint::new(
            if self.wrap.horizontal {
                closer_value(center.x as f64, pixel.x as f64, self.map_size).round() as i64
            } else {
                pixel.x
            },
            if self.wrap.vertical {
                closer_value(center.y as f64, pixel.y as f64, self.map_size).round() as i64
            } else {
                pixel.y
            },
        )
    }
}
