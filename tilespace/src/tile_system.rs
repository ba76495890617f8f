//! Web Mercator projection parameterized by the tile size, going all the way from geographical
//! positions to pixels of the whole world map and to tiles.

use std::f64::consts::PI;

use crate::bounding_box::BoundingBox;
use crate::mercator::{
    clip, clip_latitude, floor_to_i64, latitude_from_y01, longitude_from_x01, x01_from_longitude,
    y01_from_latitude,
};
use crate::planar::{PlanarPoint, PlanarRect};
use crate::position::{EARTH_RADIUS, Position, lat_lon};
use crate::tile_region::TileRegion;
use crate::tiles::TileId;
use crate::zoom::{InvalidZoom, MAX_ZOOM, check_zoom};

const DEFAULT_TILE_SIZE: u32 = 256;
const LARGEST_TILE_SIZE: u32 = 1 << 12;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid tile size: {size}, expected a power of two not larger than 4096")]
pub struct InvalidTileSize {
    pub size: u32,
}

/// Tile grid over the Web Mercator plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct TileSystem {
    tile_size: u32,
    max_zoom: u8,
}

impl Default for TileSystem {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl TryFrom<u32> for TileSystem {
    type Error = InvalidTileSize;

    fn try_from(tile_size: u32) -> Result<Self, Self::Error> {
        Self::new(tile_size)
    }
}

impl From<TileSystem> for u32 {
    fn from(tile_system: TileSystem) -> Self {
        tile_system.tile_size
    }
}

impl TileSystem {
    pub fn new(tile_size: u32) -> Result<Self, InvalidTileSize> {
        if !tile_size.is_power_of_two() || tile_size > LARGEST_TILE_SIZE {
            return Err(InvalidTileSize { size: tile_size });
        }

        // The whole world at the maximum zoom needs to stay within what the default tile size
        // gives, so that the packed tile index and the pixel math keep fitting.
        let max_zoom = if tile_size > DEFAULT_TILE_SIZE {
            let excess = (tile_size / DEFAULT_TILE_SIZE).trailing_zeros() as u8;
            log::debug!("Tile size of {tile_size} px lowers the maximum zoom by {excess}.");
            MAX_ZOOM - excess
        } else {
            MAX_ZOOM
        };

        Ok(Self {
            tile_size,
            max_zoom,
        })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Size of the whole world in pixels. Zoom can be fractional.
    pub fn map_size(&self, zoom: f64) -> f64 {
        self.tile_size as f64 * zoom.exp2()
    }

    /// Size of the whole world in pixels at an integer zoom.
    pub fn world_size(&self, zoom: u8) -> i64 {
        (self.tile_size as i64) << zoom
    }

    pub fn mercator_from_xy01(&self, xy01: f64, map_size: f64, wrap: bool) -> i64 {
        let mercator = floor_to_i64(xy01 * map_size);
        if wrap {
            mercator.clamp(0, (map_size as i64 - 1).max(0))
        } else {
            mercator
        }
    }

    pub fn xy01_from_mercator(&self, mercator: i64, map_size: f64, wrap: bool) -> f64 {
        let xy01 = mercator as f64 / map_size;
        if wrap { clip(xy01, 0., 1.) } else { xy01 }
    }

    pub fn mercator_x_from_longitude(&self, longitude: f64, map_size: f64, wrap: bool) -> i64 {
        self.mercator_from_xy01(x01_from_longitude(longitude, wrap), map_size, wrap)
    }

    pub fn mercator_y_from_latitude(&self, latitude: f64, map_size: f64, wrap: bool) -> i64 {
        self.mercator_from_xy01(y01_from_latitude(latitude, wrap), map_size, wrap)
    }

    /// Pixel of the whole world map at given zoom.
    pub fn mercator_from_geo(&self, position: Position, zoom: f64, wrap: bool) -> PlanarPoint {
        let map_size = self.map_size(zoom);
        PlanarPoint::new(
            self.mercator_x_from_longitude(position.lon, map_size, wrap),
            self.mercator_y_from_latitude(position.lat, map_size, wrap),
        )
    }

    /// Inverse of [`TileSystem::mercator_from_geo`]. Wrapping can be controlled separately for
    /// each axis.
    pub fn geo_from_mercator(
        &self,
        pixel: PlanarPoint,
        zoom: f64,
        wrap_latitude: bool,
        wrap_longitude: bool,
    ) -> Position {
        let map_size = self.map_size(zoom);
        lat_lon(
            latitude_from_y01(
                self.xy01_from_mercator(pixel.y, map_size, wrap_latitude),
                wrap_latitude,
            ),
            longitude_from_x01(
                self.xy01_from_mercator(pixel.x, map_size, wrap_longitude),
                wrap_longitude,
            ),
        )
    }

    pub fn tile_from_mercator(&self, mercator: i64) -> i64 {
        mercator.div_euclid(self.tile_size as i64)
    }

    pub fn mercator_from_tile(&self, tile: i64) -> i64 {
        tile * self.tile_size as i64
    }

    /// Tile containing the position.
    pub fn tile_at(&self, position: Position, zoom: u8) -> Result<TileId, InvalidZoom> {
        let zoom = check_zoom(zoom)?;
        let pixel = self.mercator_from_geo(position, zoom as f64, true);
        TileId::wrapped(
            zoom,
            self.tile_from_mercator(pixel.x),
            self.tile_from_mercator(pixel.y),
        )
    }

    /// Geographical area covered by the tile.
    pub fn tile_bounds(&self, tile_id: TileId) -> BoundingBox {
        let zoom = tile_id.zoom as f64;
        let top_left = self.geo_from_mercator(
            PlanarPoint::new(
                self.mercator_from_tile(tile_id.x as i64),
                self.mercator_from_tile(tile_id.y as i64),
            ),
            zoom,
            true,
            true,
        );
        let bottom_right = self.geo_from_mercator(
            PlanarPoint::new(
                self.mercator_from_tile(tile_id.x as i64 + 1),
                self.mercator_from_tile(tile_id.y as i64 + 1),
            ),
            zoom,
            true,
            true,
        );

        BoundingBox::new(
            top_left.lat,
            bottom_right.lon,
            bottom_right.lat,
            top_left.lon,
        )
    }

    /// Tiles needed to cover the given rectangle of the world map pixels at that zoom.
    /// Pixels beyond the world edges wrap around.
    pub fn tile_region_for(&self, zoom: u8, rect: &PlanarRect) -> Result<TileRegion, InvalidZoom> {
        let right = rect.right.max(rect.left + 1) - 1;
        let bottom = rect.bottom.max(rect.top + 1) - 1;
        TileRegion::new(
            zoom,
            self.tile_from_mercator(rect.left),
            self.tile_from_mercator(rect.top),
            self.tile_from_mercator(right),
            self.tile_from_mercator(bottom),
        )
    }

    /// Meters per pixel at given latitude.
    /// <https://learn.microsoft.com/en-us/bingmaps/articles/bing-maps-tile-system>
    pub fn ground_resolution(&self, latitude: f64, zoom: f64) -> f64 {
        clip_latitude(latitude).to_radians().cos() * 2. * PI * EARTH_RADIUS / self.map_size(zoom)
    }

    /// Ratio between a distance on the screen and the same distance on the ground, e.g.
    /// 1:591658710 for the whole world on a 96 DPI screen.
    pub fn map_scale(&self, latitude: f64, zoom: f64, screen_dpi: u32) -> f64 {
        const METERS_PER_INCH: f64 = 0.0254;
        self.ground_resolution(latitude, zoom) * screen_dpi as f64 / METERS_PER_INCH
    }

    /// Zoom at which the bounding box fits the screen of given size. `None` if the box has no
    /// area to fit.
    pub fn bounding_box_zoom(
        &self,
        bounding_box: &BoundingBox,
        screen_width: u32,
        screen_height: u32,
    ) -> Option<f64> {
        let latitude_span = y01_from_latitude(bounding_box.south, true)
            - y01_from_latitude(bounding_box.north, true);
        if latitude_span <= 0. {
            return None;
        }

        let mut longitude_span = x01_from_longitude(bounding_box.east, true)
            - x01_from_longitude(bounding_box.west, true);
        if longitude_span < 0. {
            longitude_span += 1.;
        }
        if longitude_span == 0. {
            return None;
        }

        let tile_size = self.tile_size as f64;
        let latitude_zoom = (screen_height as f64 / latitude_span / tile_size).log2();
        let longitude_zoom = (screen_width as f64 / longitude_span / tile_size).log2();
        Some(latitude_zoom.min(longitude_zoom))
    }

    /// Bing style quad key of the tile.
    /// <https://learn.microsoft.com/en-us/bingmaps/articles/bing-maps-tile-system>
    pub fn quadkey(&self, tile_id: TileId) -> String {
        (1..=tile_id.zoom)
            .rev()
            .map(|level| {
                let mask = 1 << (level - 1);
                let mut digit = b'0';
                if tile_id.x & mask != 0 {
                    digit += 1;
                }
                if tile_id.y & mask != 0 {
                    digit += 2;
                }
                digit as char
            })
            .collect()
    }

    /// Inverse of [`TileSystem::quadkey`]. `None` for anything but digits 0 to 3, or keys
    /// longer than the maximum zoom.
    pub fn tile_from_quadkey(&self, quadkey: &str) -> Option<TileId> {
        let zoom = u8::try_from(quadkey.len()).ok()?;
        check_zoom(zoom).ok()?;

        let mut x = 0;
        let mut y = 0;
        for (index, digit) in quadkey.bytes().enumerate() {
            let mask = 1 << (zoom as usize - index - 1);
            match digit {
                b'0' => {}
                b'1' => x |= mask,
                b'2' => y |= mask,
                b'3' => {
                    x |= mask;
                    y |= mask;
                }
                _ => return None,
            }
        }
        TileId::new(x, y, zoom)
    }
}
