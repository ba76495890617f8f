use crate::tile_region::TileRegion;
use crate::zoom::{InvalidZoom, MAX_ZOOM, check_zoom};

/// Number of tiles along one side of the world at given zoom. Zoom levels past [`MAX_ZOOM`]
/// count as [`MAX_ZOOM`].
pub fn total_tiles(zoom: u8) -> u32 {
    1 << zoom.min(MAX_ZOOM)
}

/// Identifies the tile in the tile grid.
///
/// Fields are public for convenience, but only tiles coming from [`TileId::new`] or
/// [`TileId::wrapped`] are guaranteed to exist. Neighbours of a tile with zoom past [`MAX_ZOOM`]
/// are computed as if it was at [`MAX_ZOOM`], and it has no ancestors nor children.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct TileId {
    /// X number of the tile.
    pub x: u32,

    /// Y number of the tile.
    pub y: u32,

    /// Zoom level, where 0 means no zoom.
    /// See: <https://wiki.openstreetmap.org/wiki/Zoom_levels>
    pub zoom: u8,
}

impl TileId {
    /// Tile at given coordinates, if these exist at that zoom.
    pub fn new(x: u32, y: u32, zoom: u8) -> Option<Self> {
        let tile_id = Self { x, y, zoom };
        tile_id.valid().then_some(tile_id)
    }

    /// Tile at coordinates which are first brought into the grid, so that -1 becomes the last
    /// column or row.
    pub fn wrapped(zoom: u8, x: i64, y: i64) -> Result<Self, InvalidZoom> {
        let upper = total_tiles(check_zoom(zoom)?) as i64;
        Ok(Self {
            x: x.rem_euclid(upper) as u32,
            y: y.rem_euclid(upper) as u32,
            zoom,
        })
    }

    /// Neighbour to the east. The world is round, so it wraps around the date line.
    pub fn east(&self) -> TileId {
        TileId {
            x: self.x.wrapping_add(1) % total_tiles(self.zoom),
            y: self.y,
            zoom: self.zoom,
        }
    }

    pub fn west(&self) -> TileId {
        TileId {
            x: self.x.checked_sub(1).unwrap_or(total_tiles(self.zoom) - 1),
            y: self.y,
            zoom: self.zoom,
        }
    }

    /// Neighbour to the north, unless this tile is already at the top of the map.
    pub fn north(&self) -> Option<TileId> {
        Some(TileId {
            x: self.x,
            y: self.y.checked_sub(1)?,
            zoom: self.zoom,
        })
    }

    pub fn south(&self) -> Option<TileId> {
        (self.y < total_tiles(self.zoom) - 1).then_some(TileId {
            x: self.x,
            y: self.y + 1,
            zoom: self.zoom,
        })
    }

    pub fn index(&self) -> TileIndex {
        TileIndex::from(*self)
    }

    /// Tile one zoom level lower which covers this one.
    pub fn parent(&self) -> Option<TileId> {
        self.ancestor(self.zoom.checked_sub(1)?)
            .map(|(tile_id, _)| tile_id)
    }

    /// Tile with lower zoom level which covers this one, together with the part of it that
    /// corresponds to this tile. Useful when the tile is not available yet, but the lower zoom
    /// one is.
    pub fn ancestor(&self, zoom: u8) -> Option<(TileId, TileUv)> {
        if zoom > self.zoom || self.zoom > MAX_ZOOM {
            return None;
        }

        let dzoom = 2u32.pow((self.zoom - zoom) as u32);

        let x = (self.x / dzoom, self.x % dzoom);
        let y = (self.y / dzoom, self.y % dzoom);

        let zoomed_tile_id = TileId {
            x: x.0,
            y: y.0,
            zoom,
        };

        let z = (dzoom as f32).recip();

        let uv = TileUv {
            min_u: x.1 as f32 * z,
            min_v: y.1 as f32 * z,
            max_u: x.1 as f32 * z + z,
            max_v: y.1 as f32 * z + z,
        };

        Some((zoomed_tile_id, uv))
    }

    /// The four tiles of the next zoom level covering this one.
    pub fn children(&self) -> Result<TileRegion, InvalidZoom> {
        TileRegion::with_size(
            self.zoom.saturating_add(1),
            self.x as i64 * 2,
            self.y as i64 * 2,
            2,
            2,
        )
    }

    pub(crate) fn valid(&self) -> bool {
        self.zoom <= MAX_ZOOM && self.x < total_tiles(self.zoom) && self.y < total_tiles(self.zoom)
    }
}

/// Part of a tile, in texture coordinates between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileUv {
    pub min_u: f32,
    pub min_v: f32,
    pub max_u: f32,
    pub max_v: f32,
}

#[cfg(feature = "egui")]
impl From<TileUv> for egui::Rect {
    fn from(uv: TileUv) -> Self {
        egui::Rect::from_min_max(
            egui::pos2(uv.min_u, uv.min_v),
            egui::pos2(uv.max_u, uv.max_v),
        )
    }
}

/// Zoom and both coordinates of a tile packed into a single `u64`, so it can be used as a cheap
/// key in caches.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct TileIndex(u64);

const COORDINATE_BITS: u32 = MAX_ZOOM as u32;
const COORDINATE_MASK: u64 = (1 << COORDINATE_BITS) - 1;

impl TileIndex {
    /// Coordinates are taken modulo the number of tiles at that zoom.
    pub fn pack(zoom: u8, x: u32, y: u32) -> Result<Self, InvalidZoom> {
        let zoom = check_zoom(zoom)?;
        let modulo = total_tiles(zoom) - 1;
        Ok(Self(
            ((zoom as u64) << (2 * COORDINATE_BITS))
                | (((x & modulo) as u64) << COORDINATE_BITS)
                | (y & modulo) as u64,
        ))
    }

    pub fn zoom(&self) -> u8 {
        (self.0 >> (2 * COORDINATE_BITS)) as u8
    }

    pub fn x(&self) -> u32 {
        ((self.0 >> COORDINATE_BITS) & COORDINATE_MASK) as u32
    }

    pub fn y(&self) -> u32 {
        (self.0 & COORDINATE_MASK) as u32
    }

    pub fn unpack(&self) -> TileId {
        TileId {
            x: self.x(),
            y: self.y(),
            zoom: self.zoom(),
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<TileId> for TileIndex {
    fn from(tile_id: TileId) -> Self {
        // A valid tile always packs, so there is nothing to mask but the zoom.
        Self(
            ((tile_id.zoom.min(MAX_ZOOM) as u64) << (2 * COORDINATE_BITS))
                | ((tile_id.x as u64 & COORDINATE_MASK) << COORDINATE_BITS)
                | (tile_id.y as u64 & COORDINATE_MASK),
        )
    }
}

impl From<TileIndex> for TileId {
    fn from(index: TileIndex) -> Self {
        index.unpack()
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validating_tiles() {
        assert!(TileId::new(0, 0, 0).is_some());
        assert!(TileId::new(1, 0, 0).is_none());
        assert!(TileId::new(3, 3, 2).is_some());
        assert!(TileId::new(4, 3, 2).is_none());
        assert!(TileId::new(0, 0, 30).is_none());
    }

    #[test]
    fn wrapping_coordinates() {
        assert_eq!(TileId::new(3, 0, 2), TileId::wrapped(2, -1, 4).ok());
        assert_eq!(TileId::new(1, 2, 2), TileId::wrapped(2, 9, -6).ok());
        assert_eq!(Err(InvalidZoom), TileId::wrapped(30, 0, 0));
    }

    #[test]
    fn neighbours() {
        let tile_id = TileId::new(0, 0, 2).unwrap();
        assert_eq!(TileId::new(1, 0, 2).unwrap(), tile_id.east());
        assert_eq!(TileId::new(3, 0, 2).unwrap(), tile_id.west());
        assert_eq!(tile_id, tile_id.west().east());
        assert_eq!(None, tile_id.north());
        assert_eq!(TileId::new(0, 1, 2), tile_id.south());

        let bottom = TileId::new(3, 3, 2).unwrap();
        assert_eq!(None, bottom.south());
        assert_eq!(TileId::new(0, 3, 2).unwrap(), bottom.east());
        assert_eq!(TileId::new(3, 2, 2), bottom.north());
    }

    #[test]
    fn tile_built_past_the_maximum_zoom() {
        assert_eq!(total_tiles(MAX_ZOOM), total_tiles(40));
        assert_eq!(total_tiles(MAX_ZOOM), total_tiles(u8::MAX));

        let tile_id = TileId { x: 3, y: 3, zoom: 40 };
        assert!(!tile_id.valid());
        assert_eq!(4, tile_id.east().x);
        assert_eq!(2, tile_id.west().x);
        assert_eq!(Some(4), tile_id.south().map(|south| south.y));
        assert_eq!(None, tile_id.parent());
        assert_eq!(None, tile_id.ancestor(0));
        assert_eq!(Err(InvalidZoom), tile_id.children());

        let last = TileId { x: u32::MAX, y: u32::MAX, zoom: u8::MAX };
        assert_eq!(0, last.east().x);
        assert_eq!(None, last.south());
        assert_eq!(Err(InvalidZoom), last.children());
    }

    #[test]
    fn packing_tile_index() {
        let index = TileIndex::pack(3, 5, 2).unwrap();
        assert_eq!(3, index.zoom());
        assert_eq!(5, index.x());
        assert_eq!(2, index.y());
        assert_eq!((3 << 58) | (5 << 29) | 2, index.value());
        assert_eq!(TileId::new(5, 2, 3).unwrap(), index.unpack());

        assert_eq!(Err(InvalidZoom), TileIndex::pack(30, 0, 0));
    }

    #[test]
    fn packing_reduces_coordinates() {
        assert_eq!(TileIndex::pack(2, 1, 3), TileIndex::pack(2, 5, 7));
    }

    #[test]
    fn tile_index_is_bijective() {
        for zoom in 0..=MAX_ZOOM {
            let max = total_tiles(zoom) - 1;
            let samples = [0, max / 3, max / 2, max];
            for x in samples {
                for y in samples {
                    let tile_id = TileId::new(x, y, zoom).unwrap();
                    let index = TileIndex::pack(zoom, x, y).unwrap();
                    assert_eq!(tile_id, index.unpack());
                    assert_eq!(index, tile_id.index());
                }
            }
        }
    }

    #[test]
    fn interpolating_from_lower_zoom() {
        let tile_id = TileId::new(5, 6, 3).unwrap();

        let (ancestor, uv) = tile_id.ancestor(3).unwrap();
        assert_eq!(tile_id, ancestor);
        assert_eq!(
            TileUv {
                min_u: 0.,
                min_v: 0.,
                max_u: 1.,
                max_v: 1.
            },
            uv
        );

        let (ancestor, uv) = tile_id.ancestor(1).unwrap();
        assert_eq!(TileId::new(1, 1, 1).unwrap(), ancestor);
        assert_eq!(
            TileUv {
                min_u: 0.25,
                min_v: 0.5,
                max_u: 0.5,
                max_v: 0.75
            },
            uv
        );

        assert_eq!(None, tile_id.ancestor(4));
    }

    #[test]
    fn parents_and_children() {
        let tile_id = TileId::new(5, 6, 3).unwrap();
        assert_eq!(TileId::new(2, 3, 2), tile_id.parent());
        assert_eq!(None, TileId::new(0, 0, 0).unwrap().parent());

        let children = tile_id.children().unwrap();
        assert_eq!(4, children.size());
        for child in &children {
            assert_eq!(Some(tile_id), child.unpack().parent());
        }

        let deepest = TileId::new(0, 0, MAX_ZOOM).unwrap();
        assert_eq!(Err(InvalidZoom), deepest.children());
    }

    #[test]
    fn displaying_tile() {
        assert_eq!("3/5/6", TileId::new(5, 6, 3).unwrap().to_string());
    }
}
