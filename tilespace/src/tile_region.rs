//! Rectangular regions of tiles, which may cross the date line.

use crate::tiles::{TileId, TileIndex, total_tiles};
use crate::zoom::{InvalidZoom, MAX_ZOOM, check_zoom};

/// Rectangle of tiles at one zoom level. Coordinates wrap at the edge of the tile grid, so a
/// region can start at the last column and continue at the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct TileRegion {
    zoom: u8,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl TileRegion {
    /// Region spanning from the `left`, `top` tile to the `right`, `bottom` tile, both included.
    /// Coordinates are wrapped, so `right` may be smaller than `left`.
    pub fn new(
        zoom: u8,
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
    ) -> Result<Self, InvalidZoom> {
        let upper = total_tiles(check_zoom(zoom)?) as i64;
        Ok(Self {
            zoom,
            left: left.rem_euclid(upper) as u32,
            top: top.rem_euclid(upper) as u32,
            width: inclusive_size(left, right, upper),
            height: inclusive_size(top, bottom, upper),
        })
    }

    /// Region of given size, which is capped at the size of the whole world.
    pub fn with_size(
        zoom: u8,
        left: i64,
        top: i64,
        width: u32,
        height: u32,
    ) -> Result<Self, InvalidZoom> {
        let upper = total_tiles(check_zoom(zoom)?);
        Ok(Self {
            zoom,
            left: left.rem_euclid(upper as i64) as u32,
            top: top.rem_euclid(upper as i64) as u32,
            width: width.min(upper),
            height: height.min(upper),
        })
    }

    /// Every tile of the given zoom.
    pub fn world(zoom: u8) -> Result<Self, InvalidZoom> {
        let upper = total_tiles(check_zoom(zoom)?);
        Self::with_size(zoom, 0, 0, upper, upper)
    }

    pub fn empty(zoom: u8) -> Result<Self, InvalidZoom> {
        Self::with_size(zoom, 0, 0, 0, 0)
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// First column after the region (exclusive), wrapped.
    pub fn right(&self) -> u32 {
        ((self.left as u64 + self.width as u64) % self.upper() as u64) as u32
    }

    /// First row after the region (exclusive), wrapped.
    pub fn bottom(&self) -> u32 {
        ((self.top as u64 + self.height as u64) % self.upper() as u64) as u32
    }

    pub fn size(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn contains(&self, index: TileIndex) -> bool {
        index.zoom() == self.zoom
            && self.contains_value(index.x(), self.left, self.width)
            && self.contains_value(index.y(), self.top, self.height)
    }

    pub fn contains_tile(&self, tile_id: TileId) -> bool {
        tile_id.zoom == self.zoom
            && self.contains_value(tile_id.x, self.left, self.width)
            && self.contains_value(tile_id.y, self.top, self.height)
    }

    /// Row-major iteration over the tiles, computed on the fly.
    pub fn iter(&self) -> TileRegionIter {
        TileRegionIter {
            region: *self,
            index: 0,
        }
    }

    /// The same region grown by `border` tiles on each side.
    pub fn with_border(&self, border: u32) -> TileRegion {
        if self.is_empty() {
            return *self;
        }

        let upper = self.upper();
        let border = border.min(upper);
        Self {
            zoom: self.zoom,
            left: (self.left as i64 - border as i64).rem_euclid(upper as i64) as u32,
            top: (self.top as i64 - border as i64).rem_euclid(upper as i64) as u32,
            width: (self.width + 2 * border).min(upper),
            height: (self.height + 2 * border).min(upper),
        }
    }

    /// The tiles covering the same area at another zoom level.
    pub fn zoom_shifted(&self, delta: i8) -> Result<TileRegion, InvalidZoom> {
        let zoom = self.zoom as i16 + delta as i16;
        if !(0..=MAX_ZOOM as i16).contains(&zoom) {
            log::debug!(
                "Cannot shift zoom of {:?} by {delta}, zoom {zoom} is out of range.",
                self
            );
            return Err(InvalidZoom);
        }
        let zoom = zoom as u8;

        if self.is_empty() {
            return Self::empty(zoom);
        }

        // Last column and row, not wrapped, so that the shift keeps the size.
        let left = self.left as i64;
        let top = self.top as i64;
        let last_x = left + self.width as i64 - 1;
        let last_y = top + self.height as i64 - 1;

        if delta <= 0 {
            let shift = -delta as u32;
            Self::new(
                zoom,
                left >> shift,
                top >> shift,
                last_x >> shift,
                last_y >> shift,
            )
        } else {
            let shift = delta as u32;
            Self::new(
                zoom,
                left << shift,
                top << shift,
                ((last_x + 1) << shift) - 1,
                ((last_y + 1) << shift) - 1,
            )
        }
    }

    fn upper(&self) -> u32 {
        total_tiles(self.zoom)
    }

    fn contains_value(&self, value: u32, first: u32, size: u32) -> bool {
        let value = if value < first {
            value as u64 + self.upper() as u64
        } else {
            value as u64
        };
        value < first as u64 + size as u64
    }
}

/// Number of tiles from `first` to `last`, both included, going forward around the world.
fn inclusive_size(first: i64, last: i64, upper: i64) -> u32 {
    let span = if first > last {
        (last - first).rem_euclid(upper)
    } else {
        last - first
    };
    (span + 1).min(upper) as u32
}

impl IntoIterator for &TileRegion {
    type Item = TileIndex;
    type IntoIter = TileRegionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the tiles of a [`TileRegion`].
#[derive(Debug, Clone)]
pub struct TileRegionIter {
    region: TileRegion,
    index: u64,
}

impl Iterator for TileRegionIter {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.region.size() {
            return None;
        }

        let upper = self.region.upper() as u64;
        let width = self.region.width as u64;
        let x = (self.region.left as u64 + self.index % width) % upper;
        let y = (self.region.top as u64 + self.index / width) % upper;
        self.index += 1;

        TileIndex::pack(self.region.zoom, x as u32, y as u32).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.region.size().saturating_sub(self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileRegionIter {}

/// Turns a region into another one, e.g. to prefetch tiles around the visible ones, or the ones
/// of the neighbouring zoom levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionComputer {
    /// Grow the region by that many tiles on each side.
    Border(u32),

    /// Same area at a zoom level shifted by that delta.
    Zoom(i8),
}

impl RegionComputer {
    /// `None` when the region cannot be computed, e.g. because the zoom would go out of range.
    pub fn compute(&self, source: &TileRegion) -> Option<TileRegion> {
        match *self {
            RegionComputer::Border(border) => Some(source.with_border(border)),
            RegionComputer::Zoom(delta) => source.zoom_shifted(delta).ok(),
        }
    }

    pub fn compute_list(&self, source: &TileRegionList) -> TileRegionList {
        source
            .iter()
            .filter_map(|region| self.compute(region))
            .collect()
    }
}

/// Several regions, possibly at different zoom levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileRegionList {
    regions: Vec<TileRegion>,
}

impl TileRegionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, region: TileRegion) {
        self.regions.push(region);
    }

    pub fn contains(&self, index: TileIndex) -> bool {
        self.regions.iter().any(|region| region.contains(index))
    }

    /// Total number of tiles. Tiles belonging to several regions are counted more than once.
    pub fn size(&self) -> u64 {
        self.regions.iter().map(TileRegion::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileRegion> {
        self.regions.iter()
    }

    /// Every tile of every region.
    pub fn tiles(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.regions.iter().flat_map(TileRegion::iter)
    }
}

impl FromIterator<TileRegion> for TileRegionList {
    fn from_iter<T: IntoIterator<Item = TileRegion>>(iter: T) -> Self {
        Self {
            regions: iter.into_iter().collect(),
        }
    }
}
