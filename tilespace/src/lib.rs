#![doc = include_str!("../README.md")]
#![deny(clippy::unwrap_used, rustdoc::broken_intra_doc_links)]

mod bounding_box;
pub mod clipper;
pub mod distance;
pub mod intersection;
pub mod mercator;
mod path;
mod planar;
mod position;
mod projector;
pub mod simplify;
mod tile_region;
mod tile_system;
mod tiles;
pub mod wrap;
mod zoom;

pub use bounding_box::BoundingBox;
pub use clipper::{
    ClipMode, ClipWindow, PointAccepter, PointList, SegmentClipper, SegmentList, SideOptimizer,
};
pub use path::{PathOptions, PointPool, ProjectedPath, RenderedPath};
pub use planar::{PlanarPoint, PlanarRect, round_half_up, rotated_x, rotated_y};
pub use position::{EARTH_RADIUS, Position, lat_lon, lon_lat, wrap_longitude};
pub use projector::Projector;
pub use tile_region::{RegionComputer, TileRegion, TileRegionIter, TileRegionList};
pub use tile_system::{InvalidTileSize, TileSystem};
pub use tiles::{TileId, TileIndex, TileUv, total_tiles};
pub use wrap::WrapMode;
pub use zoom::{InvalidZoom, MAX_ZOOM, Zoom, check_zoom};
