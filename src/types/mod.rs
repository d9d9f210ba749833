mod blob;
mod byte_range;
mod tile_bbox;
mod tile_coord;

pub use blob::Blob;
pub use byte_range::ByteRange;
pub use tile_bbox::TileBBox;
pub use tile_coord::{tile_to_lat, tile_to_lon, TileCoord};
