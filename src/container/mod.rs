mod converter;
mod file_header;
pub mod mock;
mod reader;
mod tile_address;
mod tile_config;
mod tile_source;

pub use converter::convert;
pub use file_header::{FileHeader, HEADER_LENGTH, TILEBASE_VERSION};
pub use reader::{TileBase, TileSummary};
pub use tile_address::{TileAddress, TILE_ADDRESS_LENGTH};
pub use tile_config::{TileConfig, ValidatedConfig};
pub use tile_source::{TileSourceMetadata, TileSourceTrait};
