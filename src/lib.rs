//! # TileBase
//!
//! Random-access storage for map-tile pyramids: a single flat file from
//! which any tile can be fetched with two ranged reads, whether the file
//! lives on local disk, behind an HTTP server or in S3.
//!
//! A TileBase file is laid out as
//! `header | JSON config | address index | tile data`. The 7-byte header
//! carries the magic bytes `tb`, a version byte and the config length; the
//! config describes the zoom range and one inclusive tile bounding box per
//! zoom; the index holds one 16-byte `(offset, size)` record per tile
//! position, ordered zoom ascending, then y ascending, then x ascending.
//!
//! ## Reading
//!
//! ```no_run
//! use tilebase::{TileBase, TileCoord};
//!
//! #[tokio::main]
//! async fn main() -> tilebase::Result<()> {
//!     let mut tb = TileBase::new("https://example.org/planet.tb")?;
//!     tb.open().await?;
//!
//!     let tile = tb.get_tile(&TileCoord::new(10, 550, 335)?, true).await?;
//!     if tile.is_empty() {
//!         println!("no tile at this position");
//!     }
//!
//!     tb.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Converting
//!
//! Anything implementing [`TileSourceTrait`] (an MBTiles reader, a tile
//! scraper, ...) can be converted with [`convert`], which writes the file
//! at a temporary path and renames it into place on success.

pub mod container;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;

pub use container::{convert, TileBase, TileSourceMetadata, TileSourceTrait, TileSummary};
pub use error::{Fault, Result, TileBaseError};
pub use types::{Blob, ByteRange, TileBBox, TileCoord};
