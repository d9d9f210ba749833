//! Gzip helpers for individually compressed tile payloads.
//!
//! The format itself is payload-agnostic; these are only used when a caller
//! asks `get_tile` to hand back decoded bytes, and by tests building
//! compressed fixtures.

use crate::{
	error::{Result, TileBaseError},
	types::Blob,
};
use flate2::bufread::{GzDecoder, GzEncoder};
use std::io::Read;

pub fn compress_gzip(blob: Blob) -> Result<Blob> {
	let mut result = Vec::new();
	GzEncoder::new(blob.as_slice(), flate2::Compression::default()).read_to_end(&mut result)?;
	Ok(Blob::from(result))
}

pub fn decompress_gzip(blob: Blob) -> Result<Blob> {
	let mut result = Vec::new();
	GzDecoder::new(blob.as_slice())
		.read_to_end(&mut result)
		.map_err(|_| TileBaseError::DecompressionFailed)?;
	Ok(Blob::from(result))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trip() -> Result<()> {
		let original = Blob::from("a reasonably compressible tile payload payload payload");
		let compressed = compress_gzip(original.clone())?;
		assert_ne!(compressed, original);
		assert_eq!(decompress_gzip(compressed)?, original);
		Ok(())
	}

	#[test]
	fn garbage_fails() {
		let garbage = Blob::from(vec![0xde, 0xad, 0xbe, 0xef]);
		assert!(matches!(
			decompress_gzip(garbage),
			Err(TileBaseError::DecompressionFailed)
		));
	}
}
