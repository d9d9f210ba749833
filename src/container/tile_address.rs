//! The fixed 16-byte index record locating one tile's bytes.

use crate::{
	error::{Result, TileBaseError},
	types::Blob,
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

pub const TILE_ADDRESS_LENGTH: u64 = 16;

/// `offset` is relative to the start of the tile-data segment; `size == 0`
/// is the "tile absent" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAddress {
	pub offset: u64,
	pub size: u64,
}

impl TileAddress {
	pub fn new(offset: u64, size: u64) -> TileAddress {
		TileAddress { offset, size }
	}

	pub fn is_absent(&self) -> bool {
		self.size == 0
	}

	pub fn from_blob(blob: &Blob) -> Result<TileAddress> {
		if blob.len() != TILE_ADDRESS_LENGTH {
			return Err(TileBaseError::ShortRead {
				expected: TILE_ADDRESS_LENGTH,
				actual: blob.len(),
			});
		}
		let mut cursor = blob.as_slice();
		Ok(TileAddress {
			offset: cursor.read_u64::<LittleEndian>()?,
			size: cursor.read_u64::<LittleEndian>()?,
		})
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut buffer = Vec::with_capacity(TILE_ADDRESS_LENGTH as usize);
		buffer.write_u64::<LittleEndian>(self.offset)?;
		buffer.write_u64::<LittleEndian>(self.size)?;
		Ok(Blob::from(buffer))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trip() -> Result<()> {
		let address = TileAddress::new(123_456_789_000, 42);
		assert_eq!(TileAddress::from_blob(&address.to_blob()?)?, address);
		Ok(())
	}

	#[test]
	fn byte_layout() -> Result<()> {
		let blob = TileAddress::new(1, 2).to_blob()?;
		assert_eq!(
			blob.as_slice(),
			&[1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]
		);
		Ok(())
	}

	#[test]
	fn absent_sentinel() {
		assert!(TileAddress::new(100, 0).is_absent());
		assert!(!TileAddress::new(100, 1).is_absent());
	}

	#[test]
	fn rejects_truncated_record() {
		let blob = Blob::from(vec![0u8; 15]);
		assert!(matches!(
			TileAddress::from_blob(&blob),
			Err(TileBaseError::ShortRead { expected: 16, actual: 15 })
		));
	}
}
