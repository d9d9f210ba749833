//! The 7-byte prologue of a TileBase file: magic, version, config length.

use crate::{
	error::{Result, TileBaseError},
	io::DataReader,
	types::{Blob, ByteRange},
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Write;

pub const HEADER_LENGTH: u64 = 7;
pub const TILEBASE_VERSION: u8 = 1;

const MAGIC: [u8; 2] = *b"tb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
	pub version: u8,
	pub config_length: u32,
}

impl FileHeader {
	pub fn new(config_length: u32) -> FileHeader {
		FileHeader {
			version: TILEBASE_VERSION,
			config_length,
		}
	}

	pub async fn from_reader(reader: &DataReader) -> Result<FileHeader> {
		let blob = reader.read_range(&ByteRange::new(0, HEADER_LENGTH)).await?;
		FileHeader::from_blob(&blob)
	}

	pub fn from_blob(blob: &Blob) -> Result<FileHeader> {
		if blob.len() != HEADER_LENGTH {
			return Err(TileBaseError::InvalidFormat);
		}

		let mut cursor = blob.as_slice();
		let magic = [cursor.read_u8()?, cursor.read_u8()?];
		if magic != MAGIC {
			return Err(TileBaseError::InvalidFormat);
		}

		let version = cursor.read_u8()?;
		if version != TILEBASE_VERSION {
			return Err(TileBaseError::UnsupportedVersion(version));
		}

		// config_length is canonically little-endian
		let config_length = cursor.read_u32::<LittleEndian>()?;

		Ok(FileHeader { version, config_length })
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut buffer = Vec::with_capacity(HEADER_LENGTH as usize);
		buffer.write_all(&MAGIC)?;
		buffer.write_u8(self.version)?;
		buffer.write_u32::<LittleEndian>(self.config_length)?;
		Ok(Blob::from(buffer))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trip() -> Result<()> {
		let header = FileHeader::new(92);
		let parsed = FileHeader::from_blob(&header.to_blob()?)?;
		assert_eq!(parsed, header);
		assert_eq!(parsed.config_length, 92);
		Ok(())
	}

	#[test]
	fn byte_layout_is_little_endian() -> Result<()> {
		let blob = FileHeader::new(0x01020304).to_blob()?;
		assert_eq!(blob.as_slice(), &[0x74, 0x62, 0x01, 0x04, 0x03, 0x02, 0x01]);
		Ok(())
	}

	#[test]
	fn rejects_bad_magic() {
		let blob = Blob::from(vec![b'x', b'b', 1, 0, 0, 0, 0]);
		assert!(matches!(
			FileHeader::from_blob(&blob),
			Err(TileBaseError::InvalidFormat)
		));

		let blob = Blob::from(vec![b't', b'x', 1, 0, 0, 0, 0]);
		assert!(matches!(
			FileHeader::from_blob(&blob),
			Err(TileBaseError::InvalidFormat)
		));
	}

	#[test]
	fn rejects_unsupported_version() {
		let blob = Blob::from(vec![b't', b'b', 2, 0, 0, 0, 0]);
		assert!(matches!(
			FileHeader::from_blob(&blob),
			Err(TileBaseError::UnsupportedVersion(2))
		));
	}

	#[test]
	fn rejects_wrong_length() {
		assert!(matches!(
			FileHeader::from_blob(&Blob::from(vec![b't', b'b', 1])),
			Err(TileBaseError::InvalidFormat)
		));
	}
}
