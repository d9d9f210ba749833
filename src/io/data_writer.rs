//! Sequential file writer used by the converter to assemble a TileBase file.

use crate::{
	error::Result,
	types::{Blob, ByteRange},
};
use std::{
	fs::File,
	io::{BufWriter, Seek, Write},
	path::Path,
};

pub trait DataWriterTrait: Send {
	fn append(&mut self, blob: &Blob) -> Result<ByteRange>;
	fn get_position(&mut self) -> Result<u64>;
	fn finish(&mut self) -> Result<()>;
}

pub struct DataWriterFile {
	writer: BufWriter<File>,
}

impl DataWriterFile {
	pub fn new(path: &Path) -> Result<Box<DataWriterFile>> {
		Ok(Box::new(DataWriterFile {
			writer: BufWriter::new(File::create(path)?),
		}))
	}
}

impl DataWriterTrait for DataWriterFile {
	fn append(&mut self, blob: &Blob) -> Result<ByteRange> {
		let pos = self.writer.stream_position()?;
		self.writer.write_all(blob.as_slice())?;
		Ok(ByteRange::new(pos, blob.len()))
	}

	fn get_position(&mut self) -> Result<u64> {
		Ok(self.writer.stream_position()?)
	}

	fn finish(&mut self) -> Result<()> {
		self.writer.flush()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::NamedTempFile;

	#[test]
	fn append_tracks_positions() -> Result<()> {
		let file = NamedTempFile::new("writer.tb").unwrap();
		let mut writer = DataWriterFile::new(file.path())?;

		assert_eq!(writer.append(&Blob::from("head"))?, ByteRange::new(0, 4));
		assert_eq!(writer.append(&Blob::from("body"))?, ByteRange::new(4, 4));
		assert_eq!(writer.get_position()?, 8);
		writer.finish()?;

		assert_eq!(std::fs::read(file.path())?, b"headbody");
		Ok(())
	}
}
