//! Local-file backend using positioned reads.

use super::DataReaderTrait;
use crate::{
	error::{Result, TileBaseError},
	types::{Blob, ByteRange},
};
use async_trait::async_trait;
use std::{
	fs::File,
	io::{ErrorKind, Read, Seek, SeekFrom},
	path::{Path, PathBuf},
};

#[derive(Debug)]
pub struct DataReaderFile {
	name: String,
	path: PathBuf,
	file: Option<File>,
	size: u64,
	closed: bool,
}

impl DataReaderFile {
	pub fn new(path: &Path) -> Box<DataReaderFile> {
		Box::new(DataReaderFile {
			name: path.to_string_lossy().to_string(),
			path: path.to_path_buf(),
			file: None,
			size: 0,
			closed: false,
		})
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderFile {
	async fn open(&mut self) -> Result<()> {
		if self.file.is_some() {
			return Err(TileBaseError::AlreadyOpen);
		}

		let file = File::open(&self.path)
			.map_err(|e| TileBaseError::ConnectivityFailure(format!("cannot open file '{}': {e}", self.name)))?;
		self.size = file
			.metadata()
			.map_err(|e| TileBaseError::ConnectivityFailure(format!("cannot stat file '{}': {e}", self.name)))?
			.len();
		self.file = Some(file);
		self.closed = false;
		Ok(())
	}

	async fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		let file = self.file.as_ref().ok_or(TileBaseError::NotOpen)?;

		// checked addition: a huge offset must not wrap past the size check
		let end = range.offset.checked_add(range.length);
		if end.map_or(true, |end| end > self.size) {
			return Err(TileBaseError::ShortRead {
				expected: range.length,
				actual: self.size.saturating_sub(range.offset),
			});
		}

		// each read gets its own cursor, so concurrent reads don't interfere
		let mut file = file.try_clone()?;
		file.seek(SeekFrom::Start(range.offset))?;

		let mut buffer = vec![0u8; range.length as usize];
		file.read_exact(&mut buffer).map_err(|e| match e.kind() {
			ErrorKind::UnexpectedEof => TileBaseError::ShortRead {
				expected: range.length,
				actual: 0,
			},
			_ => TileBaseError::ConnectivityFailure(e.to_string()),
		})?;

		Ok(Blob::from(buffer))
	}

	async fn close(&mut self) -> Result<()> {
		if self.closed {
			return Err(TileBaseError::AlreadyClosed);
		}
		if self.file.is_none() {
			return Err(TileBaseError::NotOpen);
		}
		self.file = None;
		self.closed = true;
		Ok(())
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}
