//! A contiguous byte range, addressed by offset and length.

use std::fmt;

/// A range of bytes within a backend resource.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct ByteRange {
	pub offset: u64,
	pub length: u64,
}

impl ByteRange {
	pub fn new(offset: u64, length: u64) -> Self {
		Self { offset, length }
	}

	pub fn empty() -> Self {
		Self { offset: 0, length: 0 }
	}

	/// Returns this range shifted forward by `offset`, e.g. from an
	/// index-relative position to an absolute file position.
	pub fn get_shifted_forward(&self, offset: u64) -> Self {
		Self {
			offset: self.offset + offset,
			length: self.length,
		}
	}
}

impl fmt::Debug for ByteRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("ByteRange[{},{}]", self.offset, self.length))
	}
}

impl fmt::Display for ByteRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("[{},{}]", self.offset, self.length))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_and_shift() {
		let range = ByteRange::new(23, 42);
		assert_eq!(range.offset, 23);
		assert_eq!(range.length, 42);

		let shifted = range.get_shifted_forward(7);
		assert_eq!(shifted, ByteRange::new(30, 42));
	}

	#[test]
	fn empty() {
		assert_eq!(ByteRange::empty(), ByteRange::new(0, 0));
	}
}
