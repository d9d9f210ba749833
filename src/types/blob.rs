//! A simple wrapper around `Vec<u8>` used for all tile and header byte buffers.

use std::fmt::Debug;

/// Byte buffer passed between readers, writers and the converter.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`, the canonical "tile absent" result.
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Interprets the bytes as UTF-8, lossily.
	pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
		String::from_utf8_lossy(&self.0)
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}
}

impl From<Vec<u8>> for Blob {
	fn from(vec: Vec<u8>) -> Self {
		Blob(vec)
	}
}

impl From<&[u8]> for Blob {
	fn from(slice: &[u8]) -> Self {
		Blob(slice.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(text: &str) -> Self {
		Blob(text.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(text: String) -> Self {
		Blob(text.into_bytes())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_fmt(format_args!("Blob({} bytes)", self.0.len()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn basics() {
		let blob = Blob::from("tilebase");
		assert_eq!(blob.len(), 8);
		assert!(!blob.is_empty());
		assert_eq!(blob.as_str(), "tilebase");
		assert_eq!(blob.clone().into_vec(), b"tilebase".to_vec());
	}

	#[test]
	fn empty() {
		let blob = Blob::new_empty();
		assert_eq!(blob.len(), 0);
		assert!(blob.is_empty());
		assert_eq!(blob, Blob::default());
	}

	#[test]
	fn from_slice() {
		let vec = vec![0u8, 1, 2, 3];
		assert_eq!(Blob::from(vec.as_slice()).as_slice(), &[0, 1, 2, 3]);
	}
}
