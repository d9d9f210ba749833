//! Typed error taxonomy for every failure the crate can surface.
//!
//! Each variant maps to exactly one failure condition of the format, the
//! addressing algorithm, the handle lifecycle or a storage backend. An
//! absent tile is never an error; it is an empty [`Blob`](crate::Blob).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TileBaseError>;

/// Whether a failure was caused by the caller or by the storage/content side,
/// e.g. for picking an HTTP status class when serving tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
	Client,
	Server,
}

#[derive(Debug, Error)]
pub enum TileBaseError {
	#[error("invalid TileBase file")]
	InvalidFormat,

	#[error("unsupported TileBase version {0}")]
	UnsupportedVersion(u8),

	#[error("invalid config: {0}")]
	InvalidConfig(String),

	#[error("scheme '{0}' is not supported")]
	UnsupportedScheme(String),

	#[error("zoom not supported")]
	ZoomNotSupported,

	#[error("x below range")]
	XBelowRange,

	#[error("x above range")]
	XAboveRange,

	#[error("y below range")]
	YBelowRange,

	#[error("y above range")]
	YAboveRange,

	#[error("already open")]
	AlreadyOpen,

	#[error("already closed")]
	AlreadyClosed,

	#[error("not open")]
	NotOpen,

	#[error("connection failed: {0}")]
	ConnectivityFailure(String),

	#[error("short read: expected {expected} bytes, got {actual}")]
	ShortRead { expected: u64, actual: u64 },

	#[error("decompression failed")]
	DecompressionFailed,

	#[error("zxy coordinates must address a tile in the 2^z grid")]
	InvalidCoordinate,

	#[error("missing metadata.{0}")]
	MissingMetadata(&'static str),
}

impl TileBaseError {
	pub fn fault(&self) -> Fault {
		use TileBaseError::*;
		match self {
			UnsupportedScheme(_) | ZoomNotSupported | XBelowRange | XAboveRange | YBelowRange | YAboveRange
			| AlreadyOpen | AlreadyClosed | NotOpen | InvalidCoordinate => Fault::Client,
			InvalidFormat | UnsupportedVersion(_) | InvalidConfig(_) | ConnectivityFailure(_)
			| ShortRead { .. } | DecompressionFailed | MissingMetadata(_) => Fault::Server,
		}
	}
}

impl From<std::io::Error> for TileBaseError {
	fn from(err: std::io::Error) -> Self {
		TileBaseError::ConnectivityFailure(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fault_classification() {
		assert_eq!(TileBaseError::XBelowRange.fault(), Fault::Client);
		assert_eq!(TileBaseError::NotOpen.fault(), Fault::Client);
		assert_eq!(TileBaseError::InvalidCoordinate.fault(), Fault::Client);
		assert_eq!(TileBaseError::InvalidFormat.fault(), Fault::Server);
		assert_eq!(
			TileBaseError::ShortRead { expected: 16, actual: 7 }.fault(),
			Fault::Server
		);
	}

	#[test]
	fn messages() {
		assert_eq!(
			TileBaseError::UnsupportedVersion(3).to_string(),
			"unsupported TileBase version 3"
		);
		assert_eq!(
			TileBaseError::MissingMetadata("bounds").to_string(),
			"missing metadata.bounds"
		);
	}
}
