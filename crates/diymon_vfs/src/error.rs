//! Storage errors.

use thiserror::Error;

/// Errors reported by a [`Storage`](crate::Storage) backend
#[derive(Debug, Error)]
pub enum VfsError {
	/// Path does not exist
	#[error("Not found: {0}")]
	NotFound(String),

	/// A directory was expected
	#[error("Not a directory: {0}")]
	NotADirectory(String),

	/// A file was expected
	#[error("Is a directory: {0}")]
	IsADirectory(String),

	/// Seek past the end of the file
	#[error("Seek to {offset} is past the end of {path} ({len} bytes)")]
	SeekOutOfRange {
		/// File path
		path: String,
		/// Requested offset
		offset: u64,
		/// File length
		len: u64,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl VfsError {
	/// Returns `true` when the error means the path is missing.
	pub fn is_not_found(&self) -> bool {
		match self {
			Self::NotFound(_) => true,
			Self::IOError(e) => e.kind() == std::io::ErrorKind::NotFound,
			_ => false,
		}
	}
}
