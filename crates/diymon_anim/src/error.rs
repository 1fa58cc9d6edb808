//! Error types for the animation engine.

use diymon_vfs::VfsError;
use thiserror::Error;

use crate::buffer::Owner;

/// The shared frame buffer could not be allocated
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
	/// Zero width or height
	#[error("Invalid frame buffer dimensions {width}x{height}")]
	InvalidDimensions {
		/// Requested width
		width: u16,
		/// Requested height
		height: u16,
	},

	/// Buffer larger than the configured memory budget
	#[error("Frame buffer of {size} bytes exceeds the {budget} byte budget")]
	OverBudget {
		/// Requested size in bytes
		size: usize,
		/// Configured budget in bytes
		budget: usize,
	},

	/// Allocator refused the request
	#[error("Out of memory while reserving {size} bytes for the frame buffer")]
	OutOfMemory {
		/// Requested size in bytes
		size: usize,
	},
}

/// A player tried to write the buffer without holding the ownership tag
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{requested} cannot write the frame buffer while it is held by {holder}")]
pub struct OwnershipError {
	/// Who asked for write access
	pub requested: Owner,
	/// Who holds the tag
	pub holder: Owner,
}

/// Errors that can occur while loading one frame into the shared buffer
#[derive(Debug, Error)]
pub enum LoadError {
	/// Frame file could not be opened
	#[error("Cannot open frame {path}: {source}")]
	Open {
		/// Frame path
		path: String,
		/// Storage error
		#[source]
		source: VfsError,
	},

	/// Header could not be skipped
	#[error("Cannot skip the {header_size} byte header of {path}: {source}")]
	Seek {
		/// Frame path
		path: String,
		/// Header size in bytes
		header_size: usize,
		/// Storage error
		#[source]
		source: VfsError,
	},

	/// Read failed
	#[error("Read failed on {path}: {source}")]
	Read {
		/// Frame path
		path: String,
		/// Storage error
		#[source]
		source: VfsError,
	},

	/// File ended before the payload was complete
	#[error("Short read on {path}: expected {expected} bytes, got {actual} bytes")]
	ShortRead {
		/// Frame path
		path: String,
		/// Payload size
		expected: usize,
		/// Bytes actually read
		actual: usize,
	},

	/// Caller does not own the buffer
	#[error(transparent)]
	Ownership(#[from] OwnershipError),
}

/// Errors that can occur when loading or validating [`EngineConfig`](crate::EngineConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Configuration source could not be read or deserialized
	#[error(transparent)]
	Source(#[from] ::config::ConfigError),

	/// Values are present but unusable
	#[error("Invalid configuration: {0}")]
	Invalid(String),
}
