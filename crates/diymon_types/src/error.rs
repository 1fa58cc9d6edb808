//! Error types for frame headers and subject identifiers.

use thiserror::Error;

/// Errors that can occur when parsing a frame file header
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameHeaderError {
	/// Not enough data to parse
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Invalid magic byte
	#[error("Invalid magic byte: 0x{0:02X}")]
	InvalidMagic(u8),

	/// Color format the engine does not know about
	#[error("Unknown color format: 0x{0:02X}")]
	UnknownColorFormat(u8),
}

/// Errors that can occur when parsing an evolution code
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvolutionCodeError {
	/// Empty code
	#[error("Evolution code is empty")]
	Empty,

	/// Character other than a digit or a dot
	#[error("Invalid character '{ch}' in evolution code \"{code}\"")]
	InvalidCharacter {
		/// Offending code
		code: String,
		/// Offending character
		ch: char,
	},

	/// Code whose directory name would not fit the storage naming limit
	#[error("Evolution code \"{code}\" has {digits} digits, at most {max} are allowed")]
	TooLong {
		/// Offending code
		code: String,
		/// Number of digits in the code
		digits: usize,
		/// Maximum number of digits
		max: usize,
	},
}
