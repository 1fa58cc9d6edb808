//! Frame file header.

use std::fmt::{Display, Formatter};

use super::{ColorFormat, HEADER_SIZE, MAGIC};
use crate::FrameHeaderError;

/// Header block at the start of every frame file.
///
/// Playback skips these bytes; the parsed form is used by tooling that checks
/// assets before they are copied to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHeader {
	color_format: ColorFormat,
	flags: u16,
	width: u16,
	height: u16,
	stride: u16,
}

impl FrameHeader {
	/// Size of the header in bytes
	pub const SIZE: usize = HEADER_SIZE;

	/// Creates a header for an `RGB565A8` frame of the given dimensions.
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			color_format: ColorFormat::Rgb565A8,
			flags: 0,
			width,
			height,
			stride: width.saturating_mul(2),
		}
	}

	/// Returns the color format of the payload.
	pub fn color_format(&self) -> ColorFormat {
		self.color_format
	}

	/// Returns the header flags.
	pub fn flags(&self) -> u16 {
		self.flags
	}

	/// Returns the width of the frame in pixels.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the height of the frame in pixels.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the stride of the color plane in bytes.
	pub fn stride(&self) -> u16 {
		self.stride
	}

	/// Size of the pixel payload announced by this header.
	pub fn payload_size(&self) -> usize {
		self.width as usize * self.height as usize * self.color_format.bytes_per_pixel()
	}

	/// Parses a frame header from the given byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, FrameHeaderError> {
		if data.len() < HEADER_SIZE {
			return Err(FrameHeaderError::InsufficientData {
				expected: HEADER_SIZE,
				actual: data.len(),
			});
		}

		if data[0] != MAGIC {
			return Err(FrameHeaderError::InvalidMagic(data[0]));
		}

		let color_format = ColorFormat::from_u8(data[1])?;
		let word = |offset: usize| u16::from_le_bytes([data[offset], data[offset + 1]]);

		Ok(Self {
			color_format,
			flags: word(2),
			width: word(4),
			height: word(6),
			stride: word(8),
		})
	}

	/// Serializes the header to its 12-byte on-disk form.
	pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
		let mut out = [0u8; HEADER_SIZE];
		out[0] = MAGIC;
		out[1] = self.color_format.to_u8();
		out[2..4].copy_from_slice(&self.flags.to_le_bytes());
		out[4..6].copy_from_slice(&self.width.to_le_bytes());
		out[6..8].copy_from_slice(&self.height.to_le_bytes());
		out[8..10].copy_from_slice(&self.stride.to_le_bytes());
		out
	}
}

impl Display for FrameHeader {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}x{} {} stride={} flags=0x{:04X}",
			self.width, self.height, self.color_format, self.stride, self.flags
		)
	}
}
