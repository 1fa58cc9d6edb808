//! Pixel layout of the shared frame buffer.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::FrameHeaderError;

/// Color formats understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ColorFormat {
	/// 16-bit RGB565 color plane followed by an 8-bit alpha plane
	#[default]
	Rgb565A8 = 0x14,
}

impl ColorFormat {
	/// Converts a header byte to `ColorFormat`
	pub fn from_u8(value: u8) -> Result<Self, FrameHeaderError> {
		match value {
			0x14 => Ok(Self::Rgb565A8),
			_ => Err(FrameHeaderError::UnknownColorFormat(value)),
		}
	}

	/// Converts `ColorFormat` to its header byte
	pub fn to_u8(self) -> u8 {
		self as u8
	}

	/// Bytes per pixel in the color plane
	pub fn color_bytes(self) -> usize {
		match self {
			Self::Rgb565A8 => 2,
		}
	}

	/// Bytes per pixel across all planes
	pub fn bytes_per_pixel(self) -> usize {
		match self {
			Self::Rgb565A8 => 3,
		}
	}
}

impl Display for ColorFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Rgb565A8 => write!(f, "RGB565A8"),
		}
	}
}

/// Metadata the renderer needs to interpret the shared frame buffer.
///
/// Both values derived from the dimensions are fixed by the color format:
/// - `stride` covers the color plane only (`width * 2`), the alpha plane is not included
/// - `size` covers both planes (`width * height * 3`)
///
/// # Examples
///
/// ```
/// use diymon_types::frame::BufferDescriptor;
///
/// let desc = BufferDescriptor::new(170, 320);
/// assert_eq!(desc.stride(), 340);
/// assert_eq!(desc.size(), 163_200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferDescriptor {
	width: u16,
	height: u16,
	format: ColorFormat,
}

impl BufferDescriptor {
	/// Creates a descriptor for an `RGB565A8` buffer of the given dimensions.
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			format: ColorFormat::Rgb565A8,
		}
	}

	/// Width in pixels.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Height in pixels.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Color format of the buffer.
	pub fn format(&self) -> ColorFormat {
		self.format
	}

	/// Bytes per row of the color plane.
	pub fn stride(&self) -> usize {
		self.width as usize * self.format.color_bytes()
	}

	/// Total size of the buffer in bytes.
	pub fn size(&self) -> usize {
		self.width as usize * self.height as usize * self.format.bytes_per_pixel()
	}
}

impl Display for BufferDescriptor {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}x{} {} (stride {}, {} bytes)",
			self.width,
			self.height,
			self.format,
			self.stride(),
			self.size()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_resolution_layout() {
		let desc = BufferDescriptor::new(170, 320);
		assert_eq!(desc.stride(), 340);
		assert_eq!(desc.size(), 163_200);
		assert_eq!(desc.format(), ColorFormat::Rgb565A8);
	}

	#[test]
	fn test_stride_excludes_alpha_plane() {
		let desc = BufferDescriptor::new(4, 2);
		assert_eq!(desc.stride(), 8);
		assert_eq!(desc.size(), desc.stride() * 2 + 4 * 2);
	}

	#[test]
	fn test_color_format_roundtrip() {
		assert_eq!(ColorFormat::from_u8(0x14), Ok(ColorFormat::Rgb565A8));
		assert_eq!(ColorFormat::Rgb565A8.to_u8(), 0x14);
		assert_eq!(ColorFormat::from_u8(0x12), Err(FrameHeaderError::UnknownColorFormat(0x12)));
	}
}
