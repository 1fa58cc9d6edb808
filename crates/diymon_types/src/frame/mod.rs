//! Frame file support.
//!
//! Every animation frame lives in its own file on removable storage. The file
//! starts with a fixed 12-byte image header followed by the raw pixel payload in
//! `RGB565A8` layout: a 16-bit color plane (`width * 2` bytes per row) followed by
//! an 8-bit alpha plane (`width` bytes per row).
//!
//! # File Naming
//!
//! Frames are named `<prefix><N>.<ext>` where `N` starts at **1**, so frame index
//! `0` maps to file suffix `1`:
//!
//! ```text
//! ANIM_IDLE_1.bin   <- frame index 0
//! ANIM_IDLE_2.bin   <- frame index 1
//! ANIM_EAT_1.bin    <- first frame of the eat animation
//! ```
//!
//! # Header Structure (12 bytes at offset 0x00)
//!
//! ```text
//! Offset  Size  Field         Description
//! ------  ----  ------------  ------------------------------------------
//! 0x00    1     magic         Always 0x19
//! 0x01    1     color_format  0x14 = RGB565A8
//! 0x02    2     flags         Little-endian, unused by playback
//! 0x04    2     width         Little-endian
//! 0x06    2     height        Little-endian
//! 0x08    2     stride        Little-endian, bytes per color-plane row
//! 0x0A    2     reserved
//! ```
//!
//! Playback never interprets the header, it only skips it.

mod descriptor;
mod header;

pub use descriptor::{BufferDescriptor, ColorFormat};
pub use header::FrameHeader;

/// Size of the header that precedes the pixel payload (12 bytes)
pub const HEADER_SIZE: usize = 12;

/// Magic byte at offset 0 of every frame header
pub const MAGIC: u8 = 0x19;

/// Extension used by frame files, without the leading dot
pub const DEFAULT_EXTENSION: &str = "bin";

/// Builds the file name of a frame from its 0-based index.
///
/// # Examples
///
/// ```
/// use diymon_types::frame::frame_file_name;
///
/// assert_eq!(frame_file_name("ANIM_ATK_", 2, "bin"), "ANIM_ATK_3.bin");
/// ```
pub fn frame_file_name(prefix: &str, frame_index: usize, extension: &str) -> String {
	format!("{prefix}{}.{extension}", frame_index + 1)
}

/// Returns `true` when `name` looks like a frame of the animation selected by `prefix`.
///
/// Only the prefix and the extension are checked, the number in between is not parsed.
pub fn is_frame_file_name(name: &str, prefix: &str, extension: &str) -> bool {
	let Some(rest) = name.strip_prefix(prefix) else {
		return false;
	};
	rest.strip_suffix(extension).is_some_and(|stem| stem.ends_with('.'))
}
