//! Benchmark helper utilities for diymon-rs
//!
//! This module builds synthetic SD card contents in memory so the benchmarks
//! measure frame discovery and frame loading without touching the disk.

use diymon_types::{
	action::IDLE_PREFIX,
	frame::{DEFAULT_EXTENSION, FrameHeader, frame_file_name},
};
use diymon_vfs::{MemStorage, join};

/// Subject directory used by every helper
pub const SUBJECT_DIR: &str = "S:/diymon/0";

/// Generates one frame file: a valid header followed by a full payload of `fill`.
pub fn generate_frame(width: u16, height: u16, fill: u8) -> Vec<u8> {
	let header = FrameHeader::new(width, height);
	let mut data = header.to_bytes().to_vec();
	data.resize(FrameHeader::SIZE + header.payload_size(), fill);
	data
}

/// Fills [`SUBJECT_DIR`] with `frames` idle frames and `noise` unrelated files.
///
/// The unrelated files share the directory the way action frames and stray
/// assets do on a real card, so discovery has to skip them.
pub fn generate_card(width: u16, height: u16, frames: usize, noise: usize) -> MemStorage {
	let storage = MemStorage::new();
	for i in 0..frames {
		let name = frame_file_name(IDLE_PREFIX, i, DEFAULT_EXTENSION);
		storage.insert_file(&join(SUBJECT_DIR, &name), generate_frame(width, height, i as u8));
	}
	for i in 0..noise {
		let name = frame_file_name("ANIM_OTHER_", i, DEFAULT_EXTENSION);
		storage.insert_file(&join(SUBJECT_DIR, &name), vec![0u8; FrameHeader::SIZE]);
	}
	storage
}
