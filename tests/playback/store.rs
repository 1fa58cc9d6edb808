use std::fs;

use diymon_rs::prelude::*;

use crate::fixture::{Card, HEIGHT, WIDTH};

#[test_log::test]
fn test_count_frames_on_disk() {
	let card = Card::new();
	card.frames("0", "P", 2, 0);
	card.frames("0", "Q", 1, 0);
	let dir = card.subject_dir("0");
	fs::write(dir.join("P3.txt"), b"not a frame").unwrap();
	fs::create_dir(dir.join("P4.bin")).unwrap();

	let store = FrameStore::new(card.storage(), HEADER_SIZE, "bin");
	assert_eq!(store.count_frames("S:/diymon/0", "P"), 2);
	assert_eq!(store.count_frames("S:/diymon/0", "Q"), 1);
	assert_eq!(store.count_frames("S:/diymon/9", "P"), 0);
}

#[test_log::test]
fn test_load_frame_from_disk() {
	let card = Card::new();
	card.frames("1.1", "ANIM_EAT_", 2, 0x60);
	let store = FrameStore::new(card.storage(), HEADER_SIZE, "bin");

	let mut dst = vec![0u8; BufferDescriptor::new(WIDTH, HEIGHT).size()];
	store.read_frame_into(&mut dst, "S:/diymon/11", "ANIM_EAT_", 1).unwrap();
	assert!(dst.iter().all(|&b| b == 0x61));

	card.corrupt("1.1", "ANIM_EAT_", 0, &[0x19, 0x14, 0, 0, 1]);
	let err = store.read_frame_into(&mut dst, "S:/diymon/11", "ANIM_EAT_", 0).unwrap_err();
	assert!(matches!(err, LoadError::ShortRead { actual: 0, .. }), "{err}");
}

#[test_log::test]
fn test_frame_header_on_disk() {
	let card = Card::new();
	card.frames("0", "ANIM_IDLE_", 1, 0);
	let bytes = fs::read(card.subject_dir("0").join("ANIM_IDLE_1.bin")).unwrap();

	let header = FrameHeader::from_bytes(&bytes).unwrap();
	assert_eq!(header.width(), WIDTH);
	assert_eq!(header.height(), HEIGHT);
	assert_eq!(header.color_format(), ColorFormat::Rgb565A8);
	assert_eq!(bytes.len(), HEADER_SIZE + header.payload_size());
}
