use std::{fs, path::Path};

use diymon_rs::prelude::*;
use tempfile::TempDir;

pub(crate) const WIDTH: u16 = 4;
pub(crate) const HEIGHT: u16 = 2;

/// An SD card image in a temporary directory, mounted as drive `S:`.
pub(crate) struct Card {
	dir: TempDir,
}

impl Card {
	pub(crate) fn new() -> Self {
		Self {
			dir: tempfile::tempdir().unwrap(),
		}
	}

	pub(crate) fn root(&self) -> &Path {
		self.dir.path()
	}

	pub(crate) fn storage(&self) -> FsStorage {
		FsStorage::new().with_drive('S', self.root())
	}

	/// Host directory of the subject with evolution `code`.
	pub(crate) fn subject_dir(&self, code: &str) -> std::path::PathBuf {
		let code: EvolutionCode = code.parse().unwrap();
		self.root().join("diymon").join(code.dir_name())
	}

	/// Writes `count` frames; every pixel byte of frame `i` is `base + i`.
	pub(crate) fn frames(&self, code: &str, prefix: &str, count: usize, base: u8) {
		let dir = self.subject_dir(code);
		fs::create_dir_all(&dir).unwrap();
		let header = FrameHeader::new(WIDTH, HEIGHT);
		for i in 0..count {
			let mut data = header.to_bytes().to_vec();
			data.resize(HEADER_SIZE + header.payload_size(), base + i as u8);
			fs::write(dir.join(frame_file_name(prefix, i, DEFAULT_EXTENSION)), data).unwrap();
		}
	}

	/// Overwrites one frame file with `bytes`.
	pub(crate) fn corrupt(&self, code: &str, prefix: &str, index: usize, bytes: &[u8]) {
		let path = self.subject_dir(code).join(frame_file_name(prefix, index, DEFAULT_EXTENSION));
		fs::write(path, bytes).unwrap();
	}

	pub(crate) fn config(&self) -> EngineConfig {
		EngineConfig {
			width: WIDTH,
			height: HEIGHT,
			..EngineConfig::default()
		}
	}

	pub(crate) fn engine(&self) -> AnimationEngine<FsStorage, RecordingRenderer> {
		AnimationEngine::new(self.config(), self.storage(), RecordingRenderer::new())
	}
}
