//! Frame discovery and loading.

use diymon_types::frame::{frame_file_name, is_frame_file_name};
use diymon_vfs::{DirHandle, FileHandle, Storage, VfsError, join};
use log::{debug, warn};

use crate::{EngineConfig, LoadError, Owner, SharedFrameBuffer};

/// Read-only view of the numbered frame files on storage.
///
/// The number of frames in an animation is discovered by listing its directory
/// rather than configured, so incomplete asset sets simply yield shorter (or
/// empty) animations.
#[derive(Debug, Clone)]
pub struct FrameStore<S> {
	storage: S,
	header_size: usize,
	extension: String,
}

impl<S: Storage> FrameStore<S> {
	/// Creates a store reading `<prefix><N>.<extension>` files and skipping `header_size` bytes.
	pub fn new(storage: S, header_size: usize, extension: impl Into<String>) -> Self {
		Self {
			storage,
			header_size,
			extension: extension.into(),
		}
	}

	/// Creates a store using the header size and extension from `config`.
	pub fn from_config(storage: S, config: &EngineConfig) -> Self {
		Self::new(storage, config.header_size, config.extension.clone())
	}

	/// Underlying storage.
	pub fn storage(&self) -> &S {
		&self.storage
	}

	/// Bytes skipped at the start of each frame.
	pub fn header_size(&self) -> usize {
		self.header_size
	}

	/// Frame file extension, without the dot.
	pub fn extension(&self) -> &str {
		&self.extension
	}

	/// Path of the frame at 0-based `frame_index`.
	pub fn frame_path(&self, directory: &str, prefix: &str, frame_index: usize) -> String {
		join(directory, &frame_file_name(prefix, frame_index, &self.extension))
	}

	/// Counts the frames of the animation selected by `prefix` in `directory`.
	///
	/// A missing or unreadable directory counts as zero frames: the animation is
	/// unavailable, which callers handle as "nothing to show".
	pub fn count_frames(&self, directory: &str, prefix: &str) -> usize {
		match self.try_count_frames(directory, prefix) {
			Ok(count) => {
				debug!("{count} frame(s) with prefix '{prefix}' in {directory}");
				count
			}
			Err(e) => {
				warn!("Cannot list {directory} for prefix '{prefix}': {e}");
				0
			}
		}
	}

	/// Like [`FrameStore::count_frames`], but reports storage errors.
	pub fn try_count_frames(&self, directory: &str, prefix: &str) -> Result<usize, VfsError> {
		let mut dir = self.storage.open_dir(directory)?;
		let mut count = 0;
		let result = loop {
			match dir.read_entry() {
				Ok(Some(entry)) => {
					// some drivers flag sub-directories with a leading '/'
					if entry.is_special() || entry.is_dir() || entry.name().starts_with('/') {
						continue;
					}
					if is_frame_file_name(entry.name(), prefix, &self.extension) {
						count += 1;
					}
				}
				Ok(None) => break Ok(count),
				Err(e) => break Err(e),
			}
		};
		dir.close();
		result
	}

	/// Loads frame `frame_index` into `buffer`, writing as `owner`.
	///
	/// Exactly `buffer.size()` payload bytes are read after the header. On a short
	/// read the buffer holds the bytes that were read followed by the previous
	/// frame's remainder, and an error is returned.
	///
	/// # Errors
	///
	/// Returns an error if `owner` does not hold the buffer, the file cannot be
	/// opened or read, or it ends before the payload is complete.
	pub fn load_frame(
		&self,
		buffer: &mut SharedFrameBuffer,
		owner: Owner,
		directory: &str,
		prefix: &str,
		frame_index: usize,
	) -> Result<(), LoadError> {
		let pixels = buffer.pixels_mut(owner)?;
		self.read_frame_into(pixels, directory, prefix, frame_index)
	}

	/// Reads the payload of frame `frame_index` into `dst`, filling it completely.
	pub fn read_frame_into(
		&self,
		dst: &mut [u8],
		directory: &str,
		prefix: &str,
		frame_index: usize,
	) -> Result<(), LoadError> {
		let path = self.frame_path(directory, prefix, frame_index);
		let mut file = match self.storage.open(&path) {
			Ok(file) => file,
			Err(source) => {
				return Err(LoadError::Open {
					path,
					source,
				});
			}
		};

		let result = self.read_payload(&mut file, dst, &path);
		file.close();
		result
	}

	fn read_payload(&self, file: &mut S::File, dst: &mut [u8], path: &str) -> Result<(), LoadError> {
		file.seek(self.header_size as u64).map_err(|source| LoadError::Seek {
			path: path.to_string(),
			header_size: self.header_size,
			source,
		})?;

		let actual = file.read_full(dst).map_err(|source| LoadError::Read {
			path: path.to_string(),
			source,
		})?;

		if actual < dst.len() {
			return Err(LoadError::ShortRead {
				path: path.to_string(),
				expected: dst.len(),
				actual,
			});
		}
		Ok(())
	}
}
