//! Minimal storage layer used by the animation engine.
//!
//! The device reads its frames through a small file-system driver that exposes
//! open/seek/read/close on files and open/read-entry/close on directories. This
//! crate captures that surface as the [`Storage`], [`FileHandle`] and
//! [`DirHandle`] traits and provides two backends:
//!
//! - [`FsStorage`]: the host file system, with optional drive-letter mapping so
//!   device paths such as `S:/diymon/0` resolve to a local directory
//! - [`MemStorage`]: an in-memory tree for tests, benchmarks and simulation
//!
//! Paths are plain strings using `/` as separator; the engine treats them as opaque.
//!
//! # Examples
//!
//! ```
//! use diymon_vfs::{DirHandle, FileHandle, MemStorage, Storage};
//!
//! # fn main() -> Result<(), diymon_vfs::VfsError> {
//! let storage = MemStorage::new();
//! storage.insert_file("S:/diymon/0/ANIM_IDLE_1.bin", vec![0u8; 16]);
//!
//! let mut dir = storage.open_dir("S:/diymon/0")?;
//! while let Some(entry) = dir.read_entry()? {
//!     println!("{} (dir: {})", entry.name(), entry.is_dir());
//! }
//! dir.close();
//!
//! let mut file = storage.open("S:/diymon/0/ANIM_IDLE_1.bin")?;
//! file.seek(12)?;
//! let mut buf = [0u8; 4];
//! assert_eq!(file.read(&mut buf)?, 4);
//! file.close();
//! # Ok(())
//! # }
//! ```

mod error;
mod fs;
mod memory;

pub use error::VfsError;
pub use fs::FsStorage;
pub use memory::MemStorage;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
	/// Regular file
	File,
	/// Sub-directory
	Directory,
}

/// One entry returned while iterating a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirEntry {
	name: String,
	kind: EntryKind,
}

impl DirEntry {
	/// Creates a file entry.
	pub fn file(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: EntryKind::File,
		}
	}

	/// Creates a directory entry.
	pub fn directory(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: EntryKind::Directory,
		}
	}

	/// Entry name, without any path component.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Entry kind.
	pub fn kind(&self) -> EntryKind {
		self.kind
	}

	/// Returns `true` for sub-directories, including the `.` and `..` pseudo entries.
	pub fn is_dir(&self) -> bool {
		self.kind == EntryKind::Directory
	}

	/// Returns `true` for the `.` and `..` pseudo entries.
	pub fn is_special(&self) -> bool {
		self.name == "." || self.name == ".."
	}
}

/// An open file.
pub trait FileHandle {
	/// Moves the read position to `offset` bytes from the start of the file.
	fn seek(&mut self, offset: u64) -> Result<(), VfsError>;

	/// Reads up to `buf.len()` bytes, returning how many were read. `0` means end of file.
	fn read(&mut self, buf: &mut [u8]) -> Result<usize, VfsError>;

	/// Reads until `buf` is full or the file ends, returning the number of bytes read.
	fn read_full(&mut self, buf: &mut [u8]) -> Result<usize, VfsError> {
		let mut filled = 0;
		while filled < buf.len() {
			let n = self.read(&mut buf[filled..])?;
			if n == 0 {
				break;
			}
			filled += n;
		}
		Ok(filled)
	}

	/// Closes the file.
	fn close(self)
	where
		Self: Sized,
	{
	}
}

/// An open directory.
pub trait DirHandle {
	/// Returns the next entry, or `None` once the directory is exhausted.
	fn read_entry(&mut self) -> Result<Option<DirEntry>, VfsError>;

	/// Closes the directory.
	fn close(self)
	where
		Self: Sized,
	{
	}
}

/// A read-only file system.
pub trait Storage {
	/// File handle type
	type File: FileHandle;
	/// Directory handle type
	type Dir: DirHandle;

	/// Opens a file for reading.
	fn open(&self, path: &str) -> Result<Self::File, VfsError>;

	/// Opens a directory for iteration.
	fn open_dir(&self, path: &str) -> Result<Self::Dir, VfsError>;
}

/// Joins a directory path and an entry name with a single `/`.
pub fn join(dir: &str, name: &str) -> String {
	if dir.is_empty() {
		return name.to_string();
	}
	if dir.ends_with('/') {
		format!("{dir}{name}")
	} else {
		format!("{dir}/{name}")
	}
}
