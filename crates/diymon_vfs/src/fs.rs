//! Host file-system backend.

use std::{
	io::{Read, Seek, SeekFrom},
	path::PathBuf,
};

use log::trace;

use crate::{DirEntry, DirHandle, FileHandle, Storage, VfsError};

/// [`Storage`] backed by `std::fs`.
///
/// Device paths carry a drive letter (`S:/diymon/0`). Each letter can be mapped
/// to a host directory with [`FsStorage::with_drive`]; paths whose drive is not
/// mapped, or that carry no drive, are used as host paths unchanged.
///
/// # Examples
///
/// ```no_run
/// use diymon_vfs::{FsStorage, Storage};
///
/// # fn main() -> Result<(), diymon_vfs::VfsError> {
/// let storage = FsStorage::new().with_drive('S', "/media/sdcard");
/// // Opens /media/sdcard/diymon/0/ANIM_IDLE_1.bin
/// let file = storage.open("S:/diymon/0/ANIM_IDLE_1.bin")?;
/// # let _ = file;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FsStorage {
	drives: Vec<(char, PathBuf)>,
}

impl FsStorage {
	/// Creates a backend without drive mappings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Maps drive `letter` to a host directory.
	pub fn with_drive(mut self, letter: char, root: impl Into<PathBuf>) -> Self {
		let letter = letter.to_ascii_uppercase();
		self.drives.retain(|(l, _)| *l != letter);
		self.drives.push((letter, root.into()));
		self
	}

	/// Resolves a device path to a host path.
	pub fn resolve(&self, path: &str) -> PathBuf {
		let mut chars = path.chars();
		if let (Some(letter), Some(':')) = (chars.next(), chars.next())
			&& letter.is_ascii_alphabetic()
		{
			let letter = letter.to_ascii_uppercase();
			if let Some((_, root)) = self.drives.iter().find(|(l, _)| *l == letter) {
				let rest = path[2..].trim_start_matches('/');
				return if rest.is_empty() {
					root.clone()
				} else {
					root.join(rest)
				};
			}
		}
		PathBuf::from(path)
	}
}

impl Storage for FsStorage {
	type File = FsFile;
	type Dir = FsDir;

	fn open(&self, path: &str) -> Result<FsFile, VfsError> {
		let host = self.resolve(path);
		trace!("open {path} -> {}", host.display());
		if host.is_dir() {
			return Err(VfsError::IsADirectory(path.to_string()));
		}
		let file = std::fs::File::open(&host).map_err(|e| not_found_or_io(e, path))?;
		Ok(FsFile {
			file,
		})
	}

	fn open_dir(&self, path: &str) -> Result<FsDir, VfsError> {
		let host = self.resolve(path);
		trace!("open_dir {path} -> {}", host.display());
		if host.is_file() {
			return Err(VfsError::NotADirectory(path.to_string()));
		}
		let entries = std::fs::read_dir(&host).map_err(|e| not_found_or_io(e, path))?;
		Ok(FsDir {
			entries,
		})
	}
}

fn not_found_or_io(err: std::io::Error, path: &str) -> VfsError {
	if err.kind() == std::io::ErrorKind::NotFound {
		VfsError::NotFound(path.to_string())
	} else {
		VfsError::IOError(err)
	}
}

/// File opened through [`FsStorage`].
#[derive(Debug)]
pub struct FsFile {
	file: std::fs::File,
}

impl FileHandle for FsFile {
	fn seek(&mut self, offset: u64) -> Result<(), VfsError> {
		self.file.seek(SeekFrom::Start(offset))?;
		Ok(())
	}

	fn read(&mut self, buf: &mut [u8]) -> Result<usize, VfsError> {
		Ok(self.file.read(buf)?)
	}
}

/// Directory opened through [`FsStorage`].
#[derive(Debug)]
pub struct FsDir {
	entries: std::fs::ReadDir,
}

impl DirHandle for FsDir {
	fn read_entry(&mut self) -> Result<Option<DirEntry>, VfsError> {
		let Some(entry) = self.entries.next() else {
			return Ok(None);
		};
		let entry = entry?;
		let name = entry.file_name().to_string_lossy().into_owned();
		if entry.file_type()?.is_dir() {
			Ok(Some(DirEntry::directory(name)))
		} else {
			Ok(Some(DirEntry::file(name)))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolve_mapped_drive() {
		let storage = FsStorage::new().with_drive('s', "/tmp/sd");
		assert_eq!(storage.resolve("S:/diymon/0"), PathBuf::from("/tmp/sd/diymon/0"));
		assert_eq!(storage.resolve("S:"), PathBuf::from("/tmp/sd"));
		assert_eq!(storage.resolve("/var/data"), PathBuf::from("/var/data"));
	}

	#[test]
	fn test_read_real_files() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("A1.bin"), [1u8, 2, 3, 4, 5]).unwrap();
		std::fs::create_dir(dir.path().join("sub")).unwrap();

		let storage = FsStorage::new().with_drive('S', dir.path());

		let mut file = storage.open("S:/A1.bin").unwrap();
		file.seek(2).unwrap();
		let mut buf = [0u8; 8];
		assert_eq!(file.read_full(&mut buf).unwrap(), 3);
		assert_eq!(&buf[..3], &[3, 4, 5]);

		let mut handle = storage.open_dir("S:/").unwrap();
		let mut names = Vec::new();
		while let Some(entry) = handle.read_entry().unwrap() {
			names.push((entry.name().to_string(), entry.is_dir()));
		}
		names.sort();
		assert_eq!(names, [("A1.bin".to_string(), false), ("sub".to_string(), true)]);
	}

	#[test]
	fn test_missing_paths() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FsStorage::new().with_drive('S', dir.path());
		assert!(storage.open("S:/nope.bin").unwrap_err().is_not_found());
		assert!(storage.open_dir("S:/nope").unwrap_err().is_not_found());
	}
}
