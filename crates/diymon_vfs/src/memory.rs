//! In-memory backend.

use std::{
	cell::RefCell,
	collections::{BTreeMap, BTreeSet},
	rc::Rc,
};

use crate::{DirEntry, DirHandle, FileHandle, Storage, VfsError};

#[derive(Debug, Default)]
struct Tree {
	files: BTreeMap<String, Rc<[u8]>>,
	dirs: BTreeSet<String>,
}

/// [`Storage`] holding its files in memory.
///
/// Clones share the same tree, so a test can keep a handle and add or remove
/// frames while an engine owns another clone. Directories are created
/// implicitly for every inserted file. Like the device driver, directory
/// iteration yields `.` and `..` before the real entries.
#[derive(Debug, Clone, Default)]
pub struct MemStorage {
	tree: Rc<RefCell<Tree>>,
}

impl MemStorage {
	/// Creates an empty tree.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a file, creating its parent directories.
	pub fn insert_file(&self, path: &str, data: impl Into<Vec<u8>>) {
		let path = normalize(path);
		let data: Vec<u8> = data.into();
		let mut tree = self.tree.borrow_mut();
		let mut parent = parent_of(&path);
		while let Some(dir) = parent {
			tree.dirs.insert(dir.to_string());
			parent = parent_of(dir);
		}
		tree.files.insert(path, Rc::from(data));
	}

	/// Creates an empty directory and its parents.
	pub fn create_dir(&self, path: &str) {
		let path = normalize(path);
		let mut tree = self.tree.borrow_mut();
		let mut current = Some(path.as_str());
		while let Some(dir) = current {
			tree.dirs.insert(dir.to_string());
			current = parent_of(dir);
		}
	}

	/// Removes a file, returning `true` if it existed.
	pub fn remove_file(&self, path: &str) -> bool {
		self.tree.borrow_mut().files.remove(&normalize(path)).is_some()
	}

	/// Number of files in the tree.
	pub fn file_count(&self) -> usize {
		self.tree.borrow().files.len()
	}
}

impl Storage for MemStorage {
	type File = MemFile;
	type Dir = MemDir;

	fn open(&self, path: &str) -> Result<MemFile, VfsError> {
		let key = normalize(path);
		let tree = self.tree.borrow();
		if let Some(data) = tree.files.get(&key) {
			return Ok(MemFile {
				path: key,
				data: Rc::clone(data),
				pos: 0,
			});
		}
		if tree.dirs.contains(&key) {
			return Err(VfsError::IsADirectory(path.to_string()));
		}
		Err(VfsError::NotFound(path.to_string()))
	}

	fn open_dir(&self, path: &str) -> Result<MemDir, VfsError> {
		let key = normalize(path);
		let tree = self.tree.borrow();
		if !tree.dirs.contains(&key) {
			if tree.files.contains_key(&key) {
				return Err(VfsError::NotADirectory(path.to_string()));
			}
			return Err(VfsError::NotFound(path.to_string()));
		}

		let mut entries = vec![DirEntry::directory("."), DirEntry::directory("..")];
		entries.extend(
			tree.dirs
				.iter()
				.filter(|d| parent_of(d) == Some(key.as_str()))
				.map(|d| DirEntry::directory(base_name(d))),
		);
		entries.extend(
			tree.files
				.keys()
				.filter(|f| parent_of(f) == Some(key.as_str()))
				.map(|f| DirEntry::file(base_name(f))),
		);
		entries.reverse();

		Ok(MemDir {
			entries,
		})
	}
}

/// File opened through [`MemStorage`].
#[derive(Debug)]
pub struct MemFile {
	path: String,
	data: Rc<[u8]>,
	pos: usize,
}

impl FileHandle for MemFile {
	fn seek(&mut self, offset: u64) -> Result<(), VfsError> {
		let len = self.data.len() as u64;
		if offset > len {
			return Err(VfsError::SeekOutOfRange {
				path: self.path.clone(),
				offset,
				len,
			});
		}
		self.pos = offset as usize;
		Ok(())
	}

	fn read(&mut self, buf: &mut [u8]) -> Result<usize, VfsError> {
		let available = &self.data[self.pos..];
		let n = available.len().min(buf.len());
		buf[..n].copy_from_slice(&available[..n]);
		self.pos += n;
		Ok(n)
	}
}

/// Directory opened through [`MemStorage`].
#[derive(Debug)]
pub struct MemDir {
	// reversed so entries pop in listing order
	entries: Vec<DirEntry>,
}

impl DirHandle for MemDir {
	fn read_entry(&mut self) -> Result<Option<DirEntry>, VfsError> {
		Ok(self.entries.pop())
	}
}

fn normalize(path: &str) -> String {
	let mut out = path.replace('\\', "/");
	while out.len() > 1 && out.ends_with('/') && !out.ends_with(":/") {
		out.pop();
	}
	out
}

fn parent_of(path: &str) -> Option<&str> {
	let idx = path.rfind('/')?;
	if idx == 0 {
		return if path.len() > 1 {
			Some("/")
		} else {
			None
		};
	}
	if path[..idx].ends_with(':') {
		// "S:/diymon" -> "S:/", "S:/" has no parent
		return if path.len() > idx + 1 {
			Some(&path[..=idx])
		} else {
			None
		};
	}
	Some(&path[..idx])
}

fn base_name(path: &str) -> &str {
	path.rsplit('/').next().unwrap_or(path)
}
