//! Per-playback frame cursor.

/// The animation a player is currently drawing from.
///
/// A fresh source is created on every (re)start and dropped when playback
/// stops; the two players never share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSource {
	base_path: String,
	prefix: String,
	frame_count: usize,
	current: Option<usize>,
}

impl AnimationSource {
	/// Creates a source positioned before the first frame.
	pub fn new(base_path: impl Into<String>, prefix: impl Into<String>, frame_count: usize) -> Self {
		Self {
			base_path: base_path.into(),
			prefix: prefix.into(),
			frame_count,
			current: None,
		}
	}

	/// Directory holding the frames.
	pub fn base_path(&self) -> &str {
		&self.base_path
	}

	/// Frame name prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Number of frames discovered on storage.
	pub fn frame_count(&self) -> usize {
		self.frame_count
	}

	/// Index of the frame last moved to, `None` before the first.
	pub fn current(&self) -> Option<usize> {
		self.current
	}

	/// Moves to `index`.
	pub fn seek(&mut self, index: usize) {
		self.current = Some(index);
	}

	/// Moves to the next frame, wrapping to 0 after the last.
	pub fn advance_wrapping(&mut self) -> usize {
		let next = match self.current {
			Some(i) if self.frame_count > 0 => (i + 1) % self.frame_count,
			_ => 0,
		};
		self.current = Some(next);
		next
	}

	/// Moves to the next frame, or returns `None` once every frame was visited.
	///
	/// The cursor is left at `frame_count` when the end is reached.
	pub fn advance(&mut self) -> Option<usize> {
		let next = self.current.map_or(0, |i| i + 1);
		self.current = Some(next.min(self.frame_count));
		(next < self.frame_count).then_some(next)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wrapping_cursor() {
		let mut src = AnimationSource::new("S:/diymon/0", "ANIM_IDLE_", 4);
		src.seek(0);
		let seq: Vec<usize> = (0..9).map(|_| src.advance_wrapping()).collect();
		assert_eq!(seq, [1, 2, 3, 0, 1, 2, 3, 0, 1]);
	}

	#[test]
	fn test_bounded_cursor() {
		let mut src = AnimationSource::new("S:/diymon/0", "ANIM_EAT_", 3);
		assert_eq!(src.current(), None);
		assert_eq!(src.advance(), Some(0));
		assert_eq!(src.advance(), Some(1));
		assert_eq!(src.advance(), Some(2));
		assert_eq!(src.advance(), None);
		assert_eq!(src.current(), Some(3));
		assert_eq!(src.advance(), None);
		assert_eq!(src.current(), Some(3));
	}
}
