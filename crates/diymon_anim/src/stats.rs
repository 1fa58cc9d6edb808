//! Playback counters.

use serde::Serialize;

/// Counters collected while the engine runs.
///
/// Serializes to a flat JSON object for `anim_utils simulate --json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlaybackStats {
	/// Frames that loaded completely
	pub frames_loaded: u64,
	/// Frame loads that failed
	pub load_failures: u64,
	/// Idle timer ticks handled
	pub idle_ticks: u64,
	/// Times idle resumed from pause
	pub idle_resumes: u64,
	/// Accepted action requests
	pub actions_played: u64,
	/// Action requests turned away
	pub actions_rejected: u64,
	/// Actions that showed every frame
	pub actions_completed: u64,
	/// Actions with no frames on storage
	pub actions_empty: u64,
	/// Actions cut short by a load failure or teardown
	pub actions_aborted: u64,
}

impl PlaybackStats {
	/// Actions that ended before their last frame.
	pub fn actions_finished_early(&self) -> u64 {
		self.actions_empty + self.actions_aborted
	}
}
