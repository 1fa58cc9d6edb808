//! Idle loop player.

use std::{
	fmt::{Display, Formatter},
	time::Duration,
};

use diymon_vfs::Storage;
use log::{debug, info, warn};

use super::Deck;
use crate::{AnimationSource, Owner, Scheduler, TimerHandle, TimerTarget};

/// Lifecycle of the idle loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdleState {
	/// No animation loaded
	#[default]
	Stopped,
	/// Timer registered, frames advancing
	Running,
	/// Animation loaded but the timer is cancelled; the frame index is kept
	Paused,
}

impl Display for IdleState {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Stopped => write!(f, "stopped"),
			Self::Running => write!(f, "running"),
			Self::Paused => write!(f, "paused"),
		}
	}
}

/// Plays the subject's idle animation in an endless loop.
#[derive(Debug, Clone)]
pub struct IdlePlayer {
	state: IdleState,
	source: Option<AnimationSource>,
	timer: Option<TimerHandle>,
	prefix: String,
	interval: Duration,
}

impl IdlePlayer {
	/// Creates a stopped player for frames named `<prefix><N>`.
	pub fn new(prefix: impl Into<String>, interval: Duration) -> Self {
		Self {
			state: IdleState::Stopped,
			source: None,
			timer: None,
			prefix: prefix.into(),
			interval,
		}
	}

	/// Current lifecycle state.
	pub fn state(&self) -> IdleState {
		self.state
	}

	/// Index of the frame on screen, `None` when stopped.
	pub fn current_frame(&self) -> Option<usize> {
		self.source.as_ref().and_then(AnimationSource::current)
	}

	/// Frames in the loaded animation, 0 when stopped.
	pub fn frame_count(&self) -> usize {
		self.source.as_ref().map_or(0, AnimationSource::frame_count)
	}

	/// Directory the animation was loaded from.
	pub fn directory(&self) -> Option<&str> {
		self.source.as_ref().map(AnimationSource::base_path)
	}

	/// Frame name prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Starts (or restarts) the loop from frame 0 of `directory`.
	///
	/// Returns `false` and hides the character when the directory has no idle
	/// frames, unless an action is on screen. While an action holds the buffer the loop is loaded but left
	/// paused; the action's finish step resumes it.
	pub(crate) fn start<S: Storage>(&mut self, deck: &mut Deck<'_, S>, directory: &str) -> bool {
		if self.state != IdleState::Stopped {
			info!("Restarting idle animation");
			self.stop(deck.scheduler);
		}

		let frame_count = deck.store.count_frames(directory, &self.prefix);
		if frame_count == 0 {
			if deck.buffer.owner() == Owner::Action {
				warn!("No idle frames in {directory}, character stays up for the action");
			} else {
				warn!("No idle frames in {directory}, hiding character");
				deck.renderer.set_visible(false);
			}
			return false;
		}

		let mut source = AnimationSource::new(directory, self.prefix.as_str(), frame_count);
		source.seek(0);

		if deck.buffer.owner() == Owner::Action {
			info!("Idle animation loaded paused ({frame_count} frames), action holds the buffer");
			self.source = Some(source);
			self.state = IdleState::Paused;
			return true;
		}

		deck.buffer.set_owner(Owner::Idle);
		deck.renderer.set_visible(true);
		if deck.draw(Owner::Idle, &source, 0).is_err() {
			warn!("First idle frame failed, continuing with the loop");
		}
		self.source = Some(source);
		self.timer = Some(deck.scheduler.register(self.interval, TimerTarget::Idle));
		self.state = IdleState::Running;
		info!("Idle animation started: {frame_count} frames in {directory}");
		true
	}

	/// Stops advancing but keeps the frame index and the ownership tag.
	pub(crate) fn pause(&mut self, scheduler: &mut dyn Scheduler) -> bool {
		if self.state != IdleState::Running {
			return false;
		}
		if let Some(timer) = self.timer.take() {
			scheduler.cancel(timer);
		}
		self.state = IdleState::Paused;
		info!("Idle animation paused at frame {:?}", self.current_frame());
		true
	}

	/// Re-claims the buffer, restarts the timer and repaints the current frame.
	///
	/// Does nothing unless paused.
	pub(crate) fn resume<S: Storage>(&mut self, deck: &mut Deck<'_, S>) -> bool {
		if self.state != IdleState::Paused {
			debug!("Idle resume ignored while {}", self.state);
			return false;
		}
		let Some(source) = self.source.as_ref() else {
			self.state = IdleState::Stopped;
			return false;
		};

		deck.buffer.set_owner(Owner::Idle);
		let index = source.current().unwrap_or(0);
		if deck.draw(Owner::Idle, source, index).is_err() {
			warn!("Idle repaint of frame {index} failed");
		}
		self.timer = Some(deck.scheduler.register(self.interval, TimerTarget::Idle));
		self.state = IdleState::Running;
		deck.stats.idle_resumes += 1;
		info!("Idle animation resumed at frame {index}");
		true
	}

	/// Cancels the timer and drops the animation. The ownership tag is left alone.
	pub(crate) fn stop(&mut self, scheduler: &mut dyn Scheduler) {
		if let Some(timer) = self.timer.take() {
			scheduler.cancel(timer);
		}
		if self.source.take().is_some() {
			info!("Idle animation stopped");
		}
		self.state = IdleState::Stopped;
	}

	/// Advances to the next frame, wrapping after the last one.
	///
	/// A frame that fails to load is skipped; the previous one stays on screen.
	pub(crate) fn tick<S: Storage>(&mut self, deck: &mut Deck<'_, S>) {
		if self.state != IdleState::Running {
			debug!("Stale idle tick while {}", self.state);
			return;
		}
		let Some(source) = self.source.as_mut() else {
			return;
		};

		deck.stats.idle_ticks += 1;
		let index = source.advance_wrapping();
		if deck.draw(Owner::Idle, source, index).is_err() {
			warn!("Skipping idle frame {index}");
		}
	}
}
