//! One-shot action player and its finish reasons.

use std::{
	fmt::{Display, Formatter},
	time::Duration,
};

use diymon_types::action::ActionKind;
use diymon_vfs::Storage;
use log::{debug, info, warn};

use super::Deck;
use crate::{ActionPrefixes, AnimationSource, Owner, TimerHandle, TimerTarget};

/// Lifecycle of the action player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
	/// Nothing playing, requests accepted
	#[default]
	Idle,
	/// Request accepted, frames not counted yet
	Requested(ActionKind),
	/// Showing frame `frame` of `kind`
	Playing {
		/// Action being played
		kind: ActionKind,
		/// Frame on screen
		frame: usize,
	},
}

impl ActionState {
	/// Whether an action is between acceptance and its finish step.
	pub fn is_in_progress(&self) -> bool {
		!matches!(self, Self::Idle)
	}
}

/// Why an action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
	/// Every frame was shown
	Completed,
	/// Storage holds no frames for the action
	NoFrames,
	/// A frame could not be loaded
	LoadFailed,
	/// The engine was torn down mid-play
	Aborted,
}

impl Display for FinishReason {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Completed => write!(f, "completed"),
			Self::NoFrames => write!(f, "no frames"),
			Self::LoadFailed => write!(f, "load failed"),
			Self::Aborted => write!(f, "aborted"),
		}
	}
}

/// Outcome of one action step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
	Continue,
	Finished(FinishReason),
}

/// Plays one-shot action animations over the idle loop.
#[derive(Debug, Clone)]
pub struct ActionPlayer {
	state: ActionState,
	source: Option<AnimationSource>,
	timer: Option<TimerHandle>,
	prefixes: ActionPrefixes,
	interval: Duration,
	last_finish: Option<(ActionKind, FinishReason)>,
}

impl ActionPlayer {
	/// Creates an idle player.
	pub fn new(prefixes: ActionPrefixes, interval: Duration) -> Self {
		Self {
			state: ActionState::Idle,
			source: None,
			timer: None,
			prefixes,
			interval,
			last_finish: None,
		}
	}

	/// Current lifecycle state.
	pub fn state(&self) -> ActionState {
		self.state
	}

	/// Whether an action is playing.
	pub fn is_in_progress(&self) -> bool {
		self.state.is_in_progress()
	}

	/// Frames in the playing action, 0 when none.
	pub fn frame_count(&self) -> usize {
		self.source.as_ref().map_or(0, AnimationSource::frame_count)
	}

	/// The most recently finished action and how it ended.
	pub fn last_finish(&self) -> Option<(ActionKind, FinishReason)> {
		self.last_finish
	}

	/// Frame name prefixes.
	pub fn prefixes(&self) -> &ActionPrefixes {
		&self.prefixes
	}

	/// Accepts a request for `kind`, unless one is already in progress.
	pub(crate) fn request(&mut self, kind: ActionKind) -> bool {
		if self.is_in_progress() {
			return false;
		}
		self.state = ActionState::Requested(kind);
		true
	}

	/// Counts the frames of the requested action, takes the buffer and shows frame 0.
	///
	/// The idle loop must already be paused.
	pub(crate) fn begin<S: Storage>(&mut self, deck: &mut Deck<'_, S>, directory: &str) -> Step {
		let ActionState::Requested(kind) = self.state else {
			return Step::Continue;
		};

		let prefix = self.prefixes.get(kind).to_string();
		let frame_count = deck.store.count_frames(directory, &prefix);
		if frame_count == 0 {
			warn!("No frames for {kind} in {directory}");
			return Step::Finished(FinishReason::NoFrames);
		}

		deck.buffer.set_owner(Owner::Action);
		deck.renderer.set_visible(true);

		let mut source = AnimationSource::new(directory, prefix, frame_count);
		let first = source.advance().unwrap_or_default();
		self.state = ActionState::Playing {
			kind,
			frame: first,
		};
		let drawn = deck.draw(Owner::Action, &source, first);
		self.source = Some(source);
		if drawn.is_err() {
			warn!("Action {kind} failed on its first frame");
			return Step::Finished(FinishReason::LoadFailed);
		}

		self.timer = Some(deck.scheduler.register(self.interval, TimerTarget::Action));
		info!("Action {kind} playing: {frame_count} frames");
		Step::Continue
	}

	/// Shows the next frame, or reports that the action is over.
	pub(crate) fn tick<S: Storage>(&mut self, deck: &mut Deck<'_, S>) -> Step {
		let ActionState::Playing {
			kind,
			..
		} = self.state
		else {
			debug!("Stale action tick while {:?}", self.state);
			return Step::Continue;
		};
		let Some(source) = self.source.as_mut() else {
			return Step::Finished(FinishReason::Aborted);
		};

		let Some(frame) = source.advance() else {
			return Step::Finished(FinishReason::Completed);
		};
		self.state = ActionState::Playing {
			kind,
			frame,
		};
		if deck.draw(Owner::Action, source, frame).is_err() {
			warn!("Action {kind} stopped at frame {frame}");
			return Step::Finished(FinishReason::LoadFailed);
		}
		Step::Continue
	}

	/// Cancels the timer, drops the animation and releases the ownership tag.
	///
	/// Resuming idle is left to the caller.
	pub(crate) fn finish<S: Storage>(&mut self, deck: &mut Deck<'_, S>, reason: FinishReason) {
		let kind = match self.state {
			ActionState::Idle => return,
			ActionState::Requested(kind)
			| ActionState::Playing {
				kind,
				..
			} => kind,
		};

		if let Some(timer) = self.timer.take() {
			deck.scheduler.cancel(timer);
		}
		self.source = None;
		self.state = ActionState::Idle;
		deck.buffer.set_owner(Owner::None);

		match reason {
			FinishReason::Completed => deck.stats.actions_completed += 1,
			FinishReason::NoFrames => deck.stats.actions_empty += 1,
			FinishReason::LoadFailed | FinishReason::Aborted => deck.stats.actions_aborted += 1,
		}
		self.last_finish = Some((kind, reason));
		info!("Action {kind} finished: {reason}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		IdlePlayer, IdleState, RenderEvent,
		player::{
			finish_action,
			testing::{DIR, Rig},
		},
	};

	fn players() -> (IdlePlayer, ActionPlayer) {
		(
			IdlePlayer::new("ANIM_IDLE_", Duration::from_millis(1500)),
			ActionPlayer::new(ActionPrefixes::default(), Duration::from_millis(500)),
		)
	}

	/// Plays `kind` the way the engine does, ticking until the finish step.
	fn play(rig: &mut Rig, idle: &mut IdlePlayer, action: &mut ActionPlayer, kind: ActionKind) -> usize {
		assert!(action.request(kind));
		idle.pause(&mut rig.scheduler);
		let mut ticks = 0;
		let mut step = action.begin(&mut rig.deck(), DIR);
		while step == Step::Continue {
			assert_eq!(rig.buffer.owner(), Owner::Action);
			step = action.tick(&mut rig.deck());
			ticks += 1;
		}
		let Step::Finished(reason) = step else { unreachable!() };
		finish_action(action, idle, &mut rig.deck(), reason);
		ticks
	}

	#[test]
	fn test_action_plays_every_frame_once() {
		let mut rig = Rig::new();
		rig.add_frames("ANIM_IDLE_", 4, 0);
		rig.add_frames("ANIM_EAT_", 3, 0x20);
		let (mut idle, mut action) = players();
		idle.start(&mut rig.deck(), DIR);

		let ticks = play(&mut rig, &mut idle, &mut action, ActionKind::Eat);
		assert_eq!(ticks, 3);
		assert_eq!(rig.renderer.drawn(), [0, 0x20, 0x21, 0x22, 0]);
		assert_eq!(action.last_finish(), Some((ActionKind::Eat, FinishReason::Completed)));
		assert_eq!(rig.buffer.owner(), Owner::Idle);
		assert_eq!(idle.state(), IdleState::Running);
		assert_eq!(rig.stats.actions_completed, 1);
		assert_eq!(rig.scheduler.active_count(), 1);
	}

	#[test]
	fn test_no_frames_finishes_immediately() {
		let mut rig = Rig::new();
		rig.add_frames("ANIM_IDLE_", 2, 0);
		let (mut idle, mut action) = players();
		idle.start(&mut rig.deck(), DIR);

		let ticks = play(&mut rig, &mut idle, &mut action, ActionKind::Attack);
		assert_eq!(ticks, 0);
		assert_eq!(action.last_finish(), Some((ActionKind::Attack, FinishReason::NoFrames)));
		assert_eq!(rig.buffer.owner(), Owner::Idle);
		assert_eq!(rig.stats.actions_empty, 1);
		assert_eq!(rig.stats.idle_resumes, 1);
	}

	#[test]
	fn test_load_failure_finishes_early() {
		let mut rig = Rig::new();
		rig.add_frames("ANIM_IDLE_", 2, 0);
		rig.add_frames("ANIM_GYM_", 4, 0x30);
		rig.storage.insert_file(&format!("{DIR}/ANIM_GYM_2.bin"), vec![0u8; 13]);
		let (mut idle, mut action) = players();
		idle.start(&mut rig.deck(), DIR);

		play(&mut rig, &mut idle, &mut action, ActionKind::Exercise);
		assert_eq!(action.last_finish(), Some((ActionKind::Exercise, FinishReason::LoadFailed)));
		assert_eq!(rig.renderer.drawn(), [0, 0x30, 0]);
		assert_eq!(rig.stats.actions_aborted, 1);
		assert_eq!(rig.buffer.owner(), Owner::Idle);
	}

	#[test]
	fn test_second_request_is_refused() {
		let mut rig = Rig::new();
		rig.add_frames("ANIM_EAT_", 2, 0);
		let (_, mut action) = players();

		assert!(action.request(ActionKind::Eat));
		assert_eq!(action.begin(&mut rig.deck(), DIR), Step::Continue);
		assert!(!action.request(ActionKind::Attack));
		assert_eq!(
			action.state(),
			ActionState::Playing {
				kind: ActionKind::Eat,
				frame: 0
			}
		);
	}

	#[test]
	fn test_finish_without_idle_hides() {
		let mut rig = Rig::new();
		rig.add_frames("ANIM_EAT_", 1, 0x40);
		let (mut idle, mut action) = players();

		play(&mut rig, &mut idle, &mut action, ActionKind::Eat);
		assert_eq!(rig.buffer.owner(), Owner::None);
		assert_eq!(rig.renderer.events().last(), Some(&RenderEvent::Hidden));
		assert_eq!(rig.scheduler.active_count(), 0);
	}
}
