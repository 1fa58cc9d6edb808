//! The animation engine.
//!
//! [`AnimationEngine`] is the single object behind the character display. It
//! owns the shared frame buffer, both players, the frame store, the renderer,
//! the scheduler and the current subject. Every operation takes `&mut self`, so
//! the idle loop, action playback and timer dispatch can never interleave.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use diymon_anim::{ActionKind, AnimationEngine, EngineConfig, Owner, RecordingRenderer};
//! use diymon_vfs::MemStorage;
//!
//! let storage = MemStorage::new();
//! for n in 1..=2 {
//! 	storage.insert_file(&format!("S:/diymon/0/ANIM_IDLE_{n}.bin"), vec![n as u8; 12 + 3]);
//! 	storage.insert_file(&format!("S:/diymon/0/ANIM_EAT_{n}.bin"), vec![0x10 + n as u8; 12 + 3]);
//! }
//!
//! let config = EngineConfig { width: 1, height: 1, ..EngineConfig::default() };
//! let mut engine = AnimationEngine::new(config, storage, RecordingRenderer::new());
//!
//! assert!(engine.idle_start_subject());
//! assert_eq!(engine.owner(), Owner::Idle);
//!
//! assert!(engine.action_play(ActionKind::Eat));
//! assert_eq!(engine.owner(), Owner::Action);
//! assert!(!engine.action_play(ActionKind::Attack));
//!
//! engine.advance(Duration::from_millis(1000));
//! assert!(!engine.is_action_in_progress());
//! assert_eq!(engine.owner(), Owner::Idle);
//! ```


use std::time::Duration;

use diymon_types::{
	action::ActionKind,
	frame::BufferDescriptor,
	subject::{EvolutionCode, Subject},
};
use diymon_vfs::Storage;
use log::{error, info, warn};

use crate::{
	ActionPlayer, ActionState, EngineConfig, FinishReason, FrameStore, IdlePlayer, IdleState, Owner,
	PlaybackStats, Renderer, Scheduler, SharedFrameBuffer, TickScheduler, TimerTarget,
	player::{Deck, Step, finish_action},
};

fn disabled(operation: &str) {
	warn!("Animation disabled, ignoring {operation}");
}

/// Owns the shared buffer and arbitrates it between the idle and action players.
///
/// When the buffer cannot be allocated the engine is built *disabled*: every
/// playback operation logs and returns without effect, leaving the rest of the
/// host functional.
#[derive(Debug)]
pub struct AnimationEngine<S, R, C = TickScheduler> {
	config: EngineConfig,
	buffer: Option<SharedFrameBuffer>,
	store: FrameStore<S>,
	renderer: R,
	scheduler: C,
	idle: IdlePlayer,
	action: ActionPlayer,
	subject: Subject,
	stats: PlaybackStats,
}

impl<S: Storage, R: Renderer> AnimationEngine<S, R> {
	/// Builds an engine driven by a [`TickScheduler`].
	pub fn new(config: EngineConfig, storage: S, renderer: R) -> Self {
		Self::with_scheduler(config, storage, renderer, TickScheduler::new())
	}
}

impl<S: Storage, R: Renderer, C: Scheduler> AnimationEngine<S, R, C> {
	/// Builds an engine on an explicit scheduler.
	///
	/// Allocates the shared buffer and attaches it to `renderer`. Allocation
	/// failure is logged and yields a disabled engine.
	pub fn with_scheduler(config: EngineConfig, storage: S, mut renderer: R, scheduler: C) -> Self {
		let buffer = match SharedFrameBuffer::allocate_within(
			config.width,
			config.height,
			config.max_buffer_bytes,
		) {
			Ok(buffer) => {
				renderer.attach(buffer.descriptor());
				Some(buffer)
			}
			Err(e) => {
				error!("Animation disabled: {e}");
				None
			}
		};

		Self {
			store: FrameStore::from_config(storage, &config),
			idle: IdlePlayer::new(config.idle_prefix.as_str(), config.idle_interval()),
			action: ActionPlayer::new(config.prefixes.clone(), config.action_interval()),
			subject: config.subject(),
			buffer,
			renderer,
			scheduler,
			stats: PlaybackStats::default(),
			config,
		}
	}

	/// Splits `self` into the lent engine state and the two players.
	fn split(&mut self) -> Option<(Deck<'_, S>, &mut IdlePlayer, &mut ActionPlayer)> {
		let Self {
			buffer,
			store,
			renderer,
			scheduler,
			idle,
			action,
			stats,
			..
		} = self;
		let buffer = buffer.as_mut()?;
		let deck = Deck {
			buffer,
			store,
			renderer,
			scheduler,
			stats,
		};
		Some((deck, idle, action))
	}

	/// Starts the idle loop from `directory`, restarting it if it already runs.
	///
	/// Returns `false` when the directory holds no idle frames or the engine is disabled.
	pub fn idle_start(&mut self, directory: &str) -> bool {
		let Some((mut deck, idle, _)) = self.split() else {
			disabled("idle start");
			return false;
		};
		idle.start(&mut deck, directory)
	}

	/// Starts the idle loop from the current subject's directory.
	pub fn idle_start_subject(&mut self) -> bool {
		let directory = self.subject.directory();
		self.idle_start(&directory)
	}

	/// Stops the idle loop, releasing the buffer if idle held it.
	pub fn idle_stop(&mut self) {
		let Some((deck, idle, _)) = self.split() else {
			disabled("idle stop");
			return;
		};
		idle.stop(deck.scheduler);
		if deck.buffer.owner() == Owner::Idle {
			deck.buffer.set_owner(Owner::None);
		}
	}

	/// Freezes the idle loop on its current frame. Returns `false` unless it was running.
	pub fn idle_pause(&mut self) -> bool {
		let Some((deck, idle, _)) = self.split() else {
			disabled("idle pause");
			return false;
		};
		idle.pause(deck.scheduler)
	}

	/// Resumes a paused idle loop and repaints its frame.
	///
	/// Refused while an action is playing; the action resumes idle when it finishes.
	pub fn idle_resume(&mut self) -> bool {
		let Some((mut deck, idle, action)) = self.split() else {
			disabled("idle resume");
			return false;
		};
		if action.is_in_progress() {
			warn!("Idle resume refused while an action holds the buffer");
			return false;
		}
		idle.resume(&mut deck)
	}

	/// Plays the `kind` action of the current subject over the idle loop.
	///
	/// Returns `false` if another action is in progress or the engine is
	/// disabled. An accepted action always ends by handing the buffer back to
	/// idle, even when it has no frames or one fails to load.
	pub fn action_play(&mut self, kind: ActionKind) -> bool {
		let directory = self.subject.directory();
		let Some((mut deck, idle, action)) = self.split() else {
			disabled("action play");
			return false;
		};
		if !action.request(kind) {
			warn!("Action {kind} rejected: {:?} in progress", action.state());
			deck.stats.actions_rejected += 1;
			return false;
		}

		deck.stats.actions_played += 1;
		idle.pause(deck.scheduler);
		if let Step::Finished(reason) = action.begin(&mut deck, &directory) {
			finish_action(action, idle, &mut deck, reason);
		}
		true
	}

	/// Whether an action is between acceptance and its finish step.
	pub fn is_action_in_progress(&self) -> bool {
		self.action.is_in_progress()
	}

	/// Current holder of the buffer, [`Owner::None`] when disabled.
	pub fn owner(&self) -> Owner {
		self.buffer.as_ref().map_or(Owner::None, SharedFrameBuffer::owner)
	}

	/// Moves the clock forward by `elapsed`, running every tick that falls due.
	///
	/// Returns the number of ticks dispatched.
	pub fn advance(&mut self, elapsed: Duration) -> usize {
		let until = self.scheduler.now() + elapsed;
		let mut fired = 0;
		while let Some(target) = self.scheduler.poll_due(until) {
			fired += 1;
			self.dispatch(target);
		}
		fired
	}

	fn dispatch(&mut self, target: TimerTarget) {
		let Some((mut deck, idle, action)) = self.split() else {
			return;
		};
		match target {
			TimerTarget::Idle => idle.tick(&mut deck),
			TimerTarget::Action => {
				if let Step::Finished(reason) = action.tick(&mut deck) {
					finish_action(action, idle, &mut deck, reason);
				}
			}
		}
	}

	/// Switches to the subject with evolution `code`.
	///
	/// A running or paused idle loop is restarted against the new directory.
	/// Returns whether idle is active afterwards.
	pub fn set_subject(&mut self, code: EvolutionCode) -> bool {
		info!("Subject evolution {} -> {code}", self.subject.code());
		self.subject.set_code(code);
		if self.idle.state() == IdleState::Stopped {
			return false;
		}

		self.idle_stop();
		if !self.action.is_in_progress() {
			self.renderer.set_visible(false);
		}
		self.idle_start_subject()
	}

	/// Stops everything and frees the buffer. The engine stays disabled afterwards.
	pub fn teardown(&mut self) {
		if let Some((mut deck, idle, action)) = self.split() {
			action.finish(&mut deck, FinishReason::Aborted);
			idle.stop(deck.scheduler);
			deck.renderer.set_visible(false);
		}
		if let Some(buffer) = self.buffer.take() {
			buffer.release();
			info!("Animation engine torn down");
		}
	}

	/// Counters collected so far.
	pub fn stats(&self) -> &PlaybackStats {
		&self.stats
	}

	/// Layout of the shared buffer, `None` when disabled.
	pub fn buffer_descriptor(&self) -> Option<&BufferDescriptor> {
		self.buffer.as_ref().map(SharedFrameBuffer::descriptor)
	}

	/// Current buffer contents, `None` when disabled.
	pub fn pixels(&self) -> Option<&[u8]> {
		self.buffer.as_ref().map(SharedFrameBuffer::pixels)
	}

	/// Whether the buffer is allocated.
	pub fn is_enabled(&self) -> bool {
		self.buffer.is_some()
	}

	/// Configuration the engine was built with.
	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Subject whose animations are played.
	pub fn subject(&self) -> &Subject {
		&self.subject
	}

	/// The idle player.
	pub fn idle(&self) -> &IdlePlayer {
		&self.idle
	}

	/// The action player.
	pub fn action(&self) -> &ActionPlayer {
		&self.action
	}

	/// State of the action player.
	pub fn action_state(&self) -> ActionState {
		self.action.state()
	}

	/// The frame store.
	pub fn store(&self) -> &FrameStore<S> {
		&self.store
	}

	/// The renderer.
	pub fn renderer(&self) -> &R {
		&self.renderer
	}

	/// Mutable access to the renderer.
	pub fn renderer_mut(&mut self) -> &mut R {
		&mut self.renderer
	}

	/// The scheduler.
	pub fn scheduler(&self) -> &C {
		&self.scheduler
	}

	/// Current scheduler time.
	pub fn now(&self) -> Duration {
		self.scheduler.now()
	}
}
