//! The idle and action players.
//!
//! Players own nothing but their cursor and timer. Everything they act on (the
//! shared buffer, the frame store, the renderer, the scheduler) belongs to the
//! engine and is lent to them for the duration of one call through a [`Deck`].

mod action;
mod idle;

pub use action::{ActionPlayer, ActionState, FinishReason};
pub use idle::{IdlePlayer, IdleState};

pub(crate) use action::Step;

use diymon_vfs::Storage;
use log::{debug, error, warn};

use crate::{
	AnimationSource, FrameStore, LoadError, Owner, PlaybackStats, Renderer, Scheduler,
	SharedFrameBuffer,
};

/// Engine state lent to a player for one operation.
pub(crate) struct Deck<'a, S> {
	pub buffer: &'a mut SharedFrameBuffer,
	pub store: &'a FrameStore<S>,
	pub renderer: &'a mut dyn Renderer,
	pub scheduler: &'a mut dyn Scheduler,
	pub stats: &'a mut PlaybackStats,
}

impl<S: Storage> Deck<'_, S> {
	/// Loads frame `index` of `source` as `owner` and invalidates the renderer on success.
	pub fn draw(&mut self, owner: Owner, source: &AnimationSource, index: usize) -> Result<(), LoadError> {
		let loaded =
			self.store.load_frame(self.buffer, owner, source.base_path(), source.prefix(), index);
		match loaded {
			Ok(()) => {
				debug!("{owner} drew {}{} from {}", source.prefix(), index + 1, source.base_path());
				self.stats.frames_loaded += 1;
				self.renderer.invalidate(self.buffer.pixels());
				Ok(())
			}
			Err(e) => {
				match &e {
					LoadError::Open {
						..
					} => error!("{e}"),
					_ => warn!("{e}"),
				}
				self.stats.load_failures += 1;
				Err(e)
			}
		}
	}
}

/// Finishes the running action and hands the buffer back to idle.
///
/// Runs exactly once per accepted action, whatever ended it.
pub(crate) fn finish_action<S: Storage>(
	action: &mut ActionPlayer,
	idle: &mut IdlePlayer,
	deck: &mut Deck<'_, S>,
	reason: FinishReason,
) {
	action.finish(deck, reason);
	idle.resume(deck);
	if idle.state() == IdleState::Stopped {
		deck.renderer.set_visible(false);
	}
}
