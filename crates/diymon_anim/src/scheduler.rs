//! Cooperative periodic timers.
//!
//! Both players register a periodic timer with the same scheduler and cancel it
//! when they pause or finish. A timer does not capture the player: it carries a
//! [`TimerTarget`] naming the player whose tick the engine should run when it
//! fires, so there is never a dangling reference to a stopped player.

use std::time::Duration;

use log::trace;

/// Identifies one registered timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u32);

impl TimerHandle {
	/// Raw timer id.
	pub fn id(&self) -> u32 {
		self.0
	}
}

/// Which player a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerTarget {
	/// Advance the idle loop
	Idle,
	/// Advance the running action
	Action,
}

/// Periodic timer facility the players register with.
pub trait Scheduler {
	/// Registers a timer firing every `interval`, first after one full interval.
	fn register(&mut self, interval: Duration, target: TimerTarget) -> TimerHandle;

	/// Cancels a timer. Cancelling an unknown or already cancelled timer is a no-op.
	fn cancel(&mut self, handle: TimerHandle);

	/// Returns `true` while `handle` is registered.
	fn is_active(&self, handle: TimerHandle) -> bool;

	/// Current scheduler time.
	fn now(&self) -> Duration;

	/// Pops the earliest timer due at or before `until`, advancing the clock to its
	/// deadline and rescheduling it. Returns `None` once nothing is due, leaving the
	/// clock at `until`.
	fn poll_due(&mut self, until: Duration) -> Option<TimerTarget>;
}

#[derive(Debug, Clone)]
struct Timer {
	handle: TimerHandle,
	target: TimerTarget,
	interval: Duration,
	due: Duration,
}

/// [`Scheduler`] driven by an explicit clock.
///
/// Time only moves when the owner calls [`Scheduler::poll_due`], which makes
/// playback deterministic in tests and lets a host loop feed real elapsed time.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use diymon_anim::{Scheduler, TickScheduler, TimerTarget};
///
/// let mut sched = TickScheduler::new();
/// let handle = sched.register(Duration::from_millis(500), TimerTarget::Action);
///
/// let until = Duration::from_millis(1200);
/// assert_eq!(sched.poll_due(until), Some(TimerTarget::Action)); // 500 ms
/// assert_eq!(sched.poll_due(until), Some(TimerTarget::Action)); // 1000 ms
/// assert_eq!(sched.poll_due(until), None);
///
/// sched.cancel(handle);
/// sched.cancel(handle);
/// assert!(!sched.is_active(handle));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
	now: Duration,
	next_id: u32,
	timers: Vec<Timer>,
}

impl TickScheduler {
	/// Shortest interval accepted; shorter requests are rounded up.
	pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

	/// Creates a scheduler at time zero with no timers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of registered timers.
	pub fn active_count(&self) -> usize {
		self.timers.len()
	}
}

impl Scheduler for TickScheduler {
	fn register(&mut self, interval: Duration, target: TimerTarget) -> TimerHandle {
		let interval = interval.max(Self::MIN_INTERVAL);
		let handle = TimerHandle(self.next_id);
		self.next_id = self.next_id.wrapping_add(1);
		self.timers.push(Timer {
			handle,
			target,
			interval,
			due: self.now + interval,
		});
		trace!("timer {} registered for {target:?} every {interval:?}", handle.0);
		handle
	}

	fn cancel(&mut self, handle: TimerHandle) {
		let before = self.timers.len();
		self.timers.retain(|t| t.handle != handle);
		if self.timers.len() != before {
			trace!("timer {} cancelled", handle.0);
		}
	}

	fn is_active(&self, handle: TimerHandle) -> bool {
		self.timers.iter().any(|t| t.handle == handle)
	}

	fn now(&self) -> Duration {
		self.now
	}

	fn poll_due(&mut self, until: Duration) -> Option<TimerTarget> {
		// earliest deadline first, registration order breaks ties
		let next = self
			.timers
			.iter_mut()
			.filter(|t| t.due <= until)
			.min_by_key(|t| (t.due, t.handle));

		match next {
			Some(timer) => {
				self.now = self.now.max(timer.due);
				timer.due += timer.interval;
				Some(timer.target)
			}
			None => {
				self.now = self.now.max(until);
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ms(v: u64) -> Duration {
		Duration::from_millis(v)
	}

	fn drain(sched: &mut TickScheduler, until: Duration) -> Vec<(u128, TimerTarget)> {
		let mut fired = Vec::new();
		while let Some(target) = sched.poll_due(until) {
			fired.push((sched.now().as_millis(), target));
		}
		fired
	}

	#[test]
	fn test_interleaves_by_deadline() {
		let mut sched = TickScheduler::new();
		sched.register(ms(1500), TimerTarget::Idle);
		sched.register(ms(500), TimerTarget::Action);

		let fired = drain(&mut sched, ms(1500));
		assert_eq!(
			fired,
			[
				(500, TimerTarget::Action),
				(1000, TimerTarget::Action),
				(1500, TimerTarget::Idle),
				(1500, TimerTarget::Action),
			]
		);
		assert_eq!(sched.now(), ms(1500));
	}

	#[test]
	fn test_cancel_is_idempotent() {
		let mut sched = TickScheduler::new();
		let a = sched.register(ms(10), TimerTarget::Idle);
		let b = sched.register(ms(10), TimerTarget::Action);
		sched.cancel(a);
		sched.cancel(a);
		assert!(!sched.is_active(a));
		assert!(sched.is_active(b));
		assert_eq!(sched.active_count(), 1);
		assert_eq!(drain(&mut sched, ms(25)), [(10, TimerTarget::Action), (20, TimerTarget::Action)]);
	}

	#[test]
	fn test_registration_starts_from_current_time() {
		let mut sched = TickScheduler::new();
		assert_eq!(sched.poll_due(ms(700)), None);
		sched.register(ms(500), TimerTarget::Idle);
		assert_eq!(sched.poll_due(ms(1100)), None);
		assert_eq!(sched.poll_due(ms(1200)), Some(TimerTarget::Idle));
		assert_eq!(sched.now(), ms(1200));
	}

	#[test]
	fn test_zero_interval_is_clamped() {
		let mut sched = TickScheduler::new();
		sched.register(Duration::ZERO, TimerTarget::Idle);
		assert_eq!(drain(&mut sched, ms(3)).len(), 3);
	}
}
