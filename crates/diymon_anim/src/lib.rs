//! Animation playback and shared frame-buffer arbitration.
//!
//! The character display has room for exactly one full-screen frame. This crate
//! streams numbered frame files from storage into that single buffer on a fixed
//! cadence and decides, at every instant, which of two players may write it:
//!
//! - the **idle** player loops the subject's idle animation forever
//! - the **action** player shows a one-shot animation (eat, exercise, attack),
//!   taking the buffer from idle and always handing it back when done
//!
//! Everything is owned by one [`AnimationEngine`]; timers are plain
//! [`TimerTarget`] values on a [`Scheduler`], so there is no global state and no
//! callback can outlive the player it drives.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use diymon_anim::{AnimationEngine, EngineConfig, NullRenderer, Owner};
//! use diymon_vfs::MemStorage;
//!
//! let storage = MemStorage::new();
//! storage.insert_file("S:/diymon/0/ANIM_IDLE_1.bin", vec![0u8; 12 + 3]);
//!
//! let config = EngineConfig { width: 1, height: 1, ..EngineConfig::default() };
//! let mut engine = AnimationEngine::new(config, storage, NullRenderer);
//! engine.idle_start_subject();
//! engine.advance(Duration::from_secs(3));
//!
//! assert_eq!(engine.owner(), Owner::Idle);
//! assert_eq!(engine.stats().frames_loaded, 3);
//! ```

mod buffer;
mod config;
mod engine;
mod error;
mod player;
mod render;
mod scheduler;
mod source;
mod stats;
mod store;

pub use buffer::{Owner, SharedFrameBuffer};
pub use config::{ActionPrefixes, EngineConfig};
pub use diymon_types::{action::ActionKind, subject::EvolutionCode};
pub use engine::AnimationEngine;
pub use error::{AllocationError, ConfigError, LoadError, OwnershipError};
pub use player::{ActionPlayer, ActionState, FinishReason, IdlePlayer, IdleState};
pub use render::{NullRenderer, RecordingRenderer, RenderEvent, Renderer};
pub use scheduler::{Scheduler, TickScheduler, TimerHandle, TimerTarget};
pub use source::AnimationSource;
pub use stats::PlaybackStats;
pub use store::FrameStore;
