//! Prelude module for `diymon_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use diymon_internal::prelude::*;
//!
//! let storage = MemStorage::new();
//! let config = EngineConfig { width: 8, height: 8, ..EngineConfig::default() };
//! let mut engine = AnimationEngine::new(config, storage, NullRenderer);
//!
//! // no frames on storage: nothing to loop
//! assert!(!engine.idle_start_subject());
//! assert_eq!(engine.owner(), Owner::None);
//! assert_eq!(engine.buffer_descriptor().map(BufferDescriptor::size), Some(192));
//! ```

// Re-export everything from diymon_types::prelude
#[doc(inline)]
pub use diymon_types::prelude::*;

// Engine
#[doc(inline)]
pub use diymon_anim::{
	ActionPlayer, ActionPrefixes, ActionState, AllocationError, AnimationEngine, ConfigError,
	EngineConfig, FinishReason, FrameStore, IdlePlayer, IdleState, LoadError, NullRenderer, Owner,
	OwnershipError, PlaybackStats, RecordingRenderer, RenderEvent, Renderer, Scheduler,
	SharedFrameBuffer, TickScheduler, TimerHandle, TimerTarget,
};

// Storage
#[doc(inline)]
pub use diymon_vfs::{DirEntry, DirHandle, EntryKind, FileHandle, FsStorage, MemStorage, Storage, VfsError};
