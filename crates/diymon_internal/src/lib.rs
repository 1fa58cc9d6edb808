//! This module is separated into its own crate so the facade stays a thin re-export, and should not be used directly.

/// `use diymon_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use diymon_anim;
pub use diymon_types;
pub use diymon_vfs;

// Re-export commonly used types at crate root
pub use diymon_anim::{
	ActionKind, AnimationEngine, EngineConfig, EvolutionCode, NullRenderer, Owner, PlaybackStats,
	Renderer, Scheduler, SharedFrameBuffer, TickScheduler,
};
pub use diymon_vfs::{FsStorage, MemStorage, Storage};
