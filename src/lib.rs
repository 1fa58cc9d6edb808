#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `diymon-rs` drives the character animation of a small display toy.
//!
//! One fixed pixel buffer is shared by an endlessly looping idle animation and
//! short one-shot action animations. Frames are streamed from numbered files
//! on storage, and an ownership tag decides which player may write the buffer.
//!
//! ```
//! use diymon_rs::prelude::*;
//!
//! let storage = MemStorage::new();
//! storage.insert_file("S:/diymon/0/ANIM_IDLE_1.bin", vec![0u8; HEADER_SIZE + 3]);
//!
//! let config = EngineConfig { width: 1, height: 1, ..EngineConfig::default() };
//! let mut engine = AnimationEngine::new(config, storage, NullRenderer);
//! assert!(engine.idle_start_subject());
//! assert_eq!(engine.owner(), Owner::Idle);
//! ```
pub use diymon_internal::*;
