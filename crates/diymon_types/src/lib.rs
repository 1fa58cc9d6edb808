//! This crate provides the plain data types shared by the `diymon-rs` animation engine.
//!
//! # Contents
//!
//! - **Frame files**: the 12-byte image header that precedes every frame payload,
//!   the `RGB565A8` color format and the `<prefix><N>.<ext>` naming convention
//! - **Buffer descriptors**: dimensions, stride and byte size of the shared frame buffer
//! - **Actions**: the one-shot animations a user can trigger (eat, exercise, attack)
//! - **Subjects**: evolution codes and the asset directory derived from them
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use diymon_types::prelude::*;
//!
//! let desc = BufferDescriptor::new(170, 320);
//! assert_eq!(desc.stride(), 340);
//! assert_eq!(desc.size(), 163_200);
//!
//! let code: EvolutionCode = "1.1".parse().unwrap();
//! assert_eq!(code.dir_name(), "11");
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use diymon_types::frame::{frame_file_name, DEFAULT_EXTENSION};
//!
//! assert_eq!(frame_file_name("ANIM_IDLE_", 0, DEFAULT_EXTENSION), "ANIM_IDLE_1.bin");
//! ```

mod error;

pub mod action;
pub mod frame;
pub mod subject;

/// `use diymon_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::{EvolutionCodeError, FrameHeaderError};
