//! Prelude module for `diymon_types`.
//!
//! This module provides a convenient way to import commonly used types and constants.
//!
//! # Examples
//!
//! ```
//! use diymon_types::prelude::*;
//!
//! let desc = BufferDescriptor::new(170, 320);
//! let subject = Subject::default();
//! assert_eq!(subject.directory(), "S:/diymon/0");
//! assert_eq!(ActionKind::Eat.default_prefix(), "ANIM_EAT_");
//! # let _ = desc;
//! ```

#[doc(inline)]
pub use crate::{
	EvolutionCodeError,
	FrameHeaderError,

	// Actions
	action::{ActionKind, IDLE_PREFIX},

	// Frame files
	frame::{
		BufferDescriptor, ColorFormat, DEFAULT_EXTENSION, FrameHeader, HEADER_SIZE,
		frame_file_name, is_frame_file_name,
	},

	// Subjects
	subject::{DEFAULT_ASSET_ROOT, EvolutionCode, Subject},
};
