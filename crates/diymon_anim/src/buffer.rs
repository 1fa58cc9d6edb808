//! The shared frame buffer and its ownership tag.
//!
//! The buffer is the largest allocation on the device. It is reserved once when
//! the engine is built and never resized, copied or handed out; players reach it
//! through the engine and must present the ownership tag they believe they hold
//! before they get write access.

use std::fmt::{Display, Formatter};

use diymon_types::frame::BufferDescriptor;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{AllocationError, OwnershipError};

/// Which player may write the shared buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Owner {
	/// Nobody: before idle starts, between players, or after teardown
	#[default]
	None,
	/// The looping idle animation
	Idle,
	/// A one-shot action animation
	Action,
}

impl Display for Owner {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::None => write!(f, "nobody"),
			Self::Idle => write!(f, "idle"),
			Self::Action => write!(f, "action"),
		}
	}
}

/// One fixed-size `RGB565A8` pixel buffer shared by the idle and action players.
///
/// # Examples
///
/// ```
/// use diymon_anim::{Owner, SharedFrameBuffer};
///
/// let buffer = SharedFrameBuffer::allocate(170, 320).unwrap();
/// assert_eq!(buffer.stride(), 340);
/// assert_eq!(buffer.size(), 163_200);
/// assert_eq!(buffer.owner(), Owner::None);
/// ```
#[derive(Debug)]
pub struct SharedFrameBuffer {
	descriptor: BufferDescriptor,
	data: Box<[u8]>,
	owner: Owner,
}

impl SharedFrameBuffer {
	/// Allocates a zeroed buffer for a `width` x `height` display.
	///
	/// # Errors
	///
	/// Returns an error if a dimension is zero or the allocator refuses the request.
	pub fn allocate(width: u16, height: u16) -> Result<Self, AllocationError> {
		Self::allocate_within(width, height, None)
	}

	/// Like [`SharedFrameBuffer::allocate`], but fails when the buffer would exceed `budget` bytes.
	pub fn allocate_within(
		width: u16,
		height: u16,
		budget: Option<usize>,
	) -> Result<Self, AllocationError> {
		if width == 0 || height == 0 {
			return Err(AllocationError::InvalidDimensions {
				width,
				height,
			});
		}

		let descriptor = BufferDescriptor::new(width, height);
		let size = descriptor.size();
		if let Some(budget) = budget
			&& size > budget
		{
			return Err(AllocationError::OverBudget {
				size,
				budget,
			});
		}

		let mut data = Vec::new();
		data.try_reserve_exact(size).map_err(|_| AllocationError::OutOfMemory {
			size,
		})?;
		data.resize(size, 0);

		debug!("Frame buffer allocated: {descriptor}");
		Ok(Self {
			descriptor,
			data: data.into_boxed_slice(),
			owner: Owner::None,
		})
	}

	/// Layout of the buffer, handed to the renderer once.
	pub fn descriptor(&self) -> &BufferDescriptor {
		&self.descriptor
	}

	/// Width in pixels.
	pub fn width(&self) -> u16 {
		self.descriptor.width()
	}

	/// Height in pixels.
	pub fn height(&self) -> u16 {
		self.descriptor.height()
	}

	/// Bytes per row of the color plane.
	pub fn stride(&self) -> usize {
		self.descriptor.stride()
	}

	/// Total size in bytes.
	pub fn size(&self) -> usize {
		self.data.len()
	}

	/// Current holder of the ownership tag.
	pub fn owner(&self) -> Owner {
		self.owner
	}

	/// Read access for the renderer.
	pub fn pixels(&self) -> &[u8] {
		&self.data
	}

	/// Write access for the current holder.
	///
	/// # Errors
	///
	/// Returns an error when `as_owner` is not the current holder, or is [`Owner::None`].
	pub fn pixels_mut(&mut self, as_owner: Owner) -> Result<&mut [u8], OwnershipError> {
		if as_owner == Owner::None || as_owner != self.owner {
			return Err(OwnershipError {
				requested: as_owner,
				holder: self.owner,
			});
		}
		Ok(&mut self.data)
	}

	/// Moves the ownership tag. The previous holder loses write access immediately.
	pub(crate) fn set_owner(&mut self, owner: Owner) {
		if self.owner != owner {
			info!("Frame buffer owner: {} -> {}", self.owner, owner);
			self.owner = owner;
		}
	}

	/// Frees the allocation at feature teardown.
	pub fn release(mut self) {
		self.set_owner(Owner::None);
		debug!("Frame buffer released ({} bytes)", self.data.len());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_allocation_layout() {
		let buffer = SharedFrameBuffer::allocate(170, 320).unwrap();
		assert_eq!(buffer.width(), 170);
		assert_eq!(buffer.height(), 320);
		assert_eq!(buffer.stride(), 340);
		assert_eq!(buffer.size(), 163_200);
		assert!(buffer.pixels().iter().all(|&b| b == 0));
	}

	#[test]
	fn test_allocation_failures() {
		assert_eq!(
			SharedFrameBuffer::allocate(0, 10).unwrap_err(),
			AllocationError::InvalidDimensions {
				width: 0,
				height: 10
			}
		);
		assert_eq!(
			SharedFrameBuffer::allocate_within(170, 320, Some(100_000)).unwrap_err(),
			AllocationError::OverBudget {
				size: 163_200,
				budget: 100_000
			}
		);
		assert!(SharedFrameBuffer::allocate_within(170, 320, Some(163_200)).is_ok());
	}

	#[test]
	fn test_write_access_follows_tag() {
		let mut buffer = SharedFrameBuffer::allocate(2, 2).unwrap();
		assert!(buffer.pixels_mut(Owner::Idle).is_err());
		assert!(buffer.pixels_mut(Owner::None).is_err());

		buffer.set_owner(Owner::Idle);
		buffer.pixels_mut(Owner::Idle).unwrap()[0] = 7;
		let err = buffer.pixels_mut(Owner::Action).unwrap_err();
		assert_eq!(err.holder, Owner::Idle);
		assert_eq!(err.requested, Owner::Action);

		buffer.set_owner(Owner::Action);
		assert!(buffer.pixels_mut(Owner::Idle).is_err());
		assert_eq!(buffer.pixels_mut(Owner::Action).unwrap()[0], 7);
	}
}
