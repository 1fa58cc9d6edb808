//! Rendering hook.

use diymon_types::frame::BufferDescriptor;

/// The display side of playback.
///
/// The engine attaches the buffer layout once, then invalidates after every
/// frame that loaded completely. A failed load never invalidates, so whatever
/// is on screen stays there.
pub trait Renderer {
	/// Binds the image widget to the shared buffer layout.
	fn attach(&mut self, descriptor: &BufferDescriptor);

	/// A new frame is in the buffer.
	fn invalidate(&mut self, pixels: &[u8]);

	/// Shows or hides the character.
	fn set_visible(&mut self, visible: bool);
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
	fn attach(&mut self, _descriptor: &BufferDescriptor) {}

	fn invalidate(&mut self, _pixels: &[u8]) {}

	fn set_visible(&mut self, _visible: bool) {}
}

/// What a [`RecordingRenderer`] saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
	/// Buffer layout attached
	Attached(BufferDescriptor),
	/// Frame drawn; `marker` is the first byte of the pixel data
	Drawn {
		/// First byte of the buffer at invalidation time
		marker: u8,
	},
	/// Character shown
	Shown,
	/// Character hidden
	Hidden,
}

/// Renderer that keeps a log of every call, for tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
	events: Vec<RenderEvent>,
	visible: bool,
}

impl RecordingRenderer {
	/// Creates an empty recorder with the character hidden.
	pub fn new() -> Self {
		Self::default()
	}

	/// Every event so far, oldest first.
	pub fn events(&self) -> &[RenderEvent] {
		&self.events
	}

	/// Markers of the drawn frames, oldest first.
	pub fn drawn(&self) -> Vec<u8> {
		self.events
			.iter()
			.filter_map(|e| match e {
				RenderEvent::Drawn {
					marker,
				} => Some(*marker),
				_ => None,
			})
			.collect()
	}

	/// Whether the character is currently shown.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Forgets the recorded events, keeping visibility.
	pub fn clear(&mut self) {
		self.events.clear();
	}

	/// Takes the recorded events, leaving the log empty.
	pub fn take_events(&mut self) -> Vec<RenderEvent> {
		std::mem::take(&mut self.events)
	}
}

impl Renderer for RecordingRenderer {
	fn attach(&mut self, descriptor: &BufferDescriptor) {
		self.events.push(RenderEvent::Attached(*descriptor));
	}

	fn invalidate(&mut self, pixels: &[u8]) {
		self.events.push(RenderEvent::Drawn {
			marker: pixels.first().copied().unwrap_or_default(),
		});
	}

	fn set_visible(&mut self, visible: bool) {
		self.visible = visible;
		self.events.push(if visible {
			RenderEvent::Shown
		} else {
			RenderEvent::Hidden
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_recording_renderer() {
		let mut renderer = RecordingRenderer::new();
		renderer.attach(&BufferDescriptor::new(2, 2));
		renderer.set_visible(true);
		renderer.invalidate(&[7, 0, 0]);
		renderer.invalidate(&[]);
		renderer.set_visible(false);

		assert_eq!(renderer.drawn(), [7, 0]);
		assert!(!renderer.is_visible());
		assert_eq!(renderer.events().len(), 5);
		assert_eq!(renderer.take_events()[0], RenderEvent::Attached(BufferDescriptor::new(2, 2)));
		assert!(renderer.events().is_empty());
	}
}
