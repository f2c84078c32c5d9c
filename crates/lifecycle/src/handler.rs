//! Row-event dispatch capability.

use crate::{EventResult, MenuLifecycle};

/// A concrete drop menu: owns a [`MenuLifecycle`] and classifies its own UI events.
///
/// The lifecycle is held by delegation. `dispatch` has no default body.
pub trait MenuHandler {
	/// UI interaction delivered by the host.
	type Event;
	/// Failure reported back to the host.
	type Error;

	/// Routes one UI interaction to the matching mutation.
	fn dispatch(&mut self, event: Self::Event) -> Result<EventResult, Self::Error>;

	fn lifecycle(&self) -> &MenuLifecycle;

	fn lifecycle_mut(&mut self) -> &mut MenuLifecycle;

	/// Opens the menu, or closes it if already open.
	fn toggle(&mut self) -> &mut MenuLifecycle {
		self.lifecycle_mut().toggle()
	}

	fn is_open(&self) -> bool {
		self.lifecycle().is_open()
	}
}
