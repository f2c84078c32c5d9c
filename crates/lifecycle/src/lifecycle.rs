//! Open/close/focus state machine.

use std::fmt;

use tracing::trace;

use crate::{LifecycleEvent, MenuStatus};

/// Handle returned by [`MenuLifecycle::on`], used to remove a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&MenuLifecycle)>;

struct Listener {
	id: ListenerId,
	event: LifecycleEvent,
	callback: Callback,
}

/// Lifecycle shared by every drop menu.
///
/// Starts closed. Transitions are total: every operation is valid from every
/// state. Listeners receive the menu itself after the transition has been
/// applied.
pub struct MenuLifecycle {
	status: MenuStatus,
	opened: bool,
	blur_guard: bool,
	listeners: Vec<Listener>,
	next_listener: u64,
}

impl Default for MenuLifecycle {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for MenuLifecycle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MenuLifecycle")
			.field("status", &self.status)
			.field("opened", &self.opened)
			.field("blur_guard", &self.blur_guard)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

impl MenuLifecycle {
	/// Creates a closed, hidden menu with no listeners.
	pub fn new() -> Self {
		Self {
			status: MenuStatus::Closed,
			opened: false,
			blur_guard: false,
			listeners: Vec::new(),
			next_listener: 0,
		}
	}

	/// Registers `callback` for `event`.
	pub fn on<F>(&mut self, event: LifecycleEvent, callback: F) -> ListenerId
	where
		F: FnMut(&MenuLifecycle) + 'static,
	{
		let id = ListenerId(self.next_listener);
		self.next_listener += 1;
		self.listeners.push(Listener {
			id,
			event,
			callback: Box::new(callback),
		});
		id
	}

	/// Removes a listener. Returns `false` if it was already gone.
	pub fn off(&mut self, id: ListenerId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|listener| listener.id != id);
		self.listeners.len() != before
	}

	/// Shows the menu and arms the outside-click guard.
	pub fn open(&mut self) -> &mut Self {
		if !self.blur_guard {
			self.blur_guard = true;
			trace!(event = "armed", "dropmenu.lifecycle.blur_guard");
		}
		self.status = MenuStatus::Open;
		self.opened = true;
		trace!(status = self.status.as_str(), "dropmenu.lifecycle.open");
		self.emit(LifecycleEvent::Opened);
		self
	}

	/// Hides the menu and disarms the outside-click guard.
	pub fn close(&mut self) -> &mut Self {
		self.status = MenuStatus::Closed;
		self.opened = false;
		self.blur_guard = false;
		trace!(status = self.status.as_str(), "dropmenu.lifecycle.close");
		self.emit(LifecycleEvent::Closed);
		self
	}

	/// Marks the menu focused. Visibility is left as is.
	pub fn focus(&mut self) -> &mut Self {
		self.status = MenuStatus::Focused;
		trace!(status = self.status.as_str(), "dropmenu.lifecycle.focus");
		self.emit(LifecycleEvent::Focused);
		self
	}

	/// Closes an open (or focused) menu; otherwise opens and focuses it.
	pub fn toggle(&mut self) -> &mut Self {
		if self.opened {
			self.close()
		} else {
			self.open().focus()
		}
	}

	/// Emits `event` to its listeners and, for request events, runs the transition.
	pub fn request(&mut self, event: LifecycleEvent) -> &mut Self {
		self.emit(event);
		match event {
			LifecycleEvent::Open => self.open(),
			LifecycleEvent::Close => self.close(),
			LifecycleEvent::Focus => self.focus(),
			LifecycleEvent::Opened | LifecycleEvent::Closed | LifecycleEvent::Focused => self,
		}
	}

	/// Handles a click outside the menu. Returns `true` if it closed the menu.
	pub fn outside_click(&mut self) -> bool {
		if !self.blur_guard {
			return false;
		}
		self.close();
		true
	}

	pub fn status(&self) -> MenuStatus {
		self.status
	}

	/// Returns the visibility flag; `true` while open or focused.
	pub fn is_open(&self) -> bool {
		self.opened
	}

	/// Returns whether a click outside the menu will close it.
	pub fn has_blur_guard(&self) -> bool {
		self.blur_guard
	}

	fn emit(&mut self, event: LifecycleEvent) {
		let mut listeners = std::mem::take(&mut self.listeners);
		for listener in listeners.iter_mut().filter(|listener| listener.event == event) {
			(listener.callback)(self);
		}
		self.listeners = listeners;
	}
}
