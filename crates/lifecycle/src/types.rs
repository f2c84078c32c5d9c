/// Visibility and interaction mode of a drop menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MenuStatus {
	#[default]
	Closed,
	Open,
	/// Open and holding keyboard focus.
	Focused,
}

impl MenuStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			MenuStatus::Closed => "closed",
			MenuStatus::Open => "open",
			MenuStatus::Focused => "focused",
		}
	}
}

/// Named lifecycle events.
///
/// `Open`, `Close` and `Focus` are requests: emitting one through
/// [`MenuLifecycle::request`](crate::MenuLifecycle::request) runs the matching
/// transition. `Opened`, `Closed` and `Focused` report a completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
	Focus,
	Focused,
	Open,
	Opened,
	Close,
	Closed,
}

impl LifecycleEvent {
	pub const ALL: [LifecycleEvent; 6] = [
		LifecycleEvent::Focus,
		LifecycleEvent::Focused,
		LifecycleEvent::Open,
		LifecycleEvent::Opened,
		LifecycleEvent::Close,
		LifecycleEvent::Closed,
	];

	/// Namespaced event name as seen by host listeners.
	pub fn name(self) -> &'static str {
		match self {
			LifecycleEvent::Focus => "dropmenu:focus",
			LifecycleEvent::Focused => "dropmenu:focused",
			LifecycleEvent::Open => "dropmenu:open",
			LifecycleEvent::Opened => "dropmenu:opened",
			LifecycleEvent::Close => "dropmenu:close",
			LifecycleEvent::Closed => "dropmenu:closed",
		}
	}

	/// Parses a namespaced event name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|event| event.name() == name)
	}
}

/// Outcome of dispatching a UI event to a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
	/// The event changed menu state or was otherwise acted upon.
	Consumed,
	/// The event did not apply to the menu in its current state.
	Unhandled,
}

impl EventResult {
	pub fn is_consumed(self) -> bool {
		matches!(self, EventResult::Consumed)
	}
}
