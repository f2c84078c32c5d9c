//! Drop menu lifecycle.
//!
//! * [`MenuLifecycle`]: closed/open/focused state, visibility flag, outside-click guard
//! * [`LifecycleEvent`]: named events delivered to registered listeners
//! * [`MenuHandler`]: row-event dispatch capability implemented by concrete menus

pub mod handler;
pub mod lifecycle;
pub mod types;

pub use handler::MenuHandler;
pub use lifecycle::{ListenerId, MenuLifecycle};
pub use types::{EventResult, LifecycleEvent, MenuStatus};
