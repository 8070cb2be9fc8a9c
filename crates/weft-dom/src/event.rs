//! Events and listeners
//!
//! Dispatch is synchronous and target-only: listeners registered on the
//! target run in registration order and nothing bubbles. The first failing
//! listener stops the dispatch and its error is returned to the dispatcher.

use core::fmt;
use core::str::FromStr;

use std::rc::{Rc, Weak};

use crate::error::{BoxError, DomError};
use crate::node::{Node, NodeData};

/// Event types understood by the tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EventType {
	/// A pointer click
	Click,
	/// The value of a form control changed while editing
	Input,
	/// The value of a form control was committed
	Change,
	/// A form was submitted
	Submit,
	/// Any other event name
	Custom(String),
}

impl EventType {
	/// The DOM event name
	pub fn as_str(&self) -> &str {
		match self {
			Self::Click => "click",
			Self::Input => "input",
			Self::Change => "change",
			Self::Submit => "submit",
			Self::Custom(name) => name,
		}
	}
}

impl FromStr for EventType {
	type Err = DomError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"click" => Self::Click,
			"input" => Self::Input,
			"change" => Self::Change,
			"submit" => Self::Submit,
			"" => return Err(DomError::InvalidName(s.to_string())),
			other => Self::Custom(other.to_string()),
		})
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An event being dispatched
#[derive(Debug, Clone)]
pub struct Event {
	event_type: EventType,
	target: Node,
}

impl Event {
	pub(crate) fn new(event_type: EventType, target: Node) -> Self {
		Self { event_type, target }
	}

	/// The event type
	pub fn event_type(&self) -> &EventType {
		&self.event_type
	}

	/// The node the event was dispatched on
	pub fn target(&self) -> &Node {
		&self.target
	}
}

/// Listener callback type
pub type ListenerFn = Rc<dyn Fn(&Event) -> Result<(), BoxError> + 'static>;

#[derive(Clone)]
pub(crate) struct Listener {
	pub(crate) id: u64,
	pub(crate) event_type: EventType,
	pub(crate) callback: ListenerFn,
}

/// Handle to a registered listener
///
/// Dropping the handle keeps the listener registered; call
/// [`EventHandle::remove`] to unregister it.
#[derive(Debug)]
pub struct EventHandle {
	node: Weak<NodeData>,
	id: u64,
	event_type: EventType,
}

impl EventHandle {
	pub(crate) fn new(node: Weak<NodeData>, id: u64, event_type: EventType) -> Self {
		Self {
			node,
			id,
			event_type,
		}
	}

	/// The event type this listener was registered for
	pub fn event_type(&self) -> &EventType {
		&self.event_type
	}

	/// Unregister the listener
	///
	/// Returns false if the node is gone or the listener was already removed.
	pub fn remove(self) -> bool {
		match self.node.upgrade() {
			Some(data) => Node::from_data(data).remove_listener(self.id),
			None => false,
		}
	}
}
