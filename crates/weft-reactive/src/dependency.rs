//! Dependency - per-property subscriber registry
//!
//! A [`Dependency`] lists the computations interested in one observable
//! property. Writes that change the property call [`Dependency::notify`],
//! which updates every subscriber synchronously, in registration order.
//!
//! Subscriptions are not deduplicated. A watcher that reads the same property
//! twice while collecting is registered twice and updated twice per
//! notification.

use core::cell::RefCell;
use core::fmt;

use std::rc::Rc;

use crate::error::Result;
use crate::runtime::NodeId;

/// A computation that can be notified of a change.
pub trait Subscriber {
	/// Re-evaluate after a dependency changed.
	fn update(&self) -> Result<()>;
}

/// Registry of subscribers for one observable property
pub struct Dependency {
	id: NodeId,
	subscribers: RefCell<Vec<Rc<dyn Subscriber>>>,
}

impl Dependency {
	/// Create an empty dependency
	pub fn new() -> Self {
		Self {
			id: NodeId::new(),
			subscribers: RefCell::new(Vec::new()),
		}
	}

	/// Unique id of this dependency
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Append a subscriber
	pub fn add_sub(&self, subscriber: Rc<dyn Subscriber>) {
		self.subscribers.borrow_mut().push(subscriber);
	}

	/// Update every subscriber in registration order
	///
	/// The list is snapshotted first; subscribers added during the pass are
	/// first reached by the next notification. The first failing subscriber
	/// aborts the pass and its error is returned to the writer.
	pub fn notify(&self) -> Result<()> {
		let subscribers = self.subscribers.borrow().clone();
		tracing::trace!(
			dependency = ?self.id,
			subscribers = subscribers.len(),
			"notifying subscribers"
		);
		for subscriber in subscribers {
			subscriber.update()?;
		}
		Ok(())
	}

	/// Number of registered subscriptions, duplicates included
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.borrow().len()
	}
}

impl Default for Dependency {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Dependency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Dependency")
			.field("id", &self.id)
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}
