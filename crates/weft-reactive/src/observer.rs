//! Observer - instruments a data graph
//!
//! [`Observer::observe`] walks an object and converts every leaf key into an
//! [`ObservableProperty`]. Keys holding objects are not intercepted; the
//! walker recurses into them instead. The consequence is deliberate and
//! observable: replacing a nested object wholesale notifies nobody, and
//! watchers bound below it stay attached to the discarded object.
//!
//! Observation is eager and one-shot. Keys added afterwards stay raw and are
//! never reactive. Observing an already observed graph leaves existing
//! properties in place.

use std::collections::HashSet;
use std::rc::Rc;

use crate::property::ObservableProperty;
use crate::runtime::NodeId;
use crate::value::{Object, Slot, Value};

/// Recursive data graph instrumenter
#[derive(Debug, Default)]
pub struct Observer {
	visited: HashSet<NodeId>,
	instrumented: usize,
}

impl Observer {
	/// Create a fresh observer
	pub fn new() -> Self {
		Self::default()
	}

	/// Instrument `root` and everything reachable from it
	///
	/// Returns the number of leaf properties installed by this call. Each
	/// object is visited once, so shared or cyclic sub-graphs are safe.
	pub fn observe(&mut self, root: &Object) -> usize {
		let before = self.instrumented;
		self.walk(root);
		let installed = self.instrumented - before;
		tracing::debug!(object = ?root.id(), installed, "observed data graph");
		installed
	}

	/// Total number of leaf properties installed by this observer
	pub fn instrumented(&self) -> usize {
		self.instrumented
	}

	fn walk(&mut self, object: &Object) {
		if !self.visited.insert(object.id()) {
			return;
		}
		for (key, slot) in object.entries() {
			match slot {
				Slot::Raw(Value::Object(nested)) => self.walk(&nested),
				Slot::Raw(value) => {
					object.install(key.clone(), Rc::new(ObservableProperty::new(key, value)));
					self.instrumented += 1;
				}
				Slot::Observed(_) => {}
			}
		}
	}
}

/// Instrument `root` with a fresh [`Observer`]
pub fn observe(root: &Object) -> usize {
	Observer::new().observe(root)
}
