//! Watcher - a path bound computation
//!
//! A [`Watcher`] resolves a dotted path against a scope, caches the result and
//! calls its callback whenever a later evaluation yields a different value.
//!
//! ## Lifecycle
//!
//! - **Collecting** (inside [`Watcher::new`]): the watcher is pushed as the
//!   current collector, the path is resolved, and every observable property
//!   read on the way subscribes the watcher. The frame is popped when the
//!   guard drops, even if resolution fails.
//! - **Steady** (after construction): [`Subscriber::update`] re-resolves the
//!   path in an untracked frame, compares with the cached value and, on
//!   change, stores the new value and runs the callback.
//!
//! ## Example
//!
//! ```ignore
//! let data = Object::from_json(json!({"a": {"b": "x"}}))?;
//! observe(&data);
//!
//! let watcher = Watcher::new(Rc::new(data.clone()), Path::parse("a.b")?, |v| {
//!     println!("a.b is now {v}");
//!     Ok(())
//! })?;
//! ```

use core::cell::RefCell;
use core::fmt;

use std::rc::Rc;

use crate::dependency::Subscriber;
use crate::error::Result;
use crate::path::{Path, Scope};
use crate::runtime::{CollectorGuard, NodeId, untracked};
use crate::value::Value;

/// Type alias for watcher callbacks
pub type WatchCallback = Box<dyn Fn(&Value) -> Result<()> + 'static>;

/// A computation bound to a dotted path
pub struct Watcher {
	id: NodeId,
	scope: Rc<dyn Scope>,
	path: Path,
	callback: WatchCallback,
	old_value: RefCell<Value>,
}

impl Watcher {
	/// Create a watcher and collect its dependencies
	///
	/// The callback is not invoked for the initial value.
	pub fn new<F>(scope: Rc<dyn Scope>, path: Path, callback: F) -> Result<Rc<Self>>
	where
		F: Fn(&Value) -> Result<()> + 'static,
	{
		let watcher = Rc::new(Self {
			id: NodeId::new(),
			scope,
			path,
			callback: Box::new(callback),
			old_value: RefCell::new(Value::Null),
		});

		let initial = {
			let collector: Rc<dyn Subscriber> = watcher.clone();
			let _collecting = CollectorGuard::collect(collector);
			watcher.path.resolve(watcher.scope.as_ref())?
		};
		*watcher.old_value.borrow_mut() = initial;

		tracing::trace!(watcher = ?watcher.id, path = %watcher.path, "watcher collected dependencies");
		Ok(watcher)
	}

	/// Unique id of this watcher
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// The watched path
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// The last observed value
	pub fn value(&self) -> Value {
		self.old_value.borrow().clone()
	}
}

impl Subscriber for Watcher {
	fn update(&self) -> Result<()> {
		let new_value = untracked(|| self.path.resolve(self.scope.as_ref()))?;
		let changed = *self.old_value.borrow() != new_value;
		if !changed {
			return Ok(());
		}
		*self.old_value.borrow_mut() = new_value.clone();
		tracing::trace!(watcher = ?self.id, path = %self.path, "watcher value changed");
		(self.callback)(&new_value)
	}
}

impl fmt::Debug for Watcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Watcher")
			.field("id", &self.id)
			.field("path", &self.path)
			.field("value", &self.value())
			.finish()
	}
}
