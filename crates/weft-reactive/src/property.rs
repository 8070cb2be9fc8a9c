//! ObservableProperty - an intercepted leaf of the data graph
//!
//! `ObservableProperty` replaces a getter/setter trap pair with an explicit
//! wrapper. Reads through [`get`](ObservableProperty::get) register the
//! current collector; writes through [`set`](ObservableProperty::set) notify
//! the embedded [`Dependency`] when the value actually changed.
//!
//! ## Example
//!
//! ```ignore
//! let name = ObservableProperty::new("name", Value::from("x"));
//! name.set(Value::from("y"))?; // notifies
//! name.set(Value::from("y"))?; // equal value, no-op
//! ```

use core::cell::RefCell;
use core::fmt;

use crate::dependency::Dependency;
use crate::error::Result;
use crate::runtime::with_runtime;
use crate::value::Value;

/// Observable leaf property with its dependency embedded
pub struct ObservableProperty {
	key: String,
	value: RefCell<Value>,
	dependency: Dependency,
}

impl ObservableProperty {
	/// Wrap `value` for the property named `key`
	pub fn new(key: impl Into<String>, value: Value) -> Self {
		Self {
			key: key.into(),
			value: RefCell::new(value),
			dependency: Dependency::new(),
		}
	}

	/// Name of the property inside its container
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Read the value, subscribing the current collector if there is one
	pub fn get(&self) -> Value {
		if let Some(collector) = with_runtime(|rt| rt.current_collector()) {
			self.dependency.add_sub(collector);
		}
		self.get_untracked()
	}

	/// Read the value without subscribing anyone
	pub fn get_untracked(&self) -> Value {
		self.value.borrow().clone()
	}

	/// Write a new value
	///
	/// Equal values (identity for objects, value for scalars) are ignored:
	/// nothing is stored and nobody is notified. Otherwise the value is replaced
	/// and every subscriber runs before this call returns.
	pub fn set(&self, value: Value) -> Result<()> {
		let unchanged = *self.value.borrow() == value;
		if unchanged {
			tracing::trace!(key = %self.key, "write suppressed, value unchanged");
			return Ok(());
		}
		*self.value.borrow_mut() = value;
		self.dependency.notify()
	}

	/// The dependency notified by writes to this property
	pub fn dependency(&self) -> &Dependency {
		&self.dependency
	}
}

impl fmt::Debug for ObservableProperty {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObservableProperty")
			.field("key", &self.key)
			.field("value", &self.get_untracked())
			.field("dependency", &self.dependency)
			.finish()
	}
}
