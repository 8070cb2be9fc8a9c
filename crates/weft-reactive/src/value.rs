//! Data graph values
//!
//! The data graph is a tree (or graph) of [`Object`]s holding [`Value`]s. An
//! object is shared: clones point at the same property map, and writes through
//! any clone are seen by all of them.
//!
//! Each key of an object lives in a slot that is either raw or observed. Raw
//! slots are plain storage: nested objects, keys added after observation, and
//! every key of an object that was never observed. Observed slots hold an
//! [`ObservableProperty`] installed by the [`Observer`](crate::Observer).
//!
//! ## Equality
//!
//! `Value` equality is the engine's change-suppression rule: scalars compare
//! by value (`NaN` never equals itself) and objects compare by identity.
//! There is no deep comparison.

use core::cell::RefCell;
use core::fmt;

use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{ReactiveError, Result};
use crate::path::Scope;
use crate::property::ObservableProperty;
use crate::runtime::NodeId;

/// Largest integer an `f64` represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A value stored in the data graph
#[derive(Clone, Default)]
pub enum Value {
	/// Absent or explicitly null
	#[default]
	Null,
	/// Boolean
	Bool(bool),
	/// Number (always `f64`)
	Number(f64),
	/// String
	String(String),
	/// Shared nested object
	Object(Object),
}

impl Value {
	/// Human readable name of the variant, used in error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Object(_) => "object",
		}
	}

	/// Returns true for `Null`
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the string payload
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Numeric payload
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Boolean payload
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Borrow the object payload
	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(o) => Some(o),
			_ => None,
		}
	}

	/// Convert from JSON; arrays are rejected
	pub fn from_json(json: serde_json::Value) -> Result<Self> {
		Ok(match json {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::Number(n) => Self::Number(n.as_f64().ok_or_else(|| {
				ReactiveError::UnsupportedValue(format!("number {n} is not representable as f64"))
			})?),
			serde_json::Value::String(s) => Self::String(s),
			serde_json::Value::Array(_) => {
				return Err(ReactiveError::UnsupportedValue(
					"arrays are not supported in the data graph".into(),
				));
			}
			serde_json::Value::Object(map) => {
				let object = Object::new();
				for (key, value) in map {
					object.insert_raw(key, Self::from_json(value)?);
				}
				Self::Object(object)
			}
		})
	}

	/// Snapshot as JSON without tracking any reads
	///
	/// Integral numbers are emitted as integers; non-finite numbers become `null`.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Null => serde_json::Value::Null,
			Self::Bool(b) => serde_json::Value::Bool(*b),
			Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
				serde_json::Value::from(*n as i64)
			}
			Self::Number(n) => serde_json::Number::from_f64(*n)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Self::String(s) => serde_json::Value::String(s.clone()),
			Self::Object(o) => o.to_json(),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Bool(b) => write!(f, "Bool({b})"),
			Self::Number(n) => write!(f, "Number({n})"),
			Self::String(s) => write!(f, "String({s:?})"),
			Self::Object(o) => fmt::Debug::fmt(o, f),
		}
	}
}

/// Text rendering used for text nodes and control values
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => Ok(()),
			Self::Bool(b) => write!(f, "{b}"),
			Self::Number(n) => fmt_number(*n, f),
			Self::String(s) => f.write_str(s),
			Self::Object(_) => f.write_str("[object Object]"),
		}
	}
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	if n.is_nan() {
		f.write_str("NaN")
	} else if n.is_infinite() {
		f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
	} else if n == 0.0 {
		// -0 renders as 0
		f.write_str("0")
	} else {
		write!(f, "{n}")
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Self::Number(n)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Self::Number(f64::from(n))
	}
}

impl From<u32> for Value {
	fn from(n: u32) -> Self {
		Self::Number(f64::from(n))
	}
}

impl From<Object> for Value {
	fn from(o: Object) -> Self {
		Self::Object(o)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Self::Null)
	}
}

impl TryFrom<serde_json::Value> for Value {
	type Error = ReactiveError;

	fn try_from(json: serde_json::Value) -> Result<Self> {
		Self::from_json(json)
	}
}

/// Storage for one key of an object
#[derive(Clone)]
pub(crate) enum Slot {
	/// Plain value, never intercepted
	Raw(Value),
	/// Intercepted leaf
	Observed(Rc<ObservableProperty>),
}

struct ObjectInner {
	id: NodeId,
	slots: RefCell<IndexMap<String, Slot>>,
}

/// Shared, insertion-ordered property map
///
/// Cloning an `Object` clones the handle, not the properties.
#[derive(Clone)]
pub struct Object(Rc<ObjectInner>);

impl Object {
	/// Create an empty object
	pub fn new() -> Self {
		Self(Rc::new(ObjectInner {
			id: NodeId::new(),
			slots: RefCell::new(IndexMap::new()),
		}))
	}

	/// Build an object from a JSON object
	pub fn from_json(json: serde_json::Value) -> Result<Self> {
		match Value::from_json(json)? {
			Value::Object(o) => Ok(o),
			other => Err(ReactiveError::UnsupportedValue(format!(
				"expected a JSON object at the data root, found {}",
				other.type_name()
			))),
		}
	}

	/// Builder-style insertion of a raw key
	pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert_raw(key.into(), value.into());
		self
	}

	/// Unique id of this object
	pub fn id(&self) -> NodeId {
		self.0.id
	}

	/// Returns true if both handles point at the same object
	pub fn ptr_eq(&self, other: &Object) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	/// Read a key; observed keys register the current collector
	///
	/// Missing keys read as `Null`.
	pub fn get(&self, key: &str) -> Value {
		match self.slot(key) {
			Some(Slot::Observed(prop)) => prop.get(),
			Some(Slot::Raw(value)) => value,
			None => Value::Null,
		}
	}

	/// Read a key without registering anyone
	pub fn get_untracked(&self, key: &str) -> Value {
		match self.slot(key) {
			Some(Slot::Observed(prop)) => prop.get_untracked(),
			Some(Slot::Raw(value)) => value,
			None => Value::Null,
		}
	}

	/// Write a key
	///
	/// Observed keys go through [`ObservableProperty::set`] and may notify.
	/// Raw keys (including new ones) are replaced silently.
	pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
		let value = value.into();
		match self.slot(key) {
			Some(Slot::Observed(prop)) => prop.set(value),
			_ => {
				self.insert_raw(key.to_string(), value);
				Ok(())
			}
		}
	}

	/// The observable property behind `key`, if it was instrumented
	pub fn property(&self, key: &str) -> Option<Rc<ObservableProperty>> {
		match self.slot(key) {
			Some(Slot::Observed(prop)) => Some(prop),
			_ => None,
		}
	}

	/// Returns true if `key` is an instrumented leaf
	pub fn is_observed(&self, key: &str) -> bool {
		self.property(key).is_some()
	}

	/// Returns true if `key` exists
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.slots.borrow().contains_key(key)
	}

	/// Keys in insertion order
	pub fn keys(&self) -> Vec<String> {
		self.0.slots.borrow().keys().cloned().collect()
	}

	/// Number of keys
	pub fn len(&self) -> usize {
		self.0.slots.borrow().len()
	}

	/// Returns true if the object has no keys
	pub fn is_empty(&self) -> bool {
		self.0.slots.borrow().is_empty()
	}

	/// Snapshot as a JSON object without tracking any reads
	pub fn to_json(&self) -> serde_json::Value {
		let map = self
			.entries()
			.into_iter()
			.map(|(key, slot)| {
				let value = match slot {
					Slot::Observed(prop) => prop.get_untracked(),
					Slot::Raw(value) => value,
				};
				(key, value.to_json())
			})
			.collect();
		serde_json::Value::Object(map)
	}

	fn slot(&self, key: &str) -> Option<Slot> {
		self.0.slots.borrow().get(key).cloned()
	}

	pub(crate) fn entries(&self) -> Vec<(String, Slot)> {
		self.0
			.slots
			.borrow()
			.iter()
			.map(|(k, s)| (k.clone(), s.clone()))
			.collect()
	}

	pub(crate) fn insert_raw(&self, key: String, value: Value) {
		self.0.slots.borrow_mut().insert(key, Slot::Raw(value));
	}

	pub(crate) fn install(&self, key: String, prop: Rc<ObservableProperty>) {
		self.0.slots.borrow_mut().insert(key, Slot::Observed(prop));
	}
}

impl Default for Object {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V> FromIterator<(K, V)> for Object
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let object = Object::new();
		for (key, value) in iter {
			object.insert_raw(key.into(), value.into());
		}
		object
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Object")
			.field("id", &self.0.id)
			.field("keys", &self.keys())
			.finish()
	}
}

impl Scope for Object {
	fn lookup(&self, key: &str) -> Result<Value> {
		Ok(self.get(key))
	}

	fn assign(&self, key: &str, value: Value) -> Result<()> {
		self.set(key, value)
	}
}
