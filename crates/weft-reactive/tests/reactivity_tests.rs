//! Integration tests for the reactivity engine
//!
//! These tests verify:
//! 1. Writes update every subscribed watcher once, in registration order
//! 2. Equal writes are suppressed
//! 3. Wholesale replacement of a nested object notifies nobody
//! 4. Duplicate reads subscribe twice
//! 5. The collector stack is always left empty

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use serde_json::json;
use serial_test::serial;
use weft_reactive::{Object, Path, Result, Scope, Value, Watcher, observe, with_runtime};

fn observed(json: serde_json::Value) -> Object {
	let data = Object::from_json(json).unwrap();
	observe(&data);
	data
}

fn logging_watcher(
	data: &Object,
	path: &str,
	tag: &'static str,
	log: &Rc<RefCell<Vec<(&'static str, Value)>>>,
) -> Rc<Watcher> {
	let log = log.clone();
	Watcher::new(Rc::new(data.clone()), Path::parse(path).unwrap(), move |v| {
		log.borrow_mut().push((tag, v.clone()));
		Ok(())
	})
	.unwrap()
}

#[test]
#[serial]
fn test_write_updates_subscribers_in_registration_order() {
	let data = observed(json!({"count": 1}));
	let log = Rc::new(RefCell::new(Vec::new()));
	let _first = logging_watcher(&data, "count", "first", &log);
	let _second = logging_watcher(&data, "count", "second", &log);
	let _third = logging_watcher(&data, "count", "third", &log);

	data.set("count", 2).unwrap();

	assert_eq!(
		*log.borrow(),
		vec![
			("first", Value::from(2)),
			("second", Value::from(2)),
			("third", Value::from(2)),
		]
	);
}

#[test]
#[serial]
fn test_equal_write_updates_nobody() {
	let data = observed(json!({"count": 1}));
	let log = Rc::new(RefCell::new(Vec::new()));
	let _w = logging_watcher(&data, "count", "w", &log);

	data.set("count", 1).unwrap();

	assert!(log.borrow().is_empty());
}

#[test]
#[serial]
fn test_sequential_writes_each_notify() {
	let data = observed(json!({"n": 0}));
	let log = Rc::new(RefCell::new(Vec::new()));
	let _w = logging_watcher(&data, "n", "w", &log);

	for i in 1..=3 {
		data.set("n", i).unwrap();
	}

	let values: Vec<Value> = log.borrow().iter().map(|(_, v)| v.clone()).collect();
	assert_eq!(values, vec![Value::from(1), Value::from(2), Value::from(3)]);
}

#[test]
#[serial]
fn test_wholesale_replacement_notifies_nobody() {
	let data = observed(json!({"a": {"b": "x"}}));
	let log = Rc::new(RefCell::new(Vec::new()));
	let watcher = logging_watcher(&data, "a.b", "w", &log);
	let original = data.get_untracked("a");

	data.set("a", Object::new().with("b", "new")).unwrap();
	assert!(log.borrow().is_empty());

	// the watcher is still attached to the discarded object
	original.as_object().unwrap().set("b", "old-graph").unwrap();
	assert_eq!(log.borrow().len(), 1);
	assert_eq!(watcher.value(), Value::from("new"));

	// and the replacement object was never observed
	let replacement = data.get_untracked("a");
	assert!(!replacement.as_object().unwrap().is_observed("b"));
}

/// A scope whose top-level name reads the same leaf twice.
struct Doubled(Object);

impl Scope for Doubled {
	fn lookup(&self, key: &str) -> Result<Value> {
		let first = self.0.get(key);
		let second = self.0.get(key);
		Ok(Value::from(format!("{first}{second}")))
	}

	fn assign(&self, key: &str, value: Value) -> Result<()> {
		self.0.set(key, value)
	}
}

#[test]
#[serial]
fn test_double_read_subscribes_twice() {
	let data = observed(json!({"x": "a"}));
	let calls = Rc::new(RefCell::new(0));
	let calls_clone = calls.clone();
	let _w = Watcher::new(
		Rc::new(Doubled(data.clone())),
		Path::parse("x").unwrap(),
		move |_| {
			*calls_clone.borrow_mut() += 1;
			Ok(())
		},
	)
	.unwrap();

	assert_eq!(data.property("x").unwrap().dependency().subscriber_count(), 2);

	data.set("x", "b").unwrap();

	// second update sees the cached value and is a no-op
	assert_eq!(*calls.borrow(), 1);
}

#[test]
#[serial]
fn test_callback_error_propagates_to_writer() {
	let data = observed(json!({"x": 1}));
	let _w = Watcher::new(Rc::new(data.clone()), Path::parse("x").unwrap(), |_| {
		Err(weft_reactive::ReactiveError::callback("refused"))
	})
	.unwrap();

	let err = data.set("x", 2).unwrap_err();

	assert!(err.to_string().contains("refused"));
	assert_eq!(data.get_untracked("x"), Value::from(2));
}

#[test]
#[serial]
fn test_update_failure_on_broken_path() {
	let data = observed(json!({"a": {"b": "x"}, "flag": 1}));
	let _w = Watcher::new(Rc::new(data.clone()), Path::parse("a.b").unwrap(), |_| Ok(())).unwrap();
	let inner = data.get_untracked("a");
	let prop = inner.as_object().unwrap().property("b").unwrap();

	// make the path unreadable, then trigger the watcher through its dependency
	data.set("a", Value::Null).unwrap();
	let err = prop.set(Value::from("y")).unwrap_err();

	assert!(err.is_path_resolution());
}

#[test]
#[serial]
fn test_callback_write_back_is_reentrant() {
	let data = observed(json!({"source": 1, "mirror": 0}));
	let target = data.clone();
	let _w = Watcher::new(Rc::new(data.clone()), Path::parse("source").unwrap(), move |v| {
		target.set("mirror", v.clone())
	})
	.unwrap();
	let log = Rc::new(RefCell::new(Vec::new()));
	let _mirror = logging_watcher(&data, "mirror", "mirror", &log);

	data.set("source", 5).unwrap();

	assert_eq!(data.get_untracked("mirror"), Value::from(5));
	assert_eq!(*log.borrow(), vec![("mirror", Value::from(5))]);
	assert_eq!(with_runtime(|rt| rt.depth()), 0);
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	/// Property: a watcher fires exactly when the written value differs from the last one
	#[test]
	fn test_watcher_fires_only_on_change(writes in proptest::collection::vec(0i32..4, 1..20)) {
		let data = observed(json!({"v": 0}));
		let log = Rc::new(RefCell::new(Vec::new()));
		let _w = logging_watcher(&data, "v", "w", &log);

		let mut expected = Vec::new();
		let mut current = 0;
		for w in &writes {
			data.set("v", *w).unwrap();
			if *w != current {
				expected.push(Value::from(*w));
				current = *w;
			}
		}

		let seen: Vec<Value> = log.borrow().iter().map(|(_, v)| v.clone()).collect();
		prop_assert_eq!(seen, expected);
		prop_assert_eq!(with_runtime(|rt| rt.depth()), 0);
	}
}
