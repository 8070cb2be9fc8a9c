//! # weft-reactive
//!
//! Dependency-tracking reactivity engine for weft.
//!
//! ## Modules
//!
//! - [`value`]: the data graph ([`Value`], [`Object`])
//! - [`property`]: observable leaf properties with embedded dependencies
//! - [`dependency`]: per-property subscriber registries
//! - [`observer`]: recursive data graph instrumentation
//! - [`path`]: dotted property paths and the [`Scope`] trait
//! - [`watcher`]: path bound computations
//! - [`runtime`]: the thread-local collector stack
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use weft_reactive::{Object, Path, Watcher, observe};
//!
//! let data = Object::from_json(serde_json::json!({"a": {"b": "x"}}))?;
//! observe(&data);
//!
//! let _w = Watcher::new(Rc::new(data.clone()), Path::parse("a.b")?, |v| {
//!     println!("changed to {v}");
//!     Ok(())
//! })?;
//!
//! Path::parse("a.b")?.assign(&data, "y".into())?; // prints "changed to y"
//! ```

#![warn(missing_docs)]

pub mod dependency;
pub mod error;
pub mod observer;
pub mod path;
pub mod property;
pub mod runtime;
pub mod value;
pub mod watcher;

pub use dependency::{Dependency, Subscriber};
pub use error::{BoxError, ReactiveError, Result};
pub use observer::{Observer, observe};
pub use path::{Path, Scope};
pub use property::ObservableProperty;
pub use runtime::{CollectorGuard, NodeId, Runtime, untracked, with_runtime};
pub use value::{Object, Value};
pub use watcher::{WatchCallback, Watcher};
