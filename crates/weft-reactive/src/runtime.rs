//! Reactive Runtime
//!
//! This module holds the per-thread state the engine needs while a watcher
//! collects its dependencies.
//!
//! ## Architecture
//!
//! 1. **Collector Stack**: The innermost frame is the computation currently
//!    collecting dependencies. Observable reads register it as a subscriber.
//! 2. **Untracked Frames**: A `None` frame hides outer collectors, so reads made
//!    while re-evaluating a watcher subscribe no one.
//! 3. **Scoped Cleanup**: Frames are pushed by [`CollectorGuard`] and popped when
//!    the guard drops, including on early return through `?`.
//!
//! There is no scheduler. Every notification runs synchronously inside the
//! write that caused it.
//!
//! ## Example
//!
//! ```ignore
//! use weft_reactive::runtime::{CollectorGuard, with_runtime};
//!
//! {
//!     let _collecting = CollectorGuard::collect(watcher.clone());
//!     // reads here subscribe `watcher`
//! }
//! assert!(with_runtime(|rt| rt.current_collector()).is_none());
//! ```

use core::cell::RefCell;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicUsize, Ordering};

use std::rc::Rc;

use crate::dependency::Subscriber;

/// Unique identifier for reactive nodes (objects, dependencies, watchers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Create a new unique NodeId
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// One entry of the collector stack.
type Frame = Option<Rc<dyn Subscriber>>;

/// Per-thread reactive runtime
///
/// Only tracks who is collecting. Dependency sets live on the observable
/// properties themselves.
pub struct Runtime {
	/// Collector stack; `None` frames are untracked scopes
	collector_stack: RefCell<Vec<Frame>>,
}

impl Runtime {
	/// Create a new Runtime instance
	pub fn new() -> Self {
		Self {
			collector_stack: RefCell::new(Vec::new()),
		}
	}

	/// Get the computation currently collecting dependencies, if any
	pub fn current_collector(&self) -> Option<Rc<dyn Subscriber>> {
		self.collector_stack.borrow().last().cloned().flatten()
	}

	/// Returns true if an observable read would register a subscriber right now
	pub fn is_collecting(&self) -> bool {
		matches!(self.collector_stack.borrow().last(), Some(Some(_)))
	}

	/// Number of frames on the collector stack (for testing)
	pub fn depth(&self) -> usize {
		self.collector_stack.borrow().len()
	}

	fn push_frame(&self, frame: Frame) {
		self.collector_stack.borrow_mut().push(frame);
	}

	fn pop_frame(&self) {
		self.collector_stack.borrow_mut().pop();
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

// Thread-local runtime instance
//
// In WASM there is only one thread, so this is effectively global. On native
// targets each thread gets its own runtime and its own data graphs.
thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Get a reference to the thread's runtime
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Try to access the runtime (safe version for Drop implementations)
///
/// Returns None if the thread-local storage has been destroyed.
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}

/// RAII frame on the collector stack
///
/// The frame is popped when the guard is dropped, restoring whichever
/// collector was current before it.
#[must_use = "the collector frame is popped as soon as the guard is dropped"]
pub struct CollectorGuard {
	_not_send: PhantomData<Rc<()>>,
}

impl CollectorGuard {
	/// Make `subscriber` the current collector until the guard drops
	pub fn collect(subscriber: Rc<dyn Subscriber>) -> Self {
		with_runtime(|rt| rt.push_frame(Some(subscriber)));
		Self {
			_not_send: PhantomData,
		}
	}

	/// Suspend collection until the guard drops
	pub fn untracked() -> Self {
		with_runtime(|rt| rt.push_frame(None));
		Self {
			_not_send: PhantomData,
		}
	}
}

impl Drop for CollectorGuard {
	fn drop(&mut self) {
		let _ = try_with_runtime(|rt| rt.pop_frame());
	}
}

/// Run `f` with dependency collection suspended
pub fn untracked<F, R>(f: F) -> R
where
	F: FnOnce() -> R,
{
	let _guard = CollectorGuard::untracked();
	f()
}
