//! Error types for the reactivity engine.

use thiserror::Error;

/// Boxed error returned by user callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for reactive operations.
pub type Result<T, E = ReactiveError> = std::result::Result<T, E>;

/// Errors raised by the reactivity engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReactiveError {
	/// An intermediate path segment did not resolve to an object.
	///
	/// This is never masked: it propagates out of whichever operation
	/// (compile, write, watcher update) triggered the walk.
	#[error("cannot read '{segment}' of {found} while resolving '{path}'")]
	PathResolution {
		/// The full dotted path being walked.
		path: String,
		/// The segment that could not be read.
		segment: String,
		/// Type name of the value the segment was read from.
		found: &'static str,
	},

	/// A dotted path could not be parsed.
	#[error("invalid property path '{path}': {reason}")]
	InvalidPath {
		/// The offending expression.
		path: String,
		/// Why it was rejected.
		reason: &'static str,
	},

	/// A value that cannot live in the data graph.
	#[error("unsupported value in data graph: {0}")]
	UnsupportedValue(String),

	/// A watcher callback or listener failed.
	#[error("callback failed: {0}")]
	Callback(#[source] BoxError),
}

impl ReactiveError {
	/// Wrap an arbitrary callback failure.
	pub fn callback(err: impl Into<BoxError>) -> Self {
		Self::Callback(err.into())
	}

	/// Returns true for path resolution failures.
	pub fn is_path_resolution(&self) -> bool {
		matches!(self, Self::PathResolution { .. })
	}
}
