//! Error types for node tree operations.

use thiserror::Error;

/// Boxed error returned by event listeners.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for node tree operations.
pub type Result<T, E = DomError> = std::result::Result<T, E>;

/// Errors raised by the node tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DomError {
	/// The requested insertion would produce an invalid tree.
	#[error("hierarchy request error: {0}")]
	HierarchyRequest(&'static str),

	/// The node passed to a removal is not a child of the receiver.
	#[error("node is not a child of this node")]
	NotAChild,

	/// Attribute or tag names must be non-empty and free of whitespace.
	#[error("invalid name '{0}'")]
	InvalidName(String),

	/// A selector could not be parsed.
	#[error("unsupported selector '{0}'")]
	InvalidSelector(String),

	/// An event listener failed; dispatch stopped at that listener.
	#[error("'{event}' listener failed: {source}")]
	Listener {
		/// Name of the dispatched event.
		event: String,
		/// Error returned by the listener.
		#[source]
		source: BoxError,
	},
}

impl DomError {
	/// The error returned by a failing listener, if this is a listener failure.
	pub fn listener_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
		match self {
			Self::Listener { source, .. } => Some(source.as_ref()),
			_ => None,
		}
	}
}
