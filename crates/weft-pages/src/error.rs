//! Error types for compilation, settings and the application facade.

use thiserror::Error;
use weft_dom::DomError;
use weft_reactive::{BoxError, ReactiveError};

/// Errors raised while compiling a template.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
	/// A prefixed attribute named no known directive and the policy is `error`.
	#[error("unknown directive '{name}' on <{tag}>")]
	UnknownDirective {
		/// Full attribute name, prefix included.
		name: String,
		/// Tag of the element carrying it.
		tag: String,
	},

	/// Compiler settings were invalid.
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// A binding path failed to parse or resolve.
	#[error(transparent)]
	Reactive(#[from] ReactiveError),

	/// The node tree rejected an operation.
	#[error(transparent)]
	Dom(#[from] DomError),
}

/// Errors raised by the application facade.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PagesError {
	/// No method with this name was registered.
	#[error("method '{0}' is not defined")]
	MethodNotFound(String),

	/// A registered method returned an error.
	#[error("method '{name}' failed: {source}")]
	MethodFailed {
		/// Method name.
		name: String,
		/// Error returned by the method.
		#[source]
		source: BoxError,
	},

	/// The mount selector matched nothing.
	#[error("mount target '{0}' not found")]
	MountTargetNotFound(String),

	/// Compilation failed.
	#[error(transparent)]
	Compile(#[from] CompileError),

	/// A reactive operation failed.
	#[error(transparent)]
	Reactive(#[from] ReactiveError),

	/// The node tree rejected an operation.
	#[error(transparent)]
	Dom(#[from] DomError),
}

/// Errors raised while loading compiler settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
	/// The TOML document did not parse.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A setting had an unusable value.
	#[error("Invalid value for '{key}': {message}")]
	InvalidValue {
		/// Setting name.
		key: &'static str,
		/// What is wrong with it.
		message: String,
	},
}
