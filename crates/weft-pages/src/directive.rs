//! Directives parsed from prefixed attribute names

use core::fmt;

use weft_dom::EventType;

/// A binding instruction carried by an attribute
///
/// With the default prefix, `v-model` parses to [`Directive::Model`] and
/// `v-on:click` to [`Directive::On`]. Any other prefixed name is kept as
/// [`Directive::Unknown`] with the prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	/// Two-way binding between a form control and a path
	Model,
	/// Event handler calling a named method; only `click` is recognized
	On(EventType),
	/// Prefixed but unrecognized
	Unknown(String),
}

impl Directive {
	/// Parse an attribute name
	///
	/// Returns `None` when the name does not carry `prefix`.
	pub fn parse(attribute: &str, prefix: &str) -> Option<Self> {
		let name = attribute.strip_prefix(prefix)?;
		Some(match name {
			"model" => Self::Model,
			"on:click" => Self::On(EventType::Click),
			other => Self::Unknown(other.to_string()),
		})
	}
}

impl fmt::Display for Directive {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Model => f.write_str("model"),
			Self::On(event) => write!(f, "on:{event}"),
			Self::Unknown(name) => f.write_str(name),
		}
	}
}
