//! Simple selectors: `#id`, `.class` and `tag`

use crate::error::{DomError, Result};
use crate::node::Node;

/// A parsed simple selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
	/// `#id`
	Id(String),
	/// `.class`
	Class(String),
	/// `tag`, matched case-insensitively
	Tag(String),
}

impl Selector {
	/// Parse a selector
	///
	/// Combinators, attribute selectors and pseudo-classes are not supported.
	pub fn parse(input: &str) -> Result<Self> {
		let trimmed = input.trim();
		let selector = if let Some(id) = trimmed.strip_prefix('#') {
			Self::Id(id.to_string())
		} else if let Some(class) = trimmed.strip_prefix('.') {
			Self::Class(class.to_string())
		} else {
			Self::Tag(trimmed.to_string())
		};

		let name = selector.name();
		let valid = !name.is_empty()
			&& name
				.chars()
				.all(|c| c.is_alphanumeric() || c == '-' || c == '_');
		if !valid {
			return Err(DomError::InvalidSelector(input.to_string()));
		}
		Ok(selector)
	}

	/// The id, class or tag name being matched
	pub fn name(&self) -> &str {
		match self {
			Self::Id(name) | Self::Class(name) | Self::Tag(name) => name,
		}
	}

	/// Returns true if `node` matches
	pub fn matches(&self, node: &Node) -> bool {
		let Some(tag) = node.tag_name() else {
			return false;
		};
		match self {
			Self::Id(id) => node.get_attribute("id").as_deref() == Some(id.as_str()),
			Self::Class(class) => node.has_class(class),
			Self::Tag(name) => tag.eq_ignore_ascii_case(name),
		}
	}
}
