//! Dotted property paths
//!
//! A [`Path`] is a sequence of identifiers separated by dots (`author.name`).
//! There is no bracket access, no array indexing and no expression language.
//!
//! Paths are walked against a [`Scope`]: the first segment is looked up in the
//! scope, every further segment is read from the object the previous segment
//! produced. Reading a segment of anything that is not an object is a
//! [`ReactiveError::PathResolution`].

use core::fmt;
use core::str::FromStr;

use crate::error::{ReactiveError, Result};
use crate::value::Value;

/// Something a path can be resolved against
///
/// Implemented by [`Object`](crate::Object) and by view models that layer
/// derived properties over a data object.
pub trait Scope {
	/// Read a top-level name
	fn lookup(&self, key: &str) -> Result<Value>;

	/// Write a top-level name
	fn assign(&self, key: &str, value: Value) -> Result<()>;
}

/// Parsed dotted property path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
	raw: String,
	segments: Vec<String>,
}

impl Path {
	/// Parse a dotted path; surrounding whitespace is trimmed
	pub fn parse(expr: &str) -> Result<Self> {
		let raw = expr.trim();
		if raw.is_empty() {
			return Err(invalid(expr, "path is empty"));
		}
		let mut segments = Vec::new();
		for segment in raw.split('.') {
			if segment.is_empty() {
				return Err(invalid(expr, "empty path segment"));
			}
			if segment.chars().any(char::is_whitespace) {
				return Err(invalid(expr, "whitespace inside a path segment"));
			}
			segments.push(segment.to_string());
		}
		Ok(Self {
			raw: raw.to_string(),
			segments,
		})
	}

	/// Path segments in order
	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// The normalized dotted form
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Read the value at this path
	///
	/// A missing final key reads as `Null`; a non-object intermediate is an
	/// error.
	pub fn resolve(&self, scope: &dyn Scope) -> Result<Value> {
		let (first, rest) = self.split();
		let mut current = scope.lookup(first)?;
		for segment in rest {
			current = self.step(&current, segment)?;
		}
		Ok(current)
	}

	/// Write `value` at this path
	///
	/// Intermediate segments are dereferenced, the final segment is assigned on
	/// the object they lead to.
	pub fn assign(&self, scope: &dyn Scope, value: Value) -> Result<()> {
		let (first, rest) = self.split();
		let Some((last, middle)) = rest.split_last() else {
			return scope.assign(first, value);
		};
		let mut current = scope.lookup(first)?;
		for segment in middle {
			current = self.step(&current, segment)?;
		}
		match current {
			Value::Object(target) => target.set(last, value),
			other => Err(self.unreadable(last, &other)),
		}
	}

	fn split(&self) -> (&str, &[String]) {
		// parse() guarantees at least one segment
		match self.segments.split_first() {
			Some((first, rest)) => (first.as_str(), rest),
			None => ("", &self.segments[..]),
		}
	}

	fn step(&self, current: &Value, segment: &str) -> Result<Value> {
		match current {
			Value::Object(object) => Ok(object.get(segment)),
			other => Err(self.unreadable(segment, other)),
		}
	}

	fn unreadable(&self, segment: &str, found: &Value) -> ReactiveError {
		ReactiveError::PathResolution {
			path: self.raw.clone(),
			segment: segment.to_string(),
			found: found.type_name(),
		}
	}
}

fn invalid(expr: &str, reason: &'static str) -> ReactiveError {
	ReactiveError::InvalidPath {
		path: expr.to_string(),
		reason,
	}
}

impl FromStr for Path {
	type Err = ReactiveError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Object;
	use rstest::rstest;

	fn graph() -> Object {
		Object::new().with(
			"author",
			Object::new().with("name", Object::new().with("first", "Ada")),
		)
	}

	#[rstest]
	#[case("a", &["a"])]
	#[case("  a.b.c ", &["a", "b", "c"])]
	#[case("author.name.first", &["author", "name", "first"])]
	fn test_parse_valid(#[case] expr: &str, #[case] expected: &[&str]) {
		let path = Path::parse(expr).unwrap();
		assert_eq!(path.segments(), expected);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("a..b")]
	#[case(".a")]
	#[case("a.")]
	#[case("a. b")]
	fn test_parse_invalid(#[case] expr: &str) {
		let err = Path::parse(expr).unwrap_err();
		assert!(matches!(err, ReactiveError::InvalidPath { .. }));
	}

	#[rstest]
	fn test_resolve_nested() {
		let path: Path = "author.name.first".parse().unwrap();
		assert_eq!(path.resolve(&graph()).unwrap(), Value::from("Ada"));
	}

	#[rstest]
	fn test_resolve_missing_leaf_is_null() {
		let path = Path::parse("author.age").unwrap();
		assert_eq!(path.resolve(&graph()).unwrap(), Value::Null);
	}

	#[rstest]
	fn test_resolve_through_missing_intermediate_fails() {
		let path = Path::parse("author.address.city").unwrap();
		let err = path.resolve(&graph()).unwrap_err();

		match err {
			ReactiveError::PathResolution {
				path,
				segment,
				found,
			} => {
				assert_eq!(path, "author.address.city");
				assert_eq!(segment, "city");
				assert_eq!(found, "null");
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	fn test_resolve_through_scalar_fails() {
		let path = Path::parse("author.name.first.initial").unwrap();
		let err = path.resolve(&graph()).unwrap_err();
		assert!(err.is_path_resolution());
	}

	#[rstest]
	fn test_assign_nested() {
		let data = graph();
		let path = Path::parse("author.name.first").unwrap();

		path.assign(&data, Value::from("Grace")).unwrap();

		assert_eq!(path.resolve(&data).unwrap(), Value::from("Grace"));
	}

	#[rstest]
	fn test_assign_top_level() {
		let data = graph();
		Path::parse("title")
			.unwrap()
			.assign(&data, Value::from("Notes"))
			.unwrap();
		assert_eq!(data.get("title"), Value::from("Notes"));
	}

	#[rstest]
	fn test_assign_through_missing_intermediate_fails() {
		let data = graph();
		let err = Path::parse("author.address.city")
			.unwrap()
			.assign(&data, Value::from("Paris"))
			.unwrap_err();
		assert!(err.is_path_resolution());
	}

	#[rstest]
	fn test_display_is_normalized() {
		let path = Path::parse("  a.b  ").unwrap();
		assert_eq!(path.to_string(), "a.b");
	}
}
