//! Compiler settings
//!
//! Every key is optional; omitted keys take their defaults.
//!
//! ```toml
//! directive_prefix = "v-"
//! interpolation_open = "{{"
//! interpolation_close = "}}"
//! unknown_directive = "warn"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// What the compiler does with a prefixed attribute it does not recognize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownDirectivePolicy {
	/// Leave the attribute in place, log at debug level
	#[default]
	Ignore,
	/// Leave the attribute in place, log a warning
	Warn,
	/// Fail compilation
	Error,
}

/// Template compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
	/// Attribute prefix marking directives
	pub directive_prefix: String,
	/// Opening interpolation delimiter
	pub interpolation_open: String,
	/// Closing interpolation delimiter
	pub interpolation_close: String,
	/// Handling of unrecognized directives
	pub unknown_directive: UnknownDirectivePolicy,
}

impl Default for CompilerSettings {
	fn default() -> Self {
		Self {
			directive_prefix: "v-".to_string(),
			interpolation_open: "{{".to_string(),
			interpolation_close: "}}".to_string(),
			unknown_directive: UnknownDirectivePolicy::default(),
		}
	}
}

impl CompilerSettings {
	/// Default settings
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse and validate settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use weft_pages::settings::{CompilerSettings, UnknownDirectivePolicy};
	///
	/// let settings = CompilerSettings::from_toml_str(r#"unknown_directive = "error""#).unwrap();
	/// assert_eq!(settings.unknown_directive, UnknownDirectivePolicy::Error);
	/// assert_eq!(settings.directive_prefix, "v-");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Set the directive prefix
	pub fn with_directive_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.directive_prefix = prefix.into();
		self
	}

	/// Set both interpolation delimiters
	pub fn with_delimiters(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
		self.interpolation_open = open.into();
		self.interpolation_close = close.into();
		self
	}

	/// Set the unknown directive policy
	pub fn with_unknown_directive(mut self, policy: UnknownDirectivePolicy) -> Self {
		self.unknown_directive = policy;
		self
	}

	/// Check that prefix and delimiters are usable
	pub fn validate(&self) -> Result<(), SettingsError> {
		let required = [
			("directive_prefix", &self.directive_prefix),
			("interpolation_open", &self.interpolation_open),
			("interpolation_close", &self.interpolation_close),
		];
		for (key, value) in required {
			if value.trim().is_empty() {
				return Err(SettingsError::InvalidValue {
					key,
					message: "must not be empty".to_string(),
				});
			}
			if value.chars().any(char::is_whitespace) {
				return Err(SettingsError::InvalidValue {
					key,
					message: format!("'{value}' must not contain whitespace"),
				});
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = CompilerSettings::default();
		assert_eq!(settings.directive_prefix, "v-");
		assert_eq!(settings.interpolation_open, "{{");
		assert_eq!(settings.interpolation_close, "}}");
		assert_eq!(settings.unknown_directive, UnknownDirectivePolicy::Ignore);
	}

	#[rstest]
	fn test_empty_document_yields_defaults() {
		assert_eq!(
			CompilerSettings::from_toml_str("").unwrap(),
			CompilerSettings::default()
		);
	}

	#[rstest]
	fn test_full_document() {
		let settings = CompilerSettings::from_toml_str(
			r#"
			directive_prefix = "x-"
			interpolation_open = "[["
			interpolation_close = "]]"
			unknown_directive = "warn"
			"#,
		)
		.unwrap();

		assert_eq!(
			settings,
			CompilerSettings::new()
				.with_directive_prefix("x-")
				.with_delimiters("[[", "]]")
				.with_unknown_directive(UnknownDirectivePolicy::Warn)
		);
	}

	#[rstest]
	#[case(r#"directive_prefix = """#, "directive_prefix")]
	#[case(r#"interpolation_open = "  ""#, "interpolation_open")]
	#[case(r#"interpolation_close = "} }""#, "interpolation_close")]
	fn test_invalid_values(#[case] source: &str, #[case] expected_key: &str) {
		match CompilerSettings::from_toml_str(source).unwrap_err() {
			SettingsError::InvalidValue { key, .. } => assert_eq!(key, expected_key),
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	#[case(r#"unknown_directive = "explode""#)]
	#[case(r#"directive_prefix = 3"#)]
	#[case("not toml at all")]
	fn test_parse_errors(#[case] source: &str) {
		assert!(matches!(
			CompilerSettings::from_toml_str(source),
			Err(SettingsError::Toml(_))
		));
	}
}
