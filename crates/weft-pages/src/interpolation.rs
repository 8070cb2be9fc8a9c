//! `{{ path }}` matching
//!
//! Only the first placeholder of a text is ever bound. The expression is the
//! shortest non-empty run between the delimiters on a single line, trimmed.

use regex::Regex;

use crate::error::SettingsError;
use crate::settings::CompilerSettings;

/// Placeholder matcher for one pair of delimiters
#[derive(Debug, Clone)]
pub struct Interpolation {
	pattern: Regex,
}

impl Interpolation {
	/// Build a matcher for `open` and `close`
	pub fn new(open: &str, close: &str) -> Result<Self, SettingsError> {
		let source = format!("{}(.+?){}", regex::escape(open), regex::escape(close));
		let pattern = Regex::new(&source).map_err(invalid_pattern)?;
		Ok(Self { pattern })
	}

	/// Build a matcher from compiler settings
	pub fn from_settings(settings: &CompilerSettings) -> Result<Self, SettingsError> {
		Self::new(&settings.interpolation_open, &settings.interpolation_close)
	}

	/// The trimmed expression of the first placeholder in `text`
	pub fn first_expression<'t>(&self, text: &'t str) -> Option<&'t str> {
		self.pattern
			.captures(text)
			.and_then(|captures| captures.get(1))
			.map(|m| m.as_str().trim())
	}
}

fn invalid_pattern(err: regex::Error) -> SettingsError {
	SettingsError::InvalidValue {
		key: "interpolation",
		message: err.to_string(),
	}
}
