//! HTML serialization
//!
//! Text and attribute values are escaped. Void elements render as
//! self-closing tags. The `value` property is live state and is not
//! serialized; only the `value` attribute is.

use std::borrow::Cow;

use crate::node::{Node, NodeType};

/// Elements without a closing tag
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Returns true for void element tag names
pub fn is_void_element(tag: &str) -> bool {
	VOID_ELEMENTS.contains(&tag)
}

impl Node {
	/// Serialize this node and its descendants
	pub fn outer_html(&self) -> String {
		let mut output = String::new();
		write_node(self, &mut output);
		output
	}

	/// Serialize the children of this node
	pub fn inner_html(&self) -> String {
		let mut output = String::new();
		for child in self.children() {
			write_node(&child, &mut output);
		}
		output
	}
}

fn write_node(node: &Node, output: &mut String) {
	match node.node_type() {
		NodeType::Element => {
			let tag = node.tag_name().unwrap_or_default();
			output.push('<');
			output.push_str(tag);
			for (name, value) in node.attributes() {
				output.push(' ');
				output.push_str(&name);
				output.push_str("=\"");
				output.push_str(&html_escape(&value));
				output.push('"');
			}
			if is_void_element(tag) {
				output.push_str(" />");
				return;
			}
			output.push('>');
			for child in node.children() {
				write_node(&child, output);
			}
			output.push_str("</");
			output.push_str(tag);
			output.push('>');
		}
		NodeType::Text => output.push_str(&html_escape(&node.text_content())),
		NodeType::Comment => {
			output.push_str("<!--");
			output.push_str(&node.text_content());
			output.push_str("-->");
		}
		NodeType::Fragment => {
			for child in node.children() {
				write_node(&child, output);
			}
		}
	}
}

/// Escapes HTML special characters in a string.
///
/// Returns a borrowed reference if no escaping is needed.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}
