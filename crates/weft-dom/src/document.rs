//! Document - the root of a node tree

use crate::error::Result;
use crate::node::Node;

/// An in-memory document
///
/// Owns a `<body>` element; everything mounted into the document lives below
/// it.
#[derive(Debug, Clone)]
pub struct Document {
	body: Node,
}

impl Document {
	/// Create an empty document
	pub fn new() -> Self {
		Self {
			body: Node::element_unchecked("body"),
		}
	}

	/// The `<body>` element
	pub fn body(&self) -> &Node {
		&self.body
	}

	/// Create a detached element
	pub fn create_element(&self, tag_name: &str) -> Result<Node> {
		Node::element(tag_name)
	}

	/// Create a detached text node
	pub fn create_text_node(&self, data: &str) -> Node {
		Node::text(data)
	}

	/// Create a detached comment
	pub fn create_comment(&self, data: &str) -> Node {
		Node::comment(data)
	}

	/// Create an empty fragment
	pub fn create_document_fragment(&self) -> Node {
		Node::fragment()
	}

	/// First element below the body matching `selector`
	pub fn query_selector(&self, selector: &str) -> Result<Option<Node>> {
		self.body.query_selector(selector)
	}

	/// Find an element by id
	pub fn get_element_by_id(&self, id: &str) -> Option<Node> {
		self.body
			.descendants()
			.into_iter()
			.find(|n| n.is_element() && n.get_attribute("id").as_deref() == Some(id))
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_mount_and_query() {
		let doc = Document::new();
		let app = doc.create_element("div").unwrap();
		app.set_attribute("id", "app").unwrap();
		doc.body().append_child(&app).unwrap();

		assert_eq!(doc.query_selector("#app").unwrap(), Some(app.clone()));
		assert_eq!(doc.get_element_by_id("app"), Some(app));
		assert_eq!(doc.query_selector("#other").unwrap(), None);
	}

	#[rstest]
	fn test_detached_nodes_are_not_found() {
		let doc = Document::new();
		let orphan = doc.create_element("div").unwrap();
		orphan.set_attribute("id", "orphan").unwrap();

		assert!(doc.get_element_by_id("orphan").is_none());
	}
}
