//! HTML Element Builder
//!
//! A fluent API for constructing element subtrees.
//!
//! ## Example
//!
//! ```ignore
//! let app = div()
//!     .id("app")
//!     .child(p().text("{{ message }}"))
//!     .child(input().attr("v-model", "message"))
//!     .child(button().attr("v-on:click", "reverse").text("Reverse"))
//!     .build();
//! ```

use crate::error::BoxError;
use crate::event::{Event, EventHandle, EventType};
use crate::node::Node;

/// Most elements have 0-2 event listeners in practice
const TYPICAL_EVENT_COUNT: usize = 2;

/// Element builder with fluent API
///
/// Attribute setters ignore invalid names, so a chain never breaks.
pub struct ElementBuilder {
	element: Node,
	event_handles: Vec<EventHandle>,
}

impl ElementBuilder {
	/// Create a builder around an existing element
	pub fn new(element: Node) -> Self {
		Self {
			element,
			event_handles: Vec::with_capacity(TYPICAL_EVENT_COUNT),
		}
	}

	/// Set the class attribute
	///
	/// Multiple calls overwrite the previous value.
	pub fn class(self, class: &str) -> Self {
		let _ = self.element.set_attribute("class", class);
		self
	}

	/// Set the id attribute
	pub fn id(self, id: &str) -> Self {
		let _ = self.element.set_attribute("id", id);
		self
	}

	/// Set a custom attribute
	///
	/// ## Example
	///
	/// ```ignore
	/// input().attr("v-model", "form.name").build()
	/// ```
	pub fn attr(self, name: &str, value: &str) -> Self {
		let _ = self.element.set_attribute(name, value);
		self
	}

	/// Remove an attribute
	pub fn remove_attr(self, name: &str) -> Self {
		self.element.remove_attribute(name);
		self
	}

	/// Set text content, replacing all children
	pub fn text(self, text: &str) -> Self {
		self.element.set_text_content(text);
		self
	}

	/// Append a text node
	///
	/// Unlike [`text`](Self::text), existing children are kept.
	pub fn text_node(self, text: &str) -> Self {
		let _ = self.element.append_child(&Node::text(text));
		self
	}

	/// Append a comment
	pub fn comment(self, text: &str) -> Self {
		let _ = self.element.append_child(&Node::comment(text));
		self
	}

	/// Append a child element or finished builder
	pub fn child(self, child: impl Into<Node>) -> Self {
		let _ = self.element.append_child(&child.into());
		self
	}

	/// Append several children in order
	pub fn children<I>(self, children: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Node>,
	{
		for child in children {
			let _ = self.element.append_child(&child.into());
		}
		self
	}

	/// Add a listener for any event type
	pub fn on<F>(mut self, event_type: EventType, callback: F) -> Self
	where
		F: Fn(&Event) -> Result<(), BoxError> + 'static,
	{
		let handle = self.element.add_event_listener(event_type, callback);
		self.event_handles.push(handle);
		self
	}

	/// Add an infallible click listener
	#[inline]
	pub fn on_click<F>(self, callback: F) -> Self
	where
		F: Fn() + 'static,
	{
		self.on(EventType::Click, move |_| {
			callback();
			Ok(())
		})
	}

	/// Add an infallible input listener receiving the control's value
	#[inline]
	pub fn on_input<F>(self, callback: F) -> Self
	where
		F: Fn(String) + 'static,
	{
		self.on(EventType::Input, move |event| {
			callback(event.target().value());
			Ok(())
		})
	}

	/// Number of listeners added through this builder
	pub fn listener_count(&self) -> usize {
		self.event_handles.len()
	}

	/// Finalize the builder and return the element
	///
	/// Listeners stay registered on the element.
	pub fn build(self) -> Node {
		self.element
	}
}

impl From<ElementBuilder> for Node {
	fn from(builder: ElementBuilder) -> Self {
		builder.build()
	}
}

/// Start building an arbitrary element
///
/// The tag name is lowercased but not validated.
pub fn element(tag: &str) -> ElementBuilder {
	ElementBuilder::new(Node::element_unchecked(tag))
}

macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		pub fn $name() -> ElementBuilder {
			element($tag)
		}
	};
}

define_element!(
	/// Create a `<div>` element
	div, "div"
);

define_element!(
	/// Create a `<span>` element
	span, "span"
);

define_element!(
	/// Create a `<p>` element (paragraph)
	p, "p"
);

define_element!(
	/// Create a `<button>` element
	button, "button"
);

define_element!(
	/// Create an `<input>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let name = input().attr("type", "text").attr("v-model", "name").build();
	/// ```
	input, "input"
);

define_element!(
	/// Create a `<textarea>` element
	textarea, "textarea"
);

define_element!(
	/// Create a `<form>` element
	form, "form"
);

define_element!(
	/// Create a `<ul>` element
	ul, "ul"
);

define_element!(
	/// Create an `<li>` element
	li, "li"
);

define_element!(
	/// Create an `<h1>` element
	h1, "h1"
);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::RefCell;
	use std::rc::Rc;

	#[rstest]
	fn test_builder_chain() {
		let node = div()
			.id("app")
			.class("container")
			.child(p().text("hello"))
			.child(input().attr("type", "text"))
			.build();

		assert_eq!(
			node.outer_html(),
			r#"<div id="app" class="container"><p>hello</p><input type="text" /></div>"#
		);
	}

	#[rstest]
	fn test_text_node_keeps_existing_children() {
		let node = p().text_node("a").comment("c").text_node("b").build();

		assert_eq!(node.child_count(), 3);
		assert_eq!(node.text_content(), "ab");
	}

	#[rstest]
	fn test_invalid_attribute_is_skipped() {
		let node = div().attr("bad name", "x").id("ok").build();
		assert_eq!(node.attributes().len(), 1);
	}

	#[rstest]
	fn test_on_click_and_on_input() {
		let clicks = Rc::new(RefCell::new(0));
		let typed = Rc::new(RefCell::new(String::new()));
		let clicks_clone = clicks.clone();
		let typed_clone = typed.clone();

		let button = button()
			.on_click(move || *clicks_clone.borrow_mut() += 1)
			.build();
		let field = input()
			.on_input(move |value| *typed_clone.borrow_mut() = value)
			.build();

		button.click().unwrap();
		button.click().unwrap();
		field.input("abc").unwrap();

		assert_eq!(*clicks.borrow(), 2);
		assert_eq!(*typed.borrow(), "abc");
	}

	#[rstest]
	fn test_children_from_iterator() {
		let list = ul().children(["a", "b"].map(|t| li().text(t))).build();
		assert_eq!(list.inner_html(), "<li>a</li><li>b</li>");
	}
}
