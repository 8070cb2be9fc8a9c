//! Node tree
//!
//! A [`Node`] is a cheap, shared handle to one node of the tree. Cloning a
//! handle does not clone the node; two handles are equal when they point at
//! the same node.
//!
//! Parents own their children; children hold a weak back-reference to their
//! parent, so dropping the last handle to a detached subtree frees it.

use core::cell::RefCell;
use core::fmt;

use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::error::{BoxError, DomError, Result};
use crate::event::{Event, EventHandle, EventType, Listener};
use crate::selector::Selector;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Node classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
	/// An element with a tag name, attributes and children
	Element,
	/// Character data
	Text,
	/// A comment; never rendered as content
	Comment,
	/// A parentless container whose children move when it is inserted
	Fragment,
}

pub(crate) struct NodeData {
	node_type: NodeType,
	tag_name: String,
	parent: RefCell<Weak<NodeData>>,
	children: RefCell<Vec<Node>>,
	attributes: RefCell<IndexMap<String, String>>,
	data: RefCell<String>,
	value: RefCell<Option<String>>,
	listeners: RefCell<Vec<Listener>>,
}

/// Shared handle to a node
#[derive(Clone)]
pub struct Node(Rc<NodeData>);

impl Node {
	fn with_type(node_type: NodeType, tag_name: String, data: String) -> Self {
		Self(Rc::new(NodeData {
			node_type,
			tag_name,
			parent: RefCell::new(Weak::new()),
			children: RefCell::new(Vec::new()),
			attributes: RefCell::new(IndexMap::new()),
			data: RefCell::new(data),
			value: RefCell::new(None),
			listeners: RefCell::new(Vec::new()),
		}))
	}

	pub(crate) fn from_data(data: Rc<NodeData>) -> Self {
		Self(data)
	}

	/// Create a detached element
	///
	/// Tag names are case-insensitive and stored lowercase.
	pub fn element(tag_name: &str) -> Result<Self> {
		validate_name(tag_name)?;
		Ok(Self::element_unchecked(tag_name))
	}

	pub(crate) fn element_unchecked(tag_name: &str) -> Self {
		Self::with_type(NodeType::Element, tag_name.to_ascii_lowercase(), String::new())
	}

	/// Create a detached text node
	pub fn text(data: impl Into<String>) -> Self {
		Self::with_type(NodeType::Text, String::new(), data.into())
	}

	/// Create a detached comment
	pub fn comment(data: impl Into<String>) -> Self {
		Self::with_type(NodeType::Comment, String::new(), data.into())
	}

	/// Create an empty fragment
	pub fn fragment() -> Self {
		Self::with_type(NodeType::Fragment, String::new(), String::new())
	}

	/// The node classification
	pub fn node_type(&self) -> NodeType {
		self.0.node_type
	}

	/// Returns true for elements
	pub fn is_element(&self) -> bool {
		self.0.node_type == NodeType::Element
	}

	/// Returns true for text nodes
	pub fn is_text(&self) -> bool {
		self.0.node_type == NodeType::Text
	}

	/// Lowercase tag name of an element
	pub fn tag_name(&self) -> Option<&str> {
		self.is_element().then_some(self.0.tag_name.as_str())
	}

	/// Returns true if both handles point at the same node
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	// ------------------------------------------------------------------
	// Tree structure
	// ------------------------------------------------------------------

	/// The parent node, if attached
	pub fn parent(&self) -> Option<Node> {
		self.0.parent.borrow().upgrade().map(Node)
	}

	/// Snapshot of the children in order
	pub fn children(&self) -> Vec<Node> {
		self.0.children.borrow().clone()
	}

	/// The first child, if any
	pub fn first_child(&self) -> Option<Node> {
		self.0.children.borrow().first().cloned()
	}

	/// Number of children
	pub fn child_count(&self) -> usize {
		self.0.children.borrow().len()
	}

	/// Append `child` as the last child
	///
	/// An attached child is moved. Appending a fragment moves all of its
	/// children, in order, and leaves the fragment empty.
	pub fn append_child(&self, child: &Node) -> Result<()> {
		if !matches!(self.0.node_type, NodeType::Element | NodeType::Fragment) {
			return Err(DomError::HierarchyRequest(
				"only elements and fragments can have children",
			));
		}
		if self.is_inclusive_descendant_of(child) {
			return Err(DomError::HierarchyRequest(
				"a node cannot be inserted into itself or its descendants",
			));
		}

		if child.0.node_type == NodeType::Fragment {
			let moved: Vec<Node> = child.0.children.borrow_mut().drain(..).collect();
			for node in &moved {
				*node.0.parent.borrow_mut() = Rc::downgrade(&self.0);
			}
			self.0.children.borrow_mut().extend(moved);
			return Ok(());
		}

		child.detach();
		*child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
		self.0.children.borrow_mut().push(child.clone());
		Ok(())
	}

	/// Remove `child` and return it detached
	pub fn remove_child(&self, child: &Node) -> Result<Node> {
		let position = self
			.0
			.children
			.borrow()
			.iter()
			.position(|c| c.ptr_eq(child))
			.ok_or(DomError::NotAChild)?;
		let removed = self.0.children.borrow_mut().remove(position);
		*removed.0.parent.borrow_mut() = Weak::new();
		Ok(removed)
	}

	/// Detach this node from its parent, if any
	pub fn detach(&self) {
		if let Some(parent) = self.parent() {
			parent.0.children.borrow_mut().retain(|c| !c.ptr_eq(self));
		}
		*self.0.parent.borrow_mut() = Weak::new();
	}

	/// Detach every child and return them in order
	pub fn take_children(&self) -> Vec<Node> {
		let taken: Vec<Node> = self.0.children.borrow_mut().drain(..).collect();
		for node in &taken {
			*node.0.parent.borrow_mut() = Weak::new();
		}
		taken
	}

	fn is_inclusive_descendant_of(&self, ancestor: &Node) -> bool {
		let mut current = Some(self.clone());
		while let Some(node) = current {
			if node.ptr_eq(ancestor) {
				return true;
			}
			current = node.parent();
		}
		false
	}

	/// Pre-order walk over descendants, excluding `self`
	pub fn descendants(&self) -> Vec<Node> {
		let mut out = Vec::new();
		collect_descendants(self, &mut out);
		out
	}

	// ------------------------------------------------------------------
	// Attributes
	// ------------------------------------------------------------------

	/// Snapshot of the attributes in insertion order
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.0
			.attributes
			.borrow()
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Read an attribute
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.0.attributes.borrow().get(name).cloned()
	}

	/// Returns true if the attribute is present
	pub fn has_attribute(&self, name: &str) -> bool {
		self.0.attributes.borrow().contains_key(name)
	}

	/// Set an attribute, keeping its position if it already exists
	pub fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
		if !self.is_element() {
			return Err(DomError::HierarchyRequest("only elements carry attributes"));
		}
		validate_name(name)?;
		self.0
			.attributes
			.borrow_mut()
			.insert(name.to_string(), value.to_string());
		Ok(())
	}

	/// Remove an attribute; returns true if it was present
	pub fn remove_attribute(&self, name: &str) -> bool {
		self.0.attributes.borrow_mut().shift_remove(name).is_some()
	}

	/// Returns true if the `class` attribute lists `class`
	pub fn has_class(&self, class: &str) -> bool {
		self.0
			.attributes
			.borrow()
			.get("class")
			.is_some_and(|list| list.split_whitespace().any(|c| c == class))
	}

	// ------------------------------------------------------------------
	// Content
	// ------------------------------------------------------------------

	/// The `value` property of a form control
	///
	/// Until it is first assigned, the property reflects the `value`
	/// attribute.
	pub fn value(&self) -> String {
		if let Some(value) = self.0.value.borrow().as_ref() {
			return value.clone();
		}
		self.get_attribute("value").unwrap_or_default()
	}

	/// Assign the `value` property; the attribute is left untouched
	pub fn set_value(&self, value: impl Into<String>) {
		*self.0.value.borrow_mut() = Some(value.into());
	}

	/// Text of this node and its descendants
	///
	/// Character data for text and comment nodes; the concatenated text of
	/// descendant text nodes for elements and fragments.
	pub fn text_content(&self) -> String {
		match self.0.node_type {
			NodeType::Text | NodeType::Comment => self.0.data.borrow().clone(),
			NodeType::Element | NodeType::Fragment => self
				.descendants()
				.iter()
				.filter(|n| n.is_text())
				.map(|n| n.0.data.borrow().clone())
				.collect(),
		}
	}

	/// Replace the text of this node
	///
	/// Elements and fragments lose all children and gain a single text node
	/// (none if `text` is empty).
	pub fn set_text_content(&self, text: &str) {
		match self.0.node_type {
			NodeType::Text | NodeType::Comment => {
				*self.0.data.borrow_mut() = text.to_string();
			}
			NodeType::Element | NodeType::Fragment => {
				self.take_children();
				if !text.is_empty() {
					let node = Node::text(text);
					*node.0.parent.borrow_mut() = Rc::downgrade(&self.0);
					self.0.children.borrow_mut().push(node);
				}
			}
		}
	}

	// ------------------------------------------------------------------
	// Events
	// ------------------------------------------------------------------

	/// Register a listener; listeners run in registration order
	pub fn add_event_listener<F>(&self, event_type: EventType, callback: F) -> EventHandle
	where
		F: Fn(&Event) -> core::result::Result<(), BoxError> + 'static,
	{
		let id = NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed);
		self.0.listeners.borrow_mut().push(Listener {
			id,
			event_type: event_type.clone(),
			callback: Rc::new(callback),
		});
		EventHandle::new(Rc::downgrade(&self.0), id, event_type)
	}

	pub(crate) fn remove_listener(&self, id: u64) -> bool {
		let mut listeners = self.0.listeners.borrow_mut();
		let before = listeners.len();
		listeners.retain(|l| l.id != id);
		listeners.len() != before
	}

	/// Number of listeners registered for `event_type`
	pub fn listener_count(&self, event_type: &EventType) -> usize {
		self.0
			.listeners
			.borrow()
			.iter()
			.filter(|l| &l.event_type == event_type)
			.count()
	}

	/// Dispatch an event to this node's listeners
	///
	/// Returns how many listeners ran. Listeners added during the dispatch
	/// first run on the next one.
	pub fn dispatch_event(&self, event_type: EventType) -> Result<usize> {
		let callbacks: Vec<_> = self
			.0
			.listeners
			.borrow()
			.iter()
			.filter(|l| l.event_type == event_type)
			.map(|l| l.callback.clone())
			.collect();
		tracing::trace!(event = %event_type, listeners = callbacks.len(), "dispatching event");

		let event = Event::new(event_type, self.clone());
		for callback in &callbacks {
			callback(&event).map_err(|source| DomError::Listener {
				event: event.event_type().to_string(),
				source,
			})?;
		}
		Ok(callbacks.len())
	}

	/// Dispatch a click
	pub fn click(&self) -> Result<usize> {
		self.dispatch_event(EventType::Click)
	}

	/// Simulate typing: assign the value, then dispatch `input`
	pub fn input(&self, value: impl Into<String>) -> Result<usize> {
		self.set_value(value);
		self.dispatch_event(EventType::Input)
	}

	// ------------------------------------------------------------------
	// Selectors
	// ------------------------------------------------------------------

	/// First descendant matching `selector`, in document order
	pub fn query_selector(&self, selector: &str) -> Result<Option<Node>> {
		let selector = Selector::parse(selector)?;
		Ok(self.descendants().into_iter().find(|n| selector.matches(n)))
	}

	/// Every descendant matching `selector`, in document order
	pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Node>> {
		let selector = Selector::parse(selector)?;
		Ok(self
			.descendants()
			.into_iter()
			.filter(|n| selector.matches(n))
			.collect())
	}
}

fn collect_descendants(node: &Node, out: &mut Vec<Node>) {
	for child in node.children() {
		out.push(child.clone());
		collect_descendants(&child, out);
	}
}

fn validate_name(name: &str) -> Result<()> {
	let forbidden = |c: char| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'' | '/' | '=');
	if name.is_empty() || name.chars().any(forbidden) {
		return Err(DomError::InvalidName(name.to_string()));
	}
	Ok(())
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Node {}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0.node_type {
			NodeType::Element => f
				.debug_struct("Element")
				.field("tag", &self.0.tag_name)
				.field("attributes", &self.0.attributes.borrow())
				.field("children", &self.child_count())
				.finish(),
			NodeType::Text => f.debug_tuple("Text").field(&self.0.data.borrow()).finish(),
			NodeType::Comment => f.debug_tuple("Comment").field(&self.0.data.borrow()).finish(),
			NodeType::Fragment => f
				.debug_struct("Fragment")
				.field("children", &self.child_count())
				.finish(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::RefCell;

	fn el(tag: &str) -> Node {
		Node::element(tag).unwrap()
	}

	#[rstest]
	fn test_append_sets_parent() {
		let parent = el("div");
		let child = Node::text("hi");

		parent.append_child(&child).unwrap();

		assert_eq!(child.parent(), Some(parent.clone()));
		assert_eq!(parent.children(), vec![child]);
	}

	#[rstest]
	fn test_append_moves_attached_child() {
		let a = el("div");
		let b = el("div");
		let child = el("span");
		a.append_child(&child).unwrap();

		b.append_child(&child).unwrap();

		assert_eq!(a.child_count(), 0);
		assert_eq!(child.parent(), Some(b));
	}

	#[rstest]
	fn test_append_fragment_moves_children_in_order() {
		let parent = el("div");
		let fragment = Node::fragment();
		let first = Node::text("1");
		let second = Node::text("2");
		fragment.append_child(&first).unwrap();
		fragment.append_child(&second).unwrap();

		parent.append_child(&fragment).unwrap();

		assert_eq!(parent.children(), vec![first.clone(), second]);
		assert_eq!(fragment.child_count(), 0);
		assert_eq!(first.parent(), Some(parent));
	}

	#[rstest]
	fn test_append_into_descendant_rejected() {
		let outer = el("div");
		let inner = el("div");
		outer.append_child(&inner).unwrap();

		let err = inner.append_child(&outer).unwrap_err();

		assert!(matches!(err, DomError::HierarchyRequest(_)));
		assert!(matches!(
			outer.append_child(&outer),
			Err(DomError::HierarchyRequest(_))
		));
	}

	#[rstest]
	fn test_text_cannot_have_children() {
		let text = Node::text("x");
		assert!(text.append_child(&Node::text("y")).is_err());
	}

	#[rstest]
	fn test_remove_child() {
		let parent = el("ul");
		let child = el("li");
		parent.append_child(&child).unwrap();

		let removed = parent.remove_child(&child).unwrap();

		assert_eq!(removed, child);
		assert!(child.parent().is_none());
		assert!(matches!(parent.remove_child(&child), Err(DomError::NotAChild)));
	}

	#[rstest]
	fn test_attributes_keep_order_and_position() {
		let node = el("input");
		node.set_attribute("type", "text").unwrap();
		node.set_attribute("v-model", "a.b").unwrap();
		node.set_attribute("type", "search").unwrap();

		assert_eq!(
			node.attributes(),
			vec![
				("type".to_string(), "search".to_string()),
				("v-model".to_string(), "a.b".to_string()),
			]
		);
		assert!(node.remove_attribute("type"));
		assert!(!node.remove_attribute("type"));
		assert_eq!(node.attributes().len(), 1);
	}

	#[rstest]
	#[case("")]
	#[case("has space")]
	#[case("a=b")]
	fn test_invalid_attribute_names(#[case] name: &str) {
		let node = el("div");
		assert!(matches!(
			node.set_attribute(name, "x"),
			Err(DomError::InvalidName(_))
		));
	}

	#[rstest]
	fn test_value_reflects_attribute_until_assigned() {
		let node = el("input");
		node.set_attribute("value", "initial").unwrap();
		assert_eq!(node.value(), "initial");

		node.set_value("typed");

		assert_eq!(node.value(), "typed");
		assert_eq!(node.get_attribute("value").as_deref(), Some("initial"));
	}

	#[rstest]
	fn test_text_content_of_element() {
		let node = el("p");
		node.append_child(&Node::text("a")).unwrap();
		node.append_child(&Node::comment("ignored")).unwrap();
		let inner = el("b");
		inner.append_child(&Node::text("c")).unwrap();
		node.append_child(&inner).unwrap();

		assert_eq!(node.text_content(), "ac");

		node.set_text_content("replaced");
		assert_eq!(node.child_count(), 1);
		assert_eq!(node.text_content(), "replaced");
		assert!(inner.parent().is_none());
	}

	#[rstest]
	fn test_dispatch_runs_listeners_in_order() {
		let node = el("button");
		let log = Rc::new(RefCell::new(Vec::new()));
		for tag in ["first", "second"] {
			let log = log.clone();
			node.add_event_listener(EventType::Click, move |_| {
				log.borrow_mut().push(tag);
				Ok(())
			});
		}
		node.add_event_listener(EventType::Input, |_| Ok(()));

		let ran = node.click().unwrap();

		assert_eq!(ran, 2);
		assert_eq!(*log.borrow(), vec!["first", "second"]);
	}

	#[rstest]
	fn test_dispatch_stops_at_failing_listener() {
		let node = el("button");
		let reached = Rc::new(RefCell::new(false));
		node.add_event_listener(EventType::Click, |_| Err("boom".into()));
		let reached_clone = reached.clone();
		node.add_event_listener(EventType::Click, move |_| {
			*reached_clone.borrow_mut() = true;
			Ok(())
		});

		let err = node.click().unwrap_err();

		assert!(matches!(err, DomError::Listener { ref event, .. } if event == "click"));
		assert_eq!(err.listener_source().unwrap().to_string(), "boom");
		assert!(!*reached.borrow());
	}

	#[rstest]
	fn test_input_sets_value_before_listeners() {
		let node = el("input");
		let seen = Rc::new(RefCell::new(String::new()));
		let seen_clone = seen.clone();
		node.add_event_listener(EventType::Input, move |event| {
			*seen_clone.borrow_mut() = event.target().value();
			Ok(())
		});

		node.input("z").unwrap();

		assert_eq!(*seen.borrow(), "z");
	}

	#[rstest]
	fn test_event_handle_remove() {
		let node = el("button");
		let handle = node.add_event_listener(EventType::Click, |_| Ok(()));
		assert_eq!(node.listener_count(&EventType::Click), 1);

		assert!(handle.remove());

		assert_eq!(node.listener_count(&EventType::Click), 0);
		assert_eq!(node.click().unwrap(), 0);
	}

	#[rstest]
	fn test_query_selector_document_order() {
		let root = el("div");
		let first = el("p");
		first.set_attribute("class", "note big").unwrap();
		let nested = el("span");
		nested.set_attribute("id", "target").unwrap();
		first.append_child(&nested).unwrap();
		let second = el("p");
		second.set_attribute("class", "note").unwrap();
		root.append_child(&first).unwrap();
		root.append_child(&second).unwrap();

		assert_eq!(root.query_selector("#target").unwrap(), Some(nested));
		assert_eq!(root.query_selector(".note").unwrap(), Some(first.clone()));
		assert_eq!(root.query_selector_all("p").unwrap(), vec![first, second]);
		assert_eq!(root.query_selector("#missing").unwrap(), None);
	}
}
