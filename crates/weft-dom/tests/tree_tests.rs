//! Integration tests for the node tree
//!
//! Covers the operations a template compiler performs on a mounted subtree:
//! batch detach into a fragment, in-place mutation, and reattachment.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};
use weft_dom::builder::{button, div, input, p, span};
use weft_dom::{Document, EventType, Node};

#[fixture]
fn mounted() -> (Document, Node) {
	let doc = Document::new();
	let app = div()
		.id("app")
		.child(p().text("{{ message }}"))
		.child(input().attr("v-model", "message"))
		.child(span().comment("static").text_node("tail"))
		.build();
	doc.body().append_child(&app).unwrap();
	(doc, app)
}

#[rstest]
fn test_detach_and_reattach_round_trip(mounted: (Document, Node)) {
	let (doc, app) = mounted;
	let before = app.inner_html();
	let originals = app.children();

	let fragment = doc.create_document_fragment();
	for child in app.children() {
		fragment.append_child(&child).unwrap();
	}
	assert_eq!(app.child_count(), 0);
	assert_eq!(fragment.child_count(), 3);

	app.append_child(&fragment).unwrap();

	assert_eq!(app.inner_html(), before);
	assert_eq!(app.children(), originals);
	assert!(originals.iter().all(|c| c.parent() == Some(app.clone())));
}

#[rstest]
fn test_mutations_inside_fragment_survive_reattach(mounted: (Document, Node)) {
	let (doc, app) = mounted;
	let fragment = doc.create_document_fragment();
	for child in app.take_children() {
		fragment.append_child(&child).unwrap();
	}

	let paragraph = fragment.children()[0].clone();
	paragraph.first_child().unwrap().set_text_content("hello");
	let field = fragment.children()[1].clone();
	field.remove_attribute("v-model");
	field.set_value("hello");
	app.append_child(&fragment).unwrap();

	assert_eq!(
		doc.body().inner_html(),
		r#"<div id="app"><p>hello</p><input /><span><!--static-->tail</span></div>"#
	);
	assert_eq!(doc.query_selector("input").unwrap().unwrap().value(), "hello");
}

#[rstest]
fn test_listener_writes_into_sibling() {
	let label = p().text("0").build();
	let count = Rc::new(RefCell::new(0));
	let target = label.clone();
	let counter = count.clone();
	let clicker = button()
		.on(EventType::Click, move |_| {
			*counter.borrow_mut() += 1;
			target.set_text_content(&counter.borrow().to_string());
			Ok(())
		})
		.build();
	let root = div().child(label.clone()).child(clicker.clone()).build();

	clicker.click().unwrap();
	clicker.click().unwrap();

	assert_eq!(root.text_content(), "2");
}

#[rstest]
fn test_listener_added_during_dispatch_runs_next_time() {
	let node = button().build();
	let log = Rc::new(RefCell::new(Vec::new()));
	let log_outer = log.clone();
	node.add_event_listener(EventType::Click, move |event| {
		log_outer.borrow_mut().push("outer");
		let log_inner = log_outer.clone();
		event.target().add_event_listener(EventType::Click, move |_| {
			log_inner.borrow_mut().push("inner");
			Ok(())
		});
		Ok(())
	});

	node.click().unwrap();
	assert_eq!(*log.borrow(), vec!["outer"]);

	node.click().unwrap();
	assert_eq!(*log.borrow(), vec!["outer", "outer", "inner"]);
}
