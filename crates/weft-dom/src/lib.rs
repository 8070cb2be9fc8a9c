//! # weft-dom
//!
//! In-memory node tree used as the rendering target of weft templates.
//!
//! The tree models the parts of a document object model a binding engine
//! needs: elements with ordered attributes and a live `value` property, text
//! and comment nodes, fragments for batch detach and reattach, synchronous
//! event dispatch, simple selectors and HTML serialization.
//!
//! ## Example
//!
//! ```ignore
//! use weft_dom::{Document, builder::*};
//!
//! let doc = Document::new();
//! let app = div().id("app").child(p().text("hello")).build();
//! doc.body().append_child(&app)?;
//!
//! assert_eq!(doc.query_selector("#app")?, Some(app));
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod document;
pub mod error;
pub mod event;
pub mod node;
pub mod render;
pub mod selector;

pub use builder::ElementBuilder;
pub use document::Document;
pub use error::{BoxError, DomError, Result};
pub use event::{Event, EventHandle, EventType, ListenerFn};
pub use node::{Node, NodeType};
pub use render::{html_escape, is_void_element};
pub use selector::Selector;
