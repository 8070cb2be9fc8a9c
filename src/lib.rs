//! # Weft
//!
//! A minimal reactive data-binding engine.
//!
//! Weft keeps a plain data graph and a node tree in sync. Every leaf property
//! of the data graph owns a dependency; watchers subscribe to the properties
//! they read and re-run when one of them changes. A template compiler walks a
//! node tree once and binds `{{ path }}` placeholders, `v-model` and
//! `v-on:click` to the data.
//!
//! ## Feature Flags
//!
//! The reactive core (`weft-reactive`) is always compiled in.
//!
//! - `dom` - in-memory node tree with events and selectors
//! - `pages` - template compiler and application facade
//! - `full` (default) - everything above
//!
//! ## Crates
//!
//! - [`reactive`]: `weft-reactive`
//! - [`dom`]: `weft-dom`
//! - [`pages`]: `weft-pages`
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use weft::prelude::*;
//!
//! let doc = Document::new();
//! doc.body().append_child(
//!     &div()
//!         .id("app")
//!         .child(p().text("{{ count }}"))
//!         .child(button().attr("v-on:click", "increment"))
//!         .build(),
//! )?;
//!
//! let app = App::mount(
//!     &doc,
//!     AppOptions::new("#app")
//!         .data_json(serde_json::json!({"count": 0}))
//!         .method("increment", |vm| {
//!             let next = vm.get("count")?.as_f64().unwrap_or_default() + 1.0;
//!             vm.set("count", next)?;
//!             Ok(())
//!         }),
//! )?;
//!
//! doc.query_selector("button")?.unwrap().click()?;
//! assert_eq!(doc.query_selector("p")?.unwrap().text_content(), "1");
//! ```

pub use weft_reactive as reactive;

#[cfg(feature = "dom")]
pub use weft_dom as dom;

#[cfg(feature = "pages")]
pub use weft_pages as pages;

pub use weft_reactive::{
	Dependency, Object, Observer, Path, ReactiveError, Scope, Value, Watcher, observe, untracked,
};

#[cfg(feature = "dom")]
pub use weft_dom::{Document, DomError, Event, EventType, Node, NodeType};

#[cfg(feature = "pages")]
pub use weft_pages::{
	App, AppOptions, CompileError, Compiler, CompilerSettings, PagesError, UnknownDirectivePolicy,
	ViewModel,
};

/// Commonly used types
pub mod prelude {
	pub use crate::{Object, Path, ReactiveError, Value, Watcher, observe};

	#[cfg(feature = "dom")]
	pub use crate::{Document, EventType, Node};

	#[cfg(feature = "dom")]
	pub use weft_dom::builder::*;

	#[cfg(feature = "pages")]
	pub use crate::{App, AppOptions, CompilerSettings, PagesError, ViewModel};
}
