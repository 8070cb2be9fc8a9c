//! # weft-pages
//!
//! Template compiler and application facade.
//!
//! A template is an ordinary [`weft_dom`] subtree. Text nodes may carry one
//! `{{ path }}` placeholder; elements may carry `v-model="path"` (two-way
//! binding of the `value` property) and `v-on:click="method"`. Mounting an
//! [`App`] observes the data graph and binds every placeholder and directive
//! with its own [`Watcher`](weft_reactive::Watcher).
//!
//! ## Modules
//!
//! - [`app`]: [`AppOptions`], [`App`] and the [`ViewModel`]
//! - [`compiler`]: the single-pass template compiler
//! - [`directive`]: directive parsing
//! - [`interpolation`]: placeholder matching
//! - [`settings`]: compiler configuration, loadable from TOML
//!
//! ## Example
//!
//! ```ignore
//! use weft_dom::{Document, builder::*};
//! use weft_pages::{App, AppOptions};
//!
//! let doc = Document::new();
//! doc.body().append_child(
//!     &div()
//!         .id("app")
//!         .child(p().text("{{ author.name }}"))
//!         .child(input().attr("v-model", "author.name"))
//!         .build(),
//! )?;
//!
//! let app = App::mount(
//!     &doc,
//!     AppOptions::new("#app").data_json(serde_json::json!({"author": {"name": "Ada"}})),
//! )?;
//!
//! doc.query_selector("input")?.unwrap().input("Grace")?;
//! assert_eq!(doc.query_selector("p")?.unwrap().text_content(), "Grace");
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod compiler;
pub mod directive;
pub mod error;
pub mod interpolation;
pub mod settings;

pub use app::{App, AppOptions, ComputedFn, MethodFn, ViewModel, WatchFn};
pub use compiler::{CompileReport, Compiler};
pub use directive::Directive;
pub use error::{CompileError, PagesError, SettingsError};
pub use interpolation::Interpolation;
pub use settings::{CompilerSettings, UnknownDirectivePolicy};
