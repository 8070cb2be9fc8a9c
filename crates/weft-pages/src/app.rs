//! Application facade
//!
//! [`AppOptions`] gathers the mount selector, the data graph, methods,
//! computed properties and watch entries. [`App::mount`] turns them into a
//! live [`ViewModel`] bound to a document:
//!
//! 1. the view model is built (data proxy, methods, computed);
//! 2. the data graph is observed;
//! 3. watch entries become watchers, in declaration order;
//! 4. the mount target is looked up and compiled.
//!
//! ## Example
//!
//! ```ignore
//! let doc = Document::new();
//! doc.body().append_child(&div().id("app").child(p().text("{{ message }}")).build())?;
//!
//! let app = App::mount(
//!     &doc,
//!     AppOptions::new("#app")
//!         .data_json(json!({ "message": "hello" }))
//!         .method("shout", |vm| {
//!             let message = vm.get("message")?;
//!             vm.set("message", format!("{message}!"))?;
//!             Ok(())
//!         }),
//! )?;
//! ```

use core::fmt;

use std::rc::Rc;

use indexmap::IndexMap;
use weft_dom::{Document, Node};
use weft_reactive::{BoxError, Object, Path, ReactiveError, Scope, Value, Watcher, observe};

use crate::compiler::{CompileReport, Compiler};
use crate::error::PagesError;
use crate::settings::CompilerSettings;

/// A method callable from templates and from Rust
pub type MethodFn = Rc<dyn Fn(&ViewModel) -> Result<(), BoxError> + 'static>;

/// A read-only derived property
pub type ComputedFn = Rc<dyn Fn(&ViewModel) -> weft_reactive::Result<Value> + 'static>;

/// A watch entry callback, given the view model and the new value
pub type WatchFn = Rc<dyn Fn(&ViewModel, &Value) -> Result<(), BoxError> + 'static>;

struct ViewModelInner {
	data: Object,
	methods: IndexMap<String, MethodFn>,
	computed: IndexMap<String, ComputedFn>,
}

/// The object templates are bound against
///
/// Top-level names resolve to computed properties first, then to data keys.
/// Template bindings and watch entries resolve through the view model too, so
/// a computed name shadows a data key of the same name for watchers as well,
/// and watching a computed name subscribes to the leaves its getter reads.
/// Cloning shares the same view model.
#[derive(Clone)]
pub struct ViewModel(Rc<ViewModelInner>);

impl ViewModel {
	/// A view model over `data` with no methods or computed properties
	pub fn new(data: Object) -> Self {
		Self::with_parts(data, IndexMap::new(), IndexMap::new())
	}

	fn with_parts(data: Object, methods: IndexMap<String, MethodFn>, computed: IndexMap<String, ComputedFn>) -> Self {
		Self(Rc::new(ViewModelInner {
			data,
			methods,
			computed,
		}))
	}

	/// The underlying data graph
	pub fn data(&self) -> &Object {
		&self.0.data
	}

	/// Read a dotted path
	///
	/// Reads made while a watcher is collecting subscribe that watcher.
	pub fn get(&self, path: &str) -> weft_reactive::Result<Value> {
		Path::parse(path)?.resolve(self)
	}

	/// Write a dotted path
	///
	/// Writing a bare computed name does nothing.
	pub fn set(&self, path: &str, value: impl Into<Value>) -> weft_reactive::Result<()> {
		Path::parse(path)?.assign(self, value.into())
	}

	/// Invoke a method by name
	pub fn call(&self, method: &str) -> Result<(), PagesError> {
		let Some(callback) = self.0.methods.get(method).cloned() else {
			return Err(PagesError::MethodNotFound(method.to_string()));
		};
		tracing::trace!(method, "invoking method");
		callback(self).map_err(|source| PagesError::MethodFailed {
			name: method.to_string(),
			source,
		})
	}

	/// Returns true if a method with this name exists
	pub fn has_method(&self, name: &str) -> bool {
		self.0.methods.contains_key(name)
	}

	/// Returns true if a computed property with this name exists
	pub fn has_computed(&self, name: &str) -> bool {
		self.0.computed.contains_key(name)
	}
}

impl Scope for ViewModel {
	fn lookup(&self, key: &str) -> weft_reactive::Result<Value> {
		match self.0.computed.get(key).cloned() {
			Some(getter) => getter(self),
			None => Ok(self.0.data.get(key)),
		}
	}

	fn assign(&self, key: &str, value: Value) -> weft_reactive::Result<()> {
		if self.0.computed.contains_key(key) {
			tracing::trace!(key, "ignoring write to computed property");
			return Ok(());
		}
		self.0.data.set(key, value)
	}
}

impl fmt::Debug for ViewModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewModel")
			.field("data", &self.0.data)
			.field("methods", &self.0.methods.keys().collect::<Vec<_>>())
			.field("computed", &self.0.computed.keys().collect::<Vec<_>>())
			.finish()
	}
}

enum DataSource {
	Object(Object),
	Json(serde_json::Value),
}

/// Options for [`App::mount`]
///
/// Everything except the mount selector is optional.
pub struct AppOptions {
	el: String,
	data: DataSource,
	methods: IndexMap<String, MethodFn>,
	computed: IndexMap<String, ComputedFn>,
	watch: Vec<(String, WatchFn)>,
	settings: CompilerSettings,
}

impl AppOptions {
	/// Options mounting at the element matched by `el`
	pub fn new(el: impl Into<String>) -> Self {
		Self {
			el: el.into(),
			data: DataSource::Object(Object::new()),
			methods: IndexMap::new(),
			computed: IndexMap::new(),
			watch: Vec::new(),
			settings: CompilerSettings::default(),
		}
	}

	/// Use `data` as the data graph; it is observed in place
	pub fn data(mut self, data: Object) -> Self {
		self.data = DataSource::Object(data);
		self
	}

	/// Convert a JSON object into the data graph at mount time
	pub fn data_json(mut self, json: serde_json::Value) -> Self {
		self.data = DataSource::Json(json);
		self
	}

	/// Register a method; a later registration under the same name wins
	pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
	where
		F: Fn(&ViewModel) -> Result<(), BoxError> + 'static,
	{
		let name = name.into();
		if self.methods.insert(name.clone(), Rc::new(method)).is_some() {
			tracing::warn!(method = %name, "method registered twice, keeping the last one");
		}
		self
	}

	/// Register a computed property
	pub fn computed<F>(mut self, name: impl Into<String>, getter: F) -> Self
	where
		F: Fn(&ViewModel) -> weft_reactive::Result<Value> + 'static,
	{
		let name = name.into();
		if self.computed.insert(name.clone(), Rc::new(getter)).is_some() {
			tracing::warn!(computed = %name, "computed property registered twice, keeping the last one");
		}
		self
	}

	/// Watch a dotted path; the callback does not run for the initial value
	pub fn watch<F>(mut self, path: impl Into<String>, callback: F) -> Self
	where
		F: Fn(&ViewModel, &Value) -> Result<(), BoxError> + 'static,
	{
		let callback: WatchFn = Rc::new(callback);
		self.watch.push((path.into(), callback));
		self
	}

	/// Override the compiler settings
	pub fn settings(mut self, settings: CompilerSettings) -> Self {
		self.settings = settings;
		self
	}
}

impl fmt::Debug for AppOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AppOptions")
			.field("el", &self.el)
			.field("methods", &self.methods.keys().collect::<Vec<_>>())
			.field("computed", &self.computed.keys().collect::<Vec<_>>())
			.field("watch", &self.watch.iter().map(|(p, _)| p).collect::<Vec<_>>())
			.field("settings", &self.settings)
			.finish()
	}
}

/// A mounted application
#[derive(Debug)]
pub struct App {
	vm: ViewModel,
	root: Node,
	watchers: Vec<Rc<Watcher>>,
	report: CompileReport,
}

impl App {
	/// Build the view model, observe the data and compile the mount target
	pub fn mount(document: &Document, options: AppOptions) -> Result<Self, PagesError> {
		let AppOptions {
			el,
			data,
			methods,
			computed,
			watch,
			settings,
		} = options;

		let data = match data {
			DataSource::Object(object) => object,
			DataSource::Json(json) => Object::from_json(json)?,
		};
		warn_on_collisions(&data, &methods, &computed);
		let vm = ViewModel::with_parts(data, methods, computed);
		let observed = observe(vm.data());

		let mut watchers = Vec::with_capacity(watch.len());
		for (expression, callback) in watch {
			let path = Path::parse(&expression)?;
			let context = vm.clone();
			let watcher = Watcher::new(Rc::new(vm.clone()), path, move |value| {
				callback(&context, value).map_err(ReactiveError::callback)
			})?;
			watchers.push(watcher);
		}

		let root = document
			.query_selector(&el)?
			.ok_or_else(|| PagesError::MountTargetNotFound(el.clone()))?;
		let report = Compiler::new(settings)?.compile(&root, &vm)?;

		tracing::debug!(
			el = %el,
			observed,
			watch = watchers.len(),
			bindings = report.watchers.len(),
			"mounted app"
		);
		Ok(Self {
			vm,
			root,
			watchers,
			report,
		})
	}

	/// The view model
	pub fn vm(&self) -> &ViewModel {
		&self.vm
	}

	/// The mount target
	pub fn root(&self) -> &Node {
		&self.root
	}

	/// Watchers created from watch entries
	pub fn watchers(&self) -> &[Rc<Watcher>] {
		&self.watchers
	}

	/// The compilation report of the mount target
	pub fn report(&self) -> &CompileReport {
		&self.report
	}
}

fn warn_on_collisions(data: &Object, methods: &IndexMap<String, MethodFn>, computed: &IndexMap<String, ComputedFn>) {
	for name in computed.keys().filter(|k| data.contains_key(k)) {
		tracing::warn!(name = %name, "computed property shadows a data key");
	}
	for name in methods.keys() {
		if data.contains_key(name) || computed.contains_key(name) {
			tracing::warn!(name = %name, "method name collides with a data key or computed property");
		}
	}
}
