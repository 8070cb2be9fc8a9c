//! Template compiler
//!
//! [`Compiler::compile`] makes one synchronous pass over a mounted element:
//!
//! 1. every child of the root is moved into a detached fragment;
//! 2. the fragment is walked depth-first; text nodes are checked for a
//!    placeholder, elements for directive attributes;
//! 3. the processed fragment is reattached to the root in one operation.
//!
//! Each binding gets its own [`Watcher`]. The compiler never tracks reads of
//! its own: initial values are read untracked, so only watchers subscribe.

use std::rc::Rc;

use weft_dom::{EventType, Node, NodeType};
use weft_reactive::{Path, Scope, Value, Watcher, untracked};

use crate::app::ViewModel;
use crate::directive::Directive;
use crate::error::CompileError;
use crate::interpolation::Interpolation;
use crate::settings::{CompilerSettings, UnknownDirectivePolicy};

/// What a compilation pass produced
#[derive(Debug, Default)]
pub struct CompileReport {
	/// Watchers created for bindings, in document order
	pub watchers: Vec<Rc<Watcher>>,
	/// Number of bound text placeholders
	pub text_bindings: usize,
	/// Number of `model` directives
	pub model_bindings: usize,
	/// Number of `on:click` directives
	pub click_bindings: usize,
	/// Unrecognized directive attribute names, prefix included
	pub unknown_directives: Vec<String>,
}

/// Binds a node tree to a view model
#[derive(Debug, Clone)]
pub struct Compiler {
	settings: CompilerSettings,
	interpolation: Interpolation,
}

impl Compiler {
	/// Validate `settings` and build a compiler
	pub fn new(settings: CompilerSettings) -> Result<Self, CompileError> {
		settings.validate()?;
		let interpolation = Interpolation::from_settings(&settings)?;
		Ok(Self {
			settings,
			interpolation,
		})
	}

	/// The settings in effect
	pub fn settings(&self) -> &CompilerSettings {
		&self.settings
	}

	/// Compile the children of `root` against `vm`
	///
	/// The children are reattached even when compilation fails part way; the
	/// bindings made before the failure stay active.
	pub fn compile(&self, root: &Node, vm: &ViewModel) -> Result<CompileReport, CompileError> {
		let fragment = Node::fragment();
		for child in root.take_children() {
			fragment.append_child(&child)?;
		}

		let mut report = CompileReport::default();
		let walked = self.walk(&fragment, vm, &mut report);
		root.append_child(&fragment)?;
		walked?;

		tracing::debug!(
			watchers = report.watchers.len(),
			text = report.text_bindings,
			model = report.model_bindings,
			click = report.click_bindings,
			unknown = report.unknown_directives.len(),
			"compiled template"
		);
		Ok(report)
	}

	fn walk(&self, parent: &Node, vm: &ViewModel, report: &mut CompileReport) -> Result<(), CompileError> {
		for node in parent.children() {
			match node.node_type() {
				NodeType::Text => self.compile_text(&node, vm, report)?,
				NodeType::Element => self.compile_element(&node, vm, report)?,
				NodeType::Comment | NodeType::Fragment => {}
			}
			if node.child_count() > 0 {
				self.walk(&node, vm, report)?;
			}
		}
		Ok(())
	}

	fn compile_text(&self, node: &Node, vm: &ViewModel, report: &mut CompileReport) -> Result<(), CompileError> {
		let text = node.text_content();
		let Some(expression) = self.interpolation.first_expression(&text) else {
			return Ok(());
		};
		let path = Path::parse(expression)?;
		let scope: Rc<dyn Scope> = Rc::new(vm.clone());

		let initial = untracked(|| path.resolve(scope.as_ref()))?;
		node.set_text_content(&initial.to_string());

		let target = node.clone();
		let watcher = Watcher::new(scope, path, move |value| {
			target.set_text_content(&value.to_string());
			Ok(())
		})?;
		report.watchers.push(watcher);
		report.text_bindings += 1;
		Ok(())
	}

	fn compile_element(&self, node: &Node, vm: &ViewModel, report: &mut CompileReport) -> Result<(), CompileError> {
		for (name, value) in node.attributes() {
			let Some(directive) = Directive::parse(&name, &self.settings.directive_prefix) else {
				continue;
			};
			match directive {
				Directive::Model => self.bind_model(node, &name, &value, vm, report)?,
				Directive::On(event) => bind_event(node, event, &value, vm, report),
				Directive::Unknown(_) => self.unknown_directive(node, &name, report)?,
			}
		}
		Ok(())
	}

	fn bind_model(
		&self,
		node: &Node,
		attribute: &str,
		expression: &str,
		vm: &ViewModel,
		report: &mut CompileReport,
	) -> Result<(), CompileError> {
		let path = Path::parse(expression)?;
		let scope: Rc<dyn Scope> = Rc::new(vm.clone());

		let target = node.clone();
		let watcher = Watcher::new(scope.clone(), path.clone(), move |value| {
			target.set_value(value.to_string());
			Ok(())
		})?;
		node.set_value(watcher.value().to_string());

		node.add_event_listener(EventType::Input, move |event| {
			let input = Value::from(event.target().value());
			let current = untracked(|| path.resolve(scope.as_ref()))?;
			if input != current {
				path.assign(scope.as_ref(), input)?;
			}
			Ok(())
		});
		node.remove_attribute(attribute);

		report.watchers.push(watcher);
		report.model_bindings += 1;
		Ok(())
	}

	fn unknown_directive(&self, node: &Node, attribute: &str, report: &mut CompileReport) -> Result<(), CompileError> {
		let tag = node.tag_name().unwrap_or_default();
		match self.settings.unknown_directive {
			UnknownDirectivePolicy::Ignore => {
				tracing::debug!(directive = attribute, tag, "ignoring unknown directive");
			}
			UnknownDirectivePolicy::Warn => {
				tracing::warn!(directive = attribute, tag, "unknown directive left on element");
			}
			UnknownDirectivePolicy::Error => {
				return Err(CompileError::UnknownDirective {
					name: attribute.to_string(),
					tag: tag.to_string(),
				});
			}
		}
		report.unknown_directives.push(attribute.to_string());
		Ok(())
	}
}

fn bind_event(node: &Node, event: EventType, method: &str, vm: &ViewModel, report: &mut CompileReport) {
	let method = method.trim().to_string();
	if !vm.has_method(&method) {
		tracing::warn!(method = %method, event = %event, "handler refers to an undefined method");
	}
	let context = vm.clone();
	node.add_event_listener(event, move |_| context.call(&method).map_err(Into::into));
	report.click_bindings += 1;
}
