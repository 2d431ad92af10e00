//! Dispatch handles and the lifecycle notification protocol.
//!
//! Every call through an [`ActionHandle`] publishes, in order:
//! 1. `action.before-run.<name>` carrying the call arguments,
//! 2. (the handler, if the action exists and its guard passes),
//! 3. `action.after-run.<name>` carrying the handler's result, or nothing.
//!
//! Both notifications fire whether or not an action is registered under the name and
//! whether or not its guard allowed the handler to run. A handler that returns an error
//! aborts the call before the after-run notification.

use std::fmt;
use std::sync::{Arc, Weak};

use quire_bus::EventBus;
use serde_json::Value;

use crate::ActionResult;
use crate::registry::ActionTable;


/// Bus carrying action lifecycle notifications.
pub type ActionBus = EventBus<ActionPayload>;

/// Topic prefix shared by every action lifecycle notification.
pub const TOPIC_PREFIX: &str = "action";

/// Lifecycle point of an action call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookType {
	BeforeRun,
	AfterRun,
}

impl HookType {
	pub fn as_str(&self) -> &'static str {
		match self {
			HookType::BeforeRun => "before-run",
			HookType::AfterRun => "after-run",
		}
	}
}

impl fmt::Display for HookType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Bus topic for `kind` notifications of the action `name`.
pub fn topic(kind: HookType, name: &str) -> String {
	format!("{TOPIC_PREFIX}.{}.{name}", kind.as_str())
}

/// Payload published on action lifecycle topics.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
	/// Arguments of the call about to run.
	BeforeRun(Vec<Value>),
	/// Result of the call; `None` when no handler ran or it produced nothing.
	AfterRun(Option<Value>),
}

impl ActionPayload {
	pub fn kind(&self) -> HookType {
		match self {
			ActionPayload::BeforeRun(_) => HookType::BeforeRun,
			ActionPayload::AfterRun(_) => HookType::AfterRun,
		}
	}

	pub fn args(&self) -> Option<&[Value]> {
		match self {
			ActionPayload::BeforeRun(args) => Some(args),
			ActionPayload::AfterRun(_) => None,
		}
	}

	pub fn result(&self) -> Option<&Value> {
		match self {
			ActionPayload::AfterRun(result) => result.as_ref(),
			ActionPayload::BeforeRun(_) => None,
		}
	}
}

/// Stable callable bound to an action name.
///
/// The handle looks the action up on every call, so it stays valid across
/// re-registration and removal, and may be created before the action exists. It keeps
/// only a weak link to the action table: once the owning registry is gone, calls still
/// publish both notifications but never run a handler.
#[derive(Clone)]
pub struct ActionHandle {
	name: Arc<str>,
	before_topic: Arc<str>,
	after_topic: Arc<str>,
	table: Weak<ActionTable>,
	bus: ActionBus,
}

impl ActionHandle {
	pub(crate) fn new(name: &str, table: Weak<ActionTable>, bus: ActionBus) -> Self {
		Self {
			name: Arc::from(name),
			before_topic: Arc::from(topic(HookType::BeforeRun, name)),
			after_topic: Arc::from(topic(HookType::AfterRun, name)),
			table,
			bus,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Invokes the action currently registered under this handle's name.
	///
	/// Returns `Ok(None)` if no action is registered or its guard rejected the call.
	pub fn call(&self, args: &[Value]) -> ActionResult {
		self.bus
			.emit(&self.before_topic, &ActionPayload::BeforeRun(args.to_vec()));

		let action = self.table.upgrade().and_then(|table| table.get(&self.name));
		let result = match action {
			Some(action) if action.is_enabled() => action.invoke(args)?,
			Some(_) => {
				tracing::trace!(action = %self.name, "guard rejected call");
				None
			}
			None => {
				tracing::trace!(action = %self.name, "no action registered");
				None
			}
		};

		self.bus
			.emit(&self.after_topic, &ActionPayload::AfterRun(result.clone()));
		Ok(result)
	}
}

impl fmt::Debug for ActionHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionHandle")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}
