//! Action descriptor.

use std::fmt;
use std::sync::Arc;

use quire_keymap::{Chord, Enablement};
use serde_json::Value;

use crate::ActionError;

/// Positional call arguments.
pub type ActionArgs = Vec<Value>;

/// Outcome of one handler invocation. `Ok(None)` is an action that produced no value.
pub type ActionResult = Result<Option<Value>, ActionError>;

/// Type-erased action handler.
pub type ActionFn = Arc<dyn Fn(&[Value]) -> ActionResult + Send + Sync>;

/// Zero-argument predicate gating an action's handler; shared with the keybinding layer as
/// the binding's enablement check.
pub type Guard = Enablement;

/// A named, invokable operation.
///
/// Actions are immutable once registered. To change one, register a replacement under the
/// same name.
#[derive(Clone)]
pub struct Action {
	pub name: String,
	pub handler: ActionFn,
	/// Shortcut keys. `None` or an empty chord means the action has no keybinding.
	pub keys: Option<Chord>,
	pub guard: Option<Guard>,
}

impl Action {
	pub fn new<F>(name: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&[Value]) -> ActionResult + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			handler: Arc::new(handler),
			keys: None,
			guard: None,
		}
	}

	pub fn with_keys(mut self, keys: Chord) -> Self {
		self.keys = Some(keys);
		self
	}

	pub fn with_guard<F>(mut self, guard: F) -> Self
	where
		F: Fn() -> bool + Send + Sync + 'static,
	{
		self.guard = Some(Arc::new(guard));
		self
	}

	/// Whether registering this action installs a keybinding.
	pub fn has_keybinding(&self) -> bool {
		self.keys.as_ref().is_some_and(|keys| !keys.is_empty())
	}

	/// Evaluates the guard. Unguarded actions are always enabled.
	pub fn is_enabled(&self) -> bool {
		self.guard.as_ref().is_none_or(|guard| guard())
	}

	/// Runs the handler unconditionally, bypassing guard and notifications.
	pub(crate) fn invoke(&self, args: &[Value]) -> ActionResult {
		(self.handler)(args)
	}
}

impl fmt::Debug for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Action")
			.field("name", &self.name)
			.field("keys", &self.keys.as_ref().map(ToString::to_string))
			.field("guard", &self.guard.is_some())
			.finish_non_exhaustive()
	}
}
