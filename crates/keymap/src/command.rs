//! Keybinding entries and the registrar seam.

use std::fmt;
use std::sync::Arc;

use crate::Chord;

/// Callback run when a command's chord is pressed.
pub type CommandHandler = Arc<dyn Fn() + Send + Sync>;

/// Zero-argument predicate deciding whether a command is currently enabled.
pub type Enablement = Arc<dyn Fn() -> bool + Send + Sync>;

/// A keybinding: a chord bound to a callback, optionally gated by `when`.
#[derive(Clone)]
pub struct Command {
	/// Stable identifier, unique within a registrar.
	pub id: String,
	pub keys: Chord,
	pub handler: CommandHandler,
	pub when: Option<Enablement>,
}

impl Command {
	pub fn new(id: impl Into<String>, keys: Chord, handler: CommandHandler) -> Self {
		Self {
			id: id.into(),
			keys,
			handler,
			when: None,
		}
	}

	pub fn with_when(mut self, when: Enablement) -> Self {
		self.when = Some(when);
		self
	}

	/// Evaluates the enablement check. Commands without one are always enabled.
	pub fn is_enabled(&self) -> bool {
		self.when.as_ref().is_none_or(|when| when())
	}
}

impl fmt::Debug for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Command")
			.field("id", &self.id)
			.field("keys", &self.keys.to_string())
			.field("when", &self.when.is_some())
			.finish_non_exhaustive()
	}
}

/// Owner of keybinding entries.
///
/// Action registries install a command whenever an action with shortcut keys is
/// registered and remove it when the action goes away.
pub trait CommandRegistrar: Send + Sync {
	/// Installs `command`, replacing any command with the same id.
	fn register_command(&self, command: Command);

	/// Removes the command `id`. Unknown ids are ignored.
	fn remove_command(&self, id: &str);
}
