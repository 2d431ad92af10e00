use std::sync::Arc;

use parking_lot::RwLock;

use crate::{Chord, Command, CommandRegistrar};


/// In-memory [`CommandRegistrar`] that resolves pressed chords to commands.
///
/// When several commands share a chord, the most recently registered enabled one wins;
/// disabled commands fall through to earlier bindings.
#[derive(Debug, Default)]
pub struct Keymap {
	commands: RwLock<Vec<Arc<Command>>>,
}

impl Keymap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn command(&self, id: &str) -> Option<Arc<Command>> {
		self.commands.read().iter().find(|c| c.id == id).cloned()
	}

	/// Ids of all installed commands, oldest first.
	pub fn ids(&self) -> Vec<String> {
		self.commands.read().iter().map(|c| c.id.clone()).collect()
	}

	pub fn len(&self) -> usize {
		self.commands.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.read().is_empty()
	}

	/// Runs the command bound to `chord`, if any is enabled.
	///
	/// Returns `true` if a handler ran.
	pub fn dispatch(&self, chord: &Chord) -> bool {
		let candidates: Vec<Arc<Command>> = self
			.commands
			.read()
			.iter()
			.rev()
			.filter(|c| c.keys.matches(chord))
			.cloned()
			.collect();

		let Some(command) = candidates.into_iter().find(|c| c.is_enabled()) else {
			tracing::trace!(chord = %chord, "keymap.dispatch: no enabled binding");
			return false;
		};

		tracing::debug!(id = %command.id, chord = %chord, "keymap.dispatch");
		(command.handler)();
		true
	}

	/// Runs the command `id` directly, honouring its enablement check.
	pub fn run(&self, id: &str) -> bool {
		match self.command(id) {
			Some(command) if command.is_enabled() => {
				(command.handler)();
				true
			}
			_ => false,
		}
	}
}

impl CommandRegistrar for Keymap {
	fn register_command(&self, command: Command) {
		let mut commands = self.commands.write();
		commands.retain(|c| c.id != command.id);
		if let Some(shadowed) = commands.iter().find(|c| c.keys.matches(&command.keys)) {
			tracing::debug!(
				id = %command.id,
				shadowed = %shadowed.id,
				keys = %command.keys,
				"keymap: chord already bound"
			);
		}
		tracing::debug!(id = %command.id, keys = %command.keys, "keymap.register");
		commands.push(Arc::new(command));
	}

	fn remove_command(&self, id: &str) {
		let mut commands = self.commands.write();
		let before = commands.len();
		commands.retain(|c| c.id != id);
		if commands.len() != before {
			tracing::debug!(id, "keymap.remove");
		}
	}
}
