//! Name-keyed action table and its keybinding side effects.

use std::sync::Arc;

use parking_lot::RwLock;
use quire_bus::Subscription;
use quire_keymap::{Command, CommandHandler, CommandRegistrar};
use rustc_hash::FxHashMap as HashMap;

use crate::dispatch::{ActionBus, ActionHandle, ActionPayload, HookType, topic};
use crate::{Action, KeysConfig};


/// Live actions by name.
#[derive(Default)]
pub(crate) struct ActionTable {
	actions: RwLock<HashMap<Box<str>, Arc<Action>>>,
}

impl ActionTable {
	pub(crate) fn get(&self, name: &str) -> Option<Arc<Action>> {
		self.actions.read().get(name).cloned()
	}

	fn insert(&self, action: Arc<Action>) -> Option<Arc<Action>> {
		self.actions
			.write()
			.insert(Box::from(action.name.as_str()), action)
	}

	fn remove(&self, name: &str) -> Option<Arc<Action>> {
		self.actions.write().remove(name)
	}
}

/// Registry of plugin actions.
///
/// Every operation is total: duplicate names replace (last write wins), and removing or
/// looking up an unknown name is a no-op. Actions that carry shortcut keys are mirrored
/// into the [`CommandRegistrar`] for exactly as long as they stay registered.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct ActionRegistry {
	table: Arc<ActionTable>,
	bus: ActionBus,
	commands: Arc<dyn CommandRegistrar>,
	keys: Arc<KeysConfig>,
}

impl ActionRegistry {
	pub fn new(bus: ActionBus, commands: Arc<dyn CommandRegistrar>) -> Self {
		Self {
			table: Arc::default(),
			bus,
			commands,
			keys: Arc::default(),
		}
	}

	/// Applies user key overrides to every subsequent registration.
	pub fn with_keys(mut self, keys: KeysConfig) -> Self {
		self.keys = Arc::new(keys);
		self
	}

	pub fn bus(&self) -> &ActionBus {
		&self.bus
	}

	/// Stores `action` under its name, replacing any previous entry.
	///
	/// If the action has shortcut keys (after applying key overrides), a keybinding is
	/// installed pointing at [`Self::get_handler`] for the name, gated by the action's guard.
	/// If the replaced action had a keybinding and the new one does not, that binding is
	/// removed.
	pub fn register(&self, mut action: Action) -> Arc<Action> {
		if let Some(keys) = self.keys.get(&action.name) {
			tracing::debug!(action = %action.name, keys = %keys, "key override applied");
			action.keys = Some(keys.clone());
		}
		tracing::debug!(action = %action.name, "action.register");

		let action = Arc::new(action);
		let previous = self.table.insert(action.clone());

		if action.has_keybinding() {
			self.commands.register_command(self.command_for(&action));
		} else if previous.is_some_and(|prev| prev.has_keybinding()) {
			self.commands.remove_command(&action.name);
		}
		action
	}

	/// Returns the live action registered under `name`.
	pub fn get(&self, name: &str) -> Option<Arc<Action>> {
		tracing::debug!(action = name, "action.get");
		self.table.get(name)
	}

	/// Removes the action `name` and its keybinding, if any. Unknown names are ignored.
	pub fn remove(&self, name: &str) {
		let Some(action) = self.table.remove(name) else {
			return;
		};
		tracing::debug!(action = name, "action.remove");
		if action.has_keybinding() {
			self.commands.remove_command(name);
		}
	}

	/// Returns a stable dispatch handle for `name`.
	///
	/// The handle does not require `name` to be registered, now or ever.
	pub fn get_handler(&self, name: &str) -> ActionHandle {
		tracing::debug!(action = name, "action.get_handler");
		ActionHandle::new(name, Arc::downgrade(&self.table), self.bus.clone())
	}

	/// Subscribes to one lifecycle point of the action `name`.
	///
	/// The listener fires for every call through any handle for `name`, whether or not the
	/// action is registered. Call [`Subscription::unsubscribe`] to detach.
	pub fn hook<F>(&self, kind: HookType, name: &str, listener: F) -> Subscription<ActionPayload>
	where
		F: Fn(&ActionPayload) + Send + Sync + 'static,
	{
		self.bus.on(&topic(kind, name), listener)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.table.actions.read().contains_key(name)
	}

	/// Names of all registered actions, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self
			.table
			.actions
			.read()
			.keys()
			.map(|name| name.to_string())
			.collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.table.actions.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.actions.read().is_empty()
	}

	fn command_for(&self, action: &Action) -> Command {
		let handle = self.get_handler(&action.name);
		let handler: CommandHandler = Arc::new(move || {
			if let Err(error) = handle.call(&[]) {
				tracing::warn!(action = %handle.name(), %error, "keybinding action failed");
			}
		});

		let command = Command::new(action.name.clone(), action.keys.clone().unwrap_or_default(), handler);
		match &action.guard {
			Some(guard) => command.with_when(guard.clone()),
			None => command,
		}
	}
}

impl std::fmt::Debug for ActionRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActionRegistry")
			.field("actions", &self.names())
			.finish_non_exhaustive()
	}
}
