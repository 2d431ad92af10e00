//! The extension runtime: one bus, one keymap, one action registry.

use std::sync::Arc;

use quire_keymap::Keymap;

use crate::{ActionBus, ActionRegistry, ExtensionsConfig};


/// Extensibility runtime owned by the application.
///
/// Created at startup and torn down with [`Extensions::shutdown`]. Tests build their own
/// instance with [`Extensions::default`] instead of sharing global state.
#[derive(Debug)]
pub struct Extensions {
	bus: ActionBus,
	keymap: Arc<Keymap>,
	registry: ActionRegistry,
}

impl Default for Extensions {
	fn default() -> Self {
		Self::new(ExtensionsConfig::default())
	}
}

impl Extensions {
	pub fn new(config: ExtensionsConfig) -> Self {
		let bus = ActionBus::new();
		let keymap = Arc::new(Keymap::new());
		let registry = ActionRegistry::new(bus.clone(), keymap.clone()).with_keys(config.keys);
		tracing::debug!("extensions runtime started");
		Self {
			bus,
			keymap,
			registry,
		}
	}

	pub fn bus(&self) -> &ActionBus {
		&self.bus
	}

	pub fn keymap(&self) -> &Keymap {
		&self.keymap
	}

	pub fn registry(&self) -> &ActionRegistry {
		&self.registry
	}

	/// Removes every action (and with it every keybinding) and drops all bus subscriptions.
	pub fn shutdown(&self) {
		let names = self.registry.names();
		for name in &names {
			self.registry.remove(name);
		}
		self.bus.clear();
		tracing::debug!(actions = names.len(), "extensions runtime shut down");
	}
}
