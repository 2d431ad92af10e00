#![allow(dead_code)]

//! Shared fixtures for registry integration tests.

use std::sync::Arc;

use parking_lot::Mutex;
use quire_keymap::{Command, CommandRegistrar};
use quire_registry::{ActionBus, ActionPayload, ActionRegistry, HookType};

/// Registrar that records every call instead of binding keys.
#[derive(Default)]
pub struct RecordingRegistrar {
	pub registered: Mutex<Vec<String>>,
	pub removed: Mutex<Vec<String>>,
}

impl CommandRegistrar for RecordingRegistrar {
	fn register_command(&self, command: Command) {
		self.registered.lock().push(command.id);
	}

	fn remove_command(&self, id: &str) {
		self.removed.lock().push(id.to_string());
	}
}

pub struct Fixture {
	pub registry: ActionRegistry,
	pub registrar: Arc<RecordingRegistrar>,
}

pub fn fixture() -> Fixture {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
	let registrar = Arc::new(RecordingRegistrar::default());
	let registry = ActionRegistry::new(ActionBus::new(), registrar.clone());
	Fixture { registry, registrar }
}

/// Lifecycle notifications observed for one action, in arrival order.
pub type Observed = Arc<Mutex<Vec<(HookType, ActionPayload)>>>;

pub fn observe(registry: &ActionRegistry, name: &str) -> Observed {
	let observed: Observed = Arc::default();
	for kind in [HookType::BeforeRun, HookType::AfterRun] {
		let sink = observed.clone();
		drop(registry.hook(kind, name, move |payload| sink.lock().push((kind, payload.clone()))));
	}
	observed
}
