//! Action registry for quire plugins.
//!
//! Plugins register named [`Action`]s, optionally bound to a shortcut [`Chord`] and gated
//! by a guard. Callers never invoke an action's handler directly: they obtain a stable
//! [`ActionHandle`] for a name, which resolves the live action on every call and brackets
//! the invocation with `action.before-run.<name>` / `action.after-run.<name>` notifications
//! on the [`ActionBus`]. Other plugins observe or intercept actions through those topics
//! (see [`ActionRegistry::hook`]) without touching the action itself.
//!
//! Built-in actions with known signatures are declared through [`BuiltinAction`] and called
//! through a [`TypedHandle`]; everything else goes through the type-erased [`Value`] path.
//!
//! [`Chord`]: quire_keymap::Chord

pub use action::{Action, ActionArgs, ActionFn, ActionResult, Guard};
pub use builtin::{BuiltinAction, TypedHandle};
pub use config::{ConfigError, ExtensionsConfig, KeysConfig};
pub use dispatch::{ActionBus, ActionHandle, ActionPayload, HookType, topic};
pub use error::ActionError;
pub use registry::ActionRegistry;
pub use runtime::Extensions;
pub use serde_json::Value;

mod action;
mod builtin;
pub mod builtins;
mod config;
mod dispatch;
mod error;
mod macros;
mod registry;
mod runtime;
