//! Keybinding layer for quire.
//!
//! Provides:
//! - [`KeyToken`] and [`Chord`]: shortcut keys as named tokens (`"ctrl"`, `"s"`) or raw key codes
//! - [`Command`]: a keybinding entry pairing a chord with a callback and an enablement check
//! - [`CommandRegistrar`]: the seam through which action registries install and remove bindings
//! - [`Keymap`]: the default in-memory registrar, resolving pressed chords to commands

pub use command::{Command, CommandHandler, CommandRegistrar, Enablement};
pub use key::{Chord, ChordParseError, KeyToken};
pub use keymap::Keymap;

mod command;
mod key;
mod keymap;
