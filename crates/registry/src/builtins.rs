//! Signatures of the editor's built-in actions.
//!
//! Only names and types live here; the plugins owning each feature register handlers
//! with [`Action::builtin`](crate::Action::builtin).

use crate::builtin_action;

builtin_action!(ViewRefresh, "view.refresh", {
	description: "Re-render the preview of the current document",
	args: (),
	output: (),
});

builtin_action!(LayoutToggleSide, "layout.toggle-side", {
	description: "Show or hide the side bar; `None` toggles",
	args: Option<bool>,
	output: (),
});

builtin_action!(LayoutToggleView, "layout.toggle-view", {
	description: "Show or hide the preview pane; `None` toggles",
	args: Option<bool>,
	output: (),
});

builtin_action!(LayoutToggleXterm, "layout.toggle-xterm", {
	description: "Show or hide the embedded terminal; `None` toggles",
	args: Option<bool>,
	output: (),
});

builtin_action!(EditorToggleWrap, "editor.toggle-wrap", {
	description: "Toggle soft wrapping in the editor",
	args: (),
	output: (),
});

builtin_action!(FileSave, "file.save", {
	description: "Save the current document; yields whether anything was written",
	args: (),
	output: bool,
});

/// Names of every built-in action.
pub const NAMES: &[&str] = &[
	<ViewRefresh as crate::BuiltinAction>::NAME,
	<LayoutToggleSide as crate::BuiltinAction>::NAME,
	<LayoutToggleView as crate::BuiltinAction>::NAME,
	<LayoutToggleXterm as crate::BuiltinAction>::NAME,
	<EditorToggleWrap as crate::BuiltinAction>::NAME,
	<FileSave as crate::BuiltinAction>::NAME,
];
