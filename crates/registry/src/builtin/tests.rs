use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use quire_keymap::Keymap;
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::builtins::{FileSave, LayoutToggleSide, NAMES, ViewRefresh};
use crate::{ActionBus, ActionRegistry, HookType};

fn registry() -> ActionRegistry {
	ActionRegistry::new(ActionBus::new(), Arc::new(Keymap::new()))
}

crate::builtin_action!(MoveCursor, "test.move-cursor", {
	description: "Test-only action with positional arguments",
	args: (u32, u32),
	output: String,
});

#[rstest]
#[case(None, vec![])]
#[case(Some(true), vec![json!(true)])]
fn optional_flag_encodes_positionally(#[case] flag: Option<bool>, #[case] expected: Vec<Value>) {
	assert_eq!(encode_args::<LayoutToggleSide>(&flag).unwrap(), expected);
	assert_eq!(decode_args::<LayoutToggleSide>(&expected).unwrap(), flag);
}

#[test]
fn tuple_args_spread_into_positions() {
	let encoded = encode_args::<MoveCursor>(&(3, 7)).unwrap();
	assert_eq!(encoded, vec![json!(3), json!(7)]);
	assert_eq!(decode_args::<MoveCursor>(&encoded).unwrap(), (3, 7));
}

#[test]
fn unit_args_accept_empty_list() {
	assert_eq!(encode_args::<ViewRefresh>(&()).unwrap(), Vec::<Value>::new());
	decode_args::<ViewRefresh>(&[]).unwrap();
}

#[test]
fn mismatched_args_are_rejected() {
	let err = decode_args::<MoveCursor>(&[json!("x")]).unwrap_err();
	assert!(matches!(err, ActionError::InvalidArgs { action: "test.move-cursor", .. }));
}

#[test]
fn typed_round_trip_through_registry() {
	let registry = registry();
	registry.register(Action::builtin::<MoveCursor, _>(|(line, col)| Ok(format!("{line}:{col}"))));
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	let _sub = registry.hook(HookType::BeforeRun, MoveCursor::NAME, move |payload| {
		sink.lock().push(payload.args().map(<[Value]>::to_vec));
	});

	let out = registry.builtin_handler::<MoveCursor>().call((1, 2)).unwrap();

	assert_eq!(out, Some("1:2".to_string()));
	assert_eq!(*seen.lock(), vec![Some(vec![json!(1), json!(2)])]);
}

#[test]
fn typed_handle_without_action_returns_none() {
	let registry = registry();
	assert_eq!(registry.builtin_handler::<FileSave>().call(()).unwrap(), None);
}

#[test]
fn untyped_replacement_with_wrong_output_is_reported() {
	let registry = registry();
	registry.register(Action::builtin::<FileSave, _>(|()| Ok(true)));
	assert_eq!(registry.builtin_handler::<FileSave>().call(()).unwrap(), Some(true));

	registry.register(Action::new(FileSave::NAME, |_| Ok(Some(json!("saved")))));
	let err = registry.builtin_handler::<FileSave>().call(()).unwrap_err();
	assert!(matches!(err, ActionError::InvalidOutput { action: "file.save", .. }));
}

#[test]
fn catalogue_names_are_unique() {
	let mut names = NAMES.to_vec();
	names.sort_unstable();
	names.dedup();
	assert_eq!(names.len(), NAMES.len());
}

crate::builtin_action!(OpenTabs, "test.open-tabs", {
	description: "Test-only action taking an optional path list",
	args: Option<Vec<String>>,
	output: (),
});

#[test]
fn empty_optional_sequence_collapses_to_none() {
	let encoded = encode_args::<OpenTabs>(&Some(Vec::new())).unwrap();
	assert_eq!(encoded, Vec::<Value>::new());
	assert_eq!(decode_args::<OpenTabs>(&encoded).unwrap(), None);

	let encoded = encode_args::<OpenTabs>(&Some(vec!["a.md".to_string()])).unwrap();
	assert_eq!(decode_args::<OpenTabs>(&encoded).unwrap(), Some(vec!["a.md".to_string()]));
}
