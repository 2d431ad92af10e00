//! Compile-time checked signatures for built-in actions.
//!
//! A [`BuiltinAction`] pins an action name to typed arguments and output. Values cross the
//! registry's type-erased boundary as JSON:
//! - arguments serialize to the positional list: `()` and `None` become no arguments, a
//!   sequence becomes one argument per element, anything else a single argument;
//! - decoding tries the lone argument (or null when there are none) first, then the whole
//!   list as a sequence.
//!
//! The mapping is lossy where these shapes overlap: an empty argument list decodes as
//! null first, so an `Option<Vec<_>>` argument of `Some(vec![])` arrives as `None`.
//! Built-ins needing that distinction should take a non-optional or wrapped argument.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Action, ActionError, ActionHandle};

#[cfg(test)]
mod tests;

/// Signature of a built-in action.
pub trait BuiltinAction: 'static {
	/// Registry name of the action.
	const NAME: &'static str;
	type Args: Serialize + DeserializeOwned;
	type Output: Serialize + DeserializeOwned;
}

pub(crate) fn encode_args<A: BuiltinAction>(args: &A::Args) -> Result<Vec<Value>, ActionError> {
	let value = serde_json::to_value(args).map_err(|source| ActionError::InvalidArgs {
		action: A::NAME,
		source,
	})?;
	Ok(match value {
		Value::Null => Vec::new(),
		Value::Array(items) => items,
		other => vec![other],
	})
}

pub(crate) fn decode_args<A: BuiltinAction>(args: &[Value]) -> Result<A::Args, ActionError> {
	let first = match args {
		[] => Some(Value::Null),
		[single] => Some(single.clone()),
		_ => None,
	};
	if let Some(Ok(decoded)) = first.map(serde_json::from_value) {
		return Ok(decoded);
	}
	serde_json::from_value(Value::Array(args.to_vec())).map_err(|source| ActionError::InvalidArgs {
		action: A::NAME,
		source,
	})
}

pub(crate) fn encode_output<A: BuiltinAction>(output: &A::Output) -> Result<Option<Value>, ActionError> {
	match serde_json::to_value(output) {
		Ok(Value::Null) => Ok(None),
		Ok(value) => Ok(Some(value)),
		Err(source) => Err(ActionError::InvalidOutput {
			action: A::NAME,
			source,
		}),
	}
}

pub(crate) fn decode_output<A: BuiltinAction>(output: Value) -> Result<A::Output, ActionError> {
	serde_json::from_value(output).map_err(|source| ActionError::InvalidOutput {
		action: A::NAME,
		source,
	})
}

impl Action {
	/// Builds an action for the built-in `A` from a typed handler.
	pub fn builtin<A, F>(handler: F) -> Self
	where
		A: BuiltinAction,
		F: Fn(A::Args) -> Result<A::Output, ActionError> + Send + Sync + 'static,
	{
		Action::new(A::NAME, move |args| {
			let args = decode_args::<A>(args)?;
			let output = handler(args)?;
			encode_output::<A>(&output)
		})
	}
}

/// Dispatch handle for a built-in action, with typed arguments and output.
pub struct TypedHandle<A: BuiltinAction> {
	inner: ActionHandle,
	_action: PhantomData<fn() -> A>,
}

impl<A: BuiltinAction> TypedHandle<A> {
	pub(crate) fn new(inner: ActionHandle) -> Self {
		Self {
			inner,
			_action: PhantomData,
		}
	}

	/// Calls the action. Returns `Ok(None)` when no handler ran, or when the output
	/// serializes to nothing (`()` and `None` outputs).
	///
	/// The output is decoded even if the name was re-registered with an untyped handler;
	/// a mismatched result surfaces as [`ActionError::InvalidOutput`] after both
	/// notifications have fired.
	pub fn call(&self, args: A::Args) -> Result<Option<A::Output>, ActionError> {
		let args = encode_args::<A>(&args)?;
		match self.inner.call(&args)? {
			Some(value) => decode_output::<A>(value).map(Some),
			None => Ok(None),
		}
	}

	/// The underlying untyped handle.
	pub fn erased(&self) -> &ActionHandle {
		&self.inner
	}
}

impl<A: BuiltinAction> Clone for TypedHandle<A> {
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl<A: BuiltinAction> fmt::Debug for TypedHandle<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("TypedHandle").field(&A::NAME).finish()
	}
}

impl crate::ActionRegistry {
	/// Returns a typed dispatch handle for the built-in `A`.
	pub fn builtin_handler<A: BuiltinAction>(&self) -> TypedHandle<A> {
		TypedHandle::new(self.get_handler(A::NAME))
	}
}
