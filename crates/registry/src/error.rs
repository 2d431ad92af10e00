/// Failure raised while invoking an action.
///
/// Registry operations themselves never fail; only handlers and the typed conversion
/// layer around built-in actions produce these.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
	/// The handler reported a failure.
	#[error("action failed: {0}")]
	Failed(String),

	/// Call arguments did not match the built-in action's signature.
	#[error("invalid arguments for {action}: {source}")]
	InvalidArgs {
		action: &'static str,
		#[source]
		source: serde_json::Error,
	},

	/// The handler's return value did not match the built-in action's signature.
	#[error("invalid output from {action}: {source}")]
	InvalidOutput {
		action: &'static str,
		#[source]
		source: serde_json::Error,
	},
}

impl ActionError {
	pub fn failed(message: impl std::fmt::Display) -> Self {
		Self::Failed(message.to_string())
	}
}
