//! Built-in action declaration macro.

/// Declares a built-in action signature.
///
/// ```ignore
/// builtin_action!(LayoutToggleSide, "layout.toggle-side", {
///     description: "Show or hide the side bar",
///     args: Option<bool>,
///     output: (),
/// });
/// ```
#[macro_export]
macro_rules! builtin_action {
	($ty:ident, $name:literal, {
		description: $desc:literal,
		args: $args:ty,
		output: $output:ty
		$(,)?
	}) => {
		#[doc = $desc]
		#[doc = ""]
		#[doc = concat!("Registered as `", $name, "`.")]
		#[derive(Debug, Clone, Copy, PartialEq, Eq)]
		pub struct $ty;

		impl $crate::BuiltinAction for $ty {
			const NAME: &'static str = $name;
			type Args = $args;
			type Output = $output;
		}
	};
}
