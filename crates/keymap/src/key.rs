//! Key tokens and chords.
//!
//! A chord is written as `+`-separated segments, e.g. `"ctrl+shift+p"`. A segment of the
//! form `#<digits>` is a raw key code; anything else is a named key. Named keys compare
//! case-insensitively and chords compare independently of token order, so `"Shift+Ctrl+P"`
//! and `"ctrl+shift+p"` are the same binding.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;


/// Separator between chord segments.
pub const KEY_SEP: char = '+';

/// Prefix marking a raw key code segment.
pub const CODE_PREFIX: char = '#';

/// One shortcut key: either a key name or a raw key code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyToken {
	Code(u32),
	Named(String),
}

impl KeyToken {
	pub fn named(name: impl Into<String>) -> Self {
		Self::Named(name.into())
	}

	fn canonical(&self) -> String {
		match self {
			Self::Code(code) => format!("{CODE_PREFIX}{code}"),
			Self::Named(name) => name.to_ascii_lowercase(),
		}
	}
}

impl PartialEq for KeyToken {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Code(a), Self::Code(b)) => a == b,
			(Self::Named(a), Self::Named(b)) => a.eq_ignore_ascii_case(b),
			_ => false,
		}
	}
}

impl Eq for KeyToken {}

impl Hash for KeyToken {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.canonical().hash(state);
	}
}

impl fmt::Display for KeyToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Code(code) => write!(f, "{CODE_PREFIX}{code}"),
			Self::Named(name) => f.write_str(name),
		}
	}
}

impl From<&str> for KeyToken {
	fn from(name: &str) -> Self {
		Self::Named(name.to_string())
	}
}

impl From<u32> for KeyToken {
	fn from(code: u32) -> Self {
		Self::Code(code)
	}
}

/// Error produced when a chord string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChordParseError {
	#[error("empty chord")]
	Empty,
	#[error("empty key segment at position {position} in {input:?}")]
	EmptySegment { input: String, position: usize },
	#[error("invalid key code {segment:?} in {input:?}")]
	InvalidCode { input: String, segment: String },
	#[error("invalid key {key:?} at index {index}")]
	InvalidKey { key: String, index: usize },
}

/// Parses one chord segment: `#<digits>` is a key code, anything else a key name.
///
/// Returns `None` for a malformed code; callers build the error with their own context.
fn parse_segment(key: &str) -> Option<KeyToken> {
	match key.strip_prefix(CODE_PREFIX) {
		Some(digits) => digits.parse().ok().map(KeyToken::Code),
		None => Some(KeyToken::Named(key.to_string())),
	}
}

/// An ordered list of key tokens pressed together.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Chord(SmallVec<[KeyToken; 4]>);

impl Chord {
	pub fn new<I, T>(tokens: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<KeyToken>,
	{
		Self(tokens.into_iter().map(Into::into).collect())
	}

	/// Builds a chord from config-supplied tokens, applying the same segment rules as
	/// string chords: names must be non-empty and free of `+`, and `#<digits>` names
	/// become key codes.
	pub fn from_tokens(tokens: Vec<KeyToken>) -> Result<Self, ChordParseError> {
		tokens
			.into_iter()
			.enumerate()
			.map(|(index, token)| match token {
				KeyToken::Code(code) => Ok(KeyToken::Code(code)),
				KeyToken::Named(name) => {
					let key = name.trim();
					if key.is_empty() || key.contains(KEY_SEP) {
						return Err(ChordParseError::InvalidKey { key: name, index });
					}
					parse_segment(key).ok_or_else(|| ChordParseError::InvalidKey { key: name.clone(), index })
				}
			})
			.collect::<Result<SmallVec<_>, _>>()
			.map(Self)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn tokens(&self) -> &[KeyToken] {
		&self.0
	}

	/// Whether both chords press the same keys, ignoring order and name case.
	pub fn matches(&self, other: &Chord) -> bool {
		self.len() == other.len() && self.canonical() == other.canonical()
	}

	fn canonical(&self) -> SmallVec<[String; 4]> {
		let mut keys: SmallVec<[String; 4]> = self.0.iter().map(KeyToken::canonical).collect();
		keys.sort_unstable();
		keys
	}
}

impl PartialEq for Chord {
	fn eq(&self, other: &Self) -> bool {
		self.matches(other)
	}
}

impl Eq for Chord {}

impl Hash for Chord {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.canonical().hash(state);
	}
}

impl fmt::Display for Chord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, token) in self.0.iter().enumerate() {
			if i > 0 {
				write!(f, "{KEY_SEP}")?;
			}
			write!(f, "{token}")?;
		}
		Ok(())
	}
}

impl FromStr for Chord {
	type Err = ChordParseError;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let trimmed = input.trim();
		if trimmed.is_empty() {
			return Err(ChordParseError::Empty);
		}

		let mut tokens = SmallVec::new();
		let mut position = input.len() - input.trim_start().len();
		for segment in trimmed.split(KEY_SEP) {
			let key = segment.trim();
			if key.is_empty() {
				return Err(ChordParseError::EmptySegment {
					input: input.to_string(),
					position,
				});
			}
			position += segment.len() + KEY_SEP.len_utf8();

			let token = parse_segment(key).ok_or_else(|| ChordParseError::InvalidCode {
				input: input.to_string(),
				segment: key.to_string(),
			})?;
			tokens.push(token);
		}
		Ok(Self(tokens))
	}
}

impl<'de> Deserialize<'de> for Chord {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Repr {
			Text(String),
			Tokens(Vec<KeyToken>),
		}

		match Repr::deserialize(deserializer)? {
			Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
			Repr::Tokens(tokens) => Chord::from_tokens(tokens).map_err(serde::de::Error::custom),
		}
	}
}
