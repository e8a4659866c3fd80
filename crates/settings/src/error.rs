//! Error types for setting lookup and mutation.

use thiserror::Error;

use crate::SettingKind;

/// Errors raised when a setting cannot be read or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
	/// No setting with this name or abbreviation exists in the registry.
	#[error("unknown option: {name}{}", suggestion_suffix(.suggestion))]
	UnknownSetting {
		name: String,
		/// Closest known name, if one is near enough to be a likely typo.
		suggestion: Option<&'static str>,
	},

	/// The value's kind does not match the setting's kind.
	#[error("type mismatch for option '{name}': expected {expected}, got {got}")]
	TypeMismatch {
		name: &'static str,
		expected: SettingKind,
		got: &'static str,
	},

	/// The text could not be parsed for the setting's kind.
	#[error("invalid argument: {name}={value}")]
	InvalidArgument { name: &'static str, value: String },
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
	match suggestion {
		Some(name) => format!(" (did you mean '{name}'?)"),
		None => String::new(),
	}
}

/// Result type for setting operations.
pub type Result<T> = std::result::Result<T, SettingError>;
