//! Error types for ex command execution.

use tarn_settings::SettingError;
use thiserror::Error;

/// Why a command line failed. Failures are reported to the view's status
/// line, never propagated out of command mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
	#[error("E492: Not an editor command: {0}")]
	NotAnEditorCommand(String),

	#[error(transparent)]
	Setting(#[from] SettingError),

	#[error("E474: Invalid argument: {0}")]
	InvalidArgument(String),

	#[error("E488: Trailing characters: {0}")]
	TrailingCharacters(String),
}

pub type Result<T> = std::result::Result<T, CommandError>;
