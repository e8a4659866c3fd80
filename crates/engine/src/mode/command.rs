use tarn_primitives::{KeyCode, KeyInput, ModeKind};
use tracing::debug;

use super::{Mode, ModeContext, ProcessResult};
use crate::interpreter::Interpreter;
use crate::session_data::SessionData;

/// Ex command-line entry.
#[derive(Debug, Default)]
pub struct CommandMode {
	line: String,
}

impl CommandMode {
	pub fn new() -> Self {
		Self::default()
	}

	/// The partially typed command line.
	pub fn line(&self) -> &str {
		&self.line
	}

	/// Runs one command line, reporting any failure to the view's status
	/// line. Returns false on failure.
	pub fn run_command(line: &str, data: &SessionData) -> bool {
		match Interpreter::new(data).run(line) {
			Ok(()) => true,
			Err(error) => {
				debug!(view = %data.view_id(), command = line, %error, "command failed");
				data.status().error(&error.to_string());
				false
			}
		}
	}
}

impl Mode for CommandMode {
	fn kind(&self) -> ModeKind {
		ModeKind::Command
	}

	fn activate(&mut self, ctx: &ModeContext<'_>) {
		self.line.clear();
		ctx.data.status().status(":");
	}

	fn deactivate(&mut self, _ctx: &ModeContext<'_>) {
		self.line.clear();
	}

	fn process(&mut self, key: KeyInput, ctx: &ModeContext<'_>) -> ProcessResult {
		if key.is_escape() {
			return ProcessResult::SwitchMode(ModeKind::Normal);
		}
		match key.code {
			KeyCode::Enter => {
				let line = std::mem::take(&mut self.line);
				ctx.data.histories().command.borrow_mut().add(&line);
				Self::run_command(&line, ctx.data);
				ProcessResult::SwitchMode(ModeKind::Normal)
			}
			KeyCode::Backspace => {
				if self.line.pop().is_none() {
					return ProcessResult::SwitchMode(ModeKind::Normal);
				}
				ctx.data.status().status(&format!(":{}", self.line));
				ProcessResult::HandledNeedMoreInput
			}
			_ => match key.as_char() {
				Some(c) => {
					self.line.push(c);
					ctx.data.status().status(&format!(":{}", self.line));
					ProcessResult::HandledNeedMoreInput
				}
				None => ProcessResult::Handled,
			},
		}
	}
}
