use tarn_primitives::{KeyInput, ModeKind};

use super::{Mode, ModeContext, ProcessResult, escape_to_normal};

/// A mode that leaves keys to the host.
///
/// Used for Uninitialized and Disabled. ExternalEdit additionally returns to
/// Normal on escape.
#[derive(Debug)]
pub struct PassiveMode {
	kind: ModeKind,
}

impl PassiveMode {
	pub fn new(kind: ModeKind) -> Self {
		Self { kind }
	}
}

impl Mode for PassiveMode {
	fn kind(&self) -> ModeKind {
		self.kind
	}

	fn process(&mut self, key: KeyInput, _ctx: &ModeContext<'_>) -> ProcessResult {
		match self.kind {
			ModeKind::ExternalEdit => escape_to_normal(key).unwrap_or(ProcessResult::NotHandled),
			_ => ProcessResult::NotHandled,
		}
	}
}

/// Answers the "replace with ...?" prompt of a confirmed substitute.
#[derive(Debug, Default)]
pub struct SubstituteConfirmMode;

impl SubstituteConfirmMode {
	pub fn new() -> Self {
		Self
	}
}

impl Mode for SubstituteConfirmMode {
	fn kind(&self) -> ModeKind {
		ModeKind::SubstituteConfirm
	}

	fn activate(&mut self, ctx: &ModeContext<'_>) {
		ctx.data.status().status("replace with match (y/n/a/q/l)?");
	}

	fn process(&mut self, key: KeyInput, _ctx: &ModeContext<'_>) -> ProcessResult {
		if let Some(result) = escape_to_normal(key) {
			return result;
		}
		match key.as_char() {
			Some('y' | 'n') => ProcessResult::Handled,
			Some('a' | 'q' | 'l') => ProcessResult::SwitchMode(ModeKind::Normal),
			_ => ProcessResult::Handled,
		}
	}
}
