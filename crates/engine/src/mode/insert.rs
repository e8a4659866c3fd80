use tarn_primitives::{KeyInput, ModeKind};

use super::{Mode, ModeContext, ProcessResult, escape_to_normal};

/// Insert and Replace. Text entry itself belongs to the host.
#[derive(Debug)]
pub struct InsertMode {
	kind: ModeKind,
}

impl InsertMode {
	pub fn new(kind: ModeKind) -> Self {
		debug_assert!(kind.is_any_insert());
		Self { kind }
	}
}

impl Mode for InsertMode {
	fn kind(&self) -> ModeKind {
		self.kind
	}

	fn process(&mut self, key: KeyInput, _ctx: &ModeContext<'_>) -> ProcessResult {
		escape_to_normal(key).unwrap_or(ProcessResult::NotHandled)
	}
}
