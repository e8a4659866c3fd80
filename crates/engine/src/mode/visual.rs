use tarn_primitives::{KeyCode, KeyInput, ModeKind, SelectionKind};

use super::{Mode, ModeContext, ProcessResult, escape_to_normal};

/// Selection kind a visual toggle key stands for.
fn toggle_kind(key: KeyInput) -> Option<SelectionKind> {
	match (key.code, key.modifiers.ctrl) {
		(KeyCode::Char('v'), false) => Some(SelectionKind::Character),
		(KeyCode::Char('V'), false) => Some(SelectionKind::Line),
		(KeyCode::Char('v'), true) => Some(SelectionKind::Block),
		_ => None,
	}
}

fn is_ctrl_g(key: KeyInput) -> bool {
	key == KeyInput::ctrl('g')
}

#[derive(Debug)]
pub struct VisualMode {
	kind: SelectionKind,
}

impl VisualMode {
	pub fn new(kind: SelectionKind) -> Self {
		Self { kind }
	}
}

impl Mode for VisualMode {
	fn kind(&self) -> ModeKind {
		ModeKind::Visual(self.kind)
	}

	fn process(&mut self, key: KeyInput, _ctx: &ModeContext<'_>) -> ProcessResult {
		if let Some(result) = escape_to_normal(key) {
			return result;
		}
		// Pressing the key of the current kind leaves visual mode.
		if let Some(kind) = toggle_kind(key) {
			let target = if kind == self.kind {
				ModeKind::Normal
			} else {
				ModeKind::Visual(kind)
			};
			return ProcessResult::SwitchMode(target);
		}
		if is_ctrl_g(key) {
			return ProcessResult::SwitchMode(ModeKind::Select(self.kind));
		}
		match key.as_char() {
			Some(':') => ProcessResult::SwitchMode(ModeKind::Command),
			_ => ProcessResult::NotHandled,
		}
	}
}

#[derive(Debug)]
pub struct SelectMode {
	kind: SelectionKind,
}

impl SelectMode {
	pub fn new(kind: SelectionKind) -> Self {
		Self { kind }
	}
}

impl Mode for SelectMode {
	fn kind(&self) -> ModeKind {
		ModeKind::Select(self.kind)
	}

	fn process(&mut self, key: KeyInput, _ctx: &ModeContext<'_>) -> ProcessResult {
		if let Some(result) = escape_to_normal(key) {
			return result;
		}
		if is_ctrl_g(key) {
			return ProcessResult::SwitchMode(ModeKind::Visual(self.kind));
		}
		// Typing replaces the selection; the host deletes it and inserts the key.
		match key.as_char() {
			Some(_) => ProcessResult::SwitchMode(ModeKind::Insert),
			None => ProcessResult::NotHandled,
		}
	}
}
