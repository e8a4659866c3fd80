use tarn_primitives::{KeyCode, KeyInput, ModeKind, SelectionKind};

use super::{EngineRequest, MAX_COUNT, Mode, ModeContext, ProcessResult};
use crate::search::{SearchDirection, SearchOutcome};

/// A key that needs a second key to mean anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
	/// After `g`.
	G,
	/// After `q`, waiting for a register.
	Record,
	/// After `@`, waiting for a register.
	Run,
}

/// Registers a macro may be recorded into or run from.
pub fn is_macro_register(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '"'
}

#[derive(Debug, Default)]
pub struct NormalMode {
	/// Count prefix, 0 when none was typed.
	count: u32,
	pending: Option<Pending>,
}

impl NormalMode {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn count(&self) -> u32 {
		self.count
	}

	fn reset(&mut self) {
		self.count = 0;
		self.pending = None;
	}

	fn take_count(&mut self) -> u32 {
		let count = self.count.max(1);
		self.count = 0;
		count
	}

	fn process_pending(&mut self, pending: Pending, key: KeyInput) -> ProcessResult {
		let count = self.take_count();
		match (pending, key.code, key.modifiers.ctrl) {
			(Pending::G, KeyCode::Char('h'), false) => ProcessResult::SwitchMode(ModeKind::Select(SelectionKind::Character)),
			(Pending::G, KeyCode::Char('H'), false) => ProcessResult::SwitchMode(ModeKind::Select(SelectionKind::Line)),
			(Pending::G, KeyCode::Char('h'), true) => ProcessResult::SwitchMode(ModeKind::Select(SelectionKind::Block)),
			(Pending::Record, KeyCode::Char(c), false) if is_macro_register(c) => {
				ProcessResult::Engine(EngineRequest::StartRecording(c))
			}
			(Pending::Run, KeyCode::Char(c), false) if c == '@' || is_macro_register(c) => {
				ProcessResult::Engine(EngineRequest::RunMacro { register: c, count })
			}
			// Unknown second key cancels the sequence.
			_ => ProcessResult::Handled,
		}
	}

	fn process_search(&mut self, key: KeyInput, ctx: &ModeContext<'_>) -> ProcessResult {
		match ctx.search.borrow_mut().process(key, ctx.data) {
			SearchOutcome::Pending => ProcessResult::HandledNeedMoreInput,
			SearchOutcome::Completed(_) | SearchOutcome::Cancelled => ProcessResult::Handled,
		}
	}

	fn begin_search(&mut self, direction: SearchDirection, ctx: &ModeContext<'_>) -> ProcessResult {
		self.reset();
		ctx.search.borrow_mut().begin(direction, ctx.data);
		ProcessResult::HandledNeedMoreInput
	}
}

impl Mode for NormalMode {
	fn kind(&self) -> ModeKind {
		ModeKind::Normal
	}

	fn activate(&mut self, _ctx: &ModeContext<'_>) {
		self.reset();
	}

	fn deactivate(&mut self, ctx: &ModeContext<'_>) {
		self.reset();
		ctx.search.borrow_mut().cancel(ctx.data);
	}

	fn process(&mut self, key: KeyInput, ctx: &ModeContext<'_>) -> ProcessResult {
		if ctx.search.borrow().is_active() {
			return self.process_search(key, ctx);
		}
		if let Some(pending) = self.pending.take() {
			return self.process_pending(pending, key);
		}
		if key.is_escape() {
			self.reset();
			return ProcessResult::Handled;
		}

		if key.modifiers.ctrl {
			return match key.code {
				KeyCode::Char('v') => {
					self.reset();
					ProcessResult::SwitchMode(ModeKind::Visual(SelectionKind::Block))
				}
				KeyCode::Char('r') => {
					let count = self.take_count() as usize;
					if !ctx.data.undo_redo().redo(count) {
						ctx.data.status().status("Already at newest change");
					}
					ProcessResult::Handled
				}
				_ => {
					self.reset();
					ProcessResult::NotHandled
				}
			};
		}

		let Some(c) = key.as_char() else {
			self.reset();
			return ProcessResult::NotHandled;
		};

		if let Some(digit) = c.to_digit(10)
			&& (digit != 0 || self.count > 0)
		{
			let next = self.count.saturating_mul(10).saturating_add(digit);
			self.count = next.min(MAX_COUNT);
			return ProcessResult::HandledNeedMoreInput;
		}

		let result = match c {
			'i' | 'a' | 'I' | 'A' | 'o' | 'O' => ProcessResult::SwitchMode(ModeKind::Insert),
			'R' => ProcessResult::SwitchMode(ModeKind::Replace),
			':' => ProcessResult::SwitchMode(ModeKind::Command),
			'v' => ProcessResult::SwitchMode(ModeKind::Visual(SelectionKind::Character)),
			'V' => ProcessResult::SwitchMode(ModeKind::Visual(SelectionKind::Line)),
			'/' => return self.begin_search(SearchDirection::Forward, ctx),
			'?' => return self.begin_search(SearchDirection::Backward, ctx),
			'g' => {
				self.pending = Some(Pending::G);
				return ProcessResult::HandledNeedMoreInput;
			}
			'q' if ctx.recording.is_some() => ProcessResult::Engine(EngineRequest::StopRecording),
			'q' => {
				self.pending = Some(Pending::Record);
				return ProcessResult::HandledNeedMoreInput;
			}
			'@' => {
				self.pending = Some(Pending::Run);
				return ProcessResult::HandledNeedMoreInput;
			}
			'u' => {
				let count = self.take_count() as usize;
				if !ctx.data.undo_redo().undo(count) {
					ctx.data.status().status("Already at oldest change");
				}
				ProcessResult::Handled
			}
			_ => ProcessResult::NotHandled,
		};
		self.reset();
		result
	}
}
