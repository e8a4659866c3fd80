//! The per-session mode set.
//!
//! A session owns one instance of every [`Mode`] and forwards each key to the
//! current one. Modes never switch themselves or touch the engine: they
//! return a [`ProcessResult`] and the session (or the engine, for
//! [`EngineRequest`]s) acts on it.

use std::cell::RefCell;

use tarn_primitives::{KeyInput, ModeKind, SelectionKind};

use crate::search::IncrementalSearch;
use crate::session_data::SessionData;

mod command;
mod insert;
mod normal;
mod passive;
mod visual;


pub use command::CommandMode;
pub use insert::InsertMode;
pub use normal::NormalMode;
pub use passive::{PassiveMode, SubstituteConfirmMode};
pub use visual::{SelectMode, VisualMode};

/// Largest count prefix accepted before further digits are ignored.
pub const MAX_COUNT: u32 = 99_999;

/// What the session should do after a mode processed a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
	/// Key consumed.
	Handled,
	/// Key consumed as part of an unfinished sequence.
	HandledNeedMoreInput,
	/// Key not meaningful in this mode; the host may use it.
	NotHandled,
	SwitchMode(ModeKind),
	/// Key consumed, and the engine must act on it.
	Engine(EngineRequest),
}

impl ProcessResult {
	pub fn is_handled(&self) -> bool {
		!matches!(self, Self::NotHandled)
	}
}

/// Work only the engine can do, because it spans sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineRequest {
	StartRecording(char),
	StopRecording,
	/// `register` is `'@'` for "the last register run".
	RunMacro { register: char, count: u32 },
}

/// Session state a mode may read or update while handling a key.
pub struct ModeContext<'a> {
	pub data: &'a SessionData,
	pub search: &'a RefCell<IncrementalSearch>,
	/// Register being recorded into, if a macro recording is running.
	pub recording: Option<char>,
}

pub trait Mode {
	fn kind(&self) -> ModeKind;

	/// Called when the session switches into this mode.
	fn activate(&mut self, _ctx: &ModeContext<'_>) {}

	/// Called when the session switches away from this mode.
	fn deactivate(&mut self, _ctx: &ModeContext<'_>) {}

	fn process(&mut self, key: KeyInput, ctx: &ModeContext<'_>) -> ProcessResult;
}

/// One instance of every mode, in [`ModeKind`] declaration order.
pub(crate) fn standard_modes() -> Vec<Box<dyn Mode>> {
	let mut modes: Vec<Box<dyn Mode>> = vec![
		Box::new(PassiveMode::new(ModeKind::Uninitialized)),
		Box::new(NormalMode::new()),
		Box::new(InsertMode::new(ModeKind::Insert)),
		Box::new(InsertMode::new(ModeKind::Replace)),
		Box::new(CommandMode::new()),
	];
	modes.extend(SelectionKind::ALL.iter().map(|&kind| Box::new(VisualMode::new(kind)) as Box<dyn Mode>));
	modes.extend(SelectionKind::ALL.iter().map(|&kind| Box::new(SelectMode::new(kind)) as Box<dyn Mode>));
	modes.push(Box::new(SubstituteConfirmMode::new()));
	modes.push(Box::new(PassiveMode::new(ModeKind::Disabled)));
	modes.push(Box::new(PassiveMode::new(ModeKind::ExternalEdit)));
	modes
}

/// Shared handling for keys that return to Normal.
fn escape_to_normal(key: KeyInput) -> Option<ProcessResult> {
	key.is_escape().then_some(ProcessResult::SwitchMode(ModeKind::Normal))
}
