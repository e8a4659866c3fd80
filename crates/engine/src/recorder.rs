//! Keyboard macro recording.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tarn_primitives::KeyInput;
use tracing::debug;

use crate::session::Session;


/// Notified once for every session the engine creates.
pub trait SessionCreationListener {
	fn session_created(&self, session: &Rc<Session>);
}

impl<F: Fn(&Rc<Session>)> SessionCreationListener for F {
	fn session_created(&self, session: &Rc<Session>) {
		self(session)
	}
}

/// Recorded macros and the recording in progress.
#[derive(Debug, Default)]
pub struct MacroState {
	recording_register: Option<char>,
	/// Appending to the register's existing keys (uppercase register).
	appending: bool,
	recording_keys: Vec<KeyInput>,
	macros: FxHashMap<char, Vec<KeyInput>>,
	last_register: Option<char>,
}

impl MacroState {
	/// Starts recording into `register`, stopping any recording in progress.
	///
	/// An uppercase register appends to its lowercase counterpart.
	pub fn start_recording(&mut self, register: char) {
		if self.recording_register.is_some() {
			self.stop_recording();
		}
		self.appending = register.is_ascii_uppercase();
		self.recording_register = Some(register.to_ascii_lowercase());
		self.recording_keys.clear();
	}

	/// Stops recording and stores the keys in the register.
	pub fn stop_recording(&mut self) {
		let Some(register) = self.recording_register.take() else {
			return;
		};
		let keys = std::mem::take(&mut self.recording_keys);
		if self.appending {
			self.macros.entry(register).or_default().extend(keys);
		} else {
			self.macros.insert(register, keys);
		}
		self.appending = false;
	}

	pub fn record_key(&mut self, key: KeyInput) {
		if self.recording_register.is_some() {
			self.recording_keys.push(key);
		}
	}

	pub fn get(&self, register: char) -> Option<&[KeyInput]> {
		self.macros.get(&register.to_ascii_lowercase()).map(Vec::as_slice)
	}

	pub fn set(&mut self, register: char, keys: Vec<KeyInput>) {
		self.macros.insert(register.to_ascii_lowercase(), keys);
	}

	/// Register of the last macro run, used by `@@`.
	pub fn last_register(&self) -> Option<char> {
		self.last_register
	}

	pub fn recording_register(&self) -> Option<char> {
		self.recording_register
	}

	pub fn is_recording(&self) -> bool {
		self.recording_register.is_some()
	}
}

/// Records the keys every session receives into macro registers.
///
/// Registered with the engine as a [`SessionCreationListener`]. Keys fed
/// while a macro is being replayed are not recorded again.
#[derive(Default)]
pub struct MacroRecorder {
	state: Rc<RefCell<MacroState>>,
	replay_depth: Rc<Cell<usize>>,
}

impl MacroRecorder {
	/// Nested replays beyond this depth are refused.
	pub const MAX_REPLAY_DEPTH: usize = 64;

	pub fn new() -> Self {
		Self::default()
	}

	pub fn start_recording(&self, register: char) {
		debug!(register = %register, "macro recording started");
		self.state.borrow_mut().start_recording(register);
	}

	pub fn stop_recording(&self) {
		debug!("macro recording stopped");
		self.state.borrow_mut().stop_recording();
	}

	/// Stops a recording ended by typing `q`, leaving that `q` out.
	pub(crate) fn stop_recording_from_key(&self) {
		let mut state = self.state.borrow_mut();
		state.recording_keys.pop();
		state.stop_recording();
	}

	pub fn is_recording(&self) -> bool {
		self.state.borrow().is_recording()
	}

	pub fn recording_register(&self) -> Option<char> {
		self.state.borrow().recording_register()
	}

	/// Keys stored in `register`.
	pub fn macro_for(&self, register: char) -> Option<Vec<KeyInput>> {
		self.state.borrow().get(register).map(<[KeyInput]>::to_vec)
	}

	/// Stores keys directly, as when a register is filled by other means.
	pub fn set_macro(&self, register: char, keys: Vec<KeyInput>) {
		self.state.borrow_mut().set(register, keys);
	}

	pub fn last_register(&self) -> Option<char> {
		self.state.borrow().last_register()
	}

	pub(crate) fn set_last_register(&self, register: char) {
		self.state.borrow_mut().last_register = Some(register);
	}

	pub fn is_replaying(&self) -> bool {
		self.replay_depth.get() > 0
	}

	/// Marks a replay in progress until the guard drops. Returns `None` when
	/// replays are already nested too deeply.
	pub(crate) fn begin_replay(&self) -> Option<ReplayGuard> {
		let depth = self.replay_depth.get();
		if depth >= Self::MAX_REPLAY_DEPTH {
			return None;
		}
		self.replay_depth.set(depth + 1);
		Some(ReplayGuard {
			depth: self.replay_depth.clone(),
		})
	}
}

impl SessionCreationListener for MacroRecorder {
	fn session_created(&self, session: &Rc<Session>) {
		let state = Rc::downgrade(&self.state);
		let replay_depth = self.replay_depth.clone();
		let subscription = session.key_input_start().connect(move |key| {
			if replay_depth.get() > 0 {
				return;
			}
			if let Some(state) = state.upgrade() {
				state.borrow_mut().record_key(*key);
			}
		});
		session.add_subscription(subscription);
	}
}

impl fmt::Debug for MacroRecorder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MacroRecorder")
			.field("state", &self.state.borrow())
			.field("replay_depth", &self.replay_depth.get())
			.finish()
	}
}

pub(crate) struct ReplayGuard {
	depth: Rc<Cell<usize>>,
}

impl Drop for ReplayGuard {
	fn drop(&mut self) {
		self.depth.set(self.depth.get().saturating_sub(1));
	}
}
