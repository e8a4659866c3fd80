//! The engine: owner of the global settings, the session registry and the
//! active-session stack.
//!
//! # Lifecycle
//!
//! A view's session is built in three stages (see [`SessionFactory`]):
//! the buffer's [`BufferWrapper`] is looked up or created, then the view's
//! [`SessionData`](crate::SessionData), then the [`Session`] itself. The
//! first session request also runs the bootstrap script unless
//! [`Engine::set_auto_load_bootstrap`] turned that off.
//!
//! # Active sessions
//!
//! [`Engine::process_key`] pushes the session onto the active stack for the
//! duration of the key. Replaying a macro feeds keys back through
//! `process_key`, so the stack nests; every push is paired with a pop of the
//! top entry when its scope ends.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tarn_primitives::{BufferId, KeyInput, ViewId};
use tarn_settings::global::names::HISTORY;
use tarn_settings::{GlobalSettings, LocalSettings, ObserverId, WindowSettings};
use tracing::{debug, warn};

use crate::bulk::{BulkOperation, BulkOperationCounter};
use crate::factory::SessionFactory;
use crate::history::Histories;
use crate::host::{FileSystem, Host, TextBuffer, TextView};
use crate::mode::{EngineRequest, ProcessResult};
use crate::recorder::{MacroRecorder, SessionCreationListener};
use crate::session::Session;
use crate::signal::SubscriptionSet;
use crate::wrapper::BufferWrapper;

mod bootstrap;

#[cfg(test)]
mod tests;

pub use bootstrap::BootstrapState;

struct SessionEntry {
	session: Rc<Session>,
	/// Engine-side subscriptions about this session's view.
	subscriptions: SubscriptionSet,
}

fn history_limit(value: i64) -> usize {
	usize::try_from(value).unwrap_or(0)
}

pub struct Engine {
	me: Weak<Engine>,
	host: Rc<dyn Host>,
	file_system: Rc<dyn FileSystem>,
	global_settings: Rc<GlobalSettings>,
	histories: Rc<Histories>,
	history_observer: ObserverId,
	factory: SessionFactory,
	wrappers: RefCell<FxHashMap<BufferId, Rc<BufferWrapper>>>,
	sessions: RefCell<IndexMap<ViewId, SessionEntry, FxBuildHasher>>,
	/// Top of the stack is the last element.
	active_sessions: RefCell<Vec<Rc<Session>>>,
	listeners: RefCell<Vec<Rc<dyn SessionCreationListener>>>,
	macro_recorder: Rc<MacroRecorder>,
	auto_load_bootstrap: Cell<bool>,
	is_loading_bootstrap: Cell<bool>,
	bootstrap_state: Cell<BootstrapState>,
	template_local: RefCell<LocalSettings>,
	template_window: RefCell<WindowSettings>,
	bulk: BulkOperationCounter,
}

impl Engine {
	pub fn new(host: Rc<dyn Host>, file_system: Rc<dyn FileSystem>) -> Rc<Self> {
		let global_settings = Rc::new(GlobalSettings::new());
		let histories = Rc::new(Histories::new(history_limit(global_settings.history())));

		let observed = histories.clone();
		let history_observer = global_settings.subscribe(move |change| {
			if change.setting.name != HISTORY {
				return;
			}
			if let Some(limit) = change.setting.aggregate_value().as_number() {
				debug!(limit, "history limit changed");
				observed.set_limit(history_limit(limit));
			}
		});

		let macro_recorder = Rc::new(MacroRecorder::new());
		let listeners: Vec<Rc<dyn SessionCreationListener>> = vec![macro_recorder.clone() as Rc<dyn SessionCreationListener>];

		Rc::new_cyclic(|me| Self {
			me: me.clone(),
			factory: SessionFactory::new(host.clone(), histories.clone()),
			bulk: BulkOperationCounter::new(host.clone()),
			template_local: RefCell::new(LocalSettings::new(global_settings.clone())),
			template_window: RefCell::new(WindowSettings::new(global_settings.clone())),
			host,
			file_system,
			global_settings,
			histories,
			history_observer,
			wrappers: RefCell::new(FxHashMap::default()),
			sessions: RefCell::new(IndexMap::with_hasher(FxBuildHasher)),
			active_sessions: RefCell::new(Vec::new()),
			listeners: RefCell::new(listeners),
			macro_recorder,
			auto_load_bootstrap: Cell::new(true),
			is_loading_bootstrap: Cell::new(false),
			bootstrap_state: Cell::new(BootstrapState::None),
		})
	}

	pub fn host(&self) -> &Rc<dyn Host> {
		&self.host
	}

	pub fn global_settings(&self) -> &Rc<GlobalSettings> {
		&self.global_settings
	}

	pub fn histories(&self) -> &Rc<Histories> {
		&self.histories
	}

	/// Local settings new wrappers copy when no session is active.
	pub fn template_local_settings(&self) -> Ref<'_, LocalSettings> {
		self.template_local.borrow()
	}

	/// Window settings new sessions copy when no session is active.
	pub fn template_window_settings(&self) -> Ref<'_, WindowSettings> {
		self.template_window.borrow()
	}

	pub fn macro_recorder(&self) -> &Rc<MacroRecorder> {
		&self.macro_recorder
	}

	pub fn auto_load_bootstrap(&self) -> bool {
		self.auto_load_bootstrap.get()
	}

	pub fn set_auto_load_bootstrap(&self, enabled: bool) {
		self.auto_load_bootstrap.set(enabled);
	}

	/// Adds a listener called for every session created from now on.
	/// Listeners run in registration order.
	pub fn add_creation_listener(&self, listener: Rc<dyn SessionCreationListener>) {
		self.listeners.borrow_mut().push(listener);
	}

	pub fn get_wrapper(&self, buffer: BufferId) -> Option<Rc<BufferWrapper>> {
		self.wrappers.borrow().get(&buffer).cloned()
	}

	/// Returns the buffer's wrapper, creating it on first use.
	///
	/// A new wrapper's local settings copy the active session's, or the
	/// template's when no session is active.
	pub fn get_or_create_wrapper(&self, buffer: Rc<dyn TextBuffer>) -> Rc<BufferWrapper> {
		if let Some(wrapper) = self.get_wrapper(buffer.id()) {
			return wrapper;
		}

		let id = buffer.id();
		let wrapper = match self.active_session() {
			Some(active) => self.factory.create_wrapper(buffer, active.data().local_settings()),
			None => self.factory.create_wrapper(buffer, &self.template_local.borrow()),
		};
		let previous = self.wrappers.borrow_mut().insert(id, wrapper.clone());
		assert!(previous.is_none(), "wrapper for {id} created twice");
		wrapper
	}

	pub fn get_session(&self, view: ViewId) -> Option<Rc<Session>> {
		self.sessions.borrow().get(&view).map(|entry| entry.session.clone())
	}

	/// Every registered session, in creation order.
	pub fn sessions(&self) -> Vec<Rc<Session>> {
		self.sessions.borrow().values().map(|entry| entry.session.clone()).collect()
	}

	/// Session of the view the host reports as focused.
	pub fn focused_session(&self) -> Option<Rc<Session>> {
		self.host.focused_view().and_then(|view| self.get_session(view))
	}

	/// Returns the view's session, creating it on first use.
	///
	/// The first creation runs the bootstrap script when automatic loading
	/// is enabled and no load has been attempted.
	pub fn get_or_create_session(&self, view: Rc<dyn TextView>) -> Rc<Session> {
		if let Some(session) = self.get_session(view.id()) {
			return session;
		}
		if self.auto_load_bootstrap.get() && self.bootstrap_state.get() == BootstrapState::None && !self.is_loading_bootstrap.get() {
			self.load_bootstrap();
		}
		self.create_session(view)
	}

	/// Creates and registers a session, then notifies creation listeners.
	///
	/// # Panics
	///
	/// Panics if the view already has a session.
	pub fn create_session(&self, view: Rc<dyn TextView>) -> Rc<Session> {
		let session = self.create_session_core(view);
		let listeners: Vec<Rc<dyn SessionCreationListener>> = self.listeners.borrow().clone();
		for listener in listeners {
			listener.session_created(&session);
		}
		session
	}

	/// Creates and registers a session without notifying listeners.
	///
	/// # Panics
	///
	/// Panics if the view already has a session.
	pub fn create_session_core(&self, view: Rc<dyn TextView>) -> Rc<Session> {
		let view_id = view.id();
		assert!(!self.sessions.borrow().contains_key(&view_id), "session for {view_id} created twice");

		let wrapper = self.get_or_create_wrapper(view.buffer());
		let data = match self.active_session() {
			Some(active) => self.factory.create_session_data(wrapper, view.clone(), active.data().window_settings()),
			None => self.factory.create_session_data(wrapper, view.clone(), &self.template_window.borrow()),
		};
		let session = self.factory.create_session(data);

		let mut subscriptions = SubscriptionSet::new();
		let engine = self.me.clone();
		subscriptions.push(view.closed().connect(move |()| {
			if let Some(engine) = engine.upgrade() {
				engine.remove_session(view_id);
			}
		}));

		self.sessions.borrow_mut().insert(
			view_id,
			SessionEntry {
				session: session.clone(),
				subscriptions,
			},
		);
		debug!(view = %view_id, buffer = %session.wrapper().buffer_id(), "session created");
		session
	}

	/// Unregisters a session, releasing its subscriptions. The buffer's
	/// wrapper stays cached. Returns false if the view had no session.
	pub fn remove_session(&self, view: ViewId) -> bool {
		let removed = self.sessions.borrow_mut().shift_remove(&view);
		let Some(SessionEntry { session, mut subscriptions }) = removed else {
			return false;
		};
		subscriptions.dispose_all();
		session.close();
		debug!(view = %view, "session removed");
		true
	}

	pub fn close_all_sessions(&self) {
		let views: Vec<ViewId> = self.sessions.borrow().keys().copied().collect();
		for view in views {
			self.remove_session(view);
		}
	}

	/// The session currently processing input, if any.
	pub fn active_session(&self) -> Option<Rc<Session>> {
		self.active_sessions.borrow().last().cloned()
	}

	/// The active stack, most recent first.
	pub fn active_sessions(&self) -> Vec<Rc<Session>> {
		self.active_sessions.borrow().iter().rev().cloned().collect()
	}

	/// Pushes `session` onto the active stack until the returned scope drops.
	#[must_use = "the session leaves the active stack when the scope is dropped"]
	pub fn begin_input(&self, session: &Rc<Session>) -> InputScope<'_> {
		self.active_sessions.borrow_mut().push(session.clone());
		InputScope { engine: self }
	}

	/// Feeds one key to `session` with it on top of the active stack.
	pub fn process_key(&self, session: &Rc<Session>, key: KeyInput) -> ProcessResult {
		if session.is_closed() {
			return ProcessResult::NotHandled;
		}
		let _scope = self.begin_input(session);
		let result = session.process(key, self.macro_recorder.recording_register());
		if let ProcessResult::Engine(request) = result {
			self.handle_request(session, request);
		}
		result
	}

	/// Feeds each key in turn.
	pub fn process_keys(&self, session: &Rc<Session>, keys: impl IntoIterator<Item = KeyInput>) {
		for key in keys {
			self.process_key(session, key);
		}
	}

	fn handle_request(&self, session: &Rc<Session>, request: EngineRequest) {
		let status = session.data().status();
		match request {
			EngineRequest::StartRecording(register) => {
				self.macro_recorder.start_recording(register);
				status.status(&format!("recording @{register}"));
			}
			EngineRequest::StopRecording => {
				self.macro_recorder.stop_recording_from_key();
				status.status("");
			}
			EngineRequest::RunMacro { register, count } => {
				self.run_macro(session, register, count);
			}
		}
	}

	/// Replays the keys in `register` `count` times through
	/// [`Engine::process_key`]. `'@'` names the last register run.
	///
	/// Returns false if there was nothing to run.
	pub fn run_macro(&self, session: &Rc<Session>, register: char, count: u32) -> bool {
		let register = if register == '@' {
			match self.macro_recorder.last_register() {
				Some(register) => register,
				None => {
					session.data().status().error("E748: No previously used register");
					return false;
				}
			}
		} else {
			register.to_ascii_lowercase()
		};

		let Some(keys) = self.macro_recorder.macro_for(register) else {
			return false;
		};
		self.macro_recorder.set_last_register(register);

		let Some(_replay) = self.macro_recorder.begin_replay() else {
			warn!(register = %register, "macro replay nested too deeply");
			session.data().status().error("E169: Command too recursive");
			return false;
		};
		debug!(register = %register, count, keys = keys.len(), "replaying macro");
		for _ in 0..count.max(1) {
			for &key in &keys {
				self.process_key(session, key);
			}
		}
		true
	}

	/// Opens a bulk operation lasting until the guard drops. Nested
	/// operations notify the host only once.
	#[must_use = "the bulk operation ends when the guard is dropped"]
	pub fn begin_bulk_operation(&self) -> BulkOperation {
		self.bulk.begin()
	}

	pub fn in_bulk_operation(&self) -> bool {
		self.bulk.in_bulk_operation()
	}
}

impl Drop for Engine {
	fn drop(&mut self) {
		self.global_settings.unsubscribe(self.history_observer);
	}
}

impl fmt::Debug for Engine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Engine")
			.field("sessions", &self.sessions.borrow().len())
			.field("wrappers", &self.wrappers.borrow().len())
			.field("active_sessions", &self.active_sessions.borrow().len())
			.field("bootstrap_state", &self.bootstrap_state.get())
			.finish_non_exhaustive()
	}
}

/// Active-stack entry returned by [`Engine::begin_input`].
pub struct InputScope<'a> {
	engine: &'a Engine,
}

impl Drop for InputScope<'_> {
	fn drop(&mut self) {
		self.engine.active_sessions.borrow_mut().pop();
	}
}
