//! A view's editing session: the mode set over one [`SessionData`].

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use tarn_primitives::{KeyInput, ModeKind, ViewId};
use tracing::{debug, trace};

use crate::mode::{Mode, ModeContext, ProcessResult};
use crate::search::IncrementalSearch;
use crate::session_data::SessionData;
use crate::signal::{Signal, Subscription, SubscriptionSet};
use crate::wrapper::BufferWrapper;

/// Payload of [`Session::mode_switched`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSwitch {
	pub from: ModeKind,
	pub to: ModeKind,
}

pub struct Session {
	data: SessionData,
	modes: RefCell<Vec<Box<dyn Mode>>>,
	mode: Cell<ModeKind>,
	search: RefCell<IncrementalSearch>,
	/// Layout-ready subscription held while activation is deferred.
	pending_activation: RefCell<Option<Subscription>>,
	is_activated: Cell<bool>,
	subscriptions: RefCell<SubscriptionSet>,
	is_closed: Cell<bool>,
	key_input_start: Signal<KeyInput>,
	key_input_end: Signal<KeyInput>,
	mode_switched: Signal<ModeSwitch>,
	closed: Signal<()>,
}

impl Session {
	pub(crate) fn new(data: SessionData, modes: Vec<Box<dyn Mode>>) -> Self {
		Self {
			data,
			modes: RefCell::new(modes),
			mode: Cell::new(ModeKind::Uninitialized),
			search: RefCell::new(IncrementalSearch::new()),
			pending_activation: RefCell::new(None),
			is_activated: Cell::new(false),
			subscriptions: RefCell::new(SubscriptionSet::new()),
			is_closed: Cell::new(false),
			key_input_start: Signal::new(),
			key_input_end: Signal::new(),
			mode_switched: Signal::new(),
			closed: Signal::new(),
		}
	}

	pub fn data(&self) -> &SessionData {
		&self.data
	}

	pub fn view_id(&self) -> ViewId {
		self.data.view_id()
	}

	pub fn wrapper(&self) -> &Rc<BufferWrapper> {
		self.data.wrapper()
	}

	pub fn mode(&self) -> ModeKind {
		self.mode.get()
	}

	pub fn mode_kinds(&self) -> Vec<ModeKind> {
		self.modes.borrow().iter().map(|mode| mode.kind()).collect()
	}

	pub fn search(&self) -> Ref<'_, IncrementalSearch> {
		self.search.borrow()
	}

	pub fn is_activated(&self) -> bool {
		self.is_activated.get()
	}

	/// True while activation waits for the view's first layout.
	pub fn is_activation_pending(&self) -> bool {
		self.pending_activation.borrow().is_some()
	}

	pub fn is_closed(&self) -> bool {
		self.is_closed.get()
	}

	/// Raised before each key is dispatched to the current mode.
	pub fn key_input_start(&self) -> &Signal<KeyInput> {
		&self.key_input_start
	}

	/// Raised after each key has been processed.
	pub fn key_input_end(&self) -> &Signal<KeyInput> {
		&self.key_input_end
	}

	pub fn mode_switched(&self) -> &Signal<ModeSwitch> {
		&self.mode_switched
	}

	/// Raised once by [`Session::close`].
	pub fn closed(&self) -> &Signal<()> {
		&self.closed
	}

	/// Ties a subscription's lifetime to this session.
	pub fn add_subscription(&self, subscription: Subscription) {
		self.subscriptions.borrow_mut().push(subscription);
	}

	pub(crate) fn defer_activation(&self, subscription: Subscription) {
		*self.pending_activation.borrow_mut() = Some(subscription);
	}

	/// Completes construction once the view can be laid out.
	///
	/// Only the first call has any effect. A session still in
	/// [`ModeKind::Uninitialized`] moves to its wrapper's mode.
	pub fn activate(&self) {
		if self.is_activated.replace(true) || self.is_closed() {
			return;
		}
		let pending = self.pending_activation.borrow_mut().take();
		drop(pending);

		debug!(view = %self.view_id(), "session activated");
		if self.mode() == ModeKind::Uninitialized {
			self.switch_mode(self.wrapper().mode());
		}
	}

	/// Moves to `kind`, running the old mode's deactivation and the new
	/// mode's activation. Switching to the current mode does nothing.
	pub fn switch_mode(&self, kind: ModeKind) {
		let from = self.mode();
		if from == kind || self.is_closed() {
			return;
		}

		{
			let ctx = self.context(None);
			let mut modes = self.modes.borrow_mut();
			if let Some(old) = modes.iter_mut().find(|m| m.kind() == from) {
				old.deactivate(&ctx);
			}
			self.mode.set(kind);
			if let Some(new) = modes.iter_mut().find(|m| m.kind() == kind) {
				new.activate(&ctx);
			}
		}

		if matches!(kind, ModeKind::Normal | ModeKind::Insert | ModeKind::Replace) {
			self.wrapper().set_mode(kind);
		}
		trace!(view = %self.view_id(), from = from.name(), to = kind.name(), "mode switched");
		self.mode_switched.emit(&ModeSwitch { from, to: kind });
	}

	/// Runs one line through command mode.
	pub fn run_command(&self, line: &str) -> bool {
		crate::mode::CommandMode::run_command(line, &self.data)
	}

	/// Feeds one key to the current mode.
	///
	/// Engine requests are returned to the caller rather than acted on.
	pub(crate) fn process(&self, key: KeyInput, recording: Option<char>) -> ProcessResult {
		self.key_input_start.emit(&key);

		let result = {
			let ctx = self.context(recording);
			let mut modes = self.modes.borrow_mut();
			let current = self.mode();
			match modes.iter_mut().find(|m| m.kind() == current) {
				Some(mode) => mode.process(key, &ctx),
				None => ProcessResult::NotHandled,
			}
		};

		if let ProcessResult::SwitchMode(kind) = result {
			self.switch_mode(kind);
		}
		self.key_input_end.emit(&key);
		result
	}

	/// Releases every subscription and raises [`Session::closed`].
	pub(crate) fn close(&self) {
		if self.is_closed.replace(true) {
			return;
		}
		self.pending_activation.borrow_mut().take();
		self.search.borrow_mut().cancel(&self.data);
		self.subscriptions.borrow_mut().dispose_all();
		debug!(view = %self.view_id(), "session closed");
		self.closed.emit(&());
	}

	fn context(&self, recording: Option<char>) -> ModeContext<'_> {
		ModeContext {
			data: &self.data,
			search: &self.search,
			recording,
		}
	}
}

impl fmt::Debug for Session {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Session")
			.field("view", &self.view_id())
			.field("mode", &self.mode())
			.field("is_activated", &self.is_activated())
			.field("is_closed", &self.is_closed())
			.finish()
	}
}
