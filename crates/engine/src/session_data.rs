//! Per-view state beneath a [`Session`](crate::Session).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tarn_primitives::ViewId;
use tarn_settings::{GlobalSettings, LocalSettings, WindowSettings};

use crate::history::Histories;
use crate::host::{Host, TextView};
use crate::jump_list::JumpList;
use crate::undo::UndoRedo;
use crate::wrapper::BufferWrapper;

/// Routes messages for one view to the host.
#[derive(Clone)]
pub struct StatusReporter {
	host: Rc<dyn Host>,
	view: ViewId,
}

impl StatusReporter {
	pub fn new(host: Rc<dyn Host>, view: ViewId) -> Self {
		Self { host, view }
	}

	pub fn status(&self, message: &str) {
		self.host.report_status(self.view, message);
	}

	pub fn error(&self, message: &str) {
		self.host.report_error(self.view, message);
	}
}

impl fmt::Debug for StatusReporter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StatusReporter").field("view", &self.view).finish()
	}
}

/// Everything a session needs about its view: the buffer wrapper, undo,
/// jumps, window settings and status reporting.
pub struct SessionData {
	wrapper: Rc<BufferWrapper>,
	view: Rc<dyn TextView>,
	undo_redo: UndoRedo,
	jump_list: RefCell<JumpList>,
	window_settings: WindowSettings,
	status: StatusReporter,
	histories: Rc<Histories>,
}

impl SessionData {
	pub(crate) fn new(
		wrapper: Rc<BufferWrapper>,
		view: Rc<dyn TextView>,
		window_settings: WindowSettings,
		host: Rc<dyn Host>,
		histories: Rc<Histories>,
	) -> Self {
		let undo_redo = UndoRedo::new(wrapper.buffer().undo_history());
		let status = StatusReporter::new(host, view.id());
		Self {
			wrapper,
			view,
			undo_redo,
			jump_list: RefCell::new(JumpList::new()),
			window_settings,
			status,
			histories,
		}
	}

	pub fn wrapper(&self) -> &Rc<BufferWrapper> {
		&self.wrapper
	}

	pub fn view(&self) -> &Rc<dyn TextView> {
		&self.view
	}

	pub fn view_id(&self) -> ViewId {
		self.view.id()
	}

	pub fn undo_redo(&self) -> &UndoRedo {
		&self.undo_redo
	}

	pub fn jump_list(&self) -> &RefCell<JumpList> {
		&self.jump_list
	}

	pub fn local_settings(&self) -> &LocalSettings {
		self.wrapper.local_settings()
	}

	pub fn window_settings(&self) -> &WindowSettings {
		&self.window_settings
	}

	pub fn global_settings(&self) -> &Rc<GlobalSettings> {
		self.window_settings.global_settings()
	}

	pub fn status(&self) -> &StatusReporter {
		&self.status
	}

	pub fn histories(&self) -> &Rc<Histories> {
		&self.histories
	}
}

impl fmt::Debug for SessionData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SessionData")
			.field("view", &self.view.id())
			.field("wrapper", &self.wrapper)
			.finish_non_exhaustive()
	}
}
