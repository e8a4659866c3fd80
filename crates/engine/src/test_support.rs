//! Host, view, buffer and file system doubles.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use tarn_primitives::{BufferId, ViewId};
use tarn_settings::{GlobalSettings, LocalSettings, WindowSettings};

use crate::factory::SessionFactory;
use crate::history::Histories;
use crate::host::{BootstrapContents, FileSystem, Host, TextBuffer, TextView, UndoHistory};
use crate::session::Session;
use crate::session_data::SessionData;
use crate::signal::Signal;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

/// A factory over fresh global settings and a recording host.
pub struct Fixture {
	pub host: Rc<FakeHost>,
	pub global: Rc<GlobalSettings>,
	pub histories: Rc<Histories>,
	pub factory: SessionFactory,
}

impl Fixture {
	pub fn new() -> Self {
		init_tracing();
		let host = Rc::new(FakeHost::new());
		let global = Rc::new(GlobalSettings::new());
		let histories = Rc::new(Histories::new(50));
		let factory = SessionFactory::new(host.clone(), histories.clone());
		Self {
			host,
			global,
			histories,
			factory,
		}
	}

	/// Session data for a fresh buffer shown in `view`.
	pub fn data_for(&self, view: Rc<FakeView>) -> SessionData {
		let wrapper = self
			.factory
			.create_wrapper(view.buffer(), &LocalSettings::new(self.global.clone()));
		self.factory
			.create_session_data(wrapper, view, &WindowSettings::new(self.global.clone()))
	}

	pub fn data(&self) -> SessionData {
		self.data_for(FakeView::new(1, FakeBuffer::new(1)))
	}

	pub fn session(&self, view: Rc<FakeView>) -> Rc<Session> {
		self.factory.create_session(self.data_for(view))
	}
}

/// Undo history holding a fixed number of changes.
#[derive(Debug, Default)]
pub struct FakeUndo {
	changes: usize,
	undone: Cell<usize>,
}

impl FakeUndo {
	pub fn with_changes(changes: usize) -> Self {
		Self {
			changes,
			undone: Cell::new(0),
		}
	}

	pub fn undone(&self) -> usize {
		self.undone.get()
	}
}

impl UndoHistory for FakeUndo {
	fn can_undo(&self) -> bool {
		self.undone.get() < self.changes
	}

	fn can_redo(&self) -> bool {
		self.undone.get() > 0
	}

	fn undo(&self) -> bool {
		let can = self.can_undo();
		if can {
			self.undone.set(self.undone.get() + 1);
		}
		can
	}

	fn redo(&self) -> bool {
		let can = self.can_redo();
		if can {
			self.undone.set(self.undone.get() - 1);
		}
		can
	}
}

pub struct FakeBuffer {
	id: BufferId,
	undo: Option<Rc<FakeUndo>>,
}

impl FakeBuffer {
	pub fn new(id: u64) -> Rc<Self> {
		Rc::new(Self { id: BufferId(id), undo: None })
	}

	pub fn with_undo(id: u64, undo: Rc<FakeUndo>) -> Rc<Self> {
		Rc::new(Self {
			id: BufferId(id),
			undo: Some(undo),
		})
	}
}

impl TextBuffer for FakeBuffer {
	fn id(&self) -> BufferId {
		self.id
	}

	fn undo_history(&self) -> Option<Rc<dyn UndoHistory>> {
		self.undo.clone().map(|undo| undo as Rc<dyn UndoHistory>)
	}
}

pub struct FakeView {
	id: ViewId,
	buffer: Rc<FakeBuffer>,
	is_layout_ready: Cell<bool>,
	layout_ready: Signal<()>,
	closed: Signal<()>,
	is_closed: Cell<bool>,
	close_calls: Cell<usize>,
}

impl FakeView {
	pub fn new(id: u64, buffer: Rc<FakeBuffer>) -> Rc<Self> {
		Self::build(id, buffer, true)
	}

	/// A view whose layout has not completed yet.
	pub fn unlaid(id: u64, buffer: Rc<FakeBuffer>) -> Rc<Self> {
		Self::build(id, buffer, false)
	}

	fn build(id: u64, buffer: Rc<FakeBuffer>, is_layout_ready: bool) -> Rc<Self> {
		Rc::new(Self {
			id: ViewId(id),
			buffer,
			is_layout_ready: Cell::new(is_layout_ready),
			layout_ready: Signal::new(),
			closed: Signal::new(),
			is_closed: Cell::new(false),
			close_calls: Cell::new(0),
		})
	}

	pub fn fire_layout_ready(&self) {
		self.is_layout_ready.set(true);
		self.layout_ready.emit(&());
	}

	pub fn close_calls(&self) -> usize {
		self.close_calls.get()
	}
}

impl TextView for FakeView {
	fn id(&self) -> ViewId {
		self.id
	}

	fn buffer(&self) -> Rc<dyn TextBuffer> {
		self.buffer.clone()
	}

	fn is_layout_ready(&self) -> bool {
		self.is_layout_ready.get()
	}

	fn layout_ready(&self) -> &Signal<()> {
		&self.layout_ready
	}

	fn closed(&self) -> &Signal<()> {
		&self.closed
	}

	fn close(&self) {
		self.close_calls.set(self.close_calls.get() + 1);
		if !self.is_closed.replace(true) {
			self.closed.emit(&());
		}
	}

	fn is_closed(&self) -> bool {
		self.is_closed.get()
	}
}

/// Host double that records everything the engine asks of it.
pub struct FakeHost {
	next_id: Cell<u64>,
	hidden_views: RefCell<Vec<Rc<FakeView>>>,
	focused: Cell<Option<ViewId>>,
	bulk_begins: Cell<usize>,
	bulk_ends: Cell<usize>,
	statuses: RefCell<Vec<String>>,
	errors: RefCell<Vec<String>>,
}

impl Default for FakeHost {
	fn default() -> Self {
		Self::new()
	}
}

impl FakeHost {
	/// Hidden views get ids from here up, clear of ids used by tests.
	const HIDDEN_ID_BASE: u64 = 1000;

	pub fn new() -> Self {
		Self {
			next_id: Cell::new(Self::HIDDEN_ID_BASE),
			hidden_views: RefCell::new(Vec::new()),
			focused: Cell::new(None),
			bulk_begins: Cell::new(0),
			bulk_ends: Cell::new(0),
			statuses: RefCell::new(Vec::new()),
			errors: RefCell::new(Vec::new()),
		}
	}

	pub fn set_focused(&self, view: Option<ViewId>) {
		self.focused.set(view);
	}

	pub fn hidden_views(&self) -> Vec<Rc<FakeView>> {
		self.hidden_views.borrow().clone()
	}

	/// `(created, closed)` hidden view counts.
	pub fn hidden_view_counts(&self) -> (usize, usize) {
		let views = self.hidden_views.borrow();
		(views.len(), views.iter().filter(|v| v.is_closed()).count())
	}

	/// `(begins, ends)` bulk operation notifications.
	pub fn bulk_counts(&self) -> (usize, usize) {
		(self.bulk_begins.get(), self.bulk_ends.get())
	}

	pub fn statuses(&self) -> Vec<String> {
		self.statuses.borrow().clone()
	}

	pub fn last_status(&self) -> Option<String> {
		self.statuses.borrow().last().cloned()
	}

	pub fn errors(&self) -> Vec<String> {
		self.errors.borrow().clone()
	}
}

impl Host for FakeHost {
	fn create_hidden_view(&self) -> Rc<dyn TextView> {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		let view = FakeView::unlaid(id, FakeBuffer::new(id));
		self.hidden_views.borrow_mut().push(view.clone());
		view
	}

	fn focused_view(&self) -> Option<ViewId> {
		self.focused.get()
	}

	fn begin_bulk_operation(&self) {
		self.bulk_begins.set(self.bulk_begins.get() + 1);
	}

	fn end_bulk_operation(&self) {
		self.bulk_ends.set(self.bulk_ends.get() + 1);
	}

	fn display_name(&self, buffer: &dyn TextBuffer) -> String {
		format!("[buffer {}]", buffer.id().0)
	}

	fn report_status(&self, _view: ViewId, message: &str) {
		self.statuses.borrow_mut().push(message.to_string());
	}

	fn report_error(&self, _view: ViewId, message: &str) {
		self.errors.borrow_mut().push(message.to_string());
	}
}

#[derive(Debug, Default)]
pub struct FakeFileSystem {
	directories: Vec<PathBuf>,
	contents: Option<BootstrapContents>,
	loads: Cell<usize>,
}

impl FakeFileSystem {
	pub fn empty(directories: &[&str]) -> Self {
		Self {
			directories: directories.iter().map(PathBuf::from).collect(),
			..Self::default()
		}
	}

	pub fn with_rc(path: &str, lines: &[&str]) -> Self {
		Self {
			directories: vec![PathBuf::from("/home/user")],
			contents: Some(BootstrapContents {
				path: PathBuf::from(path),
				lines: lines.iter().map(|line| line.to_string()).collect(),
			}),
			loads: Cell::new(0),
		}
	}

	pub fn loads(&self) -> usize {
		self.loads.get()
	}
}

impl FileSystem for FakeFileSystem {
	fn bootstrap_search_directories(&self) -> Vec<PathBuf> {
		self.directories.clone()
	}

	fn load_bootstrap_contents(&self) -> Option<BootstrapContents> {
		self.loads.set(self.loads.get() + 1);
		self.contents.clone()
	}
}
