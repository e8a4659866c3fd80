//! Per-buffer editing state shared by every view of that buffer.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use tarn_primitives::{BufferId, ModeKind};
use tarn_settings::local::names::IS_KEYWORD;
use tarn_settings::{LocalSettings, ObserverId};
use tracing::debug;

use crate::host::TextBuffer;
use crate::word::WordNavigator;

/// Buffer-level state: local settings, the word navigator derived from
/// `iskeyword` and the mode new sessions on this buffer start in.
pub struct BufferWrapper {
	buffer: Rc<dyn TextBuffer>,
	name: String,
	local_settings: LocalSettings,
	word_navigator: Rc<RefCell<WordNavigator>>,
	is_keyword_observer: ObserverId,
	mode: Cell<ModeKind>,
}

impl BufferWrapper {
	pub(crate) fn new(buffer: Rc<dyn TextBuffer>, name: String, local_settings: LocalSettings) -> Self {
		let word_navigator = Rc::new(RefCell::new(WordNavigator::new(&local_settings.is_keyword())));

		let navigator = Rc::downgrade(&word_navigator);
		let buffer_id = buffer.id();
		let is_keyword_observer = local_settings.subscribe(move |change| {
			if change.setting.name != IS_KEYWORD || !change.is_value_changed {
				return;
			}
			let Some(navigator) = navigator.upgrade() else {
				return;
			};
			let spec = change.setting.aggregate_value().as_text().unwrap_or_default();
			debug!(buffer = %buffer_id, iskeyword = %spec, "rebuilding word navigator");
			*navigator.borrow_mut() = WordNavigator::new(&spec);
		});

		Self {
			buffer,
			name,
			local_settings,
			word_navigator,
			is_keyword_observer,
			mode: Cell::new(ModeKind::Normal),
		}
	}

	pub fn buffer(&self) -> &Rc<dyn TextBuffer> {
		&self.buffer
	}

	pub fn buffer_id(&self) -> BufferId {
		self.buffer.id()
	}

	/// Display name supplied by the host at creation.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn local_settings(&self) -> &LocalSettings {
		&self.local_settings
	}

	pub fn word_navigator(&self) -> Ref<'_, WordNavigator> {
		self.word_navigator.borrow()
	}

	/// Mode the most recent session on this buffer left off in.
	pub fn mode(&self) -> ModeKind {
		self.mode.get()
	}

	pub(crate) fn set_mode(&self, mode: ModeKind) {
		self.mode.set(mode);
	}
}

impl Drop for BufferWrapper {
	fn drop(&mut self) {
		self.local_settings.unsubscribe(self.is_keyword_observer);
	}
}

impl fmt::Debug for BufferWrapper {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BufferWrapper")
			.field("buffer", &self.buffer_id())
			.field("name", &self.name)
			.field("mode", &self.mode.get())
			.finish()
	}
}
