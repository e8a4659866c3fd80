//! Undo and redo bound to a buffer's history.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::host::UndoHistory;

/// Counted undo/redo over an optional [`UndoHistory`].
///
/// Buffers without a history get a no-op instance.
#[derive(Clone, Default)]
pub struct UndoRedo {
	history: Option<Rc<dyn UndoHistory>>,
}

impl UndoRedo {
	pub fn new(history: Option<Rc<dyn UndoHistory>>) -> Self {
		Self { history }
	}

	pub fn has_history(&self) -> bool {
		self.history.is_some()
	}

	pub fn can_undo(&self) -> bool {
		self.history.as_ref().is_some_and(|h| h.can_undo())
	}

	pub fn can_redo(&self) -> bool {
		self.history.as_ref().is_some_and(|h| h.can_redo())
	}

	/// Undoes up to `count` changes. Returns false if nothing was undone.
	pub fn undo(&self, count: usize) -> bool {
		let Some(history) = &self.history else {
			return false;
		};
		let done = (0..count.max(1)).take_while(|_| history.undo()).count();
		trace!(requested = count, done, "undo");
		done > 0
	}

	/// Redoes up to `count` changes. Returns false if nothing was redone.
	pub fn redo(&self, count: usize) -> bool {
		let Some(history) = &self.history else {
			return false;
		};
		let done = (0..count.max(1)).take_while(|_| history.redo()).count();
		trace!(requested = count, done, "redo");
		done > 0
	}
}

impl fmt::Debug for UndoRedo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UndoRedo")
			.field("has_history", &self.has_history())
			.finish()
	}
}
