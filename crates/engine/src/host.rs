//! Collaborator contracts consumed by the engine.
//!
//! The engine never renders, lays out text or touches the disk directly. The
//! embedding application supplies these traits; tests supply doubles.

use std::path::PathBuf;
use std::rc::Rc;

use tarn_primitives::{BufferId, ViewId};
use tracing::{info, warn};

use crate::signal::Signal;

/// Undo history attached to a text buffer.
pub trait UndoHistory {
	fn can_undo(&self) -> bool;
	fn can_redo(&self) -> bool;
	/// Undoes one change. Returns false if there was nothing to undo.
	fn undo(&self) -> bool;
	/// Redoes one change. Returns false if there was nothing to redo.
	fn redo(&self) -> bool;
}

/// An underlying text buffer. May be shown in several views.
pub trait TextBuffer {
	fn id(&self) -> BufferId;
	/// The buffer's undo history, if the host keeps one.
	fn undo_history(&self) -> Option<Rc<dyn UndoHistory>>;
}

/// A display view over a text buffer.
pub trait TextView {
	fn id(&self) -> ViewId;
	fn buffer(&self) -> Rc<dyn TextBuffer>;
	/// Whether display geometry is available yet.
	fn is_layout_ready(&self) -> bool;
	/// Raised each time the view completes a layout pass.
	fn layout_ready(&self) -> &Signal<()>;
	/// Raised once when the view is closed.
	fn closed(&self) -> &Signal<()>;
	fn close(&self);
	fn is_closed(&self) -> bool;
}

/// The application embedding the engine.
pub trait Host {
	/// Creates a view that is never shown, used to run the bootstrap script.
	fn create_hidden_view(&self) -> Rc<dyn TextView>;
	fn focused_view(&self) -> Option<ViewId>;
	/// Suspends expensive per-change work until the matching end call.
	fn begin_bulk_operation(&self);
	fn end_bulk_operation(&self);
	fn display_name(&self, buffer: &dyn TextBuffer) -> String;

	fn report_status(&self, view: ViewId, message: &str) {
		info!(%view, text = message, "status message");
	}

	fn report_error(&self, view: ViewId, message: &str) {
		warn!(%view, text = message, "error message");
	}
}

/// Contents of a discovered bootstrap file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapContents {
	pub path: PathBuf,
	pub lines: Vec<String>,
}

/// Where bootstrap scripts come from.
pub trait FileSystem {
	/// Directories searched for a bootstrap file, in priority order.
	fn bootstrap_search_directories(&self) -> Vec<PathBuf>;
	/// Loads the first bootstrap file found, if any.
	fn load_bootstrap_contents(&self) -> Option<BootstrapContents>;
}
