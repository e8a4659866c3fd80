//! Orchestration core of a modal text editor.
//!
//! The [`Engine`] owns the global settings and every editing [`Session`].
//! Sessions are built in stages by the [`SessionFactory`]: a per-buffer
//! [`BufferWrapper`], per-view [`SessionData`], then the session with its
//! mode set. Rendering, layout and text storage belong to the embedding
//! application, which plugs in through the traits in [`host`].

/// Nestable bulk-operation scopes.
pub mod bulk;
/// The engine and its session registry.
pub mod engine;
/// Command errors.
pub mod error;
/// Staged session construction.
pub mod factory;
/// Bootstrap file discovery on disk.
pub mod fs;
/// Command and search histories.
pub mod history;
/// Traits implemented by the embedding application.
pub mod host;
/// Ex command-line interpreter.
pub mod interpreter;
/// Jump positions.
pub mod jump_list;
/// Per-session modes.
pub mod mode;
/// Keyboard macros.
pub mod recorder;
/// Incremental search entry.
pub mod search;
/// Sessions.
pub mod session;
/// Per-view session state.
pub mod session_data;
/// Signals and subscriptions.
pub mod signal;
/// Undo and redo.
pub mod undo;
/// Keyword classification.
pub mod word;
/// Per-buffer state.
pub mod wrapper;

#[cfg(test)]
pub(crate) mod test_support;

pub use bulk::{BulkOperation, BulkOperationCounter};
pub use engine::{BootstrapState, Engine, InputScope};
pub use error::{CommandError, Result};
pub use factory::SessionFactory;
pub use fs::DiskFileSystem;
pub use history::{Histories, HistoryList};
pub use host::{BootstrapContents, FileSystem, Host, TextBuffer, TextView, UndoHistory};
pub use interpreter::Interpreter;
pub use jump_list::{JumpList, JumpLocation};
pub use mode::{EngineRequest, Mode, ModeContext, ProcessResult};
pub use recorder::{MacroRecorder, MacroState, SessionCreationListener};
pub use search::{IncrementalSearch, SearchDirection, SearchOutcome, SearchPattern};
pub use session::{ModeSwitch, Session};
pub use session_data::{SessionData, StatusReporter};
pub use signal::{Signal, Subscription, SubscriptionSet};
pub use undo::UndoRedo;
pub use word::WordNavigator;
pub use wrapper::BufferWrapper;
