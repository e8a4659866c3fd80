//! Core types shared by the settings and engine crates: identifiers, key
//! input and mode kinds.

/// Identifier types for buffers and views.
pub mod ids;
/// Key input events and notation parsing.
pub mod key;
/// Mode kind definitions.
pub mod mode;

pub use ids::{BufferId, ViewId};
pub use key::{KeyCode, KeyInput, Modifiers, parse_key_notation};
pub use mode::{ModeKind, SelectionKind};
