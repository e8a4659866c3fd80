//! Mode kinds.
//!
//! The engine keeps one mode object per kind on every session; this enum is
//! the key used to select between them.

/// Which text the selection covers in visual and select modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
	Character,
	Line,
	Block,
}

impl SelectionKind {
	pub const ALL: [SelectionKind; 3] = [SelectionKind::Character, SelectionKind::Line, SelectionKind::Block];
}

/// Identifies a mode on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModeKind {
	/// The session has been constructed but its view has not been laid out.
	#[default]
	Uninitialized,
	Normal,
	Insert,
	Replace,
	/// Ex command line (`:`).
	Command,
	Visual(SelectionKind),
	Select(SelectionKind),
	/// Waiting for `y/n/a/q/l` during `:s///c`.
	SubstituteConfirm,
	/// All input is passed through to the host.
	Disabled,
	/// The buffer is being edited by something other than the user.
	ExternalEdit,
}

impl ModeKind {
	/// Returns a simple string identifier for the mode.
	pub fn name(&self) -> &'static str {
		match self {
			ModeKind::Uninitialized => "uninitialized",
			ModeKind::Normal => "normal",
			ModeKind::Insert => "insert",
			ModeKind::Replace => "replace",
			ModeKind::Command => "command",
			ModeKind::Visual(SelectionKind::Character) => "visual",
			ModeKind::Visual(SelectionKind::Line) => "visual-line",
			ModeKind::Visual(SelectionKind::Block) => "visual-block",
			ModeKind::Select(SelectionKind::Character) => "select",
			ModeKind::Select(SelectionKind::Line) => "select-line",
			ModeKind::Select(SelectionKind::Block) => "select-block",
			ModeKind::SubstituteConfirm => "substitute-confirm",
			ModeKind::Disabled => "disabled",
			ModeKind::ExternalEdit => "external-edit",
		}
	}

	/// Returns true for the text-entry modes.
	pub fn is_any_insert(&self) -> bool {
		matches!(self, ModeKind::Insert | ModeKind::Replace)
	}

	pub fn is_any_visual(&self) -> bool {
		matches!(self, ModeKind::Visual(_))
	}

	pub fn is_any_select(&self) -> bool {
		matches!(self, ModeKind::Select(_))
	}
}
