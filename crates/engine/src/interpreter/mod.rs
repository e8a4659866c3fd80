//! Ex command-line interpreter.
//!
//! Runs the lines typed in command mode and the lines of the bootstrap
//! script. Supported commands:
//!
//! | command      | shortest   |
//! |--------------|------------|
//! | `set`        | `se`       |
//! | `setlocal`   | `setl`     |
//! | `setglobal`  | `setg`     |
//! | `undo`       | `u`        |
//! | `redo`       | `red`      |
//! | `history`    | `his`      |
//! | `jumps`      | `ju`       |
//! | `clearjumps` | `cle`      |
//!
//! Blank lines and lines starting with `"` are ignored.

use tracing::trace;

use crate::error::{CommandError, Result};
use crate::session_data::SessionData;

mod set;

#[cfg(test)]
mod tests;

pub use set::SetScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
	Set(SetScope),
	Undo,
	Redo,
	History,
	Jumps,
	ClearJumps,
}

struct CommandName {
	name: &'static str,
	/// Shortest accepted abbreviation.
	min_len: usize,
	command: Command,
}

const COMMANDS: &[CommandName] = &[
	CommandName { name: "set", min_len: 2, command: Command::Set(SetScope::All) },
	CommandName { name: "setlocal", min_len: 4, command: Command::Set(SetScope::Local) },
	CommandName { name: "setglobal", min_len: 4, command: Command::Set(SetScope::Global) },
	CommandName { name: "undo", min_len: 1, command: Command::Undo },
	CommandName { name: "redo", min_len: 3, command: Command::Redo },
	CommandName { name: "history", min_len: 3, command: Command::History },
	CommandName { name: "jumps", min_len: 2, command: Command::Jumps },
	CommandName { name: "clearjumps", min_len: 3, command: Command::ClearJumps },
];

fn lookup(name: &str) -> Option<Command> {
	COMMANDS
		.iter()
		.find(|c| name.len() >= c.min_len && c.name.starts_with(name))
		.map(|c| c.command)
}

/// Executes command lines against one session's data.
pub struct Interpreter<'a> {
	data: &'a SessionData,
}

impl<'a> Interpreter<'a> {
	pub fn new(data: &'a SessionData) -> Self {
		Self { data }
	}

	pub fn run(&self, line: &str) -> Result<()> {
		let line = line.trim_start_matches(|c: char| c == ':' || c.is_whitespace()).trim_end();
		if line.is_empty() || line.starts_with('"') {
			return Ok(());
		}

		let name_len = line.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(line.len());
		let (name, rest) = line.split_at(name_len);
		let command = lookup(name)
			.filter(|_| rest.is_empty() || rest.starts_with(char::is_whitespace))
			.ok_or_else(|| CommandError::NotAnEditorCommand(line.to_string()))?;
		let args = rest.trim();
		trace!(view = %self.data.view_id(), ?command, args, "running command");

		match command {
			Command::Set(scope) => self.set(scope, args),
			Command::Undo => self.undo_redo(args, true),
			Command::Redo => self.undo_redo(args, false),
			Command::History => self.history(args),
			Command::Jumps => {
				no_args(args)?;
				self.jumps();
				Ok(())
			}
			Command::ClearJumps => {
				no_args(args)?;
				self.data.jump_list().borrow_mut().clear();
				Ok(())
			}
		}
	}

	fn report(&self, message: &str) {
		self.data.status().status(message);
	}

	fn undo_redo(&self, args: &str, undo: bool) -> Result<()> {
		let count = if args.is_empty() {
			1
		} else {
			args.parse::<usize>()
				.map_err(|_| CommandError::TrailingCharacters(args.to_string()))?
		};
		let undo_redo = self.data.undo_redo();
		if undo && !undo_redo.undo(count) {
			self.report("Already at oldest change");
		} else if !undo && !undo_redo.redo(count) {
			self.report("Already at newest change");
		}
		Ok(())
	}

	fn history(&self, args: &str) -> Result<()> {
		let histories = self.data.histories();
		let (command, search) = match args {
			"" | ":" | "cmd" => (true, false),
			"/" | "?" | "search" => (false, true),
			"a" | "all" => (true, true),
			_ => return Err(CommandError::InvalidArgument(args.to_string())),
		};

		let mut lines = Vec::new();
		if command {
			lines.push("      #  cmd history".to_string());
			let list = histories.command.borrow();
			lines.extend(list.iter().enumerate().map(|(i, entry)| format!("{:>7}  {entry}", i + 1)));
		}
		if search {
			lines.push("      #  search history".to_string());
			let list = histories.search.borrow();
			lines.extend(list.iter().enumerate().map(|(i, entry)| format!("{:>7}  {entry}", i + 1)));
		}
		self.report(&lines.join("\n"));
		Ok(())
	}

	fn jumps(&self) {
		let jumps = self.data.jump_list().borrow();
		let current = jumps.current_index();
		let mut lines = vec![" jump line  col".to_string()];
		for (i, location) in jumps.locations().iter().enumerate() {
			let distance = current.abs_diff(i);
			lines.push(format!("{distance:>5} {:>5} {:>4}", location.line, location.column));
		}
		if current == jumps.len() {
			lines.push(">".to_string());
		}
		self.report(&lines.join("\n"));
	}
}

fn no_args(args: &str) -> Result<()> {
	if args.is_empty() {
		Ok(())
	} else {
		Err(CommandError::TrailingCharacters(args.to_string()))
	}
}
