//! Key input events.
//!
//! A [`KeyInput`] is the unit the engine feeds to a session. Sequences can be
//! written in vim key notation (`"ihello<Esc>"`, `"<C-v>"`) and parsed with
//! [`parse_key_notation`], which is how macros and tests describe input.

use std::fmt;

use smallvec::SmallVec;


/// Key modifiers held while a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	pub ctrl: bool,
	pub alt: bool,
	pub shift: bool,
}

impl Modifiers {
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
	};

	pub const CTRL: Self = Self {
		ctrl: true,
		alt: false,
		shift: false,
	};

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift
	}
}

/// Key identity without modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	Char(char),
	Enter,
	Escape,
	Backspace,
	Tab,
	Up,
	Down,
	Left,
	Right,
}

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl KeyInput {
	pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// Plain character key.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c), Modifiers::NONE)
	}

	/// Character key with Ctrl held.
	pub const fn ctrl(c: char) -> Self {
		Self::new(KeyCode::Char(c), Modifiers::CTRL)
	}

	pub const fn enter() -> Self {
		Self::new(KeyCode::Enter, Modifiers::NONE)
	}

	pub const fn escape() -> Self {
		Self::new(KeyCode::Escape, Modifiers::NONE)
	}

	pub const fn backspace() -> Self {
		Self::new(KeyCode::Backspace, Modifiers::NONE)
	}

	/// Returns the character for unmodified character keys.
	pub fn as_char(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
			_ => None,
		}
	}

	/// Returns true for `<Esc>` and its `<C-[>` alias.
	pub fn is_escape(&self) -> bool {
		match self.code {
			KeyCode::Escape => true,
			KeyCode::Char('[') => self.modifiers.ctrl,
			_ => false,
		}
	}
}

impl fmt::Display for KeyInput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self.code {
			KeyCode::Char(c) if self.modifiers.is_empty() => return write!(f, "{c}"),
			KeyCode::Char(c) => c.to_string(),
			KeyCode::Enter => "CR".to_string(),
			KeyCode::Escape => "Esc".to_string(),
			KeyCode::Backspace => "BS".to_string(),
			KeyCode::Tab => "Tab".to_string(),
			KeyCode::Up => "Up".to_string(),
			KeyCode::Down => "Down".to_string(),
			KeyCode::Left => "Left".to_string(),
			KeyCode::Right => "Right".to_string(),
		};
		f.write_str("<")?;
		if self.modifiers.ctrl {
			f.write_str("C-")?;
		}
		if self.modifiers.alt {
			f.write_str("A-")?;
		}
		if self.modifiers.shift {
			f.write_str("S-")?;
		}
		write!(f, "{name}>")
	}
}

/// Parses vim key notation into a key sequence.
///
/// Bracketed names that are not recognised (and a lone `<`) are taken
/// literally, character by character, matching how vim treats them.
pub fn parse_key_notation(text: &str) -> SmallVec<[KeyInput; 16]> {
	let mut keys = SmallVec::new();
	let mut rest = text;

	while let Some(c) = rest.chars().next() {
		if c == '<'
			&& let Some(end) = rest.find('>')
			&& let Some(key) = parse_bracketed(&rest[1..end])
		{
			keys.push(key);
			rest = &rest[end + 1..];
			continue;
		}
		keys.push(KeyInput::char(c));
		rest = &rest[c.len_utf8()..];
	}

	keys
}

fn parse_bracketed(name: &str) -> Option<KeyInput> {
	let mut modifiers = Modifiers::NONE;
	let mut body = name;
	loop {
		let lower = body.get(..2).map(str::to_ascii_lowercase);
		match lower.as_deref() {
			Some("c-") if body.len() > 2 => modifiers.ctrl = true,
			Some("a-") | Some("m-") if body.len() > 2 => modifiers.alt = true,
			Some("s-") if body.len() > 2 => modifiers.shift = true,
			_ => break,
		}
		body = &body[2..];
	}

	let code = match body.to_ascii_lowercase().as_str() {
		"cr" | "enter" | "return" => KeyCode::Enter,
		"esc" => KeyCode::Escape,
		"bs" => KeyCode::Backspace,
		"tab" => KeyCode::Tab,
		"up" => KeyCode::Up,
		"down" => KeyCode::Down,
		"left" => KeyCode::Left,
		"right" => KeyCode::Right,
		"space" => KeyCode::Char(' '),
		"lt" => KeyCode::Char('<'),
		_ => {
			let mut chars = body.chars();
			match (chars.next(), chars.next()) {
				(Some(c), None) if !modifiers.is_empty() => KeyCode::Char(c.to_ascii_lowercase()),
				_ => return None,
			}
		}
	};

	Some(KeyInput::new(code, modifiers))
}
