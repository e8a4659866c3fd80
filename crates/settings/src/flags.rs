//! Flag sets parsed from comma separated settings.
//!
//! Unknown tokens are ignored, so a bad value degrades to the empty set
//! instead of failing.

use bitflags::bitflags;

use crate::parse::split_list;

bitflags! {
	/// Parsed form of the `clipboard` setting.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ClipboardOptions: u8 {
		const UNNAMED = 1 << 0;
		const AUTO_SELECT = 1 << 1;
		const AUTO_SELECT_ML = 1 << 2;
	}
}

bitflags! {
	/// Parsed form of the `selectmode` setting.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct SelectModeOptions: u8 {
		const MOUSE = 1 << 0;
		const KEYBOARD = 1 << 1;
		const COMMAND = 1 << 2;
	}
}

bitflags! {
	/// Parsed form of the `keymodel` setting.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct KeyModelOptions: u8 {
		const START_SELECTION = 1 << 0;
		const STOP_SELECTION = 1 << 1;
	}
}

/// Number formats recognised by `nrformats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
	Alpha,
	Decimal,
	Hex,
	Octal,
}

impl NumberFormat {
	/// Token used for this format in the `nrformats` list.
	pub fn token(self) -> &'static str {
		match self {
			NumberFormat::Alpha => "alpha",
			NumberFormat::Decimal => "decimal",
			NumberFormat::Hex => "hex",
			NumberFormat::Octal => "octal",
		}
	}
}

fn parse_flags<F: bitflags::Flags + Copy>(text: &str, table: &[(&str, F)]) -> F {
	let mut flags = F::empty();
	for token in split_list(text) {
		if let Some((_, flag)) = table.iter().find(|(name, _)| *name == token) {
			flags.insert(*flag);
		}
	}
	flags
}

fn format_flags<F: bitflags::Flags + Copy>(flags: F, table: &[(&str, F)]) -> String {
	table
		.iter()
		.filter(|(_, flag)| flags.contains(*flag))
		.map(|(name, _)| *name)
		.collect::<Vec<_>>()
		.join(",")
}

const CLIPBOARD_TOKENS: &[(&str, ClipboardOptions)] = &[
	("unnamed", ClipboardOptions::UNNAMED),
	("autoselect", ClipboardOptions::AUTO_SELECT),
	("autoselectml", ClipboardOptions::AUTO_SELECT_ML),
];

const SELECT_MODE_TOKENS: &[(&str, SelectModeOptions)] = &[
	("mouse", SelectModeOptions::MOUSE),
	("key", SelectModeOptions::KEYBOARD),
	("cmd", SelectModeOptions::COMMAND),
];

const KEY_MODEL_TOKENS: &[(&str, KeyModelOptions)] = &[
	("startsel", KeyModelOptions::START_SELECTION),
	("stopsel", KeyModelOptions::STOP_SELECTION),
];

impl ClipboardOptions {
	pub fn parse(text: &str) -> Self {
		parse_flags(text, CLIPBOARD_TOKENS)
	}

	pub fn to_setting_string(self) -> String {
		format_flags(self, CLIPBOARD_TOKENS)
	}
}

impl SelectModeOptions {
	pub fn parse(text: &str) -> Self {
		parse_flags(text, SELECT_MODE_TOKENS)
	}

	pub fn to_setting_string(self) -> String {
		format_flags(self, SELECT_MODE_TOKENS)
	}
}

impl KeyModelOptions {
	pub fn parse(text: &str) -> Self {
		parse_flags(text, KEY_MODEL_TOKENS)
	}

	pub fn to_setting_string(self) -> String {
		format_flags(self, KEY_MODEL_TOKENS)
	}
}
