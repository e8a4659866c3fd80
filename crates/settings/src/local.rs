//! The buffer-local scope.

use std::ops::Deref;
use std::rc::Rc;

use crate::flags::NumberFormat;
use crate::parse::split_list;
use crate::{GlobalSettings, Setting, SettingsRegistry};


/// Names of the buffer-local settings.
pub mod names {
	pub const AUTO_INDENT: &str = "autoindent";
	pub const EXPAND_TAB: &str = "expandtab";
	pub const IS_KEYWORD: &str = "iskeyword";
	pub const NUMBER_FORMATS: &str = "nrformats";
	pub const NUMBER: &str = "number";
	pub const QUOTE_ESCAPE: &str = "quoteescape";
	pub const SHIFT_WIDTH: &str = "shiftwidth";
	pub const TAB_STOP: &str = "tabstop";
}

use names::*;

pub const DEFAULT_IS_KEYWORD: &str = "@,48-57,_,192-255";
pub const DEFAULT_TAB_STOP: i64 = 8;
pub const DEFAULT_SHIFT_WIDTH: i64 = 8;

fn definitions() -> Vec<Setting> {
	vec![
		Setting::new(AUTO_INDENT, "ai", false, false),
		Setting::new(EXPAND_TAB, "et", false, false),
		Setting::new(IS_KEYWORD, "isk", DEFAULT_IS_KEYWORD, false),
		Setting::new(NUMBER_FORMATS, "nf", "octal,hex", false),
		Setting::new(NUMBER, "nu", false, false),
		Setting::new(QUOTE_ESCAPE, "qe", "\\", false),
		Setting::new(SHIFT_WIDTH, "sw", DEFAULT_SHIFT_WIDTH, false),
		Setting::new(TAB_STOP, "ts", DEFAULT_TAB_STOP, false),
	]
}

/// Settings owned by a single text buffer.
#[derive(Debug)]
pub struct LocalSettings {
	registry: SettingsRegistry,
	global: Rc<GlobalSettings>,
}

impl LocalSettings {
	pub fn new(global: Rc<GlobalSettings>) -> Self {
		Self {
			registry: SettingsRegistry::new(definitions()),
			global,
		}
	}

	/// Returns an independent copy bound to the same global scope.
	pub fn copy(&self) -> Self {
		Self {
			registry: self.registry.copy(),
			global: self.global.clone(),
		}
	}

	pub fn registry(&self) -> &SettingsRegistry {
		&self.registry
	}

	pub fn global_settings(&self) -> &Rc<GlobalSettings> {
		&self.global
	}

	pub fn auto_indent(&self) -> bool {
		self.registry.toggle(AUTO_INDENT).unwrap_or(false)
	}

	pub fn expand_tab(&self) -> bool {
		self.registry.toggle(EXPAND_TAB).unwrap_or(false)
	}

	pub fn is_keyword(&self) -> String {
		self.registry
			.text(IS_KEYWORD)
			.unwrap_or_else(|| DEFAULT_IS_KEYWORD.to_string())
	}

	pub fn number_formats(&self) -> String {
		self.registry.text(NUMBER_FORMATS).unwrap_or_default()
	}

	/// True iff `nrformats` lists the token for `format`.
	pub fn is_number_format_supported(&self, format: NumberFormat) -> bool {
		split_list(&self.number_formats()).any(|token| token == format.token())
	}

	/// Whether line numbers are displayed.
	pub fn number_display(&self) -> bool {
		self.registry.toggle(NUMBER).unwrap_or(false)
	}

	pub fn quote_escape(&self) -> String {
		self.registry.text(QUOTE_ESCAPE).unwrap_or_default()
	}

	pub fn shift_width(&self) -> i64 {
		self.registry.number(SHIFT_WIDTH).unwrap_or(DEFAULT_SHIFT_WIDTH)
	}

	pub fn tab_stop(&self) -> i64 {
		self.registry.number(TAB_STOP).unwrap_or(DEFAULT_TAB_STOP)
	}
}

impl Deref for LocalSettings {
	type Target = SettingsRegistry;

	fn deref(&self) -> &SettingsRegistry {
		&self.registry
	}
}
