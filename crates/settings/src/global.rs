//! The global scope.
//!
//! One [`GlobalSettings`] exists per engine and is shared, via `Rc`, with
//! every local and window scope the engine creates.

use std::ops::Deref;

use crate::flags::{ClipboardOptions, KeyModelOptions, SelectModeOptions};
use crate::parse::split_list;
use crate::{Setting, SettingKind, SettingValue, SettingsRegistry};


/// Names of the global settings.
pub mod names {
	pub const BACKSPACE: &str = "backspace";
	pub const CLIPBOARD: &str = "clipboard";
	pub const HISTORY: &str = "history";
	pub const HIGHLIGHT_SEARCH: &str = "hlsearch";
	pub const IGNORE_CASE: &str = "ignorecase";
	pub const INCREMENTAL_SEARCH: &str = "incsearch";
	pub const KEY_MODEL: &str = "keymodel";
	pub const MAGIC: &str = "magic";
	pub const SCROLL_OFFSET: &str = "scrolloff";
	pub const SELECTION: &str = "selection";
	pub const SELECT_MODE: &str = "selectmode";
	pub const SHELL: &str = "shell";
	pub const SMART_CASE: &str = "smartcase";
	pub const START_OF_LINE: &str = "startofline";
	pub const TIMEOUT: &str = "timeout";
	pub const TIMEOUT_LENGTH: &str = "timeoutlen";
	pub const VIM_RC: &str = "vimrc";
	pub const VIM_RC_PATHS: &str = "vimrcpaths";
	pub const VISUAL_BELL: &str = "visualbell";
	pub const WRAP_SCAN: &str = "wrapscan";
}

use names::*;

pub const DEFAULT_HISTORY: i64 = 50;
pub const DEFAULT_TIMEOUT_LENGTH: i64 = 1000;

/// Shell used when neither `$SHELL` nor `$COMSPEC` is set.
const FALLBACK_SHELL: &str = if cfg!(windows) { "cmd.exe" } else { "/bin/sh" };

fn default_shell() -> SettingValue {
	let shell = std::env::var("SHELL")
		.or_else(|_| std::env::var("COMSPEC"))
		.unwrap_or_else(|_| FALLBACK_SHELL.to_string());
	SettingValue::Text(shell)
}

fn definitions() -> Vec<Setting> {
	vec![
		Setting::new(BACKSPACE, "bs", "", true),
		Setting::new(CLIPBOARD, "cb", "", true),
		Setting::new(HISTORY, "hi", DEFAULT_HISTORY, true),
		Setting::new(HIGHLIGHT_SEARCH, "hls", false, true),
		Setting::new(IGNORE_CASE, "ic", false, true),
		Setting::new(INCREMENTAL_SEARCH, "is", true, true),
		Setting::new(KEY_MODEL, "km", "", true),
		Setting::new(MAGIC, MAGIC, true, true),
		Setting::new(SCROLL_OFFSET, "so", 0, true),
		Setting::new(SELECTION, "sel", "inclusive", true),
		Setting::new(SELECT_MODE, "slm", "", true),
		Setting::computed(SHELL, "sh", SettingKind::String, default_shell, true),
		Setting::new(SMART_CASE, "scs", false, true),
		Setting::new(START_OF_LINE, "sol", true, true),
		Setting::new(TIMEOUT, "to", true, true),
		Setting::new(TIMEOUT_LENGTH, "tm", DEFAULT_TIMEOUT_LENGTH, true),
		Setting::new(VIM_RC, VIM_RC, "", true),
		Setting::new(VIM_RC_PATHS, VIM_RC_PATHS, "", true),
		Setting::new(VISUAL_BELL, "vb", false, true),
		Setting::new(WRAP_SCAN, "ws", true, true),
	]
}

/// Settings shared by every buffer and view.
#[derive(Debug)]
pub struct GlobalSettings {
	registry: SettingsRegistry,
}

impl Default for GlobalSettings {
	fn default() -> Self {
		Self::new()
	}
}

impl GlobalSettings {
	pub fn new() -> Self {
		Self {
			registry: SettingsRegistry::new(definitions()),
		}
	}

	/// Returns an independent copy with the same values and no observers.
	pub fn copy(&self) -> Self {
		Self {
			registry: self.registry.copy(),
		}
	}

	pub fn registry(&self) -> &SettingsRegistry {
		&self.registry
	}

	fn text_or_default(&self, name: &str) -> String {
		self.registry.text(name).unwrap_or_default()
	}

	fn has_token(&self, name: &str, token: &str) -> bool {
		split_list(&self.text_or_default(name)).any(|t| t == token)
	}

	pub fn backspace(&self) -> String {
		self.text_or_default(BACKSPACE)
	}

	/// `backspace` contains `start`: backspace may delete before the insert point.
	pub fn is_backspace_start(&self) -> bool {
		self.has_token(BACKSPACE, "start")
	}

	pub fn is_backspace_eol(&self) -> bool {
		self.has_token(BACKSPACE, "eol")
	}

	pub fn is_backspace_indent(&self) -> bool {
		self.has_token(BACKSPACE, "indent")
	}

	pub fn clipboard(&self) -> String {
		self.text_or_default(CLIPBOARD)
	}

	pub fn clipboard_options(&self) -> ClipboardOptions {
		ClipboardOptions::parse(&self.clipboard())
	}

	pub fn set_clipboard_options(&self, options: ClipboardOptions) -> bool {
		self.registry
			.try_set(CLIPBOARD, SettingValue::Text(options.to_setting_string()))
	}

	pub fn history(&self) -> i64 {
		self.registry.number(HISTORY).unwrap_or(DEFAULT_HISTORY)
	}

	pub fn highlight_search(&self) -> bool {
		self.registry.toggle(HIGHLIGHT_SEARCH).unwrap_or(false)
	}

	pub fn ignore_case(&self) -> bool {
		self.registry.toggle(IGNORE_CASE).unwrap_or(false)
	}

	pub fn incremental_search(&self) -> bool {
		self.registry.toggle(INCREMENTAL_SEARCH).unwrap_or(true)
	}

	pub fn key_model_options(&self) -> KeyModelOptions {
		KeyModelOptions::parse(&self.text_or_default(KEY_MODEL))
	}

	pub fn magic(&self) -> bool {
		self.registry.toggle(MAGIC).unwrap_or(true)
	}

	pub fn scroll_offset(&self) -> i64 {
		self.registry.number(SCROLL_OFFSET).unwrap_or(0)
	}

	pub fn selection(&self) -> String {
		self.text_or_default(SELECTION)
	}

	pub fn is_selection_inclusive(&self) -> bool {
		self.selection() == "inclusive"
	}

	pub fn is_selection_exclusive(&self) -> bool {
		self.selection() == "exclusive"
	}

	pub fn select_mode_options(&self) -> SelectModeOptions {
		SelectModeOptions::parse(&self.text_or_default(SELECT_MODE))
	}

	pub fn shell(&self) -> String {
		self.text_or_default(SHELL)
	}

	pub fn smart_case(&self) -> bool {
		self.registry.toggle(SMART_CASE).unwrap_or(false)
	}

	pub fn start_of_line(&self) -> bool {
		self.registry.toggle(START_OF_LINE).unwrap_or(true)
	}

	pub fn timeout(&self) -> bool {
		self.registry.toggle(TIMEOUT).unwrap_or(true)
	}

	pub fn timeout_length(&self) -> i64 {
		self.registry.number(TIMEOUT_LENGTH).unwrap_or(DEFAULT_TIMEOUT_LENGTH)
	}

	/// Path of the rc file that was loaded, empty if none.
	pub fn vim_rc(&self) -> String {
		self.text_or_default(VIM_RC)
	}

	/// Comma separated directories searched for an rc file.
	pub fn vim_rc_paths(&self) -> String {
		self.text_or_default(VIM_RC_PATHS)
	}

	pub fn visual_bell(&self) -> bool {
		self.registry.toggle(VISUAL_BELL).unwrap_or(false)
	}

	pub fn wrap_scan(&self) -> bool {
		self.registry.toggle(WRAP_SCAN).unwrap_or(true)
	}
}

impl Deref for GlobalSettings {
	type Target = SettingsRegistry;

	fn deref(&self) -> &SettingsRegistry {
		&self.registry
	}
}
