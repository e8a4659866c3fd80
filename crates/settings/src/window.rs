//! The per-view scope.

use std::ops::Deref;
use std::rc::Rc;

use crate::{GlobalSettings, Setting, SettingsRegistry};

/// Names of the window settings.
pub mod names {
	pub const CURSOR_LINE: &str = "cursorline";
	pub const SCROLL: &str = "scroll";
	pub const WRAP: &str = "wrap";
}

use names::*;

fn definitions() -> Vec<Setting> {
	vec![
		Setting::new(CURSOR_LINE, "cul", false, false),
		// Zero means half the view height.
		Setting::new(SCROLL, "scr", 0, false),
		Setting::new(WRAP, WRAP, true, false),
	]
}

/// Settings owned by a single view.
#[derive(Debug)]
pub struct WindowSettings {
	registry: SettingsRegistry,
	global: Rc<GlobalSettings>,
}

impl WindowSettings {
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

	pub fn cursor_line(&self) -> bool {
		self.registry.toggle(CURSOR_LINE).unwrap_or(false)
	}

	pub fn scroll(&self) -> i64 {
		self.registry.number(SCROLL).unwrap_or(0)
	}

	pub fn wrap(&self) -> bool {
		self.registry.toggle(WRAP).unwrap_or(true)
	}
}

impl Deref for WindowSettings {
	type Target = SettingsRegistry;

	fn deref(&self) -> &SettingsRegistry {
		&self.registry
	}
}
