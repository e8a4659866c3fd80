//! Bootstrap ("rc") script loading.

use std::cell::Cell;
use std::rc::Rc;

use tarn_primitives::ViewId;
use tarn_settings::SettingValue;
use tarn_settings::global::names::{VIM_RC, VIM_RC_PATHS};
use tracing::{debug, info, warn};

use super::Engine;
use crate::host::TextView;

/// Outcome of the most recent bootstrap load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootstrapState {
	/// No load attempted yet.
	#[default]
	None,
	Loaded,
	NotFound,
}

/// Clears the loading flag on every exit path.
struct LoadingFlag<'a>(&'a Cell<bool>);

impl Drop for LoadingFlag<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

/// Tears down the hidden bootstrap view and everything registered for it,
/// even when a script line panics.
struct HiddenView<'a> {
	engine: &'a Engine,
	view: Rc<dyn TextView>,
}

impl HiddenView<'_> {
	fn id(&self) -> ViewId {
		self.view.id()
	}
}

impl Drop for HiddenView<'_> {
	fn drop(&mut self) {
		self.engine.remove_session(self.id());
		let buffer = self.view.buffer().id();
		self.engine.wrappers.borrow_mut().remove(&buffer);
		self.view.close();
	}
}

impl Engine {
	pub fn bootstrap_state(&self) -> BootstrapState {
		self.bootstrap_state.get()
	}

	pub fn is_loading_bootstrap(&self) -> bool {
		self.is_loading_bootstrap.get()
	}

	/// Finds and runs the bootstrap script.
	///
	/// Sets `vimrcpaths` to the directories searched and `vimrc` to the file
	/// found. Each line runs through command mode in a hidden view; a failing
	/// line is reported and the rest still run. The local and window settings
	/// the script leaves behind become the templates for new sessions.
	///
	/// Returns false if no script was found or a load is already running.
	pub fn load_bootstrap(&self) -> bool {
		if self.is_loading_bootstrap.replace(true) {
			warn!("bootstrap load requested while already loading");
			return false;
		}
		let _loading = LoadingFlag(&self.is_loading_bootstrap);

		let global = &self.global_settings;
		global.reset(VIM_RC);
		let paths: Vec<String> = self
			.file_system
			.bootstrap_search_directories()
			.iter()
			.map(|dir| dir.display().to_string())
			.collect();
		global.try_set(VIM_RC_PATHS, SettingValue::Text(paths.join(",")));

		let Some(contents) = self.file_system.load_bootstrap_contents() else {
			info!(searched = %paths.join(","), "no bootstrap file found");
			self.bootstrap_state.set(BootstrapState::NotFound);
			return false;
		};
		let path = contents.path.display().to_string();
		global.try_set(VIM_RC, SettingValue::Text(path.clone()));

		let hidden = HiddenView {
			engine: self,
			view: self.host.create_hidden_view(),
		};
		let session = self.create_session_core(hidden.view.clone());

		let mut failures = 0usize;
		for (index, line) in contents.lines.iter().enumerate() {
			if !session.run_command(line) {
				failures += 1;
				debug!(%path, line = index + 1, command = %line, "bootstrap line failed");
			}
		}

		*self.template_local.borrow_mut() = session.data().local_settings().copy();
		*self.template_window.borrow_mut() = session.data().window_settings().copy();
		drop(session);
		drop(hidden);

		self.bootstrap_state.set(BootstrapState::Loaded);
		info!(%path, lines = contents.lines.len(), failures, "bootstrap loaded");
		true
	}
}
