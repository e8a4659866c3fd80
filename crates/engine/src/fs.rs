//! Bootstrap file discovery on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::host::{BootstrapContents, FileSystem};


/// File names tried in each search directory, in priority order.
pub const BOOTSTRAP_FILE_NAMES: &[&str] = &[".tarnrc", "_tarnrc", ".vimrc", "_vimrc"];

/// Environment variable naming an explicit bootstrap file.
pub const BOOTSTRAP_ENV_VAR: &str = "TARNRC";

/// [`FileSystem`] backed by the real file system.
///
/// Search order: the file named by `$TARNRC`, then each candidate name in the
/// home directory, then in `$VIM`.
#[derive(Debug, Clone, Default)]
pub struct DiskFileSystem {
	/// Replaces the home and `$VIM` directories when set.
	directories: Option<Vec<PathBuf>>,
	explicit_file: Option<PathBuf>,
}

impl DiskFileSystem {
	/// Discovers directories from the environment.
	pub fn new() -> Self {
		Self {
			directories: None,
			explicit_file: std::env::var_os(BOOTSTRAP_ENV_VAR).map(PathBuf::from),
		}
	}

	/// Searches only the given directories.
	pub fn with_directories(directories: Vec<PathBuf>) -> Self {
		Self {
			directories: Some(directories),
			explicit_file: None,
		}
	}

	fn candidates(&self) -> Vec<PathBuf> {
		let mut candidates: Vec<PathBuf> = self.explicit_file.iter().cloned().collect();
		for dir in self.bootstrap_search_directories() {
			candidates.extend(BOOTSTRAP_FILE_NAMES.iter().map(|name| dir.join(name)));
		}
		candidates
	}
}

fn read_lines(path: &Path) -> Option<Vec<String>> {
	match std::fs::read(path) {
		Ok(bytes) => Some(String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()),
		Err(error) => {
			warn!(path = %path.display(), %error, "failed to read bootstrap file");
			None
		}
	}
}

impl FileSystem for DiskFileSystem {
	fn bootstrap_search_directories(&self) -> Vec<PathBuf> {
		if let Some(directories) = &self.directories {
			return directories.clone();
		}
		dirs::home_dir()
			.into_iter()
			.chain(std::env::var_os("VIM").map(PathBuf::from))
			.collect()
	}

	fn load_bootstrap_contents(&self) -> Option<BootstrapContents> {
		for path in self.candidates() {
			if !path.is_file() {
				continue;
			}
			debug!(path = %path.display(), "found bootstrap file");
			if let Some(lines) = read_lines(&path) {
				return Some(BootstrapContents { path, lines });
			}
		}
		None
	}
}
