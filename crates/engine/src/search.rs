//! Incremental `/` and `?` search entry.
//!
//! The engine tracks the pattern being typed and the last completed one.
//! Matching text is the host's job.

use tarn_primitives::{KeyCode, KeyInput};
use tracing::debug;

use crate::session_data::SessionData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
	Forward,
	Backward,
}

impl SearchDirection {
	pub fn prompt(self) -> char {
		match self {
			Self::Forward => '/',
			Self::Backward => '?',
		}
	}
}

/// A completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
	pub pattern: String,
	pub direction: SearchDirection,
}

/// Result of feeding a key to an active search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
	/// Still typing.
	Pending,
	Completed(SearchPattern),
	Cancelled,
}

#[derive(Debug, Default)]
pub struct IncrementalSearch {
	active: Option<(SearchDirection, String)>,
	last: Option<SearchPattern>,
}

impl IncrementalSearch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_active(&self) -> bool {
		self.active.is_some()
	}

	/// The pattern typed so far, while active.
	pub fn current_pattern(&self) -> Option<&str> {
		self.active.as_ref().map(|(_, pattern)| pattern.as_str())
	}

	pub fn last_search(&self) -> Option<&SearchPattern> {
		self.last.as_ref()
	}

	/// Starts a new search, discarding any search in progress.
	pub fn begin(&mut self, direction: SearchDirection, data: &SessionData) {
		self.active = Some((direction, String::new()));
		data.status().status(&direction.prompt().to_string());
	}

	/// Feeds one key. Does nothing when no search is active.
	pub fn process(&mut self, key: KeyInput, data: &SessionData) -> SearchOutcome {
		let Some((direction, pattern)) = &mut self.active else {
			return SearchOutcome::Cancelled;
		};

		if key.is_escape() {
			return self.cancel(data);
		}
		match key.code {
			KeyCode::Enter => return self.complete(data),
			KeyCode::Backspace => {
				if pattern.pop().is_none() {
					return self.cancel(data);
				}
			}
			_ => match key.as_char() {
				Some(c) => pattern.push(c),
				None => return SearchOutcome::Pending,
			},
		}

		if data.global_settings().incremental_search() {
			data.status().status(&format!("{}{}", direction.prompt(), pattern));
		}
		SearchOutcome::Pending
	}

	/// Finishes the active search.
	///
	/// An empty pattern repeats the last search in the new direction.
	pub fn complete(&mut self, data: &SessionData) -> SearchOutcome {
		let Some((direction, pattern)) = self.active.take() else {
			return SearchOutcome::Cancelled;
		};

		let pattern = if pattern.is_empty() {
			match &self.last {
				Some(last) => last.pattern.clone(),
				None => {
					data.status().error("E35: No previous regular expression");
					return SearchOutcome::Cancelled;
				}
			}
		} else {
			pattern
		};

		data.histories().search.borrow_mut().add(&pattern);
		debug!(view = %data.view_id(), %pattern, ?direction, "search completed");
		let completed = SearchPattern { pattern, direction };
		self.last = Some(completed.clone());
		SearchOutcome::Completed(completed)
	}

	pub fn cancel(&mut self, data: &SessionData) -> SearchOutcome {
		if self.active.take().is_some() {
			data.status().status("");
		}
		SearchOutcome::Cancelled
	}
}
