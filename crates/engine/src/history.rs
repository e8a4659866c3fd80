//! Command-line and search histories.

use std::cell::RefCell;
use std::collections::VecDeque;

use tarn_settings::global::DEFAULT_HISTORY;

#[cfg(test)]
mod tests;

/// Bounded history, oldest entry first.
///
/// Adding an entry already present moves it to the end instead of storing a
/// second copy.
#[derive(Debug, Clone)]
pub struct HistoryList {
	entries: VecDeque<String>,
	limit: usize,
}

impl HistoryList {
	pub fn new(limit: usize) -> Self {
		Self {
			entries: VecDeque::new(),
			limit,
		}
	}

	/// Appends an entry. Blank entries are ignored.
	pub fn add(&mut self, entry: &str) {
		if entry.trim().is_empty() {
			return;
		}
		if let Some(pos) = self.entries.iter().position(|e| e == entry) {
			self.entries.remove(pos);
		}
		self.entries.push_back(entry.to_string());
		self.trim();
	}

	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Changes the bound, dropping the oldest entries that no longer fit.
	pub fn set_limit(&mut self, limit: usize) {
		self.limit = limit;
		self.trim();
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn last(&self) -> Option<&str> {
		self.entries.back().map(String::as_str)
	}

	pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
		self.entries.iter().map(String::as_str)
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	fn trim(&mut self) {
		while self.entries.len() > self.limit {
			self.entries.pop_front();
		}
	}
}

impl Default for HistoryList {
	fn default() -> Self {
		Self::new(DEFAULT_HISTORY as usize)
	}
}

/// The two histories shared by every session of an engine.
#[derive(Debug, Default)]
pub struct Histories {
	pub command: RefCell<HistoryList>,
	pub search: RefCell<HistoryList>,
}

impl Histories {
	pub fn new(limit: usize) -> Self {
		Self {
			command: RefCell::new(HistoryList::new(limit)),
			search: RefCell::new(HistoryList::new(limit)),
		}
	}

	/// Applies a new bound to both histories.
	pub fn set_limit(&self, limit: usize) {
		self.command.borrow_mut().set_limit(limit);
		self.search.borrow_mut().set_limit(limit);
	}
}
