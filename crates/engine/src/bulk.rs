//! Nestable bulk-operation scopes.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::host::Host;

/// Counts open bulk operations. The host hears only about the outermost
/// begin and end.
pub struct BulkOperationCounter {
	depth: Rc<Cell<usize>>,
	host: Rc<dyn Host>,
}

impl BulkOperationCounter {
	pub fn new(host: Rc<dyn Host>) -> Self {
		Self {
			depth: Rc::new(Cell::new(0)),
			host,
		}
	}

	/// Opens a bulk operation that lasts until the guard drops.
	#[must_use = "the bulk operation ends when the guard is dropped"]
	pub fn begin(&self) -> BulkOperation {
		let depth = self.depth.get() + 1;
		self.depth.set(depth);
		if depth == 1 {
			debug!("bulk operation started");
			self.host.begin_bulk_operation();
		}
		BulkOperation {
			depth: self.depth.clone(),
			host: self.host.clone(),
		}
	}

	pub fn in_bulk_operation(&self) -> bool {
		self.depth.get() > 0
	}

	pub fn depth(&self) -> usize {
		self.depth.get()
	}
}

impl fmt::Debug for BulkOperationCounter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BulkOperationCounter").field("depth", &self.depth.get()).finish()
	}
}

/// Guard returned by [`BulkOperationCounter::begin`].
pub struct BulkOperation {
	depth: Rc<Cell<usize>>,
	host: Rc<dyn Host>,
}

impl Drop for BulkOperation {
	fn drop(&mut self) {
		let depth = self.depth.get().saturating_sub(1);
		self.depth.set(depth);
		if depth == 0 {
			debug!("bulk operation finished");
			self.host.end_bulk_operation();
		}
	}
}

impl fmt::Debug for BulkOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BulkOperation").field("depth", &self.depth.get()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::FakeHost;

	#[test]
	fn host_hears_only_outermost_transitions() {
		let host = Rc::new(FakeHost::new());
		let counter = BulkOperationCounter::new(host.clone());
		assert!(!counter.in_bulk_operation());

		let outer = counter.begin();
		let inner = counter.begin();
		assert!(counter.in_bulk_operation());
		assert_eq!(counter.depth(), 2);
		assert_eq!(host.bulk_counts(), (1, 0));

		drop(inner);
		assert!(counter.in_bulk_operation());
		assert_eq!(host.bulk_counts(), (1, 0));

		drop(outer);
		assert!(!counter.in_bulk_operation());
		assert_eq!(host.bulk_counts(), (1, 1));
	}

	#[test]
	fn guards_may_drop_out_of_order() {
		let host = Rc::new(FakeHost::new());
		let counter = BulkOperationCounter::new(host.clone());
		let first = counter.begin();
		let second = counter.begin();
		drop(first);
		assert!(counter.in_bulk_operation());
		drop(second);
		assert_eq!(host.bulk_counts(), (1, 1));
	}
}
