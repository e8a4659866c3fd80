//! Per-view jump history.

/// A remembered cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpLocation {
	pub line: usize,
	pub column: usize,
}

impl JumpLocation {
	pub fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}

/// Jump positions with a cursor for backward and forward navigation.
#[derive(Debug, Clone, Default)]
pub struct JumpList {
	locations: Vec<JumpLocation>,
	/// Points one past the current location.
	index: usize,
}

impl JumpList {
	pub const MAX_JUMPS: usize = 100;

	pub fn new() -> Self {
		Self::default()
	}

	/// Records a jump, discarding forward history.
	///
	/// Re-recording the most recent location is a no-op.
	pub fn push(&mut self, location: JumpLocation) {
		self.locations.truncate(self.index);
		if self.locations.last() == Some(&location) {
			return;
		}
		self.locations.push(location);
		if self.locations.len() > Self::MAX_JUMPS {
			self.locations.remove(0);
		}
		self.index = self.locations.len();
	}

	/// Moves backward. Returns `None` at the oldest entry.
	pub fn jump_backward(&mut self) -> Option<JumpLocation> {
		if self.index == 0 {
			return None;
		}
		self.index -= 1;
		self.locations.get(self.index).copied()
	}

	/// Moves forward. Returns `None` at the newest entry.
	pub fn jump_forward(&mut self) -> Option<JumpLocation> {
		let location = self.locations.get(self.index).copied()?;
		self.index += 1;
		Some(location)
	}

	pub fn locations(&self) -> &[JumpLocation] {
		&self.locations
	}

	pub fn current_index(&self) -> usize {
		self.index
	}

	pub fn len(&self) -> usize {
		self.locations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.locations.is_empty()
	}

	pub fn clear(&mut self) {
		self.locations.clear();
		self.index = 0;
	}
}
