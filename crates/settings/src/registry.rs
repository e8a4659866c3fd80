//! Named setting collections.
//!
//! A [`SettingsRegistry`] owns an ordered set of [`Setting`]s, resolves names
//! and abbreviations, and notifies observers after every successful write.
//!
//! # Notification
//!
//! Observers run synchronously, after the write is visible and before the
//! mutating call returns. The registry is not borrowed while they run, so an
//! observer may read (or write) the registry it is observing. The observer
//! list is snapshotted per write: observers added during dispatch first see
//! the next write.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::{debug, trace};

use crate::parse::parse_value;
use crate::{Result, Setting, SettingError, SettingValue};


/// Change event raised after a successful write.
#[derive(Debug, Clone)]
pub struct SettingChanged {
	/// The setting as it is after the write.
	pub setting: Setting,
	/// False when the new value equals the one it replaced.
	pub is_value_changed: bool,
}

/// Handle returned by [`SettingsRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Rc<dyn Fn(&SettingChanged)>;

pub struct SettingsRegistry {
	entries: RefCell<IndexMap<&'static str, Setting, FxBuildHasher>>,
	/// Abbreviation to full name.
	abbreviations: FxHashMap<&'static str, &'static str>,
	observers: RefCell<Vec<(ObserverId, Observer)>>,
	next_observer: Cell<u64>,
}

impl SettingsRegistry {
	/// Builds a registry from setting definitions, keeping their order.
	///
	/// # Panics
	///
	/// Panics if two settings share a name or abbreviation.
	pub fn new(settings: impl IntoIterator<Item = Setting>) -> Self {
		let mut entries = IndexMap::with_hasher(FxBuildHasher);
		let mut abbreviations = FxHashMap::default();

		for setting in settings {
			let name = setting.name;
			let abbreviation = setting.abbreviation;
			assert!(!abbreviations.contains_key(name), "setting name '{name}' collides with an abbreviation");
			assert!(
				abbreviation == name || !entries.contains_key(abbreviation),
				"abbreviation '{abbreviation}' collides with a setting name"
			);
			assert!(entries.insert(name, setting).is_none(), "duplicate setting '{name}'");
			if abbreviation != name {
				assert!(
					abbreviations.insert(abbreviation, name).is_none(),
					"duplicate abbreviation '{abbreviation}'"
				);
			}
		}

		Self {
			entries: RefCell::new(entries),
			abbreviations,
			observers: RefCell::new(Vec::new()),
			next_observer: Cell::new(0),
		}
	}

	/// Returns an independent registry with the same settings and values.
	///
	/// Observers are not carried over.
	pub fn copy(&self) -> Self {
		Self {
			entries: RefCell::new(self.entries.borrow().clone()),
			abbreviations: self.abbreviations.clone(),
			observers: RefCell::new(Vec::new()),
			next_observer: Cell::new(0),
		}
	}

	fn full_name(&self, name_or_abbrev: &str) -> Option<&'static str> {
		let entries = self.entries.borrow();
		if let Some((name, _)) = entries.get_key_value(name_or_abbrev) {
			return Some(*name);
		}
		self.abbreviations.get(name_or_abbrev).copied()
	}

	/// Returns true if the name or abbreviation is known.
	pub fn contains(&self, name_or_abbrev: &str) -> bool {
		self.full_name(name_or_abbrev).is_some()
	}

	/// Looks up a setting by full name, then by abbreviation.
	pub fn get(&self, name_or_abbrev: &str) -> Option<Setting> {
		let name = self.full_name(name_or_abbrev)?;
		self.entries.borrow().get(name).cloned()
	}

	/// Snapshot of every setting in definition order.
	pub fn all(&self) -> Vec<Setting> {
		self.entries.borrow().values().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	/// Writes `value`, reporting why a write was refused.
	///
	/// Nothing is mutated and no observer runs unless this returns `Ok`.
	pub fn set_value(&self, name_or_abbrev: &str, value: SettingValue) -> Result<()> {
		let name = self.full_name(name_or_abbrev).ok_or_else(|| self.unknown(name_or_abbrev))?;

		let (previous, setting) = {
			let mut entries = self.entries.borrow_mut();
			let Some(setting) = entries.get_mut(name) else {
				return Err(self.unknown(name_or_abbrev));
			};
			if !value.matches_kind(setting.kind) {
				debug!(setting = name, expected = %setting.kind, got = value.type_name(), "rejected setting write");
				return Err(SettingError::TypeMismatch {
					name,
					expected: setting.kind,
					got: value.type_name(),
				});
			}
			let previous = std::mem::replace(&mut setting.value, value);
			(previous, setting.clone())
		};

		let is_value_changed = previous != setting.value;
		trace!(setting = name, value = %setting.value, is_value_changed, "setting written");
		self.notify(&SettingChanged { setting, is_value_changed });
		Ok(())
	}

	/// Parses `text` for the setting's kind and writes it.
	pub fn set_value_from_str(&self, name_or_abbrev: &str, text: &str) -> Result<()> {
		let setting = self.get(name_or_abbrev).ok_or_else(|| self.unknown(name_or_abbrev))?;
		let value = parse_value(text, setting.kind).ok_or_else(|| SettingError::InvalidArgument {
			name: setting.name,
			value: text.to_string(),
		})?;
		self.set_value(setting.name, value)
	}

	/// Writes `value` if the setting exists and the kind matches.
	pub fn try_set(&self, name_or_abbrev: &str, value: SettingValue) -> bool {
		self.set_value(name_or_abbrev, value).is_ok()
	}

	/// Parses and writes `text` if the setting exists and the text parses.
	pub fn try_set_from_string(&self, name_or_abbrev: &str, text: &str) -> bool {
		self.set_value_from_str(name_or_abbrev, text).is_ok()
	}

	/// Restores a setting's default value.
	pub fn reset(&self, name_or_abbrev: &str) -> bool {
		match self.get(name_or_abbrev) {
			Some(setting) => self.try_set(setting.name, setting.default_value),
			None => false,
		}
	}

	/// Typed read of a number setting.
	pub fn number(&self, name_or_abbrev: &str) -> Option<i64> {
		self.get(name_or_abbrev)?.value.as_number()
	}

	/// Typed read of a toggle setting.
	pub fn toggle(&self, name_or_abbrev: &str) -> Option<bool> {
		self.get(name_or_abbrev)?.value.as_toggle()
	}

	/// Typed read of a string setting.
	pub fn text(&self, name_or_abbrev: &str) -> Option<String> {
		self.get(name_or_abbrev)?.value.as_text()
	}

	/// Registers an observer for successful writes.
	pub fn subscribe(&self, observer: impl Fn(&SettingChanged) + 'static) -> ObserverId {
		let id = ObserverId(self.next_observer.get());
		self.next_observer.set(id.0 + 1);
		self.observers.borrow_mut().push((id, Rc::new(observer)));
		id
	}

	/// Removes an observer. Returns false if it was not registered.
	pub fn unsubscribe(&self, id: ObserverId) -> bool {
		let mut observers = self.observers.borrow_mut();
		let before = observers.len();
		observers.retain(|(observer_id, _)| *observer_id != id);
		observers.len() != before
	}

	fn notify(&self, event: &SettingChanged) {
		let observers: Vec<Observer> = self.observers.borrow().iter().map(|(_, o)| o.clone()).collect();
		for observer in observers {
			observer(event);
		}
	}

	/// Suggests a known setting name close to `name`.
	pub fn suggest(&self, name: &str) -> Option<&'static str> {
		self.entries
			.borrow()
			.keys()
			.copied()
			.map(|candidate| (candidate, strsim::levenshtein(name, candidate)))
			.filter(|(_, distance)| *distance <= 3)
			.min_by_key(|(_, distance)| *distance)
			.map(|(candidate, _)| candidate)
	}

	fn unknown(&self, name: &str) -> SettingError {
		SettingError::UnknownSetting {
			name: name.to_string(),
			suggestion: self.suggest(name),
		}
	}
}

impl std::fmt::Debug for SettingsRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsRegistry")
			.field("settings", &self.entries.borrow().len())
			.field("observers", &self.observers.borrow().len())
			.finish()
	}
}
