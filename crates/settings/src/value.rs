use std::fmt;
use std::rc::Rc;


/// The kind of payload a setting holds. Fixed for the lifetime of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
	Number,
	String,
	Toggle,
}

impl fmt::Display for SettingKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			SettingKind::Number => "number",
			SettingKind::String => "string",
			SettingKind::Toggle => "toggle",
		})
	}
}

/// A value recomputed every time it is read.
///
/// Only created by the settings scopes themselves, so a chain of computed
/// values always terminates in a leaf.
#[derive(Clone)]
pub struct ComputedValue(Rc<dyn Fn() -> SettingValue>);

impl ComputedValue {
	pub fn new(compute: impl Fn() -> SettingValue + 'static) -> Self {
		Self(Rc::new(compute))
	}

	pub fn compute(&self) -> SettingValue {
		(self.0)()
	}
}

impl fmt::Debug for ComputedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ComputedValue(..)")
	}
}

/// The value of a setting.
#[derive(Debug, Clone)]
pub enum SettingValue {
	Number(i64),
	Text(String),
	Toggle(bool),
	Computed(ComputedValue),
}

impl SettingValue {
	pub fn computed(compute: impl Fn() -> SettingValue + 'static) -> Self {
		SettingValue::Computed(ComputedValue::new(compute))
	}

	/// Returns the kind of a leaf value, or `None` for [`SettingValue::Computed`].
	pub fn kind(&self) -> Option<SettingKind> {
		match self {
			SettingValue::Number(_) => Some(SettingKind::Number),
			SettingValue::Text(_) => Some(SettingKind::String),
			SettingValue::Toggle(_) => Some(SettingKind::Toggle),
			SettingValue::Computed(_) => None,
		}
	}

	/// Returns true if this value may be stored in a setting of `kind`.
	///
	/// Computed values pass for any kind; they are resolved on read.
	pub fn matches_kind(&self, kind: SettingKind) -> bool {
		self.kind().is_none_or(|k| k == kind)
	}

	/// Unwraps nested computed values down to a leaf.
	pub fn resolve(&self) -> SettingValue {
		let mut current = self.clone();
		while let SettingValue::Computed(computed) = current {
			current = computed.compute();
		}
		current
	}

	pub fn as_number(&self) -> Option<i64> {
		match self.resolve() {
			SettingValue::Number(n) => Some(n),
			_ => None,
		}
	}

	pub fn as_toggle(&self) -> Option<bool> {
		match self.resolve() {
			SettingValue::Toggle(b) => Some(b),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<String> {
		match self.resolve() {
			SettingValue::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the type name of this value, for error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Number(_) => "number",
			SettingValue::Text(_) => "string",
			SettingValue::Toggle(_) => "toggle",
			SettingValue::Computed(_) => "computed",
		}
	}
}

/// Equality used for default tracking.
///
/// Leaves compare by kind and payload after resolution. Two computed values
/// always compare equal: what they would compute is not diffed.
impl PartialEq for SettingValue {
	fn eq(&self, other: &Self) -> bool {
		if let (SettingValue::Computed(_), SettingValue::Computed(_)) = (self, other) {
			return true;
		}
		match (self.resolve(), other.resolve()) {
			(SettingValue::Number(a), SettingValue::Number(b)) => a == b,
			(SettingValue::Text(a), SettingValue::Text(b)) => a == b,
			(SettingValue::Toggle(a), SettingValue::Toggle(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Display for SettingValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.resolve() {
			SettingValue::Number(n) => write!(f, "{n}"),
			SettingValue::Text(s) => f.write_str(&s),
			SettingValue::Toggle(b) => f.write_str(if b { "on" } else { "off" }),
			SettingValue::Computed(_) => unreachable!("resolve returns a leaf"),
		}
	}
}

impl From<i64> for SettingValue {
	fn from(v: i64) -> Self {
		SettingValue::Number(v)
	}
}

impl From<i32> for SettingValue {
	fn from(v: i32) -> Self {
		SettingValue::Number(i64::from(v))
	}
}

impl From<bool> for SettingValue {
	fn from(v: bool) -> Self {
		SettingValue::Toggle(v)
	}
}

impl From<&str> for SettingValue {
	fn from(v: &str) -> Self {
		SettingValue::Text(v.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(v: String) -> Self {
		SettingValue::Text(v)
	}
}

/// A named, typed setting.
#[derive(Debug, Clone)]
pub struct Setting {
	pub name: &'static str,
	/// Short alias accepted wherever the name is. May equal `name`.
	pub abbreviation: &'static str,
	pub kind: SettingKind,
	pub default_value: SettingValue,
	pub value: SettingValue,
	pub is_global: bool,
}

impl Setting {
	/// Defines a setting whose kind is taken from a leaf default.
	///
	/// # Panics
	///
	/// Panics if `default` is computed; use [`Setting::computed`] for those.
	pub fn new(name: &'static str, abbreviation: &'static str, default: impl Into<SettingValue>, is_global: bool) -> Self {
		let default = default.into();
		let kind = default
			.kind()
			.unwrap_or_else(|| panic!("setting '{name}' needs an explicit kind for a computed default"));
		Self {
			name,
			abbreviation,
			kind,
			value: default.clone(),
			default_value: default,
			is_global,
		}
	}

	/// Defines a setting whose default is recomputed on every read.
	pub fn computed(
		name: &'static str,
		abbreviation: &'static str,
		kind: SettingKind,
		compute: impl Fn() -> SettingValue + 'static,
		is_global: bool,
	) -> Self {
		let default = SettingValue::computed(compute);
		Self {
			name,
			abbreviation,
			kind,
			value: default.clone(),
			default_value: default,
			is_global,
		}
	}

	/// Current value with computed values resolved.
	pub fn aggregate_value(&self) -> SettingValue {
		self.value.resolve()
	}

	/// Returns true when the current value equals the default.
	pub fn is_at_default(&self) -> bool {
		self.value == self.default_value
	}

	pub fn is_value_calculated(&self) -> bool {
		matches!(self.value, SettingValue::Computed(_))
	}
}
