//! `:set`, `:setlocal` and `:setglobal`.

use tarn_settings::parse::{parse_number, split_list};
use tarn_settings::{Setting, SettingError, SettingKind, SettingValue, SettingsRegistry};
use tracing::debug;

use super::Interpreter;
use crate::error::{CommandError, Result};

/// Which registries a set command searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetScope {
	/// Local, then window, then global.
	All,
	/// Local and window only.
	Local,
	/// Global only.
	Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
	Assign,
	Add,
	Subtract,
	Prepend,
}

/// Splits arguments on blanks not escaped by a backslash.
fn split_args(args: &str) -> Vec<String> {
	let mut out = Vec::new();
	let mut current = String::new();
	let mut chars = args.chars();
	while let Some(c) = chars.next() {
		match c {
			'\\' => match chars.next() {
				Some(next @ (' ' | '\t' | '\\')) => current.push(next),
				Some(next) => {
					current.push('\\');
					current.push(next);
				}
				None => current.push('\\'),
			},
			c if c.is_whitespace() => {
				if !current.is_empty() {
					out.push(std::mem::take(&mut current));
				}
			}
			c => current.push(c),
		}
	}
	if !current.is_empty() {
		out.push(current);
	}
	out
}

/// `name` or `noname` for toggles, `name=value` otherwise.
pub(crate) fn describe(setting: &Setting) -> String {
	match setting.aggregate_value() {
		SettingValue::Toggle(true) => setting.name.to_string(),
		SettingValue::Toggle(false) => format!("no{}", setting.name),
		value => format!("{}={value}", setting.name),
	}
}

impl Interpreter<'_> {
	pub(super) fn set(&self, scope: SetScope, args: &str) -> Result<()> {
		if args.is_empty() {
			let changed: Vec<String> = self
				.registries(scope)
				.iter()
				.flat_map(|registry| registry.all())
				.filter(|setting| !setting.is_at_default())
				.map(|setting| describe(&setting))
				.collect();
			self.report(&changed.join("  "));
			return Ok(());
		}

		for arg in split_args(args) {
			self.set_one(scope, &arg)?;
		}
		Ok(())
	}

	fn registries(&self, scope: SetScope) -> Vec<&SettingsRegistry> {
		let local = self.data.local_settings().registry();
		let window = self.data.window_settings().registry();
		let global = self.data.global_settings().registry();
		match scope {
			SetScope::All => vec![local, window, global],
			SetScope::Local => vec![local, window],
			SetScope::Global => vec![global],
		}
	}

	fn resolve(&self, scope: SetScope, name: &str) -> Option<(&SettingsRegistry, Setting)> {
		self.registries(scope)
			.into_iter()
			.find_map(|registry| registry.get(name).map(|setting| (registry, setting)))
	}

	fn resolve_or_err(&self, scope: SetScope, name: &str) -> Result<(&SettingsRegistry, Setting)> {
		self.resolve(scope, name).ok_or_else(|| {
			let suggestion = self.registries(scope).iter().find_map(|r| r.suggest(name));
			SettingError::UnknownSetting {
				name: name.to_string(),
				suggestion,
			}
			.into()
		})
	}

	fn set_one(&self, scope: SetScope, arg: &str) -> Result<()> {
		match arg {
			"all" => {
				let all: Vec<String> = self
					.registries(scope)
					.iter()
					.flat_map(|registry| registry.all())
					.map(|setting| describe(&setting))
					.collect();
				self.report(&all.join("  "));
				return Ok(());
			}
			"all&" => {
				for registry in self.registries(scope) {
					for setting in registry.all() {
						registry.reset(setting.name);
					}
				}
				return Ok(());
			}
			_ => {}
		}

		if let Some(pos) = arg.find(['=', ':']) {
			let (lhs, value) = (&arg[..pos], &arg[pos + 1..]);
			let (name, operator) = match lhs.char_indices().last() {
				Some((i, '+')) => (&lhs[..i], Operator::Add),
				Some((i, '-')) => (&lhs[..i], Operator::Subtract),
				Some((i, '^')) => (&lhs[..i], Operator::Prepend),
				_ => (lhs, Operator::Assign),
			};
			let (registry, setting) = self.resolve_or_err(scope, name)?;
			return assign(registry, &setting, operator, value, arg);
		}

		if let Some(name) = arg.strip_suffix('?') {
			let (_, setting) = self.resolve_or_err(scope, name)?;
			self.report(&describe(&setting));
			return Ok(());
		}
		if let Some(name) = arg.strip_suffix('!') {
			let (registry, setting) = self.resolve_or_err(scope, name)?;
			return invert(registry, &setting, arg);
		}
		if let Some(name) = arg.strip_suffix('&') {
			let (registry, setting) = self.resolve_or_err(scope, name)?;
			registry.reset(setting.name);
			return Ok(());
		}

		if let Some((registry, setting)) = self.resolve(scope, arg) {
			if setting.kind == SettingKind::Toggle {
				registry.set_value(setting.name, SettingValue::Toggle(true))?;
			} else {
				self.report(&describe(&setting));
			}
			return Ok(());
		}
		if let Some(name) = arg.strip_prefix("no")
			&& let Some((registry, setting)) = self.resolve(scope, name)
		{
			if setting.kind != SettingKind::Toggle {
				return Err(CommandError::InvalidArgument(arg.to_string()));
			}
			registry.set_value(setting.name, SettingValue::Toggle(false))?;
			return Ok(());
		}
		if let Some(name) = arg.strip_prefix("inv")
			&& let Some((registry, setting)) = self.resolve(scope, name)
		{
			return invert(registry, &setting, arg);
		}

		self.resolve_or_err(scope, arg).map(|_| ())
	}
}

fn invert(registry: &SettingsRegistry, setting: &Setting, arg: &str) -> Result<()> {
	let Some(current) = setting.aggregate_value().as_toggle() else {
		return Err(CommandError::InvalidArgument(arg.to_string()));
	};
	registry.set_value(setting.name, SettingValue::Toggle(!current))?;
	Ok(())
}

fn assign(registry: &SettingsRegistry, setting: &Setting, operator: Operator, value: &str, arg: &str) -> Result<()> {
	let invalid = || CommandError::InvalidArgument(arg.to_string());
	let current = setting.aggregate_value();

	let new_value = match (setting.kind, operator) {
		(_, Operator::Assign) => {
			registry.set_value_from_str(setting.name, value)?;
			return Ok(());
		}
		(SettingKind::Toggle, _) => return Err(invalid()),
		(SettingKind::Number, op) => {
			let operand = parse_number(value).ok_or_else(invalid)?;
			let current = current.as_number().unwrap_or_default();
			let result = match op {
				Operator::Add => current.checked_add(operand),
				Operator::Subtract => current.checked_sub(operand),
				_ => current.checked_mul(operand),
			};
			SettingValue::Number(result.ok_or_else(invalid)?)
		}
		(SettingKind::String, op) => {
			let current = current.as_text().unwrap_or_default();
			SettingValue::Text(edit_list(&current, value, op))
		}
	};

	debug!(setting = setting.name, ?operator, value = %new_value, "set with operator");
	registry.set_value(setting.name, new_value)?;
	Ok(())
}

/// Applies `+=`, `-=` or `^=` to a comma separated list.
fn edit_list(current: &str, item: &str, operator: Operator) -> String {
	let mut items: Vec<&str> = split_list(current).collect();
	let present = items.contains(&item);
	match operator {
		Operator::Add if !present && !item.is_empty() => items.push(item),
		Operator::Prepend if !present && !item.is_empty() => items.insert(0, item),
		Operator::Subtract => items.retain(|existing| *existing != item),
		_ => {}
	}
	items.join(",")
}
