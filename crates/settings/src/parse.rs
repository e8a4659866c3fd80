//! Text to value parsing shared by `try_set_from_string` and the `:set`
//! command.

use crate::{SettingKind, SettingValue};

/// Parses `text` into a value of `kind`.
pub fn parse_value(text: &str, kind: SettingKind) -> Option<SettingValue> {
	match kind {
		SettingKind::Number => parse_number(text).map(SettingValue::Number),
		SettingKind::Toggle => parse_toggle(text).map(SettingValue::Toggle),
		SettingKind::String => Some(SettingValue::Text(text.to_string())),
	}
}

/// Parses a toggle from its common spellings.
pub fn parse_toggle(text: &str) -> Option<bool> {
	match text.to_ascii_lowercase().as_str() {
		"on" | "true" | "yes" | "1" => Some(true),
		"off" | "false" | "no" | "0" => Some(false),
		_ => None,
	}
}

/// Parses a number, accepting vim's hex (`0x1f`) and octal (`017`) forms.
pub fn parse_number(text: &str) -> Option<i64> {
	let text = text.trim();
	let (negative, digits) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text),
	};

	let magnitude = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
		radix_digits(hex, |b| b.is_ascii_hexdigit())?;
		i64::from_str_radix(hex, 16).ok()?
	} else {
		radix_digits(digits, |b| b.is_ascii_digit())?;
		if digits.len() > 1 && digits.starts_with('0') {
			i64::from_str_radix(&digits[1..], 8).ok()?
		} else {
			digits.parse::<i64>().ok()?
		}
	};

	if negative { magnitude.checked_neg() } else { Some(magnitude) }
}

/// Non-empty and every byte `valid`; `from_str_radix` would accept a sign.
fn radix_digits(digits: &str, valid: impl Fn(u8) -> bool) -> Option<()> {
	(!digits.is_empty() && digits.bytes().all(valid)).then_some(())
}

/// Splits a comma separated option value into trimmed, non-empty tokens.
pub fn split_list(text: &str) -> impl Iterator<Item = &str> {
	text.split(',').map(str::trim).filter(|t| !t.is_empty())
}
