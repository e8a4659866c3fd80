//! Keyword character classification driven by `iskeyword`.
//!
//! The option is a comma separated list of parts:
//!
//! * `@` for alphabetic characters;
//! * a decimal code point (`95`) or a range (`48-57`);
//! * a literal character (`_`, `-`);
//! * `@-@` for the literal `@`;
//! * any part prefixed by `^` excludes instead of includes.
//!
//! Parts apply left to right, so later exclusions win over earlier inclusions.

use std::ops::Range;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
	Alphabetic,
	Span(u32, u32),
}

impl Class {
	fn contains(self, c: char) -> bool {
		match self {
			Self::Alphabetic => c.is_alphabetic(),
			Self::Span(lo, hi) => (lo..=hi).contains(&(c as u32)),
		}
	}
}

/// Classifies characters and finds word boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordNavigator {
	/// `(class, included)` in application order.
	rules: Vec<(Class, bool)>,
}

impl WordNavigator {
	pub fn new(is_keyword: &str) -> Self {
		let mut rules = Vec::new();
		for part in is_keyword.split(',').filter(|p| !p.is_empty()) {
			let (part, included) = match part.strip_prefix('^') {
				Some(rest) if !rest.is_empty() => (rest, false),
				_ => (part, true),
			};
			match parse_part(part) {
				Some(class) => rules.push((class, included)),
				None => debug!(part, "ignoring unrecognized iskeyword part"),
			}
		}
		Self { rules }
	}

	pub fn is_keyword_char(&self, c: char) -> bool {
		self.rules
			.iter()
			.fold(false, |acc, &(class, included)| if class.contains(c) { included } else { acc })
	}

	/// Char-index span of the word under `index`.
	///
	/// Keyword runs form words; runs of other non-blank characters form
	/// punctuation words. Returns `None` on whitespace or past the end.
	pub fn word_span_at(&self, text: &str, index: usize) -> Option<Range<usize>> {
		let chars: Vec<char> = text.chars().collect();
		let kind = self.kind_of(*chars.get(index)?)?;

		let start = (0..index).rev().take_while(|&i| self.kind_of(chars[i]) == Some(kind)).last().unwrap_or(index);
		let end = (index..chars.len())
			.take_while(|&i| self.kind_of(chars[i]) == Some(kind))
			.last()
			.map_or(index + 1, |i| i + 1);
		Some(start..end)
	}

	/// Char index of the next word start after `index`, if any.
	pub fn next_word_start(&self, text: &str, index: usize) -> Option<usize> {
		let chars: Vec<char> = text.chars().collect();
		let mut prev = self.kind_of(*chars.get(index)?);
		for (i, &c) in chars.iter().enumerate().skip(index + 1) {
			let kind = self.kind_of(c);
			if kind.is_some() && kind != prev {
				return Some(i);
			}
			prev = kind;
		}
		None
	}

	/// `None` for whitespace, `Some(true)` for keyword characters.
	fn kind_of(&self, c: char) -> Option<bool> {
		(!c.is_whitespace()).then(|| self.is_keyword_char(c))
	}
}

fn parse_part(part: &str) -> Option<Class> {
	if part == "@" {
		return Some(Class::Alphabetic);
	}
	if part == "@-@" {
		return Some(Class::Span('@' as u32, '@' as u32));
	}
	if let Some((lo, hi)) = part.split_once('-')
		&& !lo.is_empty()
		&& !hi.is_empty()
	{
		let (lo, hi) = (code_point(lo)?, code_point(hi)?);
		return (lo <= hi).then_some(Class::Span(lo, hi));
	}
	code_point(part).map(|c| Class::Span(c, c))
}

/// A decimal code point or a single literal character.
fn code_point(text: &str) -> Option<u32> {
	if text.chars().all(|c| c.is_ascii_digit()) {
		return text.parse().ok();
	}
	let mut chars = text.chars();
	match (chars.next(), chars.next()) {
		(Some(c), None) => Some(c as u32),
		_ => None,
	}
}
