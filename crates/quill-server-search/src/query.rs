// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Rewriting raw user input into an FTS5 match expression.

use std::fmt;

/// FTS5 prefix-query marker.
pub const PREFIX_MARKER: char = '*';

const OPERATORS: [&str; 3] = ["AND", "OR", "NOT"];

/// A match expression that is safe to hand to the text index.
///
/// Every `*` it contains was appended by [`prepare`] at the end of a term;
/// none comes from user input. An empty query means no search should run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreparedQuery(String);

impl PreparedQuery {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for PreparedQuery {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for PreparedQuery {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Prepare raw search input for prefix matching.
///
/// - every literal `*` is removed first
/// - blank input yields an empty query
/// - `AND`, `OR` and `NOT` (any case) and `"quoted phrases"` pass through
/// - every other term gets a trailing `*`
///
/// ```
/// use quill_server_search::prepare;
///
/// assert_eq!(prepare("hello world").as_str(), "hello* world*");
/// assert_eq!(prepare("hello AND world").as_str(), "hello* AND world*");
/// assert_eq!(prepare("a*b").as_str(), "ab*");
/// assert!(prepare("   ").is_empty());
/// ```
pub fn prepare(raw: &str) -> PreparedQuery {
	let stripped: String = raw.chars().filter(|c| *c != PREFIX_MARKER).collect();
	let trimmed = stripped.trim();
	if trimmed.is_empty() {
		return PreparedQuery::default();
	}

	let terms: Vec<String> = tokenize(trimmed)
		.into_iter()
		.map(|token| {
			if is_operator(token) || is_quoted_phrase(token) {
				token.to_string()
			} else {
				format!("{token}{PREFIX_MARKER}")
			}
		})
		.collect();

	PreparedQuery(terms.join(" "))
}

fn is_operator(token: &str) -> bool {
	OPERATORS.iter().any(|op| op.eq_ignore_ascii_case(token))
}

fn is_quoted_phrase(token: &str) -> bool {
	token.starts_with('"') && token.ends_with('"')
}

/// Split on whitespace, keeping a quoted phrase together as one token when
/// its closing quote exists. An unterminated quote splits like plain text.
fn tokenize(input: &str) -> Vec<&str> {
	let mut tokens = Vec::new();
	let mut rest = input.trim_start();

	while !rest.is_empty() {
		let closing_quote = rest
			.strip_prefix('"')
			.and_then(|inner| inner.find('"'))
			.map(|pos| pos + 2);
		let end = closing_quote
			.unwrap_or_else(|| rest.find(char::is_whitespace).unwrap_or(rest.len()));

		tokens.push(&rest[..end]);
		rest = rest[end..].trim_start();
	}

	tokens
}
