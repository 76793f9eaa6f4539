// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Full-text search configuration section.

use serde::Deserialize;

use crate::error::ConfigError;

/// Largest context window the FTS5 `snippet()` function accepts.
pub const MAX_SNIPPET_TOKENS: u32 = 64;

/// Upper bound on matches taken from each collection; two collections keep
/// a response at 100 results or fewer.
pub const MAX_PER_COLLECTION_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfigLayer {
	#[serde(default)]
	pub per_collection_limit: Option<u32>,
	#[serde(default)]
	pub snippet_tokens: Option<u32>,
	#[serde(default)]
	pub highlight_start: Option<String>,
	#[serde(default)]
	pub highlight_end: Option<String>,
	#[serde(default)]
	pub ellipsis: Option<String>,
}

impl SearchConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.per_collection_limit.is_some() {
			self.per_collection_limit = other.per_collection_limit;
		}
		if other.snippet_tokens.is_some() {
			self.snippet_tokens = other.snippet_tokens;
		}
		if other.highlight_start.is_some() {
			self.highlight_start = other.highlight_start;
		}
		if other.highlight_end.is_some() {
			self.highlight_end = other.highlight_end;
		}
		if other.ellipsis.is_some() {
			self.ellipsis = other.ellipsis;
		}
	}

	pub fn finalize(self) -> SearchConfig {
		let defaults = SearchConfig::default();
		SearchConfig {
			per_collection_limit: self
				.per_collection_limit
				.unwrap_or(defaults.per_collection_limit),
			snippet_tokens: self.snippet_tokens.unwrap_or(defaults.snippet_tokens),
			highlight_start: self.highlight_start.unwrap_or(defaults.highlight_start),
			highlight_end: self.highlight_end.unwrap_or(defaults.highlight_end),
			ellipsis: self.ellipsis.unwrap_or(defaults.ellipsis),
		}
	}
}

/// Search settings (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct SearchConfig {
	/// Maximum matches retrieved from each indexed collection.
	pub per_collection_limit: u32,
	/// Context window of generated snippets, in tokens.
	pub snippet_tokens: u32,
	pub highlight_start: String,
	pub highlight_end: String,
	pub ellipsis: String,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			per_collection_limit: MAX_PER_COLLECTION_LIMIT,
			snippet_tokens: MAX_SNIPPET_TOKENS,
			highlight_start: "<mark>".to_string(),
			highlight_end: "</mark>".to_string(),
			ellipsis: "...".to_string(),
		}
	}
}

impl SearchConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(1..=MAX_PER_COLLECTION_LIMIT).contains(&self.per_collection_limit) {
			return Err(ConfigError::Validation(format!(
				"search.per_collection_limit must be between 1 and {MAX_PER_COLLECTION_LIMIT}, got {}",
				self.per_collection_limit
			)));
		}
		if !(1..=MAX_SNIPPET_TOKENS).contains(&self.snippet_tokens) {
			return Err(ConfigError::Validation(format!(
				"search.snippet_tokens must be between 1 and {MAX_SNIPPET_TOKENS}, got {}",
				self.snippet_tokens
			)));
		}
		Ok(())
	}
}
