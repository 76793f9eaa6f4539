// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer produced by each source.

use serde::Deserialize;

use crate::sections::{DatabaseConfigLayer, HttpConfigLayer, LoggingConfigLayer, SearchConfigLayer};

/// One source's view of the configuration. Every section is optional so that
/// later sources only override what they actually set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub search: Option<SearchConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge `other` on top of `self`; values present in `other` win.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.search, other.search, SearchConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T: Default>(slot: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	if let Some(other) = other {
		merge(slot.get_or_insert_with(Default::default), other);
	}
}
