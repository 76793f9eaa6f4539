// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;

use chrono::{DateTime, Utc};
use quill_server_db::IndexMatch;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which collection a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
	Post,
	Page,
}

impl ResultKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ResultKind::Post => "post",
			ResultKind::Page => "page",
		}
	}
}

impl fmt::Display for ResultKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Display fields of a matched post or page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IndexedItem {
	pub id: i64,
	pub title: String,
	pub slug: String,
	pub body: String,
	/// Post type (`article`, `note`, ...) or `page`.
	pub collection: String,
	pub created_at: DateTime<Utc>,
}

/// One ranked search hit. Built per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
	pub kind: ResultKind,
	pub item: IndexedItem,
	/// Index engine score. Lower is a stronger match, and scores only order
	/// results of the same query.
	pub rank: f64,
	/// Excerpt with matched terms wrapped in highlight markers.
	pub snippet: String,
	/// Tag names, posts only.
	#[serde(default)]
	pub tags: Vec<String>,
}

impl SearchResult {
	pub fn from_match(kind: ResultKind, hit: IndexMatch) -> Self {
		Self {
			kind,
			item: IndexedItem {
				id: hit.id,
				title: hit.title,
				slug: hit.slug,
				body: hit.content,
				collection: hit.collection,
				created_at: hit.created_at,
			},
			rank: hit.rank,
			snippet: hit.snippet,
			tags: Vec::new(),
		}
	}
}
