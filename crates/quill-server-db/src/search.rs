// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! FTS5 queries against the post and page text indexes.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePool, FromRow};

use crate::error::DbError;

/// One of the two full-text indexed collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentIndex {
	Posts,
	Pages,
}

impl ContentIndex {
	pub fn as_str(&self) -> &'static str {
		match self {
			ContentIndex::Posts => "posts",
			ContentIndex::Pages => "pages",
		}
	}

	// Both statements share one shape so that rows decode into `IndexMatch`.
	// Publication is filtered inside the statement, never afterwards.
	fn match_sql(&self) -> &'static str {
		match self {
			ContentIndex::Posts => {
				r#"
				SELECT
					p.id,
					p.title,
					p.slug,
					p.content,
					p.post_type AS collection,
					p.created_at,
					bm25(posts_fts) AS rank,
					snippet(posts_fts, -1, ?2, ?3, ?4, ?5) AS snippet
				FROM posts_fts
				JOIN posts p ON p.id = posts_fts.rowid
				WHERE posts_fts MATCH ?1 AND p.published = 1
				ORDER BY rank
				LIMIT ?6
				"#
			}
			ContentIndex::Pages => {
				r#"
				SELECT
					p.id,
					p.title,
					p.slug,
					p.content,
					'page' AS collection,
					p.created_at,
					bm25(pages_fts) AS rank,
					snippet(pages_fts, -1, ?2, ?3, ?4, ?5) AS snippet
				FROM pages_fts
				JOIN pages p ON p.id = pages_fts.rowid
				WHERE pages_fts MATCH ?1 AND p.published = 1
				ORDER BY rank
				LIMIT ?6
				"#
			}
		}
	}
}

/// Arguments passed to the FTS5 `snippet()` function.
#[derive(Debug, Clone)]
pub struct SnippetOptions {
	pub highlight_start: String,
	pub highlight_end: String,
	pub ellipsis: String,
	/// Context window in tokens, 1..=64.
	pub tokens: u32,
}

impl Default for SnippetOptions {
	fn default() -> Self {
		Self {
			highlight_start: "<mark>".to_string(),
			highlight_end: "</mark>".to_string(),
			ellipsis: "...".to_string(),
			tokens: 64,
		}
	}
}

/// A published item matched by a text index.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct IndexMatch {
	pub id: i64,
	pub title: String,
	pub slug: String,
	pub content: String,
	/// Post type for posts, `page` for pages.
	pub collection: String,
	pub created_at: DateTime<Utc>,
	/// bm25 score; lower is a stronger match.
	pub rank: f64,
	pub snippet: String,
}

#[derive(Clone)]
pub struct SearchIndexRepository {
	pool: SqlitePool,
}

impl SearchIndexRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Run `match_expr` against one index, best matches first.
	///
	/// `match_expr` is handed to FTS5 verbatim, so callers are expected to
	/// have sanitized it already.
	#[tracing::instrument(skip(self, snippet), fields(index = index.as_str()))]
	pub async fn query_index(
		&self,
		index: ContentIndex,
		match_expr: &str,
		snippet: &SnippetOptions,
		limit: u32,
	) -> Result<Vec<IndexMatch>, DbError> {
		if match_expr.trim().is_empty() {
			return Ok(vec![]);
		}

		let matches: Vec<IndexMatch> = sqlx::query_as(index.match_sql())
			.bind(match_expr)
			.bind(&snippet.highlight_start)
			.bind(&snippet.highlight_end)
			.bind(&snippet.ellipsis)
			.bind(snippet.tokens)
			.bind(limit)
			.fetch_all(&self.pool)
			.await?;

		tracing::debug!(count = matches.len(), "index query completed");
		Ok(matches)
	}
}
