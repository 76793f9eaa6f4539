// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Searchable collections: posts and pages behind one interface.

use std::sync::Arc;

use async_trait::async_trait;
use quill_server_db::{ContentIndex, SearchIndexRepository, SnippetOptions, TagStore};

use crate::error::SearchError;
use crate::query::PreparedQuery;
use crate::result::{ResultKind, SearchResult};

/// A content collection with its own text index.
#[async_trait]
pub trait SearchableCollection: Send + Sync {
	fn kind(&self) -> ResultKind;

	/// Published matches for `query`, best first, at most `limit` of them.
	async fn query_index(
		&self,
		query: &PreparedQuery,
		limit: u32,
	) -> Result<Vec<SearchResult>, SearchError>;
}

/// Posts of every type, enriched with their tags.
pub struct PostCollection {
	index: SearchIndexRepository,
	tags: Arc<dyn TagStore>,
	snippet: SnippetOptions,
}

impl PostCollection {
	pub fn new(
		index: SearchIndexRepository,
		tags: Arc<dyn TagStore>,
		snippet: SnippetOptions,
	) -> Self {
		Self {
			index,
			tags,
			snippet,
		}
	}
}

#[async_trait]
impl SearchableCollection for PostCollection {
	fn kind(&self) -> ResultKind {
		ResultKind::Post
	}

	async fn query_index(
		&self,
		query: &PreparedQuery,
		limit: u32,
	) -> Result<Vec<SearchResult>, SearchError> {
		let hits = self
			.index
			.query_index(ContentIndex::Posts, query.as_str(), &self.snippet, limit)
			.await?;

		let mut results = Vec::with_capacity(hits.len());
		for hit in hits {
			let mut result = SearchResult::from_match(ResultKind::Post, hit);
			result.tags = match self.tags.get_tags_for_post(result.item.id).await {
				Ok(tags) => tags,
				Err(e) => {
					tracing::warn!(post_id = result.item.id, error = %e, "failed to load post tags");
					Vec::new()
				}
			};
			results.push(result);
		}
		Ok(results)
	}
}

/// Static pages.
pub struct PageCollection {
	index: SearchIndexRepository,
	snippet: SnippetOptions,
}

impl PageCollection {
	pub fn new(index: SearchIndexRepository, snippet: SnippetOptions) -> Self {
		Self { index, snippet }
	}
}

#[async_trait]
impl SearchableCollection for PageCollection {
	fn kind(&self) -> ResultKind {
		ResultKind::Page
	}

	async fn query_index(
		&self,
		query: &PreparedQuery,
		limit: u32,
	) -> Result<Vec<SearchResult>, SearchError> {
		let hits = self
			.index
			.query_index(ContentIndex::Pages, query.as_str(), &self.snippet, limit)
			.await?;

		Ok(hits
			.into_iter()
			.map(|hit| SearchResult::from_match(ResultKind::Page, hit))
			.collect())
	}
}
