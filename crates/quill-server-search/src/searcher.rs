// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Running one prepared query against every collection.

use std::sync::Arc;

use quill_server_db::{SearchIndexRepository, SnippetOptions, TagRepository};
use sqlx::sqlite::SqlitePool;

use crate::collection::{PageCollection, PostCollection, SearchableCollection};
use crate::merge::merge;
use crate::query::PreparedQuery;
use crate::result::SearchResult;

/// Default cap on matches taken from each collection.
pub const DEFAULT_PER_COLLECTION_LIMIT: u32 = 50;

/// Searches posts and pages and merges the hits into one ranked list.
#[derive(Clone)]
pub struct Searcher {
	posts: Arc<dyn SearchableCollection>,
	pages: Arc<dyn SearchableCollection>,
	per_collection_limit: u32,
}

impl Searcher {
	pub fn new(
		posts: Arc<dyn SearchableCollection>,
		pages: Arc<dyn SearchableCollection>,
		per_collection_limit: u32,
	) -> Self {
		Self {
			posts,
			pages,
			per_collection_limit,
		}
	}

	/// Wire both SQLite-backed collections onto one pool.
	pub fn from_pool(pool: SqlitePool, snippet: SnippetOptions, per_collection_limit: u32) -> Self {
		let index = SearchIndexRepository::new(pool.clone());
		let posts = PostCollection::new(
			index.clone(),
			Arc::new(TagRepository::new(pool)),
			snippet.clone(),
		);
		let pages = PageCollection::new(index, snippet);
		Self::new(Arc::new(posts), Arc::new(pages), per_collection_limit)
	}

	/// Ranked results for `query`, strongest match first.
	///
	/// An empty query returns nothing without touching any index. A
	/// collection that fails contributes no results; the other collection's
	/// results are still returned.
	#[tracing::instrument(skip(self, query), fields(query = %query))]
	pub async fn search(&self, query: &PreparedQuery) -> Vec<SearchResult> {
		if query.is_empty() {
			return Vec::new();
		}

		let (posts, pages) = tokio::join!(
			self.collect(self.posts.as_ref(), query),
			self.collect(self.pages.as_ref(), query),
		);

		let results = merge(posts, pages);
		tracing::debug!(count = results.len(), "search completed");
		results
	}

	async fn collect(
		&self,
		collection: &dyn SearchableCollection,
		query: &PreparedQuery,
	) -> Vec<SearchResult> {
		let limit = self.per_collection_limit;
		match collection.query_index(query, limit).await {
			Ok(mut results) => {
				results.truncate(limit as usize);
				results
			}
			Err(e) => {
				tracing::warn!(
					collection = %collection.kind(),
					error = %e,
					"collection search failed, skipping"
				);
				Vec::new()
			}
		}
	}
}
