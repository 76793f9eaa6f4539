// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Merging per-collection results into one ranked list.

use crate::result::SearchResult;

/// Combine post and page results, strongest match (lowest rank) first.
///
/// The sort is stable: equal ranks keep posts before pages and each
/// collection's own retrieval order. Scores from the two indexes are
/// treated as comparable; they come from the same bm25 function over
/// identically shaped indexes, but nothing normalizes them further.
pub fn merge(posts: Vec<SearchResult>, pages: Vec<SearchResult>) -> Vec<SearchResult> {
	let mut results = posts;
	results.extend(pages);
	results.sort_by(|a, b| a.rank.total_cmp(&b.rank));
	results
}
