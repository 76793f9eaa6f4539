// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Site search endpoint.

use axum::{
	extract::{Query, State},
	Json,
};
use quill_server_search::{prepare, SearchResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
	#[serde(default)]
	pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
	/// The query as the visitor typed it.
	pub query: String,
	pub results: Vec<SearchResult>,
	pub total: usize,
}

#[utoipa::path(
    get,
    path = "/search",
    params(
        ("q" = Option<String>, Query, description = "Search terms; blank or missing returns no results")
    ),
    responses(
        (status = 200, description = "Ranked results from posts and pages", body = SearchResponse)
    ),
    tag = "search"
)]
/// GET /search - Search published posts and pages.
pub async fn search_handler(
	State(state): State<AppState>,
	Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
	let query = params.q.unwrap_or_default();
	let prepared = prepare(&query);
	let results = state.searcher.search(&prepared).await;

	tracing::debug!(query = %query, total = results.len(), "search served");
	Json(SearchResponse {
		total: results.len(),
		query,
		results,
	})
}
