// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::{extract::State, Json};
use utoipa::openapi::{server::Server, OpenApi as OpenApiDoc};
use utoipa::OpenApi;

use crate::api::{ApiDoc, AppState};

/// GET /api/openapi.json - Generated API document, served from the
/// configured base URL.
pub async fn openapi_json(State(state): State<AppState>) -> Json<OpenApiDoc> {
	let mut doc = ApiDoc::openapi();
	doc.servers = Some(vec![Server::new(state.base_url.clone())]);
	Json(doc)
}
