// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::{
	extract::{Path, State},
	Json,
};
use quill_server_db::Page;

use crate::{
	api::AppState,
	error::{ErrorResponse, ServerError},
};

#[utoipa::path(
    get,
    path = "/api/pages/{slug}",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Published page", body = Page),
        (status = 404, description = "No published page with this slug", body = ErrorResponse)
    ),
    tag = "content"
)]
/// GET /api/pages/{slug} - A published static page.
pub async fn get_page(
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> Result<Json<Page>, ServerError> {
	state
		.pages
		.get_published_by_slug(&slug)
		.await?
		.map(Json)
		.ok_or_else(|| ServerError::NotFound(format!("page '{slug}'")))
}
