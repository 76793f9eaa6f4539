// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::{
	extract::{Path, State},
	Json,
};
use quill_server_db::TagCount;

use crate::{api::AppState, error::ServerError, routes::posts::{with_tags, PostResponse}};

#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "Tags of published posts with post counts", body = [TagCount])
    ),
    tag = "content"
)]
/// GET /api/tags - Tag cloud data.
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagCount>>, ServerError> {
	Ok(Json(state.tags.list_with_counts().await?))
}

#[utoipa::path(
    get,
    path = "/api/tags/{name}",
    params(("name" = String, Path, description = "Tag name")),
    responses(
        (status = 200, description = "Published posts carrying the tag, newest first", body = [PostResponse])
    ),
    tag = "content"
)]
/// GET /api/tags/{name} - Published posts with a tag.
pub async fn list_tag_posts(
	State(state): State<AppState>,
	Path(name): Path<String>,
) -> Result<Json<Vec<PostResponse>>, ServerError> {
	let posts = state.tags.list_published_posts_for_tag(&name).await?;
	Ok(Json(with_tags(&state.tags, posts).await?))
}
