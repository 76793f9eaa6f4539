// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Published post endpoints.

use axum::{
	extract::{Path, Query, State},
	Json,
};
use quill_server_db::{Post, PostType, TagRepository};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	error::{ErrorResponse, ServerError},
};

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
	#[serde(rename = "type", default)]
	pub post_type: Option<String>,
}

/// A post together with its tag names.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
	#[serde(flatten)]
	pub post: Post,
	pub tags: Vec<String>,
}

pub(crate) async fn with_tags(
	tags: &TagRepository,
	posts: Vec<Post>,
) -> Result<Vec<PostResponse>, ServerError> {
	let mut out = Vec::with_capacity(posts.len());
	for post in posts {
		let names = tags.get_tags_for_post(post.id).await?;
		out.push(PostResponse { post, tags: names });
	}
	Ok(out)
}

fn parse_post_type(raw: &str) -> Result<PostType, ServerError> {
	raw.parse()
		.map_err(|_| ServerError::BadRequest(format!("unknown post type '{raw}'")))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    params(
        ("type" = Option<String>, Query, description = "Restrict to one post type: article, note, link, photo")
    ),
    responses(
        (status = 200, description = "Published posts, newest first", body = [PostResponse]),
        (status = 400, description = "Unknown post type", body = ErrorResponse)
    ),
    tag = "content"
)]
/// GET /api/posts - Published posts, optionally of one type.
pub async fn list_posts(
	State(state): State<AppState>,
	Query(params): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, ServerError> {
	let post_type = params
		.post_type
		.as_deref()
		.map(parse_post_type)
		.transpose()?;
	let posts = state.posts.list_published(post_type).await?;
	Ok(Json(with_tags(&state.tags, posts).await?))
}

#[utoipa::path(
    get,
    path = "/api/posts/{post_type}/{slug}",
    params(
        ("post_type" = String, Path, description = "Post type"),
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "Published post", body = PostResponse),
        (status = 400, description = "Unknown post type", body = ErrorResponse),
        (status = 404, description = "No published post with this slug", body = ErrorResponse)
    ),
    tag = "content"
)]
/// GET /api/posts/{post_type}/{slug} - One published post.
pub async fn get_post(
	State(state): State<AppState>,
	Path((post_type, slug)): Path<(String, String)>,
) -> Result<Json<PostResponse>, ServerError> {
	let post_type = parse_post_type(&post_type)?;
	let post = state
		.posts
		.get_published_by_slug(post_type, &slug)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("{post_type} '{slug}'")))?;
	let tags = state.tags.get_tags_for_post(post.id).await?;
	Ok(Json(PostResponse { post, tags }))
}
