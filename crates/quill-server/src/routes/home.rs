// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Front page and "now" endpoints.

use axum::{extract::State, Json};
use quill_server_db::PostType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	error::{ErrorResponse, ServerError},
	routes::posts::{with_tags, PostResponse},
};

/// Posts shown per type on the front page.
pub const HOME_POSTS_PER_TYPE: u32 = 5;

/// Tag marking the posts that make up the "now" page.
pub const NOW_TAG: &str = "now";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomeSection {
	pub post_type: PostType,
	pub posts: Vec<PostResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
	/// One section per post type that has published posts.
	pub sections: Vec<HomeSection>,
}

fn group_by_type(posts: Vec<PostResponse>) -> Vec<HomeSection> {
	let mut sections: Vec<HomeSection> = Vec::new();
	for post in posts {
		match sections.last_mut() {
			Some(section) if section.post_type == post.post.post_type => section.posts.push(post),
			_ => sections.push(HomeSection {
				post_type: post.post.post_type,
				posts: vec![post],
			}),
		}
	}
	sections
}

#[utoipa::path(
    get,
    path = "/api/home",
    responses(
        (status = 200, description = "Newest published posts of each type", body = HomeResponse)
    ),
    tag = "content"
)]
/// GET /api/home - Front page listing.
pub async fn get_home(State(state): State<AppState>) -> Result<Json<HomeResponse>, ServerError> {
	let posts = state.posts.list_recent_per_type(HOME_POSTS_PER_TYPE).await?;
	let posts = with_tags(&state.tags, posts).await?;
	Ok(Json(HomeResponse {
		sections: group_by_type(posts),
	}))
}

#[utoipa::path(
    get,
    path = "/api/now",
    responses(
        (status = 200, description = "Newest published post tagged `now`", body = PostResponse),
        (status = 404, description = "No published post is tagged `now`", body = ErrorResponse)
    ),
    tag = "content"
)]
/// GET /api/now - What I'm doing now.
pub async fn get_now(State(state): State<AppState>) -> Result<Json<PostResponse>, ServerError> {
	let post = state
		.tags
		.latest_published_for_tag(NOW_TAG)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("no published post tagged '{NOW_TAG}'")))?;
	let tags = state.tags.get_tags_for_post(post.id).await?;
	Ok(Json(PostResponse { post, tags }))
}
