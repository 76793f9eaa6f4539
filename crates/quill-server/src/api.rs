// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router.

use std::sync::Arc;

use axum::{routing::get, Router};
use quill_server_config::ServerConfig;
use quill_server_db::{PageRepository, PostRepository, SnippetOptions, TagRepository};
use quill_server_search::Searcher;
use sqlx::sqlite::SqlitePool;
use utoipa::OpenApi;

use crate::routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub posts: Arc<PostRepository>,
	pub pages: Arc<PageRepository>,
	pub tags: Arc<TagRepository>,
	pub searcher: Arc<Searcher>,
	pub base_url: String,
}

/// Build the application state from a migrated pool and resolved config.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let snippet = SnippetOptions {
		highlight_start: config.search.highlight_start.clone(),
		highlight_end: config.search.highlight_end.clone(),
		ellipsis: config.search.ellipsis.clone(),
		tokens: config.search.snippet_tokens,
	};
	let searcher = Searcher::from_pool(pool.clone(), snippet, config.search.per_collection_limit);

	AppState {
		posts: Arc::new(PostRepository::new(pool.clone())),
		pages: Arc::new(PageRepository::new(pool.clone())),
		tags: Arc::new(TagRepository::new(pool.clone())),
		searcher: Arc::new(searcher),
		base_url: config.http.base_url.clone(),
		pool,
	}
}

#[derive(OpenApi)]
#[openapi(
	info(title = "Quill", description = "Public read API of the Quill blog"),
	paths(
		routes::health::health_check,
		routes::search::search_handler,
		routes::home::get_home,
		routes::home::get_now,
		routes::posts::list_posts,
		routes::posts::get_post,
		routes::pages::get_page,
		routes::tags::list_tags,
		routes::tags::list_tag_posts,
	),
	components(schemas(
		crate::error::ErrorResponse,
		crate::health::HealthResponse,
		routes::search::SearchResponse,
		routes::posts::PostResponse,
		routes::home::HomeResponse,
		routes::home::HomeSection,
		quill_server_search::SearchResult,
		quill_server_search::IndexedItem,
		quill_server_search::ResultKind,
		quill_server_db::Page,
		quill_server_db::PostType,
		quill_server_db::TagCount,
	)),
	tags(
		(name = "health", description = "Liveness and dependency checks"),
		(name = "search", description = "Full-text search over posts and pages"),
		(name = "content", description = "Published posts, pages and tags"),
	)
)]
pub struct ApiDoc;

/// Create the router with every public route.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/search", get(routes::search::search_handler))
		.route("/api/home", get(routes::home::get_home))
		.route("/api/now", get(routes::home::get_now))
		.route("/api/posts", get(routes::posts::list_posts))
		.route("/api/posts/{post_type}/{slug}", get(routes::posts::get_post))
		.route("/api/pages/{slug}", get(routes::pages::get_page))
		.route("/api/tags", get(routes::tags::list_tags))
		.route("/api/tags/{name}", get(routes::tags::list_tag_posts))
		.route("/api/openapi.json", get(routes::openapi::openapi_json))
		.with_state(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{
		body::Body,
		http::{Request, StatusCode},
	};
	use quill_server_db::testing::create_test_pool;
	use quill_server_db::{PageInput, PostInput, PostType};
	use tower::ServiceExt;

	async fn setup() -> (Router, AppState) {
		let pool = create_test_pool().await;
		let state = create_app_state(pool, &ServerConfig::default());
		(create_router(state.clone()), state)
	}

	async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
		let response = app
			.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();
		let status = response.status();
		let body = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		(status, serde_json::from_slice(&body).unwrap())
	}

	fn post(slug: &str, post_type: PostType, published: bool, tags: &[&str]) -> PostInput {
		PostInput {
			title: format!("Post {slug}"),
			slug: slug.to_string(),
			content: format!("Body of {slug}"),
			post_type,
			published,
			tags: tags.iter().map(|t| t.to_string()).collect(),
		}
	}

	#[tokio::test]
	async fn test_health() {
		let (app, _) = setup().await;
		let (status, body) = get_json(app, "/health").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["status"], "healthy");
		assert_eq!(body["database"]["status"], "healthy");
	}

	#[tokio::test]
	async fn test_health_reports_closed_pool() {
		let (app, state) = setup().await;
		state.pool.close().await;
		let (status, body) = get_json(app, "/health").await;
		assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
		assert_eq!(body["status"], "unhealthy");
	}

	#[tokio::test]
	async fn test_search_without_query_is_empty() {
		let (app, _) = setup().await;
		let (status, body) = get_json(app.clone(), "/search").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["total"], 0);
		assert_eq!(body["query"], "");

		let (status, body) = get_json(app, "/search?q=%20%20").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["total"], 0);
	}

	#[tokio::test]
	async fn test_search_echoes_query() {
		let (app, state) = setup().await;
		state
			.posts
			.create(&post("sqlite-tips", PostType::Note, true, &["db"]))
			.await
			.unwrap();

		let (status, body) = get_json(app, "/search?q=sqlite").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["query"], "sqlite");
		assert_eq!(body["total"], 1);
		assert_eq!(body["results"][0]["kind"], "post");
		assert_eq!(body["results"][0]["item"]["collection"], "note");
		assert_eq!(body["results"][0]["tags"][0], "db");
	}

	#[tokio::test]
	async fn test_list_posts_by_type() {
		let (app, state) = setup().await;
		state.posts.create(&post("a1", PostType::Article, true, &["go"])).await.unwrap();
		state.posts.create(&post("n1", PostType::Note, true, &[])).await.unwrap();
		state.posts.create(&post("a2", PostType::Article, false, &[])).await.unwrap();

		let (status, body) = get_json(app.clone(), "/api/posts?type=article").await;
		assert_eq!(status, StatusCode::OK);
		let items = body.as_array().unwrap();
		assert_eq!(items.len(), 1);
		assert_eq!(items[0]["slug"], "a1");
		assert_eq!(items[0]["tags"][0], "go");

		let (_, body) = get_json(app.clone(), "/api/posts").await;
		assert_eq!(body.as_array().unwrap().len(), 2);

		let (status, body) = get_json(app, "/api/posts?type=essay").await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["error"], "bad_request");
	}

	#[tokio::test]
	async fn test_get_post() {
		let (app, state) = setup().await;
		state.posts.create(&post("hello", PostType::Link, true, &[])).await.unwrap();
		state.posts.create(&post("draft", PostType::Link, false, &[])).await.unwrap();

		let (status, body) = get_json(app.clone(), "/api/posts/link/hello").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["post_type"], "link");

		let (status, _) = get_json(app.clone(), "/api/posts/note/hello").await;
		assert_eq!(status, StatusCode::NOT_FOUND);

		let (status, _) = get_json(app, "/api/posts/link/draft").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_get_page() {
		let (app, state) = setup().await;
		state
			.pages
			.create(&PageInput {
				title: "About".to_string(),
				slug: "about".to_string(),
				content: "Hi.".to_string(),
				published: true,
			})
			.await
			.unwrap();

		let (status, body) = get_json(app.clone(), "/api/pages/about").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["title"], "About");

		let (status, body) = get_json(app, "/api/pages/missing").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body["error"], "not_found");
	}

	#[tokio::test]
	async fn test_tags() {
		let (app, state) = setup().await;
		state.posts.create(&post("one", PostType::Article, true, &["go", "rust"])).await.unwrap();
		state.posts.create(&post("two", PostType::Note, true, &["go"])).await.unwrap();

		let (status, body) = get_json(app.clone(), "/api/tags").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body[0]["name"], "go");
		assert_eq!(body[0]["count"], 2);

		let (status, body) = get_json(app, "/api/tags/rust").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body.as_array().unwrap().len(), 1);
		assert_eq!(body[0]["slug"], "one");
	}

	#[tokio::test]
	async fn test_home_groups_newest_posts_by_type() {
		let (app, state) = setup().await;
		for i in 0..7 {
			state
				.posts
				.create(&post(&format!("a{i}"), PostType::Article, true, &[]))
				.await
				.unwrap();
		}
		state.posts.create(&post("n0", PostType::Note, true, &["go"])).await.unwrap();
		state.posts.create(&post("n-draft", PostType::Note, false, &[])).await.unwrap();

		let (status, body) = get_json(app, "/api/home").await;
		assert_eq!(status, StatusCode::OK);
		let sections = body["sections"].as_array().unwrap();
		assert_eq!(sections.len(), 2);
		assert_eq!(sections[0]["post_type"], "article");
		let articles = sections[0]["posts"].as_array().unwrap();
		assert_eq!(articles.len(), 5);
		assert_eq!(articles[0]["slug"], "a6");
		assert_eq!(sections[1]["post_type"], "note");
		assert_eq!(sections[1]["posts"].as_array().unwrap().len(), 1);
		assert_eq!(sections[1]["posts"][0]["tags"][0], "go");
	}

	#[tokio::test]
	async fn test_now_returns_latest_tagged_post() {
		let (app, state) = setup().await;

		let (status, body) = get_json(app.clone(), "/api/now").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body["error"], "not_found");

		state.posts.create(&post("now-jan", PostType::Note, true, &["now"])).await.unwrap();
		state.posts.create(&post("now-feb", PostType::Note, true, &["now", "life"])).await.unwrap();
		state.posts.create(&post("now-mar", PostType::Note, false, &["now"])).await.unwrap();

		let (status, body) = get_json(app, "/api/now").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["slug"], "now-feb");
		assert_eq!(body["tags"], serde_json::json!(["life", "now"]));
	}

	#[tokio::test]
	async fn test_openapi_document() {
		let (app, _) = setup().await;
		let (status, body) = get_json(app, "/api/openapi.json").await;
		assert_eq!(status, StatusCode::OK);
		assert!(body["paths"]["/search"].is_object());
		assert!(body["paths"]["/api/posts/{post_type}/{slug}"].is_object());
		assert!(body["paths"]["/api/home"].is_object());
		assert!(body["paths"]["/api/now"].is_object());
	}
}
