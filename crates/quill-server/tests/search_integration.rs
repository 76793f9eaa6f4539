// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end search tests through the HTTP router against a file-backed
//! database.

use axum::{
	body::Body,
	http::{Request, StatusCode},
};
use quill_server::api::{create_app_state, create_router, AppState};
use quill_server::ServerConfig;
use quill_server_db::{create_pool, run_migrations, PageInput, PostInput, PostType};
use quill_server_search::SearchResult;
use serde::Deserialize;
use tempfile::tempdir;
use tower::ServiceExt;

#[derive(Debug, Deserialize)]
struct SearchBody {
	query: String,
	results: Vec<SearchResult>,
	total: usize,
}

/// Creates a test app with an isolated on-disk database.
async fn setup_test_app() -> (axum::Router, AppState, tempfile::TempDir) {
	let dir = tempdir().unwrap();
	let db_path = dir.path().join("quill_search.db");
	let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
	let pool = create_pool(&db_url).await.unwrap();
	run_migrations(&pool).await.unwrap();
	let state = create_app_state(pool, &ServerConfig::default());
	(create_router(state.clone()), state, dir)
}

async fn search(app: &axum::Router, q: &str) -> SearchBody {
	let response = app
		.clone()
		.oneshot(
			Request::builder()
				.uri(format!("/search?q={q}"))
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

fn article(slug: &str, title: &str, content: &str, published: bool) -> PostInput {
	PostInput {
		title: title.to_string(),
		slug: slug.to_string(),
		content: content.to_string(),
		post_type: PostType::Article,
		published,
		tags: vec![],
	}
}

#[tokio::test]
async fn test_unpublished_article_never_found() {
	let (app, state, _dir) = setup_test_app().await;

	let published = state
		.posts
		.create(&article(
			"go-concurrency-patterns",
			"Go Concurrency Patterns",
			"Goroutines, channels and select.",
			true,
		))
		.await
		.unwrap();
	state
		.posts
		.create(&article(
			"go-generics",
			"Go Generics",
			"Type parameters, and why concurrency code benefits.",
			false,
		))
		.await
		.unwrap();
	state
		.pages
		.create(&PageInput {
			title: "Concurrency Reading List".to_string(),
			slug: "reading-list".to_string(),
			content: "Books still being collected.".to_string(),
			published: false,
		})
		.await
		.unwrap();

	let body = search(&app, "concurrency").await;

	assert_eq!(body.query, "concurrency");
	assert_eq!(body.total, 1);
	assert_eq!(body.results.len(), 1);
	assert_eq!(body.results[0].item.id, published.id);
	assert!(!body.results[0].snippet.is_empty());
	assert!(body.results[0].snippet.contains("<mark>Concurrency</mark>"));
}

#[tokio::test]
async fn test_results_follow_publication_changes() {
	let (app, state, _dir) = setup_test_app().await;

	let post = state
		.posts
		.create(&article("draft", "Draft Notes", "Half-written thoughts on sqlite.", false))
		.await
		.unwrap();
	assert_eq!(search(&app, "sqlite").await.total, 0);

	state
		.posts
		.update(post.id, &article("draft", "Draft Notes", "Half-written thoughts on sqlite.", true))
		.await
		.unwrap();
	assert_eq!(search(&app, "sqlite").await.total, 1);

	state.posts.delete(post.id).await.unwrap();
	assert_eq!(search(&app, "sqlite").await.total, 0);
}

#[tokio::test]
async fn test_posts_and_pages_merged_by_rank() {
	let (app, state, _dir) = setup_test_app().await;

	state
		.posts
		.create(&article("rust-a", "Rust", "rust rust rust rust", true))
		.await
		.unwrap();
	state
		.posts
		.create(&article("rust-b", "Misc", "one mention of rust in a longer body of text", true))
		.await
		.unwrap();
	state
		.pages
		.create(&PageInput {
			title: "Uses".to_string(),
			slug: "uses".to_string(),
			content: "Mostly rust and a terminal.".to_string(),
			published: true,
		})
		.await
		.unwrap();

	let body = search(&app, "rus").await;
	assert_eq!(body.total, 3);
	assert!(body.results.windows(2).all(|w| w[0].rank <= w[1].rank));
	assert!(body.results.iter().any(|r| r.item.collection == "page"));
}

#[tokio::test]
async fn test_injected_syntax_is_harmless() {
	let (app, state, _dir) = setup_test_app().await;

	state
		.posts
		.create(&article("wild", "Wildcards", "A post about globbing.", true))
		.await
		.unwrap();

	// A bare wildcard is stripped and leaves nothing to search for.
	let body = search(&app, "*").await;
	assert_eq!(body.total, 0);

	// An unbalanced quote makes the index reject the expression; that
	// degrades to no results rather than a failed request.
	let body = search(&app, "%22glob").await;
	assert_eq!(body.total, 0);
}
