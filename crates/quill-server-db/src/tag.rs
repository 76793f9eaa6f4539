// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tag repository: tag names, post/tag links and per-tag listings.

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePool, SqliteConnection};

use crate::error::DbError;
use crate::types::{Post, TagCount};

/// Split an admin-entered, comma-separated tag list into tag names.
///
/// Names are trimmed, blanks are dropped and repeats collapse onto their
/// first occurrence.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
	normalize_tags(raw.split(','))
}

fn normalize_tags<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
	let mut tags: Vec<String> = Vec::new();
	for name in names {
		let name = name.trim();
		if name.is_empty() || tags.iter().any(|t| t == name) {
			continue;
		}
		tags.push(name.to_string());
	}
	tags
}

/// Replace the tag set of `post_id` on an open connection or transaction.
pub(crate) async fn replace_post_tags(
	conn: &mut SqliteConnection,
	post_id: i64,
	names: &[String],
) -> Result<(), DbError> {
	sqlx::query("DELETE FROM post_tags WHERE post_id = ?1")
		.bind(post_id)
		.execute(&mut *conn)
		.await?;

	for name in normalize_tags(names.iter().map(String::as_str)) {
		sqlx::query("INSERT INTO tags (name) VALUES (?1) ON CONFLICT(name) DO NOTHING")
			.bind(&name)
			.execute(&mut *conn)
			.await?;

		let tag_id: i64 = sqlx::query_scalar("SELECT id FROM tags WHERE name = ?1")
			.bind(&name)
			.fetch_one(&mut *conn)
			.await?;

		sqlx::query("INSERT OR IGNORE INTO post_tags (post_id, tag_id) VALUES (?1, ?2)")
			.bind(post_id)
			.bind(tag_id)
			.execute(&mut *conn)
			.await?;
	}

	Ok(())
}

#[derive(Clone)]
pub struct TagRepository {
	pool: SqlitePool,
}

impl TagRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Tag names attached to a post, alphabetically.
	#[tracing::instrument(skip(self))]
	pub async fn get_tags_for_post(&self, post_id: i64) -> Result<Vec<String>, DbError> {
		let tags: Vec<String> = sqlx::query_scalar(
			r#"
			SELECT t.name
			FROM tags t
			JOIN post_tags pt ON t.id = pt.tag_id
			WHERE pt.post_id = ?1
			ORDER BY t.name ASC
			"#,
		)
		.bind(post_id)
		.fetch_all(&self.pool)
		.await?;
		Ok(tags)
	}

	#[tracing::instrument(skip(self, names), fields(count = names.len()))]
	pub async fn set_post_tags(&self, post_id: i64, names: &[String]) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM posts WHERE id = ?1")
			.bind(post_id)
			.fetch_optional(&mut *tx)
			.await?;
		if exists.is_none() {
			return Err(DbError::NotFound(format!("post {post_id}")));
		}

		replace_post_tags(&mut *tx, post_id, names).await?;
		tx.commit().await?;
		tracing::debug!(post_id, "post tags replaced");
		Ok(())
	}

	/// Tags carried by at least one published post, with their post counts.
	#[tracing::instrument(skip(self))]
	pub async fn list_with_counts(&self) -> Result<Vec<TagCount>, DbError> {
		let tags: Vec<TagCount> = sqlx::query_as(
			r#"
			SELECT t.name, COUNT(p.id) AS count
			FROM tags t
			JOIN post_tags pt ON t.id = pt.tag_id
			JOIN posts p ON p.id = pt.post_id AND p.published = 1
			GROUP BY t.id, t.name
			HAVING COUNT(p.id) > 0
			ORDER BY t.name
			"#,
		)
		.fetch_all(&self.pool)
		.await?;
		Ok(tags)
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_published_posts_for_tag(&self, name: &str) -> Result<Vec<Post>, DbError> {
		let posts: Vec<Post> = sqlx::query_as(
			r#"
			SELECT p.id, p.title, p.slug, p.content, p.post_type, p.published, p.created_at, p.updated_at
			FROM posts p
			JOIN post_tags pt ON p.id = pt.post_id
			JOIN tags t ON pt.tag_id = t.id
			WHERE t.name = ?1 AND p.published = 1
			ORDER BY p.created_at DESC, p.id DESC
			"#,
		)
		.bind(name)
		.fetch_all(&self.pool)
		.await?;
		Ok(posts)
	}

	/// Newest published post carrying the tag.
	#[tracing::instrument(skip(self))]
	pub async fn latest_published_for_tag(&self, name: &str) -> Result<Option<Post>, DbError> {
		let post: Option<Post> = sqlx::query_as(
			r#"
			SELECT p.id, p.title, p.slug, p.content, p.post_type, p.published, p.created_at, p.updated_at
			FROM posts p
			JOIN post_tags pt ON p.id = pt.post_id
			JOIN tags t ON pt.tag_id = t.id
			WHERE t.name = ?1 AND p.published = 1
			ORDER BY p.created_at DESC, p.id DESC
			LIMIT 1
			"#,
		)
		.bind(name)
		.fetch_optional(&self.pool)
		.await?;
		Ok(post)
	}
}

/// Resolves the tag names of a post.
#[async_trait]
pub trait TagStore: Send + Sync {
	async fn get_tags_for_post(&self, post_id: i64) -> Result<Vec<String>, DbError>;
}

#[async_trait]
impl TagStore for TagRepository {
	async fn get_tags_for_post(&self, post_id: i64) -> Result<Vec<String>, DbError> {
		self.get_tags_for_post(post_id).await
	}
}
