// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Post repository.
//!
//! Writes go through the `posts` table only; the `posts_fts` index is
//! maintained by triggers inside the same transaction.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::tag::replace_post_tags;
use crate::types::{validate_slug, Post, PostInput, PostType};

const POST_COLUMNS: &str =
	"id, title, slug, content, post_type, published, created_at, updated_at";

#[derive(Clone)]
pub struct PostRepository {
	pool: SqlitePool,
}

impl PostRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, input), fields(slug = %input.slug, post_type = %input.post_type))]
	pub async fn create(&self, input: &PostInput) -> Result<Post, DbError> {
		validate_slug(&input.slug)?;
		let now = Utc::now();
		let mut tx = self.pool.begin().await?;

		let result = sqlx::query(
			r#"
			INSERT INTO posts (title, slug, content, post_type, published, created_at, updated_at)
			VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
			"#,
		)
		.bind(&input.title)
		.bind(&input.slug)
		.bind(&input.content)
		.bind(input.post_type)
		.bind(input.published)
		.bind(now)
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_write(e, || format!("post slug '{}' already exists", input.slug)))?;

		let id = result.last_insert_rowid();
		replace_post_tags(&mut *tx, id, &input.tags).await?;
		tx.commit().await?;

		tracing::info!(post_id = id, "post created");
		self.get_by_id(id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("post {id} vanished after insert")))
	}

	#[tracing::instrument(skip(self, input), fields(slug = %input.slug))]
	pub async fn update(&self, id: i64, input: &PostInput) -> Result<Post, DbError> {
		validate_slug(&input.slug)?;
		let mut tx = self.pool.begin().await?;

		let result = sqlx::query(
			r#"
			UPDATE posts
			SET title = ?1, slug = ?2, content = ?3, post_type = ?4, published = ?5, updated_at = ?6
			WHERE id = ?7
			"#,
		)
		.bind(&input.title)
		.bind(&input.slug)
		.bind(&input.content)
		.bind(input.post_type)
		.bind(input.published)
		.bind(Utc::now())
		.bind(id)
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_write(e, || format!("post slug '{}' already exists", input.slug)))?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("post {id}")));
		}

		replace_post_tags(&mut *tx, id, &input.tags).await?;
		tx.commit().await?;

		tracing::info!(post_id = id, "post updated");
		self.get_by_id(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("post {id}")))
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: i64) -> Result<(), DbError> {
		let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
			.bind(id)
			.execute(&self.pool)
			.await?;
		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("post {id}")));
		}
		tracing::info!(post_id = id, "post deleted");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>, DbError> {
		let post: Option<Post> =
			sqlx::query_as(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"))
				.bind(id)
				.fetch_optional(&self.pool)
				.await?;
		Ok(post)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_published_by_slug(
		&self,
		post_type: PostType,
		slug: &str,
	) -> Result<Option<Post>, DbError> {
		let post: Option<Post> = sqlx::query_as(&format!(
			"SELECT {POST_COLUMNS} FROM posts WHERE slug = ?1 AND post_type = ?2 AND published = 1"
		))
		.bind(slug)
		.bind(post_type)
		.fetch_optional(&self.pool)
		.await?;
		Ok(post)
	}

	/// Published posts, newest first, optionally restricted to one kind.
	#[tracing::instrument(skip(self))]
	pub async fn list_published(&self, post_type: Option<PostType>) -> Result<Vec<Post>, DbError> {
		let posts: Vec<Post> = match post_type {
			Some(post_type) => {
				sqlx::query_as(&format!(
					r#"
					SELECT {POST_COLUMNS} FROM posts
					WHERE post_type = ?1 AND published = 1
					ORDER BY created_at DESC, id DESC
					"#
				))
				.bind(post_type)
				.fetch_all(&self.pool)
				.await?
			}
			None => {
				sqlx::query_as(&format!(
					r#"
					SELECT {POST_COLUMNS} FROM posts
					WHERE published = 1
					ORDER BY created_at DESC, id DESC
					"#
				))
				.fetch_all(&self.pool)
				.await?
			}
		};
		Ok(posts)
	}

	/// The `per_type` newest published posts of each post type, grouped by
	/// type and newest first within a group.
	#[tracing::instrument(skip(self))]
	pub async fn list_recent_per_type(&self, per_type: u32) -> Result<Vec<Post>, DbError> {
		let posts: Vec<Post> = sqlx::query_as(&format!(
			r#"
			WITH ranked AS (
				SELECT {POST_COLUMNS},
					ROW_NUMBER() OVER (
						PARTITION BY post_type ORDER BY created_at DESC, id DESC
					) AS rn
				FROM posts
				WHERE published = 1
			)
			SELECT {POST_COLUMNS} FROM ranked
			WHERE rn <= ?1
			ORDER BY post_type, rn
			"#
		))
		.bind(per_type)
		.fetch_all(&self.pool)
		.await?;
		Ok(posts)
	}

	/// Every post including drafts, newest first.
	#[tracing::instrument(skip(self))]
	pub async fn list_all(&self) -> Result<Vec<Post>, DbError> {
		let posts: Vec<Post> = sqlx::query_as(&format!(
			"SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC"
		))
		.fetch_all(&self.pool)
		.await?;
		Ok(posts)
	}
}
