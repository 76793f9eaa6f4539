// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Static page repository.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::types::{validate_slug, Page, PageInput};

const PAGE_COLUMNS: &str = "id, title, slug, content, published, created_at, updated_at";

#[derive(Clone)]
pub struct PageRepository {
	pool: SqlitePool,
}

impl PageRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, input), fields(slug = %input.slug))]
	pub async fn create(&self, input: &PageInput) -> Result<Page, DbError> {
		validate_slug(&input.slug)?;
		let result = sqlx::query(
			r#"
			INSERT INTO pages (title, slug, content, published, created_at, updated_at)
			VALUES (?1, ?2, ?3, ?4, ?5, ?5)
			"#,
		)
		.bind(&input.title)
		.bind(&input.slug)
		.bind(&input.content)
		.bind(input.published)
		.bind(Utc::now())
		.execute(&self.pool)
		.await
		.map_err(|e| DbError::from_write(e, || format!("page slug '{}' already exists", input.slug)))?;

		let id = result.last_insert_rowid();
		tracing::info!(page_id = id, "page created");
		self.get_by_id(id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("page {id} vanished after insert")))
	}

	#[tracing::instrument(skip(self, input), fields(slug = %input.slug))]
	pub async fn update(&self, id: i64, input: &PageInput) -> Result<Page, DbError> {
		validate_slug(&input.slug)?;
		let result = sqlx::query(
			r#"
			UPDATE pages
			SET title = ?1, slug = ?2, content = ?3, published = ?4, updated_at = ?5
			WHERE id = ?6
			"#,
		)
		.bind(&input.title)
		.bind(&input.slug)
		.bind(&input.content)
		.bind(input.published)
		.bind(Utc::now())
		.bind(id)
		.execute(&self.pool)
		.await
		.map_err(|e| DbError::from_write(e, || format!("page slug '{}' already exists", input.slug)))?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("page {id}")));
		}

		tracing::info!(page_id = id, "page updated");
		self.get_by_id(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("page {id}")))
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: i64) -> Result<(), DbError> {
		let result = sqlx::query("DELETE FROM pages WHERE id = ?1")
			.bind(id)
			.execute(&self.pool)
			.await?;
		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("page {id}")));
		}
		tracing::info!(page_id = id, "page deleted");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_by_id(&self, id: i64) -> Result<Option<Page>, DbError> {
		let page: Option<Page> =
			sqlx::query_as(&format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = ?1"))
				.bind(id)
				.fetch_optional(&self.pool)
				.await?;
		Ok(page)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Page>, DbError> {
		let page: Option<Page> = sqlx::query_as(&format!(
			"SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ?1 AND published = 1"
		))
		.bind(slug)
		.fetch_optional(&self.pool)
		.await?;
		Ok(page)
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_all(&self) -> Result<Vec<Page>, DbError> {
		let pages: Vec<Page> = sqlx::query_as(&format!(
			"SELECT {PAGE_COLUMNS} FROM pages ORDER BY created_at DESC, id DESC"
		))
		.fetch_all(&self.pool)
		.await?;
		Ok(pages)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;

	fn page(slug: &str, content: &str, published: bool) -> PageInput {
		PageInput {
			title: format!("Page {slug}"),
			slug: slug.to_string(),
			content: content.to_string(),
			published,
		}
	}

	#[tokio::test]
	async fn test_create_update_delete() {
		let pool = create_test_pool().await;
		let repo = PageRepository::new(pool);

		let created = repo.create(&page("about", "Who I am", true)).await.unwrap();
		assert_eq!(created.slug, "about");

		let updated = repo
			.update(created.id, &page("about-me", "Who I really am", false))
			.await
			.unwrap();
		assert_eq!(updated.slug, "about-me");
		assert!(!updated.published);
		assert_eq!(updated.created_at, created.created_at);

		repo.delete(created.id).await.unwrap();
		assert!(repo.get_by_id(created.id).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_published_lookup() {
		let pool = create_test_pool().await;
		let repo = PageRepository::new(pool);

		repo.create(&page("about", "", true)).await.unwrap();
		repo.create(&page("now", "", false)).await.unwrap();

		assert!(repo.get_published_by_slug("about").await.unwrap().is_some());
		assert!(repo.get_published_by_slug("now").await.unwrap().is_none());
		assert_eq!(repo.list_all().await.unwrap().len(), 2);
	}

	#[tokio::test]
	async fn test_duplicate_slug_is_conflict() {
		let pool = create_test_pool().await;
		let repo = PageRepository::new(pool);

		let first = repo.create(&page("about", "", true)).await.unwrap();
		let second = repo.create(&page("contact", "", true)).await.unwrap();
		let err = repo
			.update(second.id, &page(&first.slug, "", true))
			.await
			.unwrap_err();
		assert!(matches!(err, DbError::Conflict(_)));
	}

	#[tokio::test]
	async fn test_index_follows_page_writes() {
		let pool = create_test_pool().await;
		let repo = PageRepository::new(pool.clone());

		let created = repo.create(&page("colophon", "typeset in garamond", true)).await.unwrap();
		let count = |q: &'static str| {
			let pool = pool.clone();
			async move {
				sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pages_fts WHERE pages_fts MATCH ?1")
					.bind(q)
					.fetch_one(&pool)
					.await
					.unwrap()
			}
		};
		assert_eq!(count("garamond").await, 1);

		repo.update(created.id, &page("colophon", "typeset in baskerville", true))
			.await
			.unwrap();
		assert_eq!(count("garamond").await, 0);
		assert_eq!(count("baskerville").await, 1);

		repo.delete(created.id).await.unwrap();
		assert_eq!(count("baskerville").await, 0);
	}
}
