// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// In-memory pool with the full schema applied.
///
/// Every connection to `:memory:` is a separate database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn create_test_pool() -> SqlitePool {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect("sqlite::memory:")
		.await
		.unwrap();
	crate::pool::run_migrations(&pool).await.unwrap();
	pool
}
