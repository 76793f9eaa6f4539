// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Validation error: {0}")]
	Validation(String),

	#[error("Internal: {0}")]
	Internal(String),
}

impl DbError {
	/// Map a unique-constraint violation to `Conflict`, passing other errors through.
	pub(crate) fn from_write(err: sqlx::Error, what: impl FnOnce() -> String) -> Self {
		if let sqlx::Error::Database(ref db_err) = err {
			if db_err.is_unique_violation() {
				return DbError::Conflict(what());
			}
		}
		DbError::Sqlx(err)
	}
}

pub type Result<T> = std::result::Result<T, DbError>;
