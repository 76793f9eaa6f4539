// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for collection searches.

use quill_server_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
	/// The text index could not be queried (storage unavailable, malformed
	/// match expression, corrupt index).
	#[error("Index query failed: {0}")]
	Index(#[from] DbError),
}
