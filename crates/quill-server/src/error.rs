// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error type and its HTTP mapping.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use quill_server_db::DbError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

#[derive(Debug, Error)]
pub enum ServerError {
	#[error("Bad request: {0}")]
	BadRequest(String),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Database error: {0}")]
	Db(#[from] DbError),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl ServerError {
	fn status_and_code(&self) -> (StatusCode, &'static str) {
		match self {
			ServerError::BadRequest(_) | ServerError::Db(DbError::Validation(_)) => {
				(StatusCode::BAD_REQUEST, "bad_request")
			}
			ServerError::NotFound(_) | ServerError::Db(DbError::NotFound(_)) => {
				(StatusCode::NOT_FOUND, "not_found")
			}
			ServerError::Db(DbError::Conflict(_)) => (StatusCode::CONFLICT, "conflict"),
			ServerError::Db(_) | ServerError::Internal(_) => {
				(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
			}
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, code) = self.status_and_code();
		let message = if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
			"An internal error occurred".to_string()
		} else {
			match &self {
				ServerError::BadRequest(m) | ServerError::NotFound(m) => m.clone(),
				ServerError::Db(DbError::Validation(m))
				| ServerError::Db(DbError::NotFound(m))
				| ServerError::Db(DbError::Conflict(m)) => m.clone(),
				other => other.to_string(),
			}
		};

		(
			status,
			Json(ErrorResponse {
				error: code.to_string(),
				message,
			}),
		)
			.into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_mapping() {
		let cases = [
			(ServerError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
			(ServerError::NotFound("x".into()), StatusCode::NOT_FOUND),
			(ServerError::Db(DbError::Validation("x".into())), StatusCode::BAD_REQUEST),
			(ServerError::Db(DbError::NotFound("x".into())), StatusCode::NOT_FOUND),
			(ServerError::Db(DbError::Conflict("x".into())), StatusCode::CONFLICT),
			(ServerError::Db(DbError::Internal("x".into())), StatusCode::INTERNAL_SERVER_ERROR),
			(ServerError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
		];
		for (err, expected) in cases {
			assert_eq!(err.into_response().status(), expected);
		}
	}

	#[tokio::test]
	async fn test_internal_details_not_exposed() {
		let response = ServerError::Internal("disk on fire".into()).into_response();
		let body = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
		assert_eq!(parsed.error, "internal_error");
		assert!(!parsed.message.contains("disk"));
	}
}
