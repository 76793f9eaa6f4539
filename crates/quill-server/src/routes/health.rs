// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
	api::AppState,
	health::{self, HealthResponse, HealthStatus},
};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "System is unhealthy", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Database-backed health check.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let database = health::check_database(&state.pool).await;
	let status = database.status;

	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		version: env!("CARGO_PKG_VERSION").to_string(),
		database,
	};

	let http_status = match status {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
