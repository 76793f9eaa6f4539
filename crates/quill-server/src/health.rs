// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health check types and component probes.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use tokio::time::Instant;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealth {
	pub status: HealthStatus,
	pub latency_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub timestamp: String,
	pub version: String,
	pub database: DatabaseHealth,
}

/// Probe the database with a trivial query.
pub async fn check_database(pool: &SqlitePool) -> DatabaseHealth {
	let start = Instant::now();
	let result = sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await;
	let latency_ms = start.elapsed().as_millis() as u64;

	match result {
		Ok(_) => DatabaseHealth {
			status: HealthStatus::Healthy,
			latency_ms,
			error: None,
		},
		Err(e) => {
			tracing::warn!(error = %e, "database health check failed");
			DatabaseHealth {
				status: HealthStatus::Unhealthy,
				latency_ms,
				error: Some(e.to_string()),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use quill_server_db::testing::create_test_pool;

	#[tokio::test]
	async fn test_live_pool_is_healthy() {
		let pool = create_test_pool().await;
		let health = check_database(&pool).await;
		assert_eq!(health.status, HealthStatus::Healthy);
		assert!(health.error.is_none());
	}

	#[tokio::test]
	async fn test_closed_pool_is_unhealthy() {
		let pool = create_test_pool().await;
		pool.close().await;
		let health = check_database(&pool).await;
		assert_eq!(health.status, HealthStatus::Unhealthy);
		assert!(health.error.is_some());
	}
}
