// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Quill blog server library.
//!
//! Exposes the router and application state so the binary and the
//! integration tests build the same application.

pub mod api;
pub mod error;
pub mod health;
pub mod routes;
pub mod version;

pub use api::{create_app_state, create_router, ApiDoc, AppState};
pub use error::{ErrorResponse, ServerError};
pub use quill_server_config::ServerConfig;
