// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod database;
mod http;
mod logging;
mod search;

pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use search::{SearchConfig, SearchConfigLayer, MAX_PER_COLLECTION_LIMIT, MAX_SNIPPET_TOKENS};
