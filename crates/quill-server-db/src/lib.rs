// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for Quill server.
//!
//! Content lives in plain SQLite tables (`posts`, `pages`, `tags`,
//! `post_tags`). Posts and pages are mirrored into FTS5 external-content
//! indexes by triggers created in the migrations, so every write that
//! commits is visible to search and every rolled-back write is not.

pub mod error;
pub mod page;
pub mod pool;
pub mod post;
pub mod search;
pub mod tag;
pub mod testing;
pub mod types;

pub use error::{DbError, Result};
pub use page::PageRepository;
pub use pool::{create_pool, run_migrations};
pub use post::PostRepository;
pub use search::{ContentIndex, IndexMatch, SearchIndexRepository, SnippetOptions};
pub use tag::{parse_tag_list, TagRepository, TagStore};
pub use types::{Page, PageInput, Post, PostInput, PostType, TagCount};
