// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Full-text search for Quill.
//!
//! A raw query string is first rewritten by [`prepare`] into a match
//! expression with prefix markers. A [`Searcher`] runs that expression
//! against the post and page indexes, each through a
//! [`SearchableCollection`], and [`merge`] combines the hits into a single
//! list ordered by rank.

pub mod collection;
pub mod error;
pub mod merge;
pub mod query;
pub mod result;
pub mod searcher;

pub use collection::{PageCollection, PostCollection, SearchableCollection};
pub use error::SearchError;
pub use merge::merge;
pub use query::{prepare, PreparedQuery};
pub use result::{IndexedItem, ResultKind, SearchResult};
pub use searcher::{Searcher, DEFAULT_PER_COLLECTION_LIMIT};
