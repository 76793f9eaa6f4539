// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content records stored by the blog.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::DbError;

/// Kind of a post. Each kind is listed under its own section of the site.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostType {
	Article,
	Note,
	Link,
	Photo,
}

impl PostType {
	pub const ALL: [PostType; 4] = [
		PostType::Article,
		PostType::Note,
		PostType::Link,
		PostType::Photo,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			PostType::Article => "article",
			PostType::Note => "note",
			PostType::Link => "link",
			PostType::Photo => "photo",
		}
	}
}

impl fmt::Display for PostType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PostType {
	type Err = DbError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		PostType::ALL
			.into_iter()
			.find(|t| t.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| DbError::Validation(format!("unknown post type '{s}'")))
	}
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Post {
	pub id: i64,
	pub title: String,
	pub slug: String,
	pub content: String,
	pub post_type: PostType,
	pub published: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Page {
	pub id: i64,
	pub title: String,
	pub slug: String,
	pub content: String,
	pub published: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Fields written when a post is created or edited.
#[derive(Debug, Clone)]
pub struct PostInput {
	pub title: String,
	pub slug: String,
	pub content: String,
	pub post_type: PostType,
	pub published: bool,
	/// Replaces the post's full tag set.
	pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PageInput {
	pub title: String,
	pub slug: String,
	pub content: String,
	pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct TagCount {
	pub name: String,
	pub count: i64,
}

pub(crate) fn validate_slug(slug: &str) -> Result<(), DbError> {
	if slug.trim().is_empty() {
		return Err(DbError::Validation("slug must not be empty".to_string()));
	}
	if slug.contains('/') || slug.chars().any(char::is_whitespace) {
		return Err(DbError::Validation(format!(
			"slug '{slug}' must not contain '/' or whitespace"
		)));
	}
	Ok(())
}
