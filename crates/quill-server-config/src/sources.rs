// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{DatabaseConfigLayer, HttpConfigLayer, LoggingConfigLayer, SearchConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/quill/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: QUILL_SERVER_<SECTION>_<FIELD>. The bare `PORT` variable is
/// honoured as a fallback for platforms that inject it.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_layer(&|name: &str| std::env::var(name).ok())
	}
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn load_layer(lookup: Lookup<'_>) -> Result<ServerConfigLayer, ConfigError> {
	Ok(ServerConfigLayer {
		http: Some(load_http(lookup)?),
		database: Some(load_database(lookup)),
		search: Some(load_search(lookup)?),
		logging: Some(load_logging(lookup)),
	})
}

fn env_var(lookup: Lookup<'_>, name: &str) -> Option<String> {
	lookup(name).filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(
	lookup: Lookup<'_>,
	name: &str,
	kind: &str,
) -> Result<Option<T>, ConfigError> {
	match env_var(lookup, name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid {kind} value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_http(lookup: Lookup<'_>) -> Result<HttpConfigLayer, ConfigError> {
	let port = match env_parse::<u16>(lookup, "QUILL_SERVER_PORT", "u16")? {
		Some(port) => Some(port),
		None => env_parse::<u16>(lookup, "PORT", "u16")?,
	};

	Ok(HttpConfigLayer {
		host: env_var(lookup, "QUILL_SERVER_HOST"),
		port,
		base_url: env_var(lookup, "QUILL_SERVER_BASE_URL"),
	})
}

fn load_database(lookup: Lookup<'_>) -> DatabaseConfigLayer {
	DatabaseConfigLayer {
		url: env_var(lookup, "QUILL_SERVER_DATABASE_URL"),
	}
}

fn load_search(lookup: Lookup<'_>) -> Result<SearchConfigLayer, ConfigError> {
	Ok(SearchConfigLayer {
		per_collection_limit: env_parse(lookup, "QUILL_SERVER_SEARCH_PER_COLLECTION_LIMIT", "u32")?,
		snippet_tokens: env_parse(lookup, "QUILL_SERVER_SEARCH_SNIPPET_TOKENS", "u32")?,
		highlight_start: env_var(lookup, "QUILL_SERVER_SEARCH_HIGHLIGHT_START"),
		highlight_end: env_var(lookup, "QUILL_SERVER_SEARCH_HIGHLIGHT_END"),
		ellipsis: env_var(lookup, "QUILL_SERVER_SEARCH_ELLIPSIS"),
	})
}

fn load_logging(lookup: Lookup<'_>) -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var(lookup, "QUILL_SERVER_LOG_LEVEL"),
	}
}
