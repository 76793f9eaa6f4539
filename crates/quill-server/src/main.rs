// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Quill blog server binary.

use anyhow::Context;
use clap::{Parser, Subcommand};
use quill_server::{create_app_state, create_router, version};
use quill_server_db::{create_pool, run_migrations};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Quill - a personal blog server.
#[derive(Parser, Debug)]
#[command(name = "quill-server", about = "Quill blog server", version)]
struct Args {
	/// Path to a TOML config file, read instead of /etc/quill/server.toml
	#[arg(long, short, env = "QUILL_SERVER_CONFIG")]
	config: Option<std::path::PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run the HTTP server (default)
	Serve,
	/// Apply database migrations and exit
	Migrate,
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => quill_server_config::load_config_with_file(path),
		None => quill_server_config::load_config(),
	}
	.context("failed to load configuration")?;

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let pool = create_pool(&config.database.url)
		.await
		.with_context(|| format!("failed to open database {}", config.database.url))?;
	run_migrations(&pool).await.context("failed to run migrations")?;

	if let Some(Command::Migrate) = args.command {
		tracing::info!("migrations complete");
		return Ok(());
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting quill-server"
	);

	let state = create_app_state(pool.clone(), &config);
	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	let listener = tokio::net::TcpListener::bind(&addr)
		.await
		.with_context(|| format!("failed to bind {addr}"))?;
	tracing::info!("listening on {}", addr);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	pool.close().await;
	tracing::info!("Server shutdown complete");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
		return;
	}
	tracing::info!("Received shutdown signal");
}
