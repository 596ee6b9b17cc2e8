//! feedback-ui - Course feedback web service
//!
//! Collects course ratings through a web form and shows per-course summaries.
//! Startup resolves the root folder, initializes the database (fatal on
//! failure), then serves HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use feedback_common::config::{
    RootFolderInitializer, RootFolderResolver, TomlConfig, ROOT_FOLDER_ENV_VAR,
};
use feedback_ui::{build_router, AppState};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Course feedback web service
#[derive(Debug, Parser)]
#[command(name = "feedback-ui", version, about)]
struct Args {
    /// Folder holding feedback.db (overrides FEEDBACK_ROOT_FOLDER and config.toml)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Address to listen on (overrides config.toml)
    #[arg(long, env = "FEEDBACK_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // Read silently: nothing can be logged until the subscriber exists
    let loaded = TomlConfig::load();

    // RUST_LOG wins over the config file's log level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&loaded.config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting course feedback service (feedback-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );
    loaded.log_outcome();
    let config = loaded.config;

    let root_folder = RootFolderResolver::new(ROOT_FOLDER_ENV_VAR)
        .with_cli_arg(args.root_folder)
        .with_toml_config(config.clone())
        .resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match feedback_common::db::init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let bind = args.bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("feedback-ui listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
