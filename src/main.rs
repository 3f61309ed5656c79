mod analysis;
mod auth;
mod domain;
mod error;
mod export;
mod formulas;
mod interpret;
mod server;
mod storage;
mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::server::AppState;

/// Body-composition analysis service with per-person history.
#[derive(Parser, Debug)]
#[command(name = "bodymodel")]
#[command(about = "Body-composition metrics from anthropometric measurements")]
#[command(version)]
struct Args {
    /// Path to the SQLite database holding history and accounts.
    /// Can also be set via BODYMODEL_DB environment variable.
    #[arg(value_name = "DB", env = "BODYMODEL_DB", default_value = "bodymodel.db")]
    db: PathBuf,

    /// Port number for the web server.
    /// Can also be set via BODYMODEL_PORT environment variable.
    #[arg(value_name = "PORT", env = "BODYMODEL_PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    // Open the database and make sure the schema exists
    println!("History database: {}", args.db.display());
    let pool = storage::connect(&args.db)
        .await
        .with_context(|| format!("Failed to open database: {}", args.db.display()))?;
    storage::init_schema(&pool)
        .await
        .context("Failed to initialize history schema")?;
    auth::init_schema(&pool)
        .await
        .context("Failed to initialize users schema")?;

    // Determine static directory (relative to executable or cwd)
    let static_dir = find_static_dir()?;
    println!("Static files: {}", static_dir.display());

    // Build application state and start the server
    let state = Arc::new(AppState { pool });
    server::run_server(state, args.port, static_dir).await?;

    Ok(())
}

/// Finds the static directory for serving frontend files.
fn find_static_dir() -> Result<PathBuf> {
    // Try relative to current working directory
    let cwd_static = PathBuf::from("static");
    if cwd_static.is_dir() {
        return Ok(cwd_static);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let exe_static = exe_dir.join("static");
        if exe_static.is_dir() {
            return Ok(exe_static);
        }
    }

    // Default to cwd/static (will be created)
    Ok(cwd_static)
}
