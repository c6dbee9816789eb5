//! `mdip` -- command-line front end for the intelligence platform.
//!
//! Opens the configured SQLite store, makes sure the schema exists, then
//! runs one subcommand against it.
//!
//! # Environment variables
//!
//! | Variable                     | Default                             | Description                 |
//! |------------------------------|-------------------------------------|-----------------------------|
//! | `DATABASE_URL`               | `sqlite://intelligence_platform.db` | SQLite connection URL       |
//! | `DATABASE_CREATE_IF_MISSING` | `true`                              | Create the file on first use |
//! | `ARGON2_MEMORY_KIB`          | `19456`                             | Argon2id memory cost        |
//! | `ARGON2_ITERATIONS`          | `2`                                 | Argon2id passes             |
//! | `ARGON2_PARALLELISM`         | `1`                                 | Argon2id lanes              |
//! | `LOG_FORMAT`                 | `text`                              | `text` or `json`            |
//! | `RUST_LOG`                   | `mdip=info,...`                     | `tracing` filter            |

mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::Cli;
use config::{AppConfig, DEFAULT_LOG_FILTER};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // --- Database ---
    let db = mdip_db::open(&config.database)
        .with_context(|| format!("Failed to open database at {}", config.database.url))?;

    mdip_db::health_check(&db).context("Database health check failed")?;
    tracing::info!(url = %db.url(), "Database health check passed");

    mdip_db::schema::ensure_schema(&db).context("Failed to create schema")?;

    let result = commands::run(&cli, &db, &config);

    db.close().context("Failed to close database")?;
    result
}
