//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tally_core::config::SYNC_URL_ENV;
use tally_core::{budget_limit_from_env, Ledger, StoreBackend, SyncConfig, SyncSink};
use tally_server::WebhookSink;

use super::{format_money, open_store};

/// Comma-separated CORS origins
const ALLOWED_ORIGINS_ENV: &str = "TALLY_ALLOWED_ORIGINS";

pub async fn cmd_serve(
    db_path: &Path,
    backend: StoreBackend,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Store: {}", backend);
    if backend == StoreBackend::Sqlite {
        println!("   Database: {}", db_path.display());
    } else {
        println!("   ⚠️  Memory store: expenses are lost when the server stops");
    }
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let allowed_origins: Vec<String> = std::env::var(ALLOWED_ORIGINS_ENV)
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} ({})",
            allowed_origins.join(", "),
            ALLOWED_ORIGINS_ENV
        );
    }

    let budget_limit = budget_limit_from_env();
    println!("   Budget limit: {}", format_money(budget_limit));

    let store = open_store(db_path, backend)?;
    let sink: Arc<dyn SyncSink> = match SyncConfig::from_env() {
        Some(config) => {
            println!("   🔄 Sync: {}", config.url);
            Arc::new(WebhookSink::spawn(config).context("Failed to start webhook sync")?)
        }
        None => {
            println!("   Sync: disabled (set {} to enable)", SYNC_URL_ENV);
            Arc::new(tally_core::NoopSink)
        }
    };
    println!();
    println!("   Press Ctrl+C to stop");

    let ledger = Ledger::new(store, sink).with_budget_limit(budget_limit);
    let config = tally_server::ServerConfig { allowed_origins };

    let static_dir = static_dir
        .map(|dir| dir.to_str().context("Static directory path is not valid UTF-8"))
        .transpose()?;

    tally_server::serve_with_config(ledger, host, port, static_dir, config).await
}
