//! Status command implementation

use std::fs;
use std::path::Path;

use anyhow::Result;
use tally_core::config::{BUDGET_LIMIT_ENV, SYNC_URL_ENV};
use tally_core::{budget_limit_from_env, StoreBackend, SyncConfig};

use super::{format_money, open_store};

pub fn cmd_status(db_path: &Path, backend: StoreBackend) -> Result<()> {
    println!();
    println!("📊 Tally Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Store: {}", backend);

    if backend == StoreBackend::Sqlite {
        println!("   Database: {}", db_path.display());

        // Check if database file exists and get size
        if db_path.exists() {
            if let Ok(metadata) = fs::metadata(db_path) {
                let size_kb = metadata.len() as f64 / 1024.0;
                if size_kb < 1024.0 {
                    println!("   Size: {:.1} KB", size_kb);
                } else {
                    println!("   Size: {:.1} MB", size_kb / 1024.0);
                }
            }
        } else {
            println!("   Size: (database not initialized)");
        }
    }

    println!(
        "   Budget limit: {} ({})",
        format_money(budget_limit_from_env()),
        BUDGET_LIMIT_ENV
    );
    match SyncConfig::from_env() {
        Some(config) => println!("   🔄 Sync: {} (serve only)", config.url),
        None => println!("   Sync: disabled (set {} to enable)", SYNC_URL_ENV),
    }

    if backend == StoreBackend::Sqlite && !db_path.exists() {
        println!();
        return Ok(());
    }

    match open_store(db_path, backend).and_then(|store| Ok(store.count()?)) {
        Ok(count) => {
            println!();
            println!("   Expenses: {}", count);
        }
        Err(e) => {
            println!();
            println!("   ❌ Error opening store: {:#}", e);
        }
    }

    println!();
    Ok(())
}
