//! Tally CLI - Personal expense tracker
//!
//! Usage:
//!   tally init                                   Initialize database
//!   tally add --date 2024-03-01 -c Food -a 12.5  Record an expense
//!   tally import --file expenses.csv             Bulk import from CSV
//!   tally report --month 2024-03                 Monthly report
//!   tally serve --port 3000                      Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.store),
        Commands::Add {
            date,
            category,
            amount,
            description,
        } => {
            let ledger = commands::open_ledger(&cli.db, cli.store)?;
            commands::cmd_add(&ledger, &date, &category, amount, description.as_deref())
        }
        Commands::List { month } => {
            let ledger = commands::open_ledger(&cli.db, cli.store)?;
            commands::cmd_list(&ledger, month.as_deref())
        }
        Commands::Import { file } => {
            let ledger = commands::open_ledger(&cli.db, cli.store)?;
            commands::cmd_import(&ledger, &file)
        }
        Commands::Report { month, json } => {
            let ledger = commands::open_ledger(&cli.db, cli.store)?;
            commands::cmd_report(&ledger, month.as_deref(), json)
        }
        Commands::Insights { month, json } => {
            let ledger = commands::open_ledger(&cli.db, cli.store)?;
            commands::cmd_insights(&ledger, month.as_deref(), json)
        }
        Commands::Status => commands::cmd_status(&cli.db, cli.store),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&cli.db, cli.store, &host, port, static_dir.as_deref()).await,
    }
}
