//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tally_core::StoreBackend;

/// Tally - Track expenses and see where the money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal expense tracker with monthly reports and insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (sqlite store)
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Store backend: sqlite or memory
    ///
    /// The memory store lives only as long as the process, so it is mostly
    /// useful with `serve`.
    #[arg(long, default_value = "sqlite", global = true)]
    pub store: StoreBackend,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// Expense date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Category label (e.g. Food, Rent)
        #[arg(short, long)]
        category: String,

        /// Amount spent (positive)
        #[arg(short, long)]
        amount: f64,

        /// Optional free-text description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List expenses for a month
    List {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Import expenses from CSV (header: date,category,amount[,description])
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the monthly report
    Report {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show forecast, recommendations and anomalies
    Insights {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Print the insights as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show store status
    Status,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory of static files to serve (browser UI)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
