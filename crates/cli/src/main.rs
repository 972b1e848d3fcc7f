//! Cloud Cost Waste Analyzer CLI
//!
//! A command-line tool for uploading utilization datasets, running waste
//! analyses, and fetching narrative savings reports.

mod client;
mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Cloud Cost Waste Analyzer CLI
#[derive(Parser)]
#[command(name = "costctl")]
#[command(author, version, about = "CLI for the Cloud Cost Waste Analyzer", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via COSTCTL_API_URL env var)
    #[arg(long, env = "COSTCTL_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a CSV dataset and show its analysis
    Upload {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Analyze the uploaded dataset
    Analyze,

    /// List classified records, or show one by id
    Records {
        /// Resource id to look up
        id: Option<String>,
    },

    /// Fetch a narrative savings report
    Report {
        /// Use the deterministic template instead of the remote generator
        #[arg(long)]
        mock: bool,
    },

    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = client::ApiClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Upload { file } => commands::upload::run(&client, &file, cli.format).await,
        Commands::Analyze => commands::analyze::run(&client, cli.format).await,
        Commands::Records { id } => commands::records::run(&client, id, cli.format).await,
        Commands::Report { mock } => commands::report::run(&client, mock, cli.format).await,
        Commands::Health => commands::health::run(&client, cli.format).await,
    }
}
