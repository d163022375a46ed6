//! Risk Register CLI
//!
//! Command-line client for the Risk Register API.
//!
//! # Usage
//!
//! ```bash
//! riskreg assess --asset "Customer DB" --threat "SQL Injection" --likelihood 5 --impact 4
//! riskreg list --level High
//! riskreg summary --format json
//! riskreg heatmap
//! riskreg preview --likelihood 3 --impact 4
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

mod commands;
mod config;
mod output;

/// API endpoint used when neither flag, env nor config name one
const DEFAULT_API_URL: &str = "http://localhost:8000";

const LEVELS: [&str; 4] = ["Low", "Medium", "High", "Critical"];

#[derive(Parser)]
#[command(name = "riskreg")]
#[command(version)]
#[command(about = "Risk Register Command Line Interface", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "RISK_REGISTER_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess and record a new risk
    Assess {
        #[arg(long)]
        asset: String,
        #[arg(long)]
        threat: String,
        /// Probability rating (1-5)
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i64).range(1..=5))]
        likelihood: i64,
        /// Severity rating (1-5)
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i64).range(1..=5))]
        impact: i64,
    },
    /// List the risk register
    List {
        #[arg(long, value_parser = LEVELS)]
        level: Option<String>,
    },
    /// Show summary metrics
    Summary {
        #[arg(long, value_parser = LEVELS)]
        level: Option<String>,
    },
    /// Show the likelihood x impact matrix
    Heatmap,
    /// Preview score and level locally without recording
    Preview {
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        likelihood: i64,
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        impact: i64,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_default();
    let api_url = cli
        .api_url
        .or(config.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let format = cli
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|f| output::OutputFormat::from_str(f, true).ok())
        })
        .unwrap_or(output::OutputFormat::Table);

    let client = commands::ApiClient::new(&api_url);

    let result = match cli.command {
        Commands::Assess { asset, threat, likelihood, impact } => {
            commands::risks::assess(&client, &asset, &threat, likelihood, impact, format).await
        }
        Commands::List { level } => commands::risks::list(&client, level.as_deref(), format).await,
        Commands::Summary { level } => {
            commands::analytics::summary(&client, level.as_deref(), format).await
        }
        Commands::Heatmap => commands::analytics::heatmap(&client, format).await,
        Commands::Preview { likelihood, impact } => commands::preview::handle(likelihood, impact, format),
        Commands::Config { action } => commands::config::handle(action, cli.profile.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
