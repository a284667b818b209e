//! Command-line interface.

mod reviewers;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions};

/// Output format for reviewer listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Numbered list
    #[default]
    Table,
    /// Same body as the /reviews endpoint
    Json,
}

#[derive(Parser)]
#[command(name = "playreviews")]
#[command(about = "List the distinct Play Store reviewers of an app on a given day")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: HOST/PORT settings, 0.0.0.0:5000)
        bind: Option<String>,
    },

    /// Look up reviewers from the terminal
    Reviewers {
        /// App id or Play Store link
        link: String,
        /// Day to list, YYYY-MM-DD
        date: String,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Also write the PDF report to this path
        #[arg(long)]
        pdf: Option<PathBuf>,
        /// Maximum number of reviews to fetch
        #[arg(long, env = "PLAYREVIEWS_MAX_COUNT")]
        max_count: Option<usize>,
        /// Review country code
        #[arg(long)]
        country: Option<String>,
    },
}

/// Parse arguments, load settings, and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let mut settings = load_settings(&options).await?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Reviewers {
            link,
            date,
            format,
            pdf,
            max_count,
            country,
        } => {
            if let Some(max_count) = max_count {
                settings.max_count = max_count;
            }
            if let Some(country) = country {
                settings.country = country;
            }
            reviewers::cmd_reviewers(&settings, &link, &date, format, pdf.as_deref()).await
        }
    }
}
