use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use upwatch_service::validation::validate_history_limit;
use upwatch_service::{CheckReportView, Config, build_service};

/// Probe a URL once and keep a durable history of response times
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file, defaults to $UPWATCH_CONFIG or ~/.config/upwatch/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the database file from the config
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Probe a URL and record the sample if the server answered
    Probe {
        url: String,
        /// Print the sample without writing it to history
        #[arg(long)]
        no_record: bool,
    },
    /// Show the most recent samples, newest first
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Create the database schema if it does not exist
    Init,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_config(cli.config.as_ref()).context("loading configuration")?;
    if let Some(database) = cli.database {
        config.database.path = database;
    }

    match cli.command {
        Command::Config => print!("{config}"),
        Command::Init => {
            // Opening the store runs the migrations
            build_service(&config).await?;
            tracing::info!("Database ready at {}", config.database.path.display());
        }
        Command::Probe { url, no_record } => {
            if url.trim().is_empty() {
                bail!("URL must not be empty");
            }
            let service = build_service(&config).await?;
            if no_record {
                let sample = service.probe(&url).await;
                println!("{}", serde_json::to_string_pretty(&sample)?);
            } else {
                let report = service.check(&url).await;
                println!("{}", serde_json::to_string_pretty(&CheckReportView::from(&report))?);
                if let Some(e) = report.store_error() {
                    bail!("sample was not recorded: {e}");
                }
            }
        }
        Command::History { limit } => {
            let limit = limit.unwrap_or(config.history.limit);
            validate_history_limit(limit).to_result()?;
            let service = build_service(&config).await?;
            let records = service.recent_history(limit).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
