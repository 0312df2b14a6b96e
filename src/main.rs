//! plebsfin main entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use plebsfin_api::start_server;
use plebsfin_config::Config;
use plebsfin_core::open_store;
use plebsfin_parser::{DefaultStatementParser, StatementParserTrait};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

const DEFAULT_CONFIG: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "plebsfin")]
#[command(author = "plebsfin Contributors")]
#[command(version = "0.1.0")]
#[command(about = "PIN-gated personal finance tracker backend", long_about = None)]
struct Args {
    /// Configuration file path [default: config.yaml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Parse a bank statement file and print the candidates as JSON
    Parse {
        /// Statement file
        file: PathBuf,
    },
    /// Print the default configuration file
    InitConfig,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(DEFAULT_CONFIG),
    };
    config.map_err(|e| anyhow::anyhow!("{}", e.to_details()))
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command.unwrap_or(Command::Serve) {
        Command::InitConfig => {
            print!("{}", Config::generate_default());
            Ok(())
        }
        Command::Parse { file } => {
            let config = load_config(args.config.as_deref())?;
            init_logging(&config.logging.level);

            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let transactions = DefaultStatementParser.parse_bytes(&bytes);
            log::info!("Parsed {} transactions from {}", transactions.len(), file.display());

            let output = serde_json::json!({ "transactions": transactions });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Command::Serve => {
            let config = load_config(args.config.as_deref())?;
            init_logging(&config.logging.level);
            if args.config.is_none() && !Path::new(DEFAULT_CONFIG).exists() {
                log::warn!("No {} found, running with default configuration", DEFAULT_CONFIG);
            }

            let rt = Runtime::new()?;
            rt.block_on(async {
                let store = open_store(&config.storage)
                    .await
                    .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;
                start_server(config, store).await
            })
        }
    }
}
