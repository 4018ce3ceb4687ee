pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "rentals-api")]
#[command(about = "Property rental listings API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create the properties schema in the configured database")]
    Migrate,

    #[command(about = "Mint a session token for a user id")]
    Token(commands::token::TokenArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::Migrate) => commands::migrate::handle(config, output_format).await,
        Some(Commands::Token(args)) => commands::token::handle(args, config, output_format),
    }
}
