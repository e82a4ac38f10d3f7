//! sidenote CLI - drive the notes sidebar sync footer from the terminal
//!
//! Replays host messages and user input against the footer core and prints
//! what the sidebar would render.

mod bridge;
mod cli;
mod commands;
mod config;
mod error;
mod script;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::export::run_export;
use crate::commands::replay::{run_replay, ReplayOptions};
use crate::commands::states::run_states;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sidenote=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_footer_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay {
            script,
            json,
            storage,
            download_dir,
            extension_version,
            browser_version,
            locale,
        } => {
            let options = ReplayOptions {
                json,
                storage,
                download_dir,
                extension_version,
                browser_version,
                locale,
            };
            run_replay(&script, config, options).await?;
        }
        Commands::States { json } => run_states(json)?,
        Commands::Export { content, output } => {
            run_export(&content, output.as_deref(), &config)?;
        }
    }

    Ok(())
}
