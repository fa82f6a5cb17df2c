//! echo-music CLI - exercise Echo music control through the local proxy.
//!
//! Sends playback, search and text commands to the proxy and reports what it
//! answered, for checking the integration from a terminal or a script.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use echo_music_core::{CommandId, DispatchClient, HarnessConfig};

use cli::{Cli, Commands};
use error::{exit_codes, Result};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                exit_codes::INVALID_ARGS
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logging::init(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn load_config(cli: &Cli) -> Result<HarnessConfig> {
    let config = HarnessConfig::load(cli.config.as_deref())?.with_overrides(cli.overrides());
    config.validate()?;
    tracing::debug!(proxy = %config.proxy_url, provider = %config.default_provider, "configuration loaded");
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let client = DispatchClient::new(&config)?;
    let json = cli.json;

    match cli.command {
        Commands::Status => commands::run_status(&client, json).await,
        Commands::Play => commands::run_control(&client, CommandId::Play, json).await,
        Commands::Pause => commands::run_control(&client, CommandId::Pause, json).await,
        Commands::Next => commands::run_control(&client, CommandId::Next, json).await,
        Commands::Prev => commands::run_control(&client, CommandId::Previous, json).await,
        Commands::Forward => commands::run_control(&client, CommandId::Forward, json).await,
        Commands::Rewind => commands::run_control(&client, CommandId::Rewind, json).await,
        Commands::Search(args) => commands::run_search(&client, args, json).await,
        Commands::Text(args) => commands::run_text(&client, args, json).await,
        Commands::Devices => commands::run_devices(&client, &config, json).await,
        Commands::Preview(args) => commands::run_preview(&client, args, json).await,
    }
}
