//! riskguide CLI entry point.
//!
//! Binary name: `riskguide`
//!
//! Parses CLI arguments, loads config, initializes tracing and the session
//! store, then dispatches to the command handler.

mod cli;
mod render;
mod state;

use anyhow::anyhow;
use clap::Parser;
use clap_complete::generate;

use riskguide_infra::config::{load_global_config, resolve_data_dir};
use riskguide_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, OutputMode, StoreCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "riskguide", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = load_global_config(&data_dir).await;

    init_tracing(
        filter_for_verbosity(cli.verbose, cli.quiet),
        cli.otel || config.enable_otel,
    )
    .map_err(|e| anyhow!("failed to initialize tracing: {e}"))?;

    let mut state = AppState::init(data_dir, config, cli.ephemeral).await?;
    let mode = OutputMode::from_flags(cli.json, cli.quiet);

    let result = match cli.command {
        Commands::Interview { fresh } => cli::interview::run_interview(&state, fresh, mode).await,
        Commands::Guidance { html } => cli::guidance::show_guidance(&state, html, mode).await,
        Commands::Profile { html } => cli::profile::show_profile(&state, html, mode).await,
        Commands::Status => cli::status::status(&state, mode).await,
        Commands::Store { command } => match command {
            StoreCommand::List => cli::store::list_entries(&state, mode).await,
            StoreCommand::Get { key } => cli::store::get_entry(&state, &key, mode).await,
        },
        Commands::Language {
            locale,
            clear_artifacts,
        } => cli::language::language(&mut state, locale, clear_artifacts, mode).await,
        Commands::Logout { force } => cli::logout::logout(&state, force, mode).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    state.close().await;
    shutdown_tracing();
    result
}
