// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kl - Kite daemon lifecycle CLI

mod color;
mod commands;
mod env;
mod exit_error;
mod output;
mod settings;

use output::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, install, launch, status, wait, whitelisted};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "kl",
    version,
    about = "Install, launch and check the Kite background daemon"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// Configuration file (default: KL_CONFIG, then <config dir>/kl/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show where the daemon stands: installed, running, reachable, authenticated
    Status(status::StatusArgs),
    /// Install the daemon unless already installed
    Install(install::InstallArgs),
    /// Launch the daemon unless already running
    Launch(launch::LaunchArgs),
    /// Wait until the daemon reaches a stage
    Wait(wait::WaitArgs),
    /// Check whether a project path is whitelisted
    Whitelisted(whitelisted::WhitelistedArgs),
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain. Otherwise we render the full chain so context
/// isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

/// Logs go to stderr so stdout stays machine-readable.
fn setup_logging() {
    let filter = env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // No subcommand: print help and exit 0
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    setup_logging();
    let settings = Settings::load(cli.config.as_deref())?;

    let poll = settings.config.poll;
    let lifecycle = || commands::system_lifecycle(&settings.config);
    match command {
        Commands::Config => config::handle(&settings, format)?,
        Commands::Status(args) => status::handle(args, &lifecycle()?, format).await?,
        Commands::Install(args) => install::handle(args, &lifecycle()?, format).await?,
        Commands::Launch(args) => launch::handle(args, &lifecycle()?, poll, format).await?,
        Commands::Wait(args) => wait::handle(args, &lifecycle()?, poll, format).await?,
        Commands::Whitelisted(args) => {
            whitelisted::handle(args, &lifecycle()?, format).await?
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
