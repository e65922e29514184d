//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging, bootstraps the native decode host
//! and dispatches to handlers. Handler errors map to sysexits-style codes.

use std::io::{self, Write};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use hostkit_cli::handlers::{self, detect::DetectOptions};
use hostkit_cli::{Cli, CliConfig, CliError, Commands, bootstrap};

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("{err}"))
        .context("failed to initialize logging")
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Detect {
            feature,
            disable,
            json,
            timeout_ms,
        } => {
            let config = CliConfig::from_args(cli.max_pixels, &disable)
                .map_err(|err| CliError::Config(format!("{err:#}")))?;
            let ctx = bootstrap(&config);
            let options = DetectOptions {
                feature,
                json,
                timeout_ms,
            };
            handlers::detect::execute(&ctx, &options, &mut out).await?;
        }
        Commands::Payloads { feature, format } => {
            handlers::payloads::execute(feature, format, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads HOSTKIT_* defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
