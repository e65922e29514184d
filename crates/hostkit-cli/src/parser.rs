//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for probing WebP decode support.
#[derive(Parser)]
#[command(name = "hostkit")]
#[command(about = "Detect which WebP features a decode host supports")]
#[command(version)]
pub struct Cli {
    /// Reject images with more pixels than this
    #[arg(long = "max-pixels", env = "HOSTKIT_MAX_PIXELS", global = true)]
    pub max_pixels: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
