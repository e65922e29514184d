//! Available subcommands.

use clap::Subcommand;
use hostkit_core::WebPFeature;

use crate::handlers::payloads::PayloadFormat;

/// Available commands for the hostkit tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Probe the native decoder for WebP feature support
    Detect {
        /// Probe a single feature (lossy, lossless, alpha, animation)
        #[arg(short, long)]
        feature: Option<WebPFeature>,

        /// Emulate a decoder without this feature (repeatable)
        #[arg(long = "disable", value_name = "FEATURE")]
        disable: Vec<WebPFeature>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Give up if detection takes longer than this
        #[arg(long = "timeout-ms", env = "HOSTKIT_TIMEOUT_MS")]
        timeout_ms: Option<u64>,
    },

    /// Print the test images used for detection
    Payloads {
        /// Print only this feature's payload
        #[arg(short, long)]
        feature: Option<WebPFeature>,

        /// Output encoding
        #[arg(long, value_enum, default_value_t = PayloadFormat::DataUri)]
        format: PayloadFormat,
    },
}
