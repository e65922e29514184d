//! CLI bootstrap - the composition root.
//!
//! The native decode host is instantiated here and handed to the core
//! `FeatureProbe`. Command handlers only ever see the composed `CliContext`.

use std::sync::Arc;

use anyhow::{Result, ensure};
use hostkit_core::{DecodeHost, FeatureProbe, WebPFeature};
use hostkit_webp::{DEFAULT_MAX_PIXELS, DecoderCapabilities, NativeDecodeHost};
use tracing::debug;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Largest image the native host will decode.
    pub max_pixels: u64,
    /// Features the native host should treat as unsupported.
    pub disabled: Vec<WebPFeature>,
}

impl CliConfig {
    /// Config with every feature enabled and the default pixel limit.
    pub const fn with_defaults() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            disabled: Vec::new(),
        }
    }

    /// Config from command-line and environment overrides.
    pub fn from_args(max_pixels: Option<u64>, disabled: &[WebPFeature]) -> Result<Self> {
        let max_pixels = max_pixels.unwrap_or(DEFAULT_MAX_PIXELS);
        ensure!(max_pixels > 0, "max pixels must be greater than zero");

        Ok(Self {
            max_pixels,
            disabled: disabled.to_vec(),
        })
    }

    /// Decoder capabilities described by this config.
    pub fn capabilities(&self) -> DecoderCapabilities {
        self.disabled.iter().fold(
            DecoderCapabilities::all().with_max_pixels(self.max_pixels),
            |caps, feature| caps.without(*feature),
        )
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Fully composed context for CLI commands.
#[derive(Debug, Clone)]
pub struct CliContext {
    probe: FeatureProbe,
}

impl CliContext {
    pub const fn probe(&self) -> &FeatureProbe {
        &self.probe
    }
}

/// Compose the CLI context around the native decode host.
pub fn bootstrap(config: &CliConfig) -> CliContext {
    let capabilities = config.capabilities();
    debug!(?capabilities, "Bootstrapping native decode host");
    bootstrap_with(Arc::new(NativeDecodeHost::with_capabilities(capabilities)))
}

/// Compose the CLI context around an arbitrary decode host.
pub fn bootstrap_with(host: Arc<dyn DecodeHost>) -> CliContext {
    CliContext {
        probe: FeatureProbe::new(host),
    }
}
