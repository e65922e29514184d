#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod capabilities;
mod decoder;
mod error;
mod host;

// =============================================================================
// Public API: Host + Capabilities (minimal surface)
// =============================================================================

/// The native decode host implementation.
pub use host::NativeDecodeHost;

pub use capabilities::{DEFAULT_MAX_PIXELS, DecoderCapabilities};
pub use decoder::{DecodedImage, decode};
pub use error::{DecodeResult, WebpDecodeError};

// Re-export the port from core for convenience
pub use hostkit_core::{DecodeHost, DecodeOutcome, DecodeRequest};

// Used by README doctests
#[cfg(test)]
use tokio_test as _;
