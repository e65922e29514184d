//! Internal error types for native decoding.
//!
//! These never reach probe callers: the host logs them and reports
//! `DecodeOutcome::Failed`.

use hostkit_core::WebPFeature;
use thiserror::Error;

/// Why the native host rejected a payload.
#[derive(Debug, Error)]
pub enum WebpDecodeError {
    /// The bitstream is malformed or truncated.
    #[error("Malformed WebP data: {0}")]
    Malformed(#[from] image_webp::DecodingError),

    /// The bitstream uses a capability the host is configured without.
    #[error("Decoder capability disabled: {0}")]
    Unsupported(WebPFeature),

    /// The image is larger than the configured pixel limit.
    #[error("Image of {width}x{height} exceeds the limit of {limit} pixels")]
    TooLarge { width: u32, height: u32, limit: u64 },

    /// The decoder could not size an output buffer for the image.
    #[error("Output buffer size overflows")]
    BufferOverflow,
}

/// Result type for native decoding.
pub type DecodeResult<T> = Result<T, WebpDecodeError>;
