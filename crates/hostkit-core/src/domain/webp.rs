//! WebP feature domain types.
//!
//! A [`WebPFeature`] names one capability of the WebP format family. Each
//! feature owns a minimal 1x1 test image that only decodes when the host
//! decoder implements that capability. Results of probing all features are
//! collected in a [`DetectionResult`].

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME type used when handing test payloads to a decode host.
pub const WEBP_MIME_TYPE: &str = "image/webp";

/// Lossy (VP8) 1x1 image.
const LOSSY_PAYLOAD: &[u8] = &[
    0x52, 0x49, 0x46, 0x46, 0x22, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50, //
    0x56, 0x50, 0x38, 0x20, 0x16, 0x00, 0x00, 0x00, 0x30, 0x01, 0x00, 0x9d, //
    0x01, 0x2a, 0x01, 0x00, 0x01, 0x00, 0x0e, 0xc0, 0xfe, 0x25, 0xa4, 0x00, //
    0x03, 0x70, 0x00, 0x00, 0x00, 0x00,
];

/// Lossless (VP8L) 1x1 image.
const LOSSLESS_PAYLOAD: &[u8] = &[
    0x52, 0x49, 0x46, 0x46, 0x1a, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50, //
    0x56, 0x50, 0x38, 0x4c, 0x0d, 0x00, 0x00, 0x00, 0x2f, 0x00, 0x00, 0x00, //
    0x10, 0x07, 0x10, 0x11, 0x11, 0x88, 0x88, 0xfe, 0x07, 0x00,
];

/// Extended (VP8X) 1x1 image with an ALPH chunk over lossy data.
const ALPHA_PAYLOAD: &[u8] = &[
    0x52, 0x49, 0x46, 0x46, 0x4a, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50, //
    0x56, 0x50, 0x38, 0x58, 0x0a, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x41, 0x4c, 0x50, 0x48, 0x0c, 0x00, //
    0x00, 0x00, 0x11, 0x07, 0x10, 0x11, 0xfd, 0x0f, 0x44, 0x44, 0xff, 0x03, //
    0x00, 0x00, 0x56, 0x50, 0x38, 0x20, 0x18, 0x00, 0x00, 0x00, 0x14, 0x01, //
    0x00, 0x9d, 0x01, 0x2a, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0xfe, 0x00, //
    0x00, 0x0d, 0xc0, 0x00, 0xfe, 0xe6, 0xb5, 0x00, 0x00, 0x00,
];

/// Extended (VP8X) 1x1 animation with a single lossless ANMF frame.
const ANIMATION_PAYLOAD: &[u8] = &[
    0x52, 0x49, 0x46, 0x46, 0x52, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50, //
    0x56, 0x50, 0x38, 0x58, 0x0a, 0x00, 0x00, 0x00, 0x12, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x41, 0x4e, 0x49, 0x4d, 0x06, 0x00, //
    0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x41, 0x4e, 0x4d, 0x46, //
    0x26, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0x00, 0x56, 0x50, 0x38, 0x4c, //
    0x0d, 0x00, 0x00, 0x00, 0x2f, 0x00, 0x00, 0x00, 0x10, 0x07, 0x10, 0x11, //
    0x11, 0x88, 0x88, 0xfe, 0x07, 0x00,
];

/// A probed WebP capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebPFeature {
    /// Lossy compression using VP8 key-frame predictive coding.
    ///
    /// The oldest WebP capability, used as the baseline answer to
    /// "is WebP supported at all".
    Lossy,
    /// Lossless compression (VP8L) reconstructing pixels exactly from
    /// previously seen fragments or a local palette.
    Lossless,
    /// 8-bit alpha channel alongside lossy RGB data.
    Alpha,
    /// Animated WebP, the equivalent of animated GIFs.
    Animation,
}

impl WebPFeature {
    /// All features in canonical order.
    pub const ALL: [Self; 4] = [Self::Lossy, Self::Lossless, Self::Alpha, Self::Animation];

    /// Lowercase name of the feature.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lossy => "lossy",
            Self::Lossless => "lossless",
            Self::Alpha => "alpha",
            Self::Animation => "animation",
        }
    }

    /// The encoded test image exercising this feature.
    ///
    /// The payload decodes only if the decoder implements this feature.
    #[must_use]
    pub const fn test_payload(self) -> &'static [u8] {
        match self {
            Self::Lossy => LOSSY_PAYLOAD,
            Self::Lossless => LOSSLESS_PAYLOAD,
            Self::Alpha => ALPHA_PAYLOAD,
            Self::Animation => ANIMATION_PAYLOAD,
        }
    }

    /// Base64 encoding of [`test_payload`](Self::test_payload).
    #[must_use]
    pub fn test_payload_base64(self) -> String {
        STANDARD.encode(self.test_payload())
    }

    /// `data:` URI carrying the test payload, as image elements expect it.
    #[must_use]
    pub fn test_payload_data_uri(self) -> String {
        format!("data:{WEBP_MIME_TYPE};base64,{}", self.test_payload_base64())
    }
}

impl fmt::Display for WebPFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown feature name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown WebP feature '{0}' (expected one of: lossy, lossless, alpha, animation)")]
pub struct UnknownFeature(pub String);

impl FromStr for WebPFeature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// Aggregate outcome of probing every WebP feature.
///
/// `is_available` is derived from the four feature flags and is true iff any
/// of them is true. A fresh result is produced by every probe run; callers
/// that want to reuse it must cache it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    is_available: bool,
    lossy: bool,
    lossless: bool,
    alpha: bool,
    animation: bool,
}

impl DetectionResult {
    /// Build a result from the four per-feature answers.
    #[must_use]
    pub const fn new(lossy: bool, lossless: bool, alpha: bool, animation: bool) -> Self {
        Self {
            is_available: lossy || lossless || alpha || animation,
            lossy,
            lossless,
            alpha,
            animation,
        }
    }

    /// A result with every feature unsupported.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self::new(false, false, false, false)
    }

    /// Whether any WebP feature is supported.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.is_available
    }

    /// Lossy (VP8) images decode.
    #[must_use]
    pub const fn lossy(&self) -> bool {
        self.lossy
    }

    /// Lossless (VP8L) images decode.
    #[must_use]
    pub const fn lossless(&self) -> bool {
        self.lossless
    }

    /// Lossy images with an alpha channel decode.
    #[must_use]
    pub const fn alpha(&self) -> bool {
        self.alpha
    }

    /// Animated images decode.
    #[must_use]
    pub const fn animation(&self) -> bool {
        self.animation
    }

    /// Whether the given feature is supported.
    #[must_use]
    pub const fn supports(&self, feature: WebPFeature) -> bool {
        match feature {
            WebPFeature::Lossy => self.lossy,
            WebPFeature::Lossless => self.lossless,
            WebPFeature::Alpha => self.alpha,
            WebPFeature::Animation => self.animation,
        }
    }

    /// Supported features in canonical order.
    pub fn supported_features(&self) -> impl Iterator<Item = WebPFeature> + '_ {
        WebPFeature::ALL
            .into_iter()
            .filter(|feature| self.supports(*feature))
    }
}
