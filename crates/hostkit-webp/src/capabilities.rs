//! Decoder capability configuration.

use hostkit_core::WebPFeature;

/// Largest canvas the WebP container can describe (16384 x 16384).
pub const DEFAULT_MAX_PIXELS: u64 = 16_384 * 16_384;

/// Which WebP capabilities the native host accepts.
///
/// Everything is enabled by default. Disabling a capability makes the host
/// reject bitstreams that use it, which emulates older decoders (early
/// browsers shipped lossy-only WebP support).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderCapabilities {
    lossy: bool,
    lossless: bool,
    alpha: bool,
    animation: bool,
    max_pixels: u64,
}

impl DecoderCapabilities {
    /// Every capability enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            lossy: true,
            lossless: true,
            alpha: true,
            animation: true,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }

    /// Only plain lossy images, like the first WebP-capable browsers.
    #[must_use]
    pub const fn lossy_only() -> Self {
        Self::all()
            .without(WebPFeature::Lossless)
            .without(WebPFeature::Alpha)
            .without(WebPFeature::Animation)
    }

    /// Disable one capability.
    #[must_use]
    pub const fn without(mut self, feature: WebPFeature) -> Self {
        match feature {
            WebPFeature::Lossy => self.lossy = false,
            WebPFeature::Lossless => self.lossless = false,
            WebPFeature::Alpha => self.alpha = false,
            WebPFeature::Animation => self.animation = false,
        }
        self
    }

    /// Reject images with more than `max_pixels` pixels.
    #[must_use]
    pub const fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Whether `feature` is enabled.
    #[must_use]
    pub const fn allows(&self, feature: WebPFeature) -> bool {
        match feature {
            WebPFeature::Lossy => self.lossy,
            WebPFeature::Lossless => self.lossless,
            WebPFeature::Alpha => self.alpha,
            WebPFeature::Animation => self.animation,
        }
    }

    #[must_use]
    pub const fn max_pixels(&self) -> u64 {
        self.max_pixels
    }
}

impl Default for DecoderCapabilities {
    fn default() -> Self {
        Self::all()
    }
}
