//! Decode host port definition.
//!
//! A decode host is whatever can take an encoded image and report whether it
//! decoded: a browser image element, a native decoder, a test double. The
//! core only submits requests and waits for exactly one outcome per request.
//!
//! # Design
//!
//! - Requests are fire-and-forget: `submit` must not block
//! - Each request comes with a [`DecodeCompletion`], a single-shot slot the
//!   host fills once, from any thread, whenever the decode finishes
//! - Implementations live in adapters (e.g. `hostkit-webp`)

use tokio::sync::oneshot;

use crate::domain::{WEBP_MIME_TYPE, WebPFeature};

/// What the host observed when decoding a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The image decoded and reported these dimensions.
    Decoded {
        /// Reported width in pixels.
        width: u32,
        /// Reported height in pixels.
        height: u32,
    },
    /// The image could not be decoded (malformed or unsupported data).
    Failed,
}

impl DecodeOutcome {
    /// Shorthand for [`DecodeOutcome::Decoded`].
    #[must_use]
    pub const fn decoded(width: u32, height: u32) -> Self {
        Self::Decoded { width, height }
    }

    /// Whether this outcome counts as feature support.
    ///
    /// Some hosts decode unrecognized sub-formats into a degenerate image, so
    /// a decode only counts when both dimensions are non-zero.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        match self {
            Self::Decoded { width, height } => *width > 0 && *height > 0,
            Self::Failed => false,
        }
    }
}

/// A single decode request handed to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeRequest {
    feature: WebPFeature,
    payload: &'static [u8],
}

impl DecodeRequest {
    /// Request decoding of the test payload for `feature`.
    #[must_use]
    pub const fn for_feature(feature: WebPFeature) -> Self {
        Self {
            feature,
            payload: feature.test_payload(),
        }
    }

    /// Feature this request probes.
    ///
    /// Informational only; hosts must decide from the payload itself.
    #[must_use]
    pub const fn feature(&self) -> WebPFeature {
        self.feature
    }

    /// Encoded image bytes.
    #[must_use]
    pub const fn payload(&self) -> &'static [u8] {
        self.payload
    }

    /// MIME type of the payload.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        WEBP_MIME_TYPE
    }

    /// The payload as a `data:` URI, for hosts that load images by URL.
    #[must_use]
    pub fn data_uri(&self) -> String {
        self.feature.test_payload_data_uri()
    }
}

/// Single-shot slot through which a host reports a [`DecodeOutcome`].
///
/// Consumed on use, so a request is completed at most once. Dropping it
/// without completing tells the waiting probe that the host gave up, which
/// the probe treats as a failed decode.
#[derive(Debug)]
pub struct DecodeCompletion {
    sender: oneshot::Sender<DecodeOutcome>,
}

impl DecodeCompletion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<DecodeOutcome>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Report the outcome of the decode.
    pub fn complete(self, outcome: DecodeOutcome) {
        // The waiting side may already be gone; the result is then unobserved.
        let _ = self.sender.send(outcome);
    }

    /// Report a successful decode with the given dimensions.
    pub fn decoded(self, width: u32, height: u32) {
        self.complete(DecodeOutcome::decoded(width, height));
    }

    /// Report a failed decode.
    pub fn failed(self) {
        self.complete(DecodeOutcome::Failed);
    }

    /// Whether nobody is waiting for this outcome any more.
    ///
    /// Hosts may use this to skip work for abandoned probes.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Port for hosts that can attempt to decode images.
///
/// `submit` must return promptly; the decode itself happens asynchronously
/// and the host reports back through `completion`. A host that never
/// completes leaves the corresponding probe pending forever.
#[cfg_attr(test, mockall::automock)]
pub trait DecodeHost: Send + Sync {
    /// Start decoding `request`, reporting the result through `completion`.
    fn submit(&self, request: DecodeRequest, completion: DecodeCompletion);
}

/// A host that cannot decode anything.
///
/// Every request fails immediately. Stands in for environments that block
/// image loading, which makes every feature look unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecodeHost;

impl NoopDecodeHost {
    /// Create a new no-op host.
    pub const fn new() -> Self {
        Self
    }
}

impl DecodeHost for NoopDecodeHost {
    fn submit(&self, _request: DecodeRequest, completion: DecodeCompletion) {
        completion.failed();
    }
}
