//! WebP feature probing.
//!
//! [`FeatureProbe`] asks a [`DecodeHost`] to decode a minimal test image per
//! feature and turns the outcome into a yes/no answer. Decode failure is a
//! normal answer ("not supported"), never an error.
//!
//! There is no caching, retry, timeout or cancellation here. Callers needing
//! bounded latency wrap the returned futures in their own timeout; dropping a
//! probe leaves the host decode running with its result unobserved.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::domain::{DetectionResult, WebPFeature};
use crate::ports::{DecodeCompletion, DecodeHost, DecodeOutcome, DecodeRequest};

/// Service probing WebP feature support through a decode host.
#[derive(Clone)]
pub struct FeatureProbe {
    host: Arc<dyn DecodeHost>,
}

impl FeatureProbe {
    /// Create a probe backed by `host`.
    pub fn new(host: Arc<dyn DecodeHost>) -> Self {
        Self { host }
    }

    /// Probe a single feature.
    ///
    /// The decode request is submitted to the host immediately; the returned
    /// future resolves to `true` once the host reports a decode with non-zero
    /// width and height, or `false` on any failure.
    pub fn probe(&self, feature: WebPFeature) -> PendingProbe {
        let (completion, outcome) = DecodeCompletion::channel();
        debug!(%feature, "Submitting WebP probe");
        self.host
            .submit(DecodeRequest::for_feature(feature), completion);
        PendingProbe { feature, outcome }
    }

    /// Whether the host supports WebP at all.
    ///
    /// Same as probing [`WebPFeature::Lossy`], the oldest WebP capability.
    pub fn probe_baseline(&self) -> PendingProbe {
        self.probe(WebPFeature::Lossy)
    }

    /// Probe every feature concurrently.
    ///
    /// All four requests are submitted before any is awaited, and all four
    /// are awaited even once one has resolved.
    pub async fn probe_all(&self) -> DetectionResult {
        let lossy = self.probe(WebPFeature::Lossy);
        let lossless = self.probe(WebPFeature::Lossless);
        let alpha = self.probe(WebPFeature::Alpha);
        let animation = self.probe(WebPFeature::Animation);

        let (lossy, lossless, alpha, animation) = tokio::join!(lossy, lossless, alpha, animation);
        let result = DetectionResult::new(lossy, lossless, alpha, animation);
        debug!(?result, "WebP feature detection finished");
        result
    }
}

impl std::fmt::Debug for FeatureProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureProbe").finish_non_exhaustive()
    }
}

/// An in-flight probe of one feature.
///
/// Resolves to whether the feature is supported. Never fails.
#[must_use = "the probe result is only observable by awaiting it"]
#[derive(Debug)]
pub struct PendingProbe {
    feature: WebPFeature,
    outcome: oneshot::Receiver<DecodeOutcome>,
}

impl PendingProbe {
    /// The feature being probed.
    pub const fn feature(&self) -> WebPFeature {
        self.feature
    }
}

impl Future for PendingProbe {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let feature = self.feature;
        match Pin::new(&mut self.outcome).poll(cx) {
            Poll::Ready(Ok(outcome)) => {
                let supported = outcome.is_supported();
                debug!(%feature, ?outcome, supported, "WebP probe resolved");
                Poll::Ready(supported)
            }
            Poll::Ready(Err(_)) => {
                warn!(%feature, "Decode host dropped the probe without reporting an outcome");
                Poll::Ready(false)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
