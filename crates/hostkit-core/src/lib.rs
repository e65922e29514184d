#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    DetectionResult, LifecycleError, LifecycleState, UnknownFeature, WEBP_MIME_TYPE, WebPFeature,
};
pub use ports::{DecodeCompletion, DecodeHost, DecodeOutcome, DecodeRequest, NoopDecodeHost};
pub use services::{DocumentLifecycle, FeatureProbe, LifecycleStream, PendingProbe};

// Dev-dependencies only exercised by some test configurations
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio_test as _;
