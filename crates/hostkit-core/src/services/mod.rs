//! Core services.
//!
//! Services hold injected ports and implement the host-independent logic.

pub mod feature_probe;
pub mod lifecycle;

pub use feature_probe::{FeatureProbe, PendingProbe};
pub use lifecycle::{DocumentLifecycle, LifecycleStream};
