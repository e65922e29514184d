//! Domain types for hostkit.
//!
//! Pure data types with no host or runtime dependencies.

pub mod lifecycle;
pub mod webp;

pub use lifecycle::{LifecycleError, LifecycleState};
pub use webp::{DetectionResult, UnknownFeature, WEBP_MIME_TYPE, WebPFeature};
