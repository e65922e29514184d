//! Port definitions (trait abstractions) for host environments.
//!
//! Ports define the interfaces that the core expects from the host. They
//! contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No decoder or DOM types in any signature
//! - Channel types stay behind small wrapper types
//! - Implementations live in adapter crates

pub mod decode_host;

pub use decode_host::{DecodeCompletion, DecodeHost, DecodeOutcome, DecodeRequest, NoopDecodeHost};

#[cfg(test)]
pub use decode_host::MockDecodeHost;
