//! Command handlers.
//!
//! Handlers are thin: they validate CLI input, call the core probe and
//! write formatted output to the supplied writer.

pub mod detect;
pub mod payloads;
