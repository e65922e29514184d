//! Document lifecycle states.
//!
//! Host documents report their readiness as a string (`"loading"`,
//! `"interactive"`, `"complete"`). [`LifecycleState`] is the typed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while tracking the document lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The host reported a ready state outside the known set.
    #[error("Unknown document ready state: {0:?}")]
    UnknownReadyState(String),
}

/// Readiness of a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// The document is still loading.
    Loading,
    /// The document has been parsed; sub-resources may still be loading.
    Ready,
    /// The document and all sub-resources have loaded.
    Completed,
}

impl LifecycleState {
    /// Map a host ready-state string to a lifecycle state.
    pub fn from_ready_state(ready_state: &str) -> Result<Self, LifecycleError> {
        match ready_state {
            "loading" => Ok(Self::Loading),
            "interactive" => Ok(Self::Ready),
            "complete" => Ok(Self::Completed),
            other => Err(LifecycleError::UnknownReadyState(other.to_string())),
        }
    }

    /// The host ready-state string for this state.
    #[must_use]
    pub const fn as_ready_state(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "interactive",
            Self::Completed => "complete",
        }
    }
}

impl FromStr for LifecycleState {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ready_state(s)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ready_state())
    }
}
