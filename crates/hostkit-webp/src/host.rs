//! Native implementation of the `DecodeHost` port.

use hostkit_core::{DecodeCompletion, DecodeHost, DecodeOutcome, DecodeRequest};
use tokio::runtime::Handle;
use tracing::debug;

use crate::capabilities::DecoderCapabilities;
use crate::decoder;

/// Decode host that decodes payloads in-process.
///
/// Inside a tokio runtime each request runs on the blocking pool so
/// `submit` returns immediately; outside a runtime it decodes inline before
/// returning. Either way every request is completed exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDecodeHost {
    capabilities: DecoderCapabilities,
}

impl NativeDecodeHost {
    /// A host with every capability enabled.
    pub const fn new() -> Self {
        Self::with_capabilities(DecoderCapabilities::all())
    }

    /// A host restricted to `capabilities`.
    pub const fn with_capabilities(capabilities: DecoderCapabilities) -> Self {
        Self { capabilities }
    }

    pub const fn capabilities(&self) -> &DecoderCapabilities {
        &self.capabilities
    }

    fn run(
        capabilities: &DecoderCapabilities,
        request: DecodeRequest,
        completion: DecodeCompletion,
    ) {
        let feature = request.feature();
        if completion.is_abandoned() {
            debug!(%feature, "Skipping decode for abandoned probe");
            return;
        }

        let outcome = match decoder::decode(request.payload(), capabilities) {
            Ok(image) => DecodeOutcome::decoded(image.width, image.height),
            Err(err) => {
                debug!(%feature, error = %err, "Native WebP decode failed");
                DecodeOutcome::Failed
            }
        };
        completion.complete(outcome);
    }
}

impl DecodeHost for NativeDecodeHost {
    fn submit(&self, request: DecodeRequest, completion: DecodeCompletion) {
        let capabilities = self.capabilities;
        match Handle::try_current() {
            Ok(handle) => {
                // Detached: the completion reports back, not the join handle.
                drop(handle.spawn_blocking(move || Self::run(&capabilities, request, completion)));
            }
            Err(_) => Self::run(&capabilities, request, completion),
        }
    }
}
