//! Detect command handler.
//!
//! Probes one or all WebP features through the context's decode host and
//! prints the result as a table or JSON.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use hostkit_core::WebPFeature;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{FeatureReport, render_detection, render_feature};

/// Options for the detect command.
#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    /// Probe only this feature.
    pub feature: Option<WebPFeature>,
    /// Emit JSON instead of a table.
    pub json: bool,
    /// Fail if detection has not finished after this many milliseconds.
    pub timeout_ms: Option<u64>,
}

/// Execute the detect command.
///
/// # Errors
///
/// - [`CliError::Timeout`] if the probes outlive `timeout_ms`
/// - [`CliError::Io`] if writing to `out` fails
pub async fn execute(
    ctx: &CliContext,
    options: &DetectOptions,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let probe = ctx.probe();

    let rendered = match options.feature {
        Some(feature) => {
            let supported = within(options.timeout_ms, probe.probe(feature)).await?;
            let report = FeatureReport { feature, supported };
            if options.json {
                serde_json::to_string_pretty(&report)?
            } else {
                render_feature(&report)
            }
        }
        None => {
            let result = within(options.timeout_ms, probe.probe_all()).await?;
            debug!(available = result.is_available(), "Detection finished");
            if options.json {
                serde_json::to_string_pretty(&result)?
            } else {
                render_detection(&result)
            }
        }
    };

    write!(out, "{rendered}")?;
    if options.json {
        writeln!(out)?;
    }
    Ok(())
}

async fn within<F: Future>(timeout_ms: Option<u64>, future: F) -> Result<F::Output, CliError> {
    match timeout_ms {
        Some(timeout_ms) => tokio::time::timeout(Duration::from_millis(timeout_ms), future)
            .await
            .map_err(|_| CliError::Timeout { timeout_ms }),
        None => Ok(future.await),
    }
}
