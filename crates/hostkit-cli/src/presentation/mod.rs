//! Shared CLI presentation utilities.
//!
//! Format-only: handlers decide what to print, this module decides how it
//! looks.

use hostkit_core::{DetectionResult, WebPFeature};
use serde::Serialize;

const FEATURE_COLUMN: usize = 12;

/// JSON shape for a single-feature probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureReport {
    pub feature: WebPFeature,
    pub supported: bool,
}

/// "yes" or "no".
pub const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Print-ready table for a full detection.
///
/// ```rust
/// use hostkit_cli::presentation::render_detection;
/// use hostkit_core::DetectionResult;
///
/// let table = render_detection(&DetectionResult::new(true, false, false, false));
/// assert!(table.starts_with("WebP support: available\n"));
/// ```
pub fn render_detection(result: &DetectionResult) -> String {
    let status = if result.is_available() {
        "available"
    } else {
        "unavailable"
    };

    let mut out = format!("WebP support: {status}\n\n");
    out.push_str(&header());
    for feature in WebPFeature::ALL {
        out.push_str(&row(feature, result.supports(feature)));
    }
    out
}

/// Print-ready table for a single feature.
pub fn render_feature(report: &FeatureReport) -> String {
    let mut out = header();
    out.push_str(&row(report.feature, report.supported));
    out
}

fn header() -> String {
    format!(
        "{:<FEATURE_COLUMN$} Supported\n{}\n",
        "Feature",
        "-".repeat(FEATURE_COLUMN + 10)
    )
}

fn row(feature: WebPFeature, supported: bool) -> String {
    format!("{:<FEATURE_COLUMN$} {}\n", feature.as_str(), yes_no(supported))
}
