//! Payloads command handler.
//!
//! Prints the embedded test images so they can be fed to other decoders.

use std::io::Write;

use clap::ValueEnum;
use hostkit_core::WebPFeature;

use crate::error::CliError;

/// Encoding used when printing payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PayloadFormat {
    /// `data:image/webp;base64,...`
    #[default]
    DataUri,
    /// Standard base64 with padding
    Base64,
    /// Lowercase hex
    Hex,
}

impl PayloadFormat {
    /// Encode `feature`'s test payload.
    pub fn encode(self, feature: WebPFeature) -> String {
        match self {
            Self::DataUri => feature.test_payload_data_uri(),
            Self::Base64 => feature.test_payload_base64(),
            Self::Hex => hex::encode(feature.test_payload()),
        }
    }
}

/// Execute the payloads command.
///
/// A single feature prints just the encoded payload; otherwise every
/// feature is printed as `<name>\t<payload>`, one per line.
pub fn execute(
    feature: Option<WebPFeature>,
    format: PayloadFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match feature {
        Some(feature) => writeln!(out, "{}", format.encode(feature))?,
        None => {
            for feature in WebPFeature::ALL {
                writeln!(out, "{feature}\t{}", format.encode(feature))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(feature: Option<WebPFeature>, format: PayloadFormat) -> String {
        let mut out = Vec::new();
        execute(feature, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_data_uri() {
        assert_eq!(
            run(Some(WebPFeature::Lossy), PayloadFormat::DataUri),
            "data:image/webp;base64,UklGRiIAAABXRUJQVlA4IBYAAAAwAQCdASoBAAEADsD+JaQAA3AAAAAA\n"
        );
    }

    #[test]
    fn test_single_hex_starts_with_riff_header() {
        let output = run(Some(WebPFeature::Lossless), PayloadFormat::Hex);
        // "RIFF" then little-endian length 26, then "WEBP".
        assert!(output.starts_with("524946461a00000057454250"));
        assert_eq!(output.trim_end().len(), WebPFeature::Lossless.test_payload().len() * 2);
    }

    #[test]
    fn test_all_features_base64() {
        let output = run(None, PayloadFormat::Base64);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            "lossless\tUklGRhoAAABXRUJQVlA4TA0AAAAvAAAAEAcQERGIiP4HAA=="
        );
        for (line, feature) in lines.iter().zip(WebPFeature::ALL) {
            assert_eq!(
                *line,
                format!("{feature}\t{}", feature.test_payload_base64())
            );
        }
    }
}
