//! End-to-end tests for the detect and payloads commands through the
//! library surface used by the binary.

use std::sync::Arc;

use clap::Parser;
use hostkit_cli::handlers::{self, detect::DetectOptions};
use hostkit_cli::{Cli, CliConfig, Commands, bootstrap, bootstrap_with};
use hostkit_core::{DecodeCompletion, DecodeHost, DecodeOutcome, DecodeRequest, WebPFeature};

/// Host that reports a zero-sized image for every request.
struct EmptyImageHost;

impl DecodeHost for EmptyImageHost {
    fn submit(&self, _request: DecodeRequest, completion: DecodeCompletion) {
        completion.complete(DecodeOutcome::decoded(0, 1));
    }
}

async fn detect(args: &[&str]) -> String {
    let cli = Cli::parse_from(args);
    let Some(Commands::Detect {
        feature,
        disable,
        json,
        timeout_ms,
    }) = cli.command
    else {
        panic!("expected detect command");
    };

    let config = CliConfig::from_args(cli.max_pixels, &disable).unwrap();
    let ctx = bootstrap(&config);
    let options = DetectOptions {
        feature,
        json,
        timeout_ms,
    };

    let mut out = Vec::new();
    handlers::detect::execute(&ctx, &options, &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_detect_all_features_json() {
    let output = detect(&["hostkit", "detect", "--json"]).await;
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["isAvailable"], true);
    for feature in WebPFeature::ALL {
        assert_eq!(value[feature.as_str()], true, "{feature}");
    }
}

#[tokio::test]
async fn test_detect_with_disabled_features() {
    let output = detect(&[
        "hostkit",
        "detect",
        "--disable",
        "lossy",
        "--disable",
        "lossless",
        "--disable",
        "animation",
    ])
    .await;

    // Alpha payload is lossy, so it needs lossy support too.
    assert!(output.starts_with("WebP support: unavailable\n"));
    assert!(output.contains("alpha        no\n"));
}

#[tokio::test]
async fn test_detect_pixel_limit_via_flag() {
    // Every test image is 1x1, so a limit of 1 still admits them.
    let output = detect(&["hostkit", "--max-pixels", "1", "detect", "--json"]).await;
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["isAvailable"], true);
}

#[tokio::test]
async fn test_zero_sized_decode_counts_as_unsupported() {
    let ctx = bootstrap_with(Arc::new(EmptyImageHost));
    let mut out = Vec::new();
    handlers::detect::execute(&ctx, &DetectOptions::default(), &mut out)
        .await
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("WebP support: unavailable\n"));
}

#[test]
fn test_payloads_match_library_payloads() {
    let mut out = Vec::new();
    handlers::payloads::execute(
        Some(WebPFeature::Animation),
        handlers::payloads::PayloadFormat::DataUri,
        &mut out,
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap().trim_end(),
        WebPFeature::Animation.test_payload_data_uri()
    );
}
