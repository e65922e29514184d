//! In-process WebP decoding backed by `image-webp`.

use std::io::Cursor;

use hostkit_core::WebPFeature;
use image_webp::WebPDecoder;

use crate::capabilities::DecoderCapabilities;
use crate::error::{DecodeResult, WebpDecodeError};

/// Properties of a successfully decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    pub is_animated: bool,
    pub is_lossy: bool,
}

/// Decode `data` under the given capabilities.
///
/// Headers are checked against `capabilities` first, then the image (the
/// first frame of an animation) is fully decoded so corrupt bitstreams are
/// rejected rather than reported from their headers alone.
///
/// Capability checks follow the bitstream: every image needs `Lossy` or
/// `Lossless` for its codec, animations also need `Animation`, and lossy
/// images with an alpha plane also need `Alpha`.
pub fn decode(data: &[u8], capabilities: &DecoderCapabilities) -> DecodeResult<DecodedImage> {
    let mut decoder = WebPDecoder::new(Cursor::new(data))?;

    let (width, height) = decoder.dimensions();
    let image = DecodedImage {
        width,
        height,
        has_alpha: decoder.has_alpha(),
        is_animated: decoder.is_animated(),
        is_lossy: decoder.is_lossy(),
    };

    check_capabilities(&image, capabilities)?;

    let pixels = u64::from(width) * u64::from(height);
    if pixels > capabilities.max_pixels() {
        return Err(WebpDecodeError::TooLarge {
            width,
            height,
            limit: capabilities.max_pixels(),
        });
    }

    let size = decoder
        .output_buffer_size()
        .ok_or(WebpDecodeError::BufferOverflow)?;
    let mut buffer = vec![0u8; size];
    if image.is_animated {
        decoder.read_frame(&mut buffer)?;
    } else {
        decoder.read_image(&mut buffer)?;
    }

    Ok(image)
}

fn check_capabilities(
    image: &DecodedImage,
    capabilities: &DecoderCapabilities,
) -> DecodeResult<()> {
    match required_features(image).find(|feature| !capabilities.allows(*feature)) {
        Some(missing) => Err(WebpDecodeError::Unsupported(missing)),
        None => Ok(()),
    }
}

/// Capabilities a bitstream needs, most specific first.
///
/// Animation frames still need the codec they are encoded with. Only lossy
/// images need `Alpha`; VP8L always carries an alpha channel.
fn required_features(image: &DecodedImage) -> impl Iterator<Item = WebPFeature> {
    let codec = if image.is_lossy {
        WebPFeature::Lossy
    } else {
        WebPFeature::Lossless
    };

    [
        image.is_animated.then_some(WebPFeature::Animation),
        (image.is_lossy && image.has_alpha).then_some(WebPFeature::Alpha),
        Some(codec),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_every_test_payload() {
        let caps = DecoderCapabilities::all();
        for feature in WebPFeature::ALL {
            let image = decode(feature.test_payload(), &caps)
                .unwrap_or_else(|e| panic!("{feature} payload failed to decode: {e}"));
            assert_eq!((image.width, image.height), (1, 1), "{feature}");
        }
    }

    #[test]
    fn test_payload_bitstream_properties() {
        let caps = DecoderCapabilities::all();

        let lossy = decode(WebPFeature::Lossy.test_payload(), &caps).unwrap();
        assert!(lossy.is_lossy);
        assert!(!lossy.is_animated);

        let lossless = decode(WebPFeature::Lossless.test_payload(), &caps).unwrap();
        assert!(!lossless.is_lossy);
        assert!(!lossless.is_animated);

        let alpha = decode(WebPFeature::Alpha.test_payload(), &caps).unwrap();
        assert!(alpha.is_lossy);
        assert!(alpha.has_alpha);

        let animation = decode(WebPFeature::Animation.test_payload(), &caps).unwrap();
        assert!(animation.is_animated);
    }

    #[test]
    fn test_lossy_only_rejects_other_payloads() {
        let caps = DecoderCapabilities::lossy_only();
        assert!(decode(WebPFeature::Lossy.test_payload(), &caps).is_ok());

        for (feature, missing) in [
            (WebPFeature::Lossless, WebPFeature::Lossless),
            (WebPFeature::Alpha, WebPFeature::Alpha),
            (WebPFeature::Animation, WebPFeature::Animation),
        ] {
            match decode(feature.test_payload(), &caps) {
                Err(WebpDecodeError::Unsupported(f)) => assert_eq!(f, missing),
                other => panic!("{feature}: expected Unsupported, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_animation_needs_its_frame_codec() {
        let payload = WebPFeature::Animation.test_payload();

        let caps = DecoderCapabilities::all().without(WebPFeature::Lossless);
        assert!(matches!(
            decode(payload, &caps),
            Err(WebpDecodeError::Unsupported(WebPFeature::Lossless))
        ));

        let caps = DecoderCapabilities::all().without(WebPFeature::Lossy);
        assert!(decode(payload, &caps).is_ok());
    }

    #[test]
    fn test_pixel_limit() {
        let caps = DecoderCapabilities::all().with_max_pixels(0);
        assert!(matches!(
            decode(WebPFeature::Lossy.test_payload(), &caps),
            Err(WebpDecodeError::TooLarge {
                width: 1,
                height: 1,
                limit: 0
            })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        let caps = DecoderCapabilities::all();
        assert!(matches!(
            decode(b"definitely not a webp file", &caps),
            Err(WebpDecodeError::Malformed(_))
        ));
        assert!(decode(&[], &caps).is_err());
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let caps = DecoderCapabilities::all();
        let payload = WebPFeature::Lossy.test_payload();
        assert!(decode(&payload[..20], &caps).is_err());
    }
}
