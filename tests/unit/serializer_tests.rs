// Serializer tests
//
// These tests pin down the wire shape of request URLs:
// <base-url>/<options-segment>/<source-image-url>

use image_proxy_url::{
    encode_image_url, options_segment, parse_request_path, serialize, OutputFormat, Quality,
    Size, TransformOptions, UrlError,
};
use rstest::rstest;

const BASE: &str = "https://img.example/";
const IMAGE: &str = "https://img.pexels.com/a.jpg";

fn quality(value: u8) -> Quality {
    Quality::new(value).expect("valid quality")
}

fn size(width: u32, height: u32) -> Size {
    Size::new(width, height).expect("valid size")
}

#[test]
fn test_size_only_url() {
    let options = TransformOptions::new().with_size(size(500, 500));
    assert_eq!(
        serialize(&options, IMAGE, BASE).unwrap(),
        "https://img.example/size(500,500)/https://img.pexels.com/a.jpg"
    );
}

#[test]
fn test_default_segment_url() {
    assert_eq!(
        serialize(&TransformOptions::default(), IMAGE, BASE).unwrap(),
        "https://img.example/default/https://img.pexels.com/a.jpg"
    );
}

#[test]
fn test_full_options_url() {
    let options = TransformOptions::new()
        .with_format(OutputFormat::WebP)
        .with_size(size(200, 200))
        .with_quality(quality(70));
    assert_eq!(
        serialize(&options, IMAGE, BASE).unwrap(),
        "https://img.example/format(webp):size(200,200):quality(70)/https://img.pexels.com/a.jpg"
    );
}

#[test]
fn test_empty_image_ref_produces_no_url() {
    let options = TransformOptions::new().with_format(OutputFormat::Png);
    let result = serialize(&options, "", BASE);
    assert_eq!(result, Err(UrlError::MissingImageUrl));
}

#[rstest]
#[case(TransformOptions::new(), "default")]
#[case(TransformOptions::new().with_format(OutputFormat::Png), "format(png)")]
#[case(TransformOptions::new().with_format(OutputFormat::Jpeg), "format(jpeg)")]
#[case(TransformOptions::new().with_quality(quality(10)), "quality(10)")]
#[case(
    TransformOptions::new().with_quality(quality(90)).with_format(OutputFormat::WebP),
    "format(webp):quality(90)"
)]
#[case(
    TransformOptions::new().with_quality(quality(90)).with_size(size(1, 2)),
    "size(1,2):quality(90)"
)]
fn test_options_segment(#[case] options: TransformOptions, #[case] expected: &str) {
    assert_eq!(options_segment(&options), expected);
}

#[test]
fn test_builder_order_does_not_leak_into_segment() {
    let a = TransformOptions::new()
        .with_quality(quality(70))
        .with_size(size(200, 200))
        .with_format(OutputFormat::WebP);
    let b = TransformOptions::new()
        .with_format(OutputFormat::WebP)
        .with_size(size(200, 200))
        .with_quality(quality(70));
    assert_eq!(options_segment(&a), options_segment(&b));
}

#[test]
fn test_serialize_does_not_mutate_inputs() {
    let options = TransformOptions::new().with_format(OutputFormat::Png);
    let before = options;
    let _ = serialize(&options, IMAGE, BASE).unwrap();
    assert_eq!(options, before);
}

#[test]
fn test_encoded_image_survives_parse() {
    let options = TransformOptions::new().with_format(OutputFormat::Jpeg);
    let source = "https://example.com/photo.jpg?w=1&h=2";
    let url = serialize(&options, &encode_image_url(source), "https://img.example").unwrap();
    assert_eq!(
        url,
        "https://img.example/format(jpeg)/https%3A%2F%2Fexample.com%2Fphoto.jpg%3Fw%3D1%26h%3D2"
    );

    let path = url.strip_prefix("https://img.example").unwrap();
    let parsed = parse_request_path(path).unwrap();
    assert_eq!(parsed.options, options);
    assert_eq!(parsed.decoded_image_url().unwrap(), source);
}

#[test]
fn test_unencoded_image_with_slashes_is_path_remainder() {
    let parsed = parse_request_path("/size(10,20)/https://cdn.example/a/b/c.png").unwrap();
    assert_eq!(parsed.options.size, Some(size(10, 20)));
    assert_eq!(parsed.image_ref, "https://cdn.example/a/b/c.png");
}

#[test]
fn test_parser_accepts_unset_values_the_proxy_ignores() {
    let parsed = parse_request_path("/format(webp):quality(0)/a.jpg").unwrap();
    assert_eq!(parsed.options.format, Some(OutputFormat::WebP));
    assert!(parsed.options.quality.is_none());

    let parsed = parse_request_path("/size(500)/a.jpg").unwrap();
    assert_eq!(parsed.options, TransformOptions::new());
}

#[test]
fn test_non_empty_image_refs_are_accepted() {
    for image_ref in ["/", " ", "a"] {
        assert!(serialize(&TransformOptions::new(), image_ref, BASE).is_ok());
    }
}
