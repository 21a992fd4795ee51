// Form handling tests
//
// Raw field strings go through the presence rule before they become options.

use image_proxy_url::{parse_options_from_form_state, FormState, OutputFormat, UrlError};

fn base_form() -> FormState {
    FormState {
        image_url: "https://img.pexels.com/a.jpg".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_blank_fields_give_default_segment() {
    let form = FormState {
        format: "  ".to_string(),
        width: "".to_string(),
        height: "0".to_string(),
        ..base_form()
    };
    let url = form.submit("https://img.example", false).unwrap();
    assert_eq!(url.segment(), "default");
}

#[test]
fn test_quality_hidden_but_still_serialized() {
    let form = FormState {
        format: "jpeg".to_string(),
        quality: "80".to_string(),
        ..base_form()
    };
    assert!(!form.shows_quality());

    let options = parse_options_from_form_state(&form).unwrap();
    assert_eq!(options.format, Some(OutputFormat::Jpeg));
    assert_eq!(options.quality.map(|q| q.value()), Some(80));
}

#[test]
fn test_missing_image_url_is_the_validation_error() {
    let form = FormState {
        format: "webp".to_string(),
        ..Default::default()
    };
    assert_eq!(
        form.submit("https://img.example", true).unwrap_err(),
        UrlError::MissingImageUrl
    );
}

#[test]
fn test_missing_image_url_checked_before_options() {
    let form = FormState {
        width: "not-a-number".to_string(),
        height: "10".to_string(),
        ..Default::default()
    };
    let err = form.submit("https://img.example", true).unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn test_negative_height_is_rejected() {
    let form = FormState {
        width: "100".to_string(),
        height: "-1".to_string(),
        ..base_form()
    };
    let err = parse_options_from_form_state(&form).unwrap_err();
    assert!(matches!(err, UrlError::InvalidParameter { ref param, .. } if param == "height"));
}
