//! Raw form input handling
//!
//! Input controls hand over strings. This module applies the presence rule
//! (empty, whitespace-only and numeric zero mean "not set") and turns the
//! remaining values into [`TransformOptions`].

use serde::{Deserialize, Serialize};

use crate::error::UrlError;
use crate::options::{parse_dimension, OutputFormat, Quality, Size, TransformOptions};
use crate::serializer::{encode_image_url, ProxyRequestUrl};

/// Field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub image_url: String,
    pub format: String,
    pub width: String,
    pub height: String,
    pub quality: String,
}

impl FormState {
    /// Whether the quality field should be shown for the selected format.
    ///
    /// This is a display rule only: a quality value that is set is still
    /// serialized whatever the format.
    pub fn shows_quality(&self) -> bool {
        self.format
            .parse::<OutputFormat>()
            .map(|format| format.supports_quality())
            .unwrap_or(false)
    }

    /// Validates the form and builds the request URL.
    ///
    /// The image URL is percent-encoded first unless `encode_image` is false,
    /// in which case it must already be encoded.
    pub fn submit(&self, base_url: &str, encode_image: bool) -> Result<ProxyRequestUrl, UrlError> {
        let image_url = self.image_url.trim();
        if image_url.is_empty() {
            return Err(UrlError::MissingImageUrl);
        }

        let options = parse_options_from_form_state(self)?;
        let image_ref = if encode_image {
            encode_image_url(image_url)
        } else {
            image_url.to_string()
        };

        ProxyRequestUrl::build(&options, &image_ref, base_url)
    }
}

/// Maps raw form values into typed options, dropping fields that are not set
pub fn parse_options_from_form_state(form: &FormState) -> Result<TransformOptions, UrlError> {
    let mut options = TransformOptions::new();

    if let Some(format) = present(&form.format) {
        options.format = Some(format.parse()?);
    }

    let width = present_number("width", &form.width)?;
    let height = present_number("height", &form.height)?;
    options.size = match (width, height) {
        (Some(width), Some(height)) => Some(Size::new(width, height)?),
        (None, None) => None,
        (Some(_), None) => {
            return Err(UrlError::invalid_param("height", "required when width is set"))
        }
        (None, Some(_)) => {
            return Err(UrlError::invalid_param("width", "required when height is set"))
        }
    };

    options.quality = match present(&form.quality) {
        // zero means "not set", not an out-of-range quality
        Some(value) if value.parse::<u8>() == Ok(0) => None,
        Some(value) => Some(value.parse::<Quality>()?),
        None => None,
    };

    Ok(options)
}

/// Trimmed value, or `None` when the field is empty
fn present(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn present_number(param: &str, value: &str) -> Result<Option<u32>, UrlError> {
    match present(value) {
        None => Ok(None),
        Some(value) => match parse_dimension(param, value)? {
            0 => Ok(None),
            n => Ok(Some(n)),
        },
    }
}
