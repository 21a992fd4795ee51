//! Proxy request URL construction and parsing
//!
//! A request URL has the shape:
//! ```text
//! <base-url>/<options-segment>/<source-image-url>
//! ```
//! where the options segment is a `:`-joined list of `<name>(<value>)`
//! fragments in canonical order, or the literal `default` when no option is
//! present. The source image URL is always the remainder of the path and is
//! written exactly as the caller supplied it.

use std::fmt;

use serde::Serialize;

use crate::constants::{DEFAULT_SEGMENT, OPTION_SEPARATOR};
use crate::error::UrlError;
use crate::options::{is_known_option, TransformOptions, CANONICAL_ORDER};

/// Builds the options segment for `options`
pub fn options_segment(options: &TransformOptions) -> String {
    let fragments: Vec<String> = CANONICAL_ORDER
        .iter()
        .filter_map(|entry| {
            let value = (entry.render)(options)?;
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some(format!("{}({})", entry.name, value))
            }
        })
        .collect();

    if fragments.is_empty() {
        DEFAULT_SEGMENT.to_string()
    } else {
        fragments.join(OPTION_SEPARATOR)
    }
}

/// Percent-encodes a raw image URL so it can be used as the final segment
///
/// Every character outside `A-Z a-z 0-9 - _ . ~` is encoded, which is what the
/// proxy expects from browser callers using `encodeURIComponent`.
pub fn encode_image_url(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// A fully constructed proxy request URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyRequestUrl {
    url: String,
    segment: String,
    image_ref: String,
}

impl ProxyRequestUrl {
    /// Builds the URL for `options` applied to `image_ref` behind `base_url`.
    ///
    /// `image_ref` must already be percent-encoded; it is appended verbatim.
    /// Exactly one `/` is placed between the base URL, the options segment
    /// and the image reference: trailing slashes on `base_url` and a single
    /// leading slash on `image_ref` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::MissingImageUrl`] when `image_ref` is empty.
    pub fn build(
        options: &TransformOptions,
        image_ref: &str,
        base_url: &str,
    ) -> Result<Self, UrlError> {
        if image_ref.is_empty() {
            return Err(UrlError::MissingImageUrl);
        }
        // one leading slash is the separator the caller already wrote
        let image_ref = match image_ref.strip_prefix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => image_ref,
        };

        let base_url = base_url.trim_end_matches('/');
        let segment = options_segment(options);
        let url = format!("{}/{}/{}", base_url, segment, image_ref);

        tracing::debug!(segment = %segment, url = %url, "Built proxy request URL");

        Ok(Self {
            url,
            segment,
            image_ref: image_ref.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The options segment, `default` when no option was present
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// The image reference exactly as it appears in the URL
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for ProxyRequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Serializes `options` and `image_ref` into a proxy request URL string
///
/// # Errors
///
/// Fails with [`UrlError::MissingImageUrl`] if and only if `image_ref` is empty.
///
/// # Examples
///
/// ```
/// use image_proxy_url::options::{Size, TransformOptions};
/// use image_proxy_url::serializer::serialize;
///
/// let options = TransformOptions::new().with_size(Size::new(500, 500).unwrap());
/// let url = serialize(&options, "https://img.pexels.com/a.jpg", "https://img.example/").unwrap();
/// assert_eq!(url, "https://img.example/size(500,500)/https://img.pexels.com/a.jpg");
/// ```
pub fn serialize(
    options: &TransformOptions,
    image_ref: &str,
    base_url: &str,
) -> Result<String, UrlError> {
    ProxyRequestUrl::build(options, image_ref, base_url).map(ProxyRequestUrl::into_string)
}

/// Options and image reference read back from a request path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRequest {
    pub options: TransformOptions,
    pub image_ref: String,
}

impl ParsedRequest {
    /// The image reference with percent-encoding removed
    pub fn decoded_image_url(&self) -> Result<String, UrlError> {
        urlencoding::decode(&self.image_ref)
            .map(|decoded| decoded.into_owned())
            .map_err(|e| UrlError::InvalidRequestPath(format!("image url is not UTF-8: {}", e)))
    }
}

/// Parses `<options-segment>/<image-url>` back into its parts
///
/// Fragments are read as `<name>(<value>)`. Fragments without parentheses,
/// option names the proxy does not know and values meaning "not set" (empty,
/// `quality(0)`, a zero or comma-less size) are skipped; a repeated option
/// keeps its last value.
pub fn parse_request_path(path: &str) -> Result<ParsedRequest, UrlError> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return Err(UrlError::InvalidRequestPath("empty path".to_string()));
    }

    let (segment, image_ref) = path.split_once('/').unwrap_or((path, ""));
    if image_ref.is_empty() {
        return Err(UrlError::MissingImageUrl);
    }

    let mut options = TransformOptions::new();
    if segment != DEFAULT_SEGMENT {
        for fragment in segment.split(OPTION_SEPARATOR) {
            let Some((name, value)) = split_fragment(fragment) else {
                tracing::debug!(fragment = %fragment, "Skipping option fragment without value");
                continue;
            };
            if options.set(name, value)? {
                continue;
            }
            if is_known_option(name.trim()) {
                tracing::debug!(option = %name, value = %value, "Option value means not set");
            } else {
                tracing::debug!(option = %name, "Skipping unknown option");
            }
        }
    }

    Ok(ParsedRequest {
        options,
        image_ref: image_ref.to_string(),
    })
}

/// Parses a full request URL produced for `base_url`
pub fn parse_request_url(url: &str, base_url: &str) -> Result<ParsedRequest, UrlError> {
    let base_url = base_url.trim_end_matches('/');
    let path = url.strip_prefix(base_url).ok_or_else(|| {
        UrlError::InvalidRequestPath(format!("'{}' does not start with '{}'", url, base_url))
    })?;
    if !path.starts_with('/') {
        return Err(UrlError::InvalidRequestPath(format!(
            "'{}' does not start with '{}/'",
            url, base_url
        )));
    }
    parse_request_path(path)
}

/// Splits `name(value)` into its name and the text inside the first `(...)`
fn split_fragment(fragment: &str) -> Option<(&str, &str)> {
    let open = fragment.find('(')?;
    let rest = &fragment[open + 1..];
    let close = rest.find(')')?;
    Some((&fragment[..open], &rest[..close]))
}
