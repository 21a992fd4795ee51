//! Typed transformation options
//!
//! The proxy understands three options, always written in this order:
//! `format(png|jpeg|webp)`, `size(<width>,<height>)` and `quality(<1-100>)`.
//! An option that is `None` is left out of the URL entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_QUALITY, SIZE_SEPARATOR};
use crate::error::UrlError;

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::WebP => "webp",
        }
    }

    /// Whether a `quality` option has any effect on this format
    pub fn supports_quality(&self) -> bool {
        matches!(self, Self::WebP)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::WebP),
            other => Err(UrlError::invalid_param(
                "format",
                format!("unknown format: {} (expected png, jpeg or webp)", other),
            )),
        }
    }
}

/// Target size in pixels; both sides are positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Result<Self, UrlError> {
        if width == 0 {
            return Err(UrlError::invalid_param("width", "must be greater than 0"));
        }
        if height == 0 {
            return Err(UrlError::invalid_param("height", "must be greater than 0"));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.width, SIZE_SEPARATOR, self.height)
    }
}

impl FromStr for Size {
    type Err = UrlError;

    /// Parses `<width>,<height>`, tolerating whitespace around either side
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s.split_once(SIZE_SEPARATOR).ok_or_else(|| {
            UrlError::invalid_param("size", format!("expected <width>,<height>, got '{}'", s))
        })?;
        Self::new(parse_dimension("width", width)?, parse_dimension("height", height)?)
    }
}

pub(crate) fn parse_dimension(param: &str, value: &str) -> Result<u32, UrlError> {
    value
        .trim()
        .parse()
        .map_err(|_| UrlError::invalid_param(param, format!("not a positive integer: '{}'", value)))
}

/// Quality percentage, 1-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Result<Self, UrlError> {
        if !(1..=MAX_QUALITY).contains(&value) {
            return Err(UrlError::invalid_param(
                "quality",
                format!("{} is out of range (1-{})", value, MAX_QUALITY),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Quality {
    type Error = UrlError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quality {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| UrlError::invalid_param("quality", format!("not an integer 1-100: '{}'", s)))?;
        Self::new(value)
    }
}

/// The set of options written into the options segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    /// True when no option would be written, i.e. the segment is `default`
    pub fn is_empty(&self) -> bool {
        self.format.is_none() && self.size.is_none() && self.quality.is_none()
    }

    /// Applies the wire value of the option called `name`.
    ///
    /// Returns `Ok(false)` when nothing was set: for names the proxy does not
    /// know, and for values that mean "not set" (empty, a zero quality, a
    /// zero or comma-less size). Malformed values of known options are errors.
    pub fn set(&mut self, name: &str, value: &str) -> Result<bool, UrlError> {
        let name = name.trim();
        match CANONICAL_ORDER.iter().find(|entry| entry.name == name) {
            Some(entry) => (entry.apply)(self, value.trim()),
            None => Ok(false),
        }
    }
}

/// Renders one option's value, or `None` when the option is absent
pub type OptionFormatter = fn(&TransformOptions) -> Option<String>;

/// Reads one option's wire value into the options, `Ok(false)` if absent
pub type OptionApplier = fn(&mut TransformOptions, &str) -> Result<bool, UrlError>;

/// One row of the option table
#[derive(Debug, Clone, Copy)]
pub struct OptionEntry {
    pub name: &'static str,
    pub render: OptionFormatter,
    pub apply: OptionApplier,
}

fn render_format(options: &TransformOptions) -> Option<String> {
    options.format.map(|f| f.as_str().to_string())
}

fn render_size(options: &TransformOptions) -> Option<String> {
    options.size.map(|s| s.to_string())
}

fn render_quality(options: &TransformOptions) -> Option<String> {
    options.quality.map(|q| q.to_string())
}

fn apply_format(options: &mut TransformOptions, value: &str) -> Result<bool, UrlError> {
    if value.is_empty() {
        return Ok(false);
    }
    options.format = Some(value.parse()?);
    Ok(true)
}

fn apply_size(options: &mut TransformOptions, value: &str) -> Result<bool, UrlError> {
    // the proxy only resizes when both sides are given
    let Some((width, height)) = value.split_once(SIZE_SEPARATOR) else {
        return Ok(false);
    };
    let width = parse_dimension("width", width)?;
    let height = parse_dimension("height", height)?;
    if width == 0 || height == 0 {
        return Ok(false);
    }
    options.size = Some(Size::new(width, height)?);
    Ok(true)
}

fn apply_quality(options: &mut TransformOptions, value: &str) -> Result<bool, UrlError> {
    if value.is_empty() {
        return Ok(false);
    }
    let quality: u8 = value
        .parse()
        .map_err(|_| UrlError::invalid_param("quality", format!("not an integer 0-100: '{}'", value)))?;
    if quality == 0 {
        return Ok(false);
    }
    options.quality = Some(Quality::new(quality)?);
    Ok(true)
}

/// Canonical option order shared by every caller that reads or writes a segment
pub const CANONICAL_ORDER: [OptionEntry; 3] = [
    OptionEntry {
        name: "format",
        render: render_format,
        apply: apply_format,
    },
    OptionEntry {
        name: "size",
        render: render_size,
        apply: apply_size,
    },
    OptionEntry {
        name: "quality",
        render: render_quality,
        apply: apply_quality,
    },
];

/// Whether `name` is one of the options the proxy understands
pub fn is_known_option(name: &str) -> bool {
    CANONICAL_ORDER.iter().any(|entry| entry.name == name)
}
