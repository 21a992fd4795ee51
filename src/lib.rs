// Image Proxy URL Library
// Builds and reads request URLs for the image-transformation proxy API

pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod logging;
pub mod options;
pub mod serializer;

pub use error::UrlError;
pub use form::{parse_options_from_form_state, FormState};
pub use options::{OutputFormat, Quality, Size, TransformOptions};
pub use serializer::{
    encode_image_url, options_segment, parse_request_path, parse_request_url, serialize,
    ParsedRequest, ProxyRequestUrl,
};
