//! Proxy endpoint configuration.
//!
//! Default values are sourced from `crate::constants`.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BASE_URL;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_encode_image_url() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Origin of the image-transformation proxy, with or without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Percent-encode image URLs before appending them (default: true)
    #[serde(default = "default_encode_image_url")]
    pub encode_image_url: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            encode_image_url: default_encode_image_url(),
        }
    }
}

impl ProxyConfig {
    pub fn validate(&self) -> Result<(), String> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err("proxy.base_url cannot be empty".to_string());
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(format!(
                "proxy.base_url '{}' must start with http:// or https://",
                self.base_url
            ));
        }
        Ok(())
    }

    /// Returns this config with `base_url` replaced when an override is given,
    /// validated either way
    pub fn with_base_url_override(&self, base_url: Option<&str>) -> Result<Self, String> {
        let mut proxy = self.clone();
        if let Some(base_url) = base_url {
            proxy.base_url = base_url.to_string();
        }
        proxy.validate()?;
        Ok(proxy)
    }
}
