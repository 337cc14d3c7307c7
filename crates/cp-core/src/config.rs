//! Client configuration.
//!
//! Every field has a default, so a config block only needs the keys it
//! overrides. The animation values are presentation constants.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub gallery_page_limit: u32,
    pub pack_size: usize,
    pub tilt: TiltConfig,
    pub hover: HoverConfig,
    pub vote_pulse_ms: u32,
    pub favorites_key: String,
    pub header_scroll_threshold: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            gallery_page_limit: 50,
            pack_size: 10,
            tilt: TiltConfig::default(),
            hover: HoverConfig::default(),
            vote_pulse_ms: 300,
            favorites_key: "favorites".to_owned(),
            header_scroll_threshold: 50.0,
        }
    }
}

impl ClientConfig {
    /// Parse a (possibly partial) JSON config over the defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: ClientConfig = serde_json::from_str(raw)?;
        config.api_base_url = normalize_base_url(&config.api_base_url);
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = normalize_base_url(base_url);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    pub max_deg: f64,
    pub transition_secs: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_deg: 25.0,
            transition_secs: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub scale: f64,
    pub transition_secs: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale: 1.1,
            transition_secs: 0.3,
        }
    }
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ClientConfig::from_json(
            r#"{"api_base_url":"https://cards.example.com/","tilt":{"max_deg":10}}"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://cards.example.com");
        assert_eq!(config.tilt.max_deg, 10.0);
        assert_eq!(config.tilt.transition_secs, 0.6);
        assert_eq!(config.gallery_page_limit, 50);
        assert_eq!(config.vote_pulse_ms, 300);
        assert_eq!(config.favorites_key, "favorites");
    }

    #[test]
    fn blank_base_url_falls_back() {
        assert_eq!(normalize_base_url("  "), DEFAULT_API_BASE_URL);
        assert_eq!(
            ClientConfig::default().with_base_url("http://h:1//").api_base_url,
            "http://h:1"
        );
    }
}
