// Rendering-service configuration

use navscope_scanner::fetch::render::{DEFAULT_RENDER_ENDPOINT, DEFAULT_WAIT_MS};
use navscope_scanner::{RenderClient, ScanError};
use std::env;

pub const API_KEY_ENV: &str = "SCRAPINGBEE_API_KEY";
pub const ENDPOINT_ENV: &str = "SCRAPINGBEE_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub wait_ms: u64,
}

impl RenderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_RENDER_ENDPOINT.to_string(),
            wait_ms: DEFAULT_WAIT_MS,
        }
    }

    /// Reads the API key from the environment. No key means no rendering
    /// fallback, which is not an error.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty())?;
        let mut config = Self::new(api_key.trim());
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|e| !e.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        Some(config)
    }

    pub fn with_wait_ms(mut self, wait_ms: u64) -> Self {
        self.wait_ms = wait_ms;
        self
    }

    pub fn client(&self) -> Result<RenderClient, ScanError> {
        Ok(RenderClient::new(&self.api_key)?
            .with_endpoint(&self.endpoint)
            .with_wait_ms(self.wait_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_key_disables_rendering() {
        assert_eq!(RenderConfig::from_lookup(lookup(&[])), None);
        assert_eq!(RenderConfig::from_lookup(lookup(&[(API_KEY_ENV, "  ")])), None);
    }

    #[test]
    fn test_key_with_default_endpoint() {
        let config = RenderConfig::from_lookup(lookup(&[(API_KEY_ENV, "abc123")])).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.endpoint, DEFAULT_RENDER_ENDPOINT);
        assert_eq!(config.wait_ms, DEFAULT_WAIT_MS);
    }

    #[test]
    fn test_endpoint_override() {
        let config = RenderConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "abc123"),
            (ENDPOINT_ENV, "http://localhost:9000/render"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/render");
    }
}
