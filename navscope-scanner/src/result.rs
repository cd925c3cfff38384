use serde::{Deserialize, Serialize};
use std::fmt;

/// A site to audit and whether its homepage is known to need script rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub domain: String,
    pub expects_script_rendering: bool,
}

impl Site {
    pub fn new(domain: impl Into<String>, expects_script_rendering: bool) -> Self {
        Self {
            domain: domain.into(),
            expects_script_rendering,
        }
    }

    /// Homepage URL. Domains without a scheme are fetched over https.
    pub fn url(&self) -> String {
        if self.domain.starts_with("http://") || self.domain.starts_with("https://") {
            self.domain.clone()
        } else {
            format!("https://{}", self.domain)
        }
    }
}

/// Which fetch strategy produced a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Static,
    Rendered,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Static => write!(f, "static"),
            Strategy::Rendered => write!(f, "rendered"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub html: String,
    pub strategy: Strategy,
    /// Content still looks like an empty client-rendered shell.
    pub is_shell: bool,
    /// URL the content was served from, after redirects.
    pub final_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredLink {
    pub url: String,
    pub text: String,
}

impl DiscoveredLink {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_url_adds_https() {
        let site = Site::new("example.com", false);
        assert_eq!(site.url(), "https://example.com");
    }

    #[test]
    fn test_site_url_keeps_scheme() {
        let site = Site::new("http://127.0.0.1:8080", true);
        assert_eq!(site.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_strategy_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Strategy::Rendered).unwrap(),
            "\"rendered\""
        );
        assert_eq!(Strategy::Static.to_string(), "static");
    }
}
