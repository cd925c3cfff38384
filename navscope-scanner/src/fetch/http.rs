use crate::error::{Result, ScanError};
use crate::fetch::StaticSource;
use reqwest::Client;
use reqwest::header::LOCATION;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MAX_REDIRECTS: usize = 5;

/// Raw server-sent HTML for a page.
#[derive(Debug, Clone)]
pub struct StaticPage {
    /// URL the body came from, after redirects.
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Direct HTTP(S) fetcher. Redirects are followed by hand so every hop is
/// visible in the logs and bounded by `max_redirects`.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    max_redirects: usize,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            max_redirects: MAX_REDIRECTS,
        })
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub async fn get(&self, url: &str) -> Result<StaticPage> {
        let mut current =
            Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

        for hop in 0..=self.max_redirects {
            debug!("GET {} (hop {})", current, hop);
            let response = self.client.get(current.clone()).send().await?;
            let status = response.status();

            if status.is_redirection()
                && let Some(location) = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
            {
                let next = current
                    .join(location)
                    .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", location, e)))?;
                debug!("  -> {} redirect to {}", status.as_u16(), next);
                current = next;
                continue;
            }

            if !status.is_success() {
                return Err(ScanError::HttpStatus {
                    service: "static fetch",
                    status: status.as_u16(),
                });
            }

            let body = response.text().await?;
            return Ok(StaticPage {
                url: current.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Err(ScanError::TooManyRedirects {
            url: current.to_string(),
            hops: self.max_redirects,
        })
    }
}

impl StaticSource for HttpFetcher {
    async fn fetch_static(&self, url: &str) -> Result<StaticPage> {
        self.get(url).await
    }
}
