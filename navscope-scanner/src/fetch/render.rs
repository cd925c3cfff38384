use crate::error::{Result, ScanError};
use crate::fetch::RenderSource;
use reqwest::Client;
use tracing::debug;

pub const DEFAULT_RENDER_ENDPOINT: &str = "https://app.scrapingbee.com/api/v1/";
pub const DEFAULT_WAIT_MS: u64 = 3000;

/// Client for a remote script-rendering service. It runs the target page's
/// JavaScript and returns the resulting DOM snapshot.
///
/// No client-side timeout is set; the remote service bounds its own work.
#[derive(Clone)]
pub struct RenderClient {
    client: Client,
    api_key: String,
    endpoint: String,
    wait_ms: u64,
}

impl RenderClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("navscope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_RENDER_ENDPOINT.to_string(),
            wait_ms: DEFAULT_WAIT_MS,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_wait_ms(mut self, wait_ms: u64) -> Self {
        self.wait_ms = wait_ms;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn render(&self, url: &str) -> Result<String> {
        debug!("Rendering {} via {}", url, self.endpoint);

        let wait = self.wait_ms.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("url", url),
                ("render_js", "true"),
                ("wait", wait.as_str()),
                ("block_ads", "true"),
            ])
            .send()
            .await
            .map_err(redact)?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ScanError::HttpStatus {
                service: "rendering service",
                status,
            });
        }

        response.text().await.map_err(redact)
    }
}

/// The request URL carries the API key, so it is dropped from transport errors.
fn redact(error: reqwest::Error) -> ScanError {
    ScanError::Network(error.without_url())
}

impl RenderSource for RenderClient {
    async fn fetch_rendered(&self, url: &str) -> Result<String> {
        self.render(url).await
    }
}
