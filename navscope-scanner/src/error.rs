use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status}")]
    HttpStatus { service: &'static str, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Too many redirects (stopped after {hops} hops at {url})")]
    TooManyRedirects { url: String, hops: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("All fetch strategies exhausted for {domain}: {}", .attempts.join("; "))]
    AllStrategiesExhausted {
        domain: String,
        attempts: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
