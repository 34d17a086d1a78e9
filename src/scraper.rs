use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use std::time::Duration;
use log::{debug, warn};

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;

/// Source of raw page bodies.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ScrapeError>;
}

/// Blocking HTTP fetcher with a fixed user-agent/referer pair.
pub struct Scraper {
    client: Client,
}

impl Scraper {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        headers.insert(REFERER, header_value(&config.referer)?);

        let client = Client::builder()
            .timeout(config.request_timeout_secs.map(Duration::from_secs))
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Scraper { client })
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ScrapeError> {
    HeaderValue::from_str(value)
        .map_err(|e| ScrapeError::Config(format!("invalid header value '{}': {}", value, e)))
}

impl PageFetcher for Scraper {
    /// The body is returned whatever the status code.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if status.is_success() {
            debug!("{} answered {}", url, status);
        } else {
            warn!("{} answered {}, extracting anyway", url, status);
        }
        Ok(resp.bytes()?.to_vec())
    }
}
