use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/120.0.0.0 Safari/537.36";

/// HTTP collaborator for the pagination loop. Any failure mode degrades to
/// `None`; the loop treats that uniformly as "no more pages available".
pub struct Fetcher {
    client: Client,
    base_url: String,
}

impl Fetcher {
    /// `base_url` is a template with `{asin}` and `{page}` placeholders.
    pub fn new(base_url: &str, user_agent: Option<&str>, timeout_secs: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_UA))
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn build_url(&self, source_id: &str, page: u32) -> String {
        self.base_url
            .replace("{asin}", source_id)
            .replace("{page}", &page.to_string())
    }

    /// One page of raw markup, or `None` on non-200 status, transport error,
    /// or timeout. Failures are logged and never propagated.
    pub async fn fetch(&self, source_id: &str, page: u32) -> Option<String> {
        let url = self.build_url(source_id, page);
        debug!("requesting {}", url);

        match self.client.get(&url).send().await {
            Ok(resp) => {
                if resp.status() != StatusCode::OK {
                    warn!(
                        "non-200 status for {} page {}: {}",
                        source_id,
                        page,
                        resp.status()
                    );
                    return None;
                }
                match resp.text().await {
                    Ok(body) => Some(body),
                    Err(e) => {
                        warn!("body read error for {} page {}: {}", source_id, page, e);
                        None
                    }
                }
            }
            Err(e) => {
                warn!("request error for {} page {}: {}", source_id, page, e);
                None
            }
        }
    }
}

// ── Tests ──
