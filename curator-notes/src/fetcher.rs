use crate::types::{CuratorError, FetchConfig, FetchedImage, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Media type assumed when the image host does not declare one.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Retrieves artwork images over HTTP. One request per call, no retries.
pub struct ImageFetcher {
    client: Client,
    config: FetchConfig,
}

impl ImageFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(|e| CuratorError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let start_time = Instant::now();
        debug!("Fetching artwork image: {} (timeout {}s)", url, self.config.timeout_seconds);

        let wrap = |source: reqwest::Error| CuratorError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(wrap)?;

        let mime_type = match response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            Some(declared) if !declared.trim().is_empty() => declared.trim().to_string(),
            _ => {
                warn!("No content type declared for {}, assuming {}", url, DEFAULT_MIME_TYPE);
                DEFAULT_MIME_TYPE.to_string()
            }
        };

        let bytes = response.bytes().await.map_err(wrap)?;

        info!(
            "Fetched artwork image: {} ({} bytes, {}) in {}ms",
            url,
            bytes.len(),
            mime_type,
            start_time.elapsed().as_millis()
        );

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }
}
