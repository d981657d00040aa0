//! Plain HTTP renderer for catalogs that serve complete markup.

mod user_agent;

pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::PageRenderer;
use crate::error::RenderError;

/// Renderer that returns the server's markup without executing scripts.
#[derive(Clone)]
pub struct HttpRenderer {
    client: Client,
    request_delay: Duration,
}

impl HttpRenderer {
    /// Create a new HTTP renderer.
    /// - None: Use the default harvest user agent
    /// - Some("impersonate"): Use a real browser user agent
    /// - Some(custom): Use custom user agent string
    pub fn new(
        timeout: Duration,
        request_delay: Duration,
        user_agent_config: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let user_agent = resolve_user_agent(user_agent_config);
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            request_delay,
        })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<String, RenderError> {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        info!("Fetching {}", url);
        let http_error = |e: reqwest::Error| RenderError::Http {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(http_error)?;
        debug!("{} -> {}", url, response.status());

        response.text().await.map_err(http_error)
    }
}
