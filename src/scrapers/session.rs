//! Scoped render session for one run.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::{BrowserEngineConfig, BrowserRenderer, HttpRenderer, PageRenderer};
use crate::error::{HarvestError, RenderError};

/// The renderer chosen for a run.
///
/// Opened once at run start and passed by reference to everything that
/// renders pages. [`RenderSession::close`] must be called when the run ends,
/// whether it succeeded or not, so a launched browser is shut down.
pub enum RenderSession {
    Browser(BrowserRenderer),
    Http(HttpRenderer),
}

impl RenderSession {
    /// Open a browser session when enabled, otherwise a plain HTTP session.
    pub async fn open(
        browser: &BrowserEngineConfig,
        settle: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, HarvestError> {
        if browser.enabled {
            let renderer = BrowserRenderer::launch(browser.clone(), settle).await?;
            Ok(Self::Browser(renderer))
        } else {
            info!("Browser disabled; fetching pages over HTTP");
            let timeout = Duration::from_secs(browser.timeout);
            let renderer = HttpRenderer::new(timeout, settle, user_agent)?;
            Ok(Self::Http(renderer))
        }
    }

    pub async fn close(self) {
        match self {
            Self::Browser(renderer) => renderer.close().await,
            Self::Http(_) => {}
        }
    }
}

#[async_trait]
impl PageRenderer for RenderSession {
    async fn render(&self, url: &str) -> Result<String, RenderError> {
        match self {
            Self::Browser(renderer) => renderer.render(url).await,
            Self::Http(renderer) => renderer.render(url).await,
        }
    }
}
