//! Page renderers for catalog crawling.
//!
//! A renderer turns a URL into the markup the extractors parse. The crawl
//! pipeline only sees the [`PageRenderer`] trait; which implementation backs
//! it is decided once per run by [`RenderSession`].

pub mod browser;
mod http_client;
mod memory;
mod session;

pub use browser::{BrowserEngineConfig, BrowserRenderer};
pub use http_client::{resolve_user_agent, HttpRenderer, USER_AGENT};
pub use memory::MemoryRenderer;
pub use session::RenderSession;

use async_trait::async_trait;

use crate::error::RenderError;

/// Source of rendered document markup.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Load `url` and return its markup once the page has settled.
    async fn render(&self, url: &str) -> Result<String, RenderError>;
}
