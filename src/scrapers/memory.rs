//! In-memory renderer serving pre-captured markup.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::PageRenderer;
use crate::error::RenderError;

/// Renderer backed by a URL → markup map.
///
/// Unknown URLs fail with [`RenderError::NotFound`]. Every request is
/// recorded so callers can check which pages were visited and in what order.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    pages: HashMap<String, String>,
    visits: Mutex<Vec<String>>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.pages.insert(url.into(), markup.into());
        self
    }

    /// URLs requested so far, in request order.
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageRenderer for MemoryRenderer {
    async fn render(&self, url: &str) -> Result<String, RenderError> {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(url.to_string());
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| RenderError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_known_pages_and_records_visits() {
        let renderer = MemoryRenderer::new().with_page("https://a.test/1", "<p>one</p>");

        assert_eq!(renderer.render("https://a.test/1").await.unwrap(), "<p>one</p>");
        assert!(matches!(
            renderer.render("https://a.test/2").await,
            Err(RenderError::NotFound(_))
        ));
        assert_eq!(
            renderer.visits(),
            vec!["https://a.test/1".to_string(), "https://a.test/2".to_string()]
        );
    }
}
