//! Sequential listing-page pagination.

use indexmap::IndexSet;
use tracing::{debug, info, warn};

use super::links::LinkCollector;
use crate::error::{HarvestError, Result};
use crate::scrapers::PageRenderer;

/// Default hard cap on listing pages.
pub const DEFAULT_MAX_PAGES: u32 = 10;

const PAGE_PLACEHOLDER: &str = "{page}";

/// Detail URLs gathered by a pagination run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationResult {
    /// Distinct detail URLs in discovery order.
    pub urls: IndexSet<String>,
    /// Number of listing pages rendered.
    pub pages_visited: u32,
}

/// Walks listing pages 1, 2, ... until a page adds no new links or the
/// page cap is reached.
#[derive(Debug, Clone)]
pub struct Paginator {
    template: String,
    max_pages: u32,
    collector: LinkCollector,
}

impl Paginator {
    /// `template` must contain `{page}`, replaced by the 1-based page number.
    pub fn new(template: &str, max_pages: u32, collector: LinkCollector) -> Result<Self> {
        if !template.contains(PAGE_PLACEHOLDER) {
            return Err(HarvestError::InvalidTemplate(template.to_string()));
        }
        Ok(Self {
            template: template.to_string(),
            max_pages,
            collector,
        })
    }

    pub fn page_url(&self, page: u32) -> String {
        self.template.replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// Collect detail URLs across all listing pages.
    ///
    /// A listing page that fails to render counts as a page with no links,
    /// which ends pagination.
    pub async fn collect<R: PageRenderer + ?Sized>(&self, renderer: &R) -> PaginationResult {
        let mut result = PaginationResult::default();

        for page in 1..=self.max_pages {
            let url = self.page_url(page);
            info!("Scraping product links from: {}", url);
            result.pages_visited += 1;

            let links = match renderer.render(&url).await {
                Ok(html) => self.collector.collect(&html),
                Err(e) => {
                    warn!("Listing page {} failed, treating as empty: {}", url, e);
                    IndexSet::new()
                }
            };

            let before = result.urls.len();
            let found = links.len();
            result.urls.extend(links);
            let added = result.urls.len() - before;
            debug!("Page {}: {} links, {} new", page, found, added);

            if added == 0 {
                info!("No new links on page {}, stopping", page);
                return result;
            }
        }

        if self.max_pages > 0 {
            info!("Stopped at page cap ({})", self.max_pages);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::MemoryRenderer;

    const ORIGIN: &str = "https://catalog.test";
    const TEMPLATE: &str = "https://catalog.test/ml?page={page}";

    fn paginator(max_pages: u32) -> Paginator {
        let collector = LinkCollector::new(ORIGIN, "/products/").unwrap();
        Paginator::new(TEMPLATE, max_pages, collector).unwrap()
    }

    fn listing(slugs: &[&str]) -> String {
        slugs
            .iter()
            .map(|s| format!(r#"<a href="/products/{}">{}</a>"#, s, s))
            .collect()
    }

    #[tokio::test]
    async fn stops_after_first_page_without_links() {
        let renderer = MemoryRenderer::new()
            .with_page("https://catalog.test/ml?page=1", listing(&["p1", "p2"]))
            .with_page("https://catalog.test/ml?page=2", "<p>no results</p>");

        let result = paginator(10).collect(&renderer).await;

        let urls: Vec<_> = result.urls.iter().cloned().collect();
        assert_eq!(
            urls,
            vec![
                "https://catalog.test/products/p1",
                "https://catalog.test/products/p2"
            ]
        );
        assert_eq!(result.pages_visited, 2);
        assert_eq!(renderer.visits().len(), 2);
    }

    #[tokio::test]
    async fn stops_when_page_only_repeats_known_links() {
        let renderer = MemoryRenderer::new()
            .with_page("https://catalog.test/ml?page=1", listing(&["p1", "p2"]))
            .with_page("https://catalog.test/ml?page=2", listing(&["p2", "p3"]))
            .with_page("https://catalog.test/ml?page=3", listing(&["p1", "p3"]));

        let result = paginator(10).collect(&renderer).await;

        assert_eq!(result.urls.len(), 3);
        assert_eq!(result.pages_visited, 3);
    }

    #[tokio::test]
    async fn never_renders_past_the_cap() {
        let mut renderer = MemoryRenderer::new();
        for page in 1..=20 {
            renderer = renderer.with_page(
                format!("https://catalog.test/ml?page={}", page),
                listing(&[&format!("p{}", page)]),
            );
        }

        let result = paginator(10).collect(&renderer).await;

        assert_eq!(result.pages_visited, 10);
        assert_eq!(result.urls.len(), 10);
        assert_eq!(
            renderer.visits().last().map(String::as_str),
            Some("https://catalog.test/ml?page=10")
        );
    }

    #[tokio::test]
    async fn failed_listing_page_ends_pagination() {
        let renderer = MemoryRenderer::new()
            .with_page("https://catalog.test/ml?page=1", listing(&["p1"]))
            .with_page("https://catalog.test/ml?page=3", listing(&["p3"]));

        let result = paginator(10).collect(&renderer).await;

        assert_eq!(result.urls.len(), 1);
        assert_eq!(result.pages_visited, 2);
    }

    #[tokio::test]
    async fn zero_cap_renders_nothing() {
        let renderer = MemoryRenderer::new();
        let result = paginator(0).collect(&renderer).await;

        assert!(result.urls.is_empty());
        assert!(renderer.visits().is_empty());
    }

    #[test]
    fn template_requires_page_placeholder() {
        let collector = LinkCollector::new(ORIGIN, "/products/").unwrap();
        assert!(matches!(
            Paginator::new("https://catalog.test/ml", 10, collector),
            Err(HarvestError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn page_url_substitutes_number() {
        assert_eq!(paginator(10).page_url(3), "https://catalog.test/ml?page=3");
    }
}
