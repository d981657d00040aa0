//! Crawl orchestration: paginate, render each product, extract records.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::extract::FieldExtractor;
use super::links::LinkCollector;
use super::paginator::Paginator;
use crate::config::CatalogSettings;
use crate::error::Result;
use crate::scrapers::PageRenderer;
use crate::table::Table;

/// Outcome of one crawl.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// One record per successfully rendered product, in discovery order.
    pub table: Table,
    pub listing_pages: u32,
    pub detail_urls: usize,
    /// Detail URLs that failed to render and were skipped.
    pub failed: Vec<String>,
}

/// Drives a [`Paginator`] and a [`FieldExtractor`] over one renderer.
#[derive(Debug, Clone)]
pub struct CatalogCrawler {
    paginator: Paginator,
    extractor: FieldExtractor,
    workers: usize,
}

impl CatalogCrawler {
    pub fn new(paginator: Paginator, extractor: FieldExtractor) -> Self {
        Self {
            paginator,
            extractor,
            workers: 1,
        }
    }

    /// Number of detail pages rendered at once. Output order is unaffected.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn from_settings(settings: &CatalogSettings) -> Result<Self> {
        let collector = LinkCollector::new(&settings.origin, &settings.detail_prefix)?;
        let paginator = Paginator::new(
            &settings.listing_url_template,
            settings.max_pages,
            collector,
        )?;
        let extractor = FieldExtractor::new(&settings.fields, &settings.layout)?;
        Ok(Self::new(paginator, extractor).with_workers(settings.workers))
    }

    /// Output columns, in order.
    pub fn columns(&self) -> Vec<String> {
        self.extractor.columns()
    }

    /// Crawl every listing page, then every discovered product page.
    ///
    /// A product page that fails to render is logged and skipped.
    pub async fn run<R: PageRenderer + ?Sized>(&self, renderer: &R) -> CrawlReport {
        let pages = self.paginator.collect(renderer).await;
        info!(
            "Found {} products across {} pages",
            pages.urls.len(),
            pages.pages_visited
        );

        let mut report = CrawlReport {
            listing_pages: pages.pages_visited,
            detail_urls: pages.urls.len(),
            ..CrawlReport::default()
        };

        let mut results = stream::iter(pages.urls)
            .map(|url| async move {
                info!("Scraping {}", url);
                let markup = renderer.render(&url).await;
                (url, markup)
            })
            .buffered(self.workers);

        while let Some((url, markup)) = results.next().await {
            match markup {
                Ok(html) => report.table.push(self.extractor.extract(&html)),
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    report.failed.push(url);
                }
            }
        }

        info!(
            "Extracted {} records ({} skipped)",
            report.table.len(),
            report.failed.len()
        );
        report
    }
}
