//! Detail-page link collection from listing pages.

use indexmap::IndexSet;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{HarvestError, Result};

/// Collects detail-page URLs from listing-page markup.
#[derive(Debug, Clone)]
pub struct LinkCollector {
    origin: String,
    host: String,
    detail_prefix: String,
    selector: Selector,
}

impl LinkCollector {
    /// Build a collector for links under `detail_prefix` on `origin`.
    pub fn new(origin: &str, detail_prefix: &str) -> Result<Self> {
        let parsed = Url::parse(origin).map_err(|e| HarvestError::InvalidUrl {
            url: origin.to_string(),
            message: e.to_string(),
        })?;
        let host = parsed.host_str().unwrap_or_default().to_string();
        let selector = Selector::parse("a[href]").map_err(|e| HarvestError::InvalidSelector {
            selector: "a[href]".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            host,
            detail_prefix: detail_prefix.to_string(),
            selector,
        })
    }

    /// Distinct detail URLs in document order.
    ///
    /// Root-relative hrefs are prefixed with the origin verbatim; absolute
    /// hrefs are kept as written when they point at the origin's host.
    pub fn collect(&self, html: &str) -> IndexSet<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| self.resolve(href.trim()))
            .collect()
    }

    fn resolve(&self, href: &str) -> Option<String> {
        if href.starts_with('/') && !href.starts_with("//") {
            return href
                .starts_with(&self.detail_prefix)
                .then(|| format!("{}{}", self.origin, href));
        }

        let url = Url::parse(href).ok()?;
        let same_host = url.host_str() == Some(self.host.as_str());
        (same_host && url.path().starts_with(&self.detail_prefix)).then(|| href.to_string())
    }
}
