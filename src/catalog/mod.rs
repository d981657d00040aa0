//! Paginated catalog crawling.
//!
//! [`Paginator`] walks listing pages and hands detail URLs to
//! [`CatalogCrawler`], which renders each product page and runs it through a
//! [`FieldExtractor`].

mod crawler;
mod extract;
mod fields;
mod links;
mod paginator;

pub use crawler::{CatalogCrawler, CrawlReport};
pub use extract::{
    FieldExtractor, FieldRule, FieldSpec, PageLayout, QuestionMatch, SectionMap, LIST_SEPARATOR,
};
pub use fields::{product_fields, product_layout, NAME_FIELD};
pub use links::LinkCollector;
pub use paginator::{PaginationResult, Paginator, DEFAULT_MAX_PAGES};
