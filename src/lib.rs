//! Catalog Harvest - product catalog crawling and rating table merging.
//!
//! The crawl pipeline walks a paginated catalog, renders every product page
//! and extracts a fixed set of fields per product. The merge pipeline
//! reconciles two independently harvested rating tables into one, keyed by
//! platform name.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod scrapers;
pub mod table;
