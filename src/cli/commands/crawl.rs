//! Catalog crawl command.

use std::time::Duration;

use console::style;

use crate::catalog::CatalogCrawler;
use crate::config::Settings;
use crate::scrapers::RenderSession;
use crate::table::write_table_with_columns;

/// Crawl the catalog and write the product table.
pub async fn cmd_crawl(settings: &Settings) -> anyhow::Result<()> {
    let catalog = &settings.catalog;
    let crawler = CatalogCrawler::from_settings(catalog)?;

    let session = RenderSession::open(
        &settings.browser,
        Duration::from_millis(catalog.settle_delay_ms),
        catalog.user_agent.as_deref(),
    )
    .await?;
    let report = crawler.run(&session).await;
    session.close().await;

    write_table_with_columns(&report.table, &crawler.columns(), &catalog.output)?;

    println!(
        "{} {} products from {} listing pages saved to {}",
        style("✓").green(),
        report.table.len(),
        report.listing_pages,
        catalog.output.display()
    );
    if !report.failed.is_empty() {
        println!(
            "{} {} product pages failed to load:",
            style("!").yellow(),
            report.failed.len()
        );
        for url in &report.failed {
            println!("  {}", url);
        }
    }

    Ok(())
}
