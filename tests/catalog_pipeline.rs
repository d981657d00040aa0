//! Catalog Pipeline Tests
//!
//! Crawls a small in-memory catalog end to end and checks the CSV that
//! comes out of it.

use catalog_harvest::catalog::CatalogCrawler;
use catalog_harvest::config::CatalogSettings;
use catalog_harvest::scrapers::MemoryRenderer;
use catalog_harvest::table::{read_table, write_table_with_columns, SENTINEL};

const LISTING: &str = "https://catalog.test/machine-learning?page=";

fn settings() -> CatalogSettings {
    CatalogSettings {
        listing_url_template: format!("{}{{page}}", LISTING),
        origin: "https://catalog.test".to_string(),
        ..CatalogSettings::default()
    }
}

fn detail_page(name: &str, competitors: &str) -> String {
    format!(
        r#"<html><body>
        <h1>{name}</h1>
        <div class="ProductOverview_wysiwyg-text__qyaAp"><p>{name} overview</p></div>
        <ul class="FeaturesSection_feature-list__hS9Jh">
          <li><span>icon</span><span>Model registry</span></li>
          <li><span>icon</span><span>Pipelines</span></li>
        </ul>
        <table class="TechnicalDetails_table__fL19a">
          <tr><th>Deployment Types</th><td>Cloud</td></tr>
          <tr><th>Operating Systems</th><td>Linux</td></tr>
          <tr><th>Mobile Application</th><td>No</td></tr>
        </table>
        <div class="FaqQuestion_toggle-section__MKGEp">
          <button><span>What are {name}'s top competitors?</span></button>
          <div class="FaqQuestion_answer__TcR_e">{competitors}</div>
        </div>
        </body></html>"#
    )
}

fn catalog() -> MemoryRenderer {
    MemoryRenderer::new()
        .with_page(
            format!("{}1", LISTING),
            r#"<a href="/products/alpha/reviews">Alpha</a>
               <a href="/machine-learning?page=2">Next</a>
               <a href="/products/beta/reviews">Beta</a>"#,
        )
        .with_page(
            format!("{}2", LISTING),
            r#"<a href="/products/beta/reviews">Beta</a>
               <a href="/products/gamma/reviews">Gamma</a>"#,
        )
        .with_page(format!("{}3", LISTING), "<p>No more results</p>")
        .with_page(
            "https://catalog.test/products/alpha/reviews",
            detail_page("Alpha", "Beta, Gamma"),
        )
        .with_page(
            "https://catalog.test/products/beta/reviews",
            detail_page("Beta", "Alpha"),
        )
        .with_page("https://catalog.test/products/gamma/reviews", "<h1>Gamma</h1>")
}

#[tokio::test]
async fn crawl_writes_one_row_per_product() {
    let crawler = CatalogCrawler::from_settings(&settings()).unwrap();
    let renderer = catalog();

    let report = crawler.run(&renderer).await;
    assert_eq!(report.listing_pages, 3);
    assert_eq!(report.detail_urls, 3);
    assert!(report.failed.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("machine_learning_products.csv");
    write_table_with_columns(&report.table, &crawler.columns(), &path).unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(
        table.columns(),
        vec![
            "Name",
            "Description",
            "Features",
            "Deployment Types",
            "Operating Systems",
            "Mobile Application",
            "Pricing",
            "Top Competitors",
        ]
    );
    assert_eq!(table.len(), 3);

    let alpha = &table.records()[0];
    assert_eq!(alpha.get("Name"), Some("Alpha"));
    assert_eq!(alpha.get("Description"), Some("Alpha overview"));
    assert_eq!(alpha.get("Features"), Some("Model registry; Pipelines"));
    assert_eq!(alpha.get("Operating Systems"), Some("Linux"));
    assert_eq!(alpha.get("Pricing"), Some(SENTINEL));
    assert_eq!(alpha.get("Top Competitors"), Some("Beta, Gamma"));

    let gamma = &table.records()[2];
    assert_eq!(gamma.get("Name"), Some("Gamma"));
    for column in ["Description", "Features", "Deployment Types", "Top Competitors"] {
        assert_eq!(gamma.get(column), Some(SENTINEL), "{}", column);
    }
}

#[tokio::test]
async fn listing_pages_are_visited_in_order_then_products() {
    let crawler = CatalogCrawler::from_settings(&settings()).unwrap();
    let renderer = catalog();

    crawler.run(&renderer).await;

    assert_eq!(
        renderer.visits(),
        vec![
            format!("{}1", LISTING),
            format!("{}2", LISTING),
            format!("{}3", LISTING),
            "https://catalog.test/products/alpha/reviews".to_string(),
            "https://catalog.test/products/beta/reviews".to_string(),
            "https://catalog.test/products/gamma/reviews".to_string(),
        ]
    );
}

#[tokio::test]
async fn page_cap_bounds_the_crawl() {
    let settings = CatalogSettings {
        max_pages: 1,
        ..settings()
    };
    let crawler = CatalogCrawler::from_settings(&settings).unwrap();

    let report = crawler.run(&catalog()).await;
    assert_eq!(report.listing_pages, 1);
    assert_eq!(report.detail_urls, 2);
    assert_eq!(report.table.len(), 2);
}

#[tokio::test]
async fn unreachable_catalog_still_writes_header() {
    let crawler = CatalogCrawler::from_settings(&settings()).unwrap();
    let report = crawler.run(&MemoryRenderer::new()).await;
    assert!(report.table.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    write_table_with_columns(&report.table, &crawler.columns(), &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("Name,Description,Features,"));
    assert_eq!(contents.lines().count(), 1);
}
