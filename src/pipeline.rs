//! One region run: index page, then each aerodrome's detail page.
//!
//! Pages are fetched strictly one after another. The first failed fetch
//! aborts the whole run.

use crate::aggregator::Aggregator;
use crate::error::AipError;
use crate::fetch::PageSource;
use crate::macros::selector;
use crate::models::SortKey;
use crate::scrapers::{IndexEvent, RegionScraper};
use crate::utils::element_text;
use scraper::Html;
use tracing::{debug, info, instrument};

/// Scrape a region's AIP into an [`Aggregator`].
#[instrument(level = "info", skip_all, fields(region = %scraper.region(), %base_url))]
pub async fn collect<S: PageSource>(
    source: &S,
    scraper: &dyn RegionScraper,
    base_url: &str,
    sort_key: SortKey,
) -> Result<Aggregator, AipError> {
    let index_url = scraper.index_url(base_url);
    info!(url = %index_url, "Parsing AIP main page");
    let body = source.fetch_page(&index_url, scraper.tls()).await?;

    let events = {
        let document = Html::parse_document(&body);
        if let Some(title) = document.select(selector!("title")).next() {
            debug!(title = %element_text(&title).trim(), "Index page title");
        }
        scraper.scrape_index(&document, base_url)
    };
    debug!(events = events.len(), "Index page scraped");

    let mut aggregator = Aggregator::new(sort_key);
    for event in events {
        match event {
            IndexEvent::Add {
                entry,
                quiet_duplicates,
            } => {
                let detail_url = entry.detail_url.clone();
                let (kind, code, name) = (entry.kind, entry.code.clone(), entry.name.clone());
                if !aggregator.add(entry, quiet_duplicates) {
                    continue;
                }
                let Some(detail_url) = detail_url else {
                    continue;
                };

                info!(%code, url = %detail_url, "Parsing aerodrome page");
                let body = source.fetch_page(&detail_url, scraper.tls()).await?;
                let links = {
                    let document = Html::parse_document(&body);
                    scraper.scrape_charts(&code, &document, base_url)
                };
                let key = aggregator.key_for(&code, &name);
                aggregator.attach_links(kind, &key, links);
            }
            IndexEvent::Attach {
                kind,
                code,
                name,
                links,
            } => {
                let key = aggregator.key_for(&code, &name);
                aggregator.attach_links(kind, &key, links);
            }
        }
    }

    info!(
        aerodromes = aggregator.len(),
        charted = aggregator.charted(),
        "Finished scraping region"
    );
    Ok(aggregator)
}
