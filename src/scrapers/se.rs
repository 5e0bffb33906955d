//! Sweden (LFV IAIP).
//!
//! The aerodrome folder lists one table per group. Each row has a link with
//! class `sortableFolder--rightArrow` holding the name and a plain link whose
//! text is the ICAO code and whose target is the aerodrome's document page.

use super::{IndexEvent, RegionScraper};
use crate::macros::selector;
use crate::models::{AerodromeEntry, AerodromeType, ChartLink};
use crate::regions::Region;
use crate::utils::{attr_or_empty, element_text, first_class, has_class, join_url};
use scraper::Html;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sweden;

impl RegionScraper for Sweden {
    fn region(&self) -> Region {
        Region::Se
    }

    fn index_path(&self) -> &'static str {
        "Editorial/View/IAIP?folderId=19"
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        for table in document.select(selector!("table")) {
            // Fields persist across rows of the same table.
            let mut href = String::new();
            let mut code = String::new();
            let mut name = String::new();
            for tr in table.select(selector!("tr")) {
                for link in tr.select(selector!("td a")) {
                    if link.value().attr("class").is_some() {
                        if has_class(&link, "sortableFolder--rightArrow") {
                            name = element_text(&link);
                        }
                    } else {
                        code = element_text(&link);
                        href = attr_or_empty(&link, "href");
                    }
                }

                if !href.is_empty() && !code.is_empty() {
                    let url = join_url(base_url, &href);
                    events.push(IndexEvent::add(
                        AerodromeEntry::new(AerodromeType::Aerodrome, code.clone(), name.clone())
                            .with_detail_url(url),
                    ));
                }
            }
        }
        events
    }

    fn scrape_charts(&self, code: &str, document: &Html, base_url: &str) -> Vec<ChartLink> {
        let mut links = Vec::new();
        for li in document.select(selector!("section li")) {
            let href = li
                .select(selector!("a"))
                .last()
                .map(|a| attr_or_empty(&a, "href"))
                .unwrap_or_default();
            let title = li
                .select(selector!("span[class]"))
                .filter(|span| first_class(span) == Some("document-name"))
                .last()
                .map(|span| element_text(&span))
                .unwrap_or_default();

            if !title.is_empty() && !href.is_empty() {
                let link = ChartLink::new(code, title, join_url(base_url, &href));
                debug!(
                    %code,
                    title = %link.title,
                    url = %link.url,
                    filename = %link.filename,
                    "Found chart"
                );
                links.push(link);
            }
        }
        links
    }
}
