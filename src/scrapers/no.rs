//! Norway (Avinor eAIP).
//!
//! Menu links read `"ENGM OSLO/Gardermoen"` followed by a `span.sdParams`
//! holding extra descriptor text, which is not part of the name. Links with
//! a `title` attribute are part headings.

use super::{IndexEvent, RegionScraper, eaip_chart_section, menu_href, menu_section};
use crate::macros::selector;
use crate::models::{AerodromeEntry, ChartLink};
use crate::regions::Region;
use crate::utils::{attr_or_empty, element_text, has_class, join_url, strip_line_breaks};
use scraper::{ElementRef, Html};

#[derive(Debug, Clone, Copy, Default)]
pub struct Norway;

/// Link text with every `span.sdParams` descriptor removed.
fn menu_text(link: &ElementRef) -> String {
    link.select(selector!("span[class]"))
        .filter(|span| has_class(span, "sdParams"))
        .fold(element_text(link), |text, span| text.replace(&element_text(&span), ""))
}

/// Code (first word) and the remaining name.
fn split_menu_text(text: &str) -> Option<(String, String)> {
    let code = text.split_whitespace().next()?;
    let name = text.replacen(code, "", 1).trim().to_string();
    Some((code.to_string(), name))
}

impl RegionScraper for Norway {
    fn region(&self) -> Region {
        Region::No
    }

    fn index_path(&self) -> &'static str {
        "html/eAIP/EN-menu-en-GB.html"
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        let mut kind = None;
        for link in document.select(selector!("a")) {
            let href = attr_or_empty(&link, "href");
            let id = attr_or_empty(&link, "id");
            let title = strip_line_breaks(&attr_or_empty(&link, "title"));
            if let Some(section) = menu_section(&id) {
                kind = Some(section);
            }

            let text = menu_text(&link);
            let Some(section) = kind else {
                continue;
            };
            if !title.is_empty() || href.is_empty() || text.trim() == "+" {
                continue;
            }
            let Some((code, name)) = split_menu_text(&text) else {
                continue;
            };

            let url = join_url(base_url, &format!("html/{}", menu_href(&href, &id)));
            events.push(IndexEvent::add(
                AerodromeEntry::new(section, code, name).with_detail_url(url),
            ));
        }
        events
    }

    fn scrape_charts(&self, code: &str, document: &Html, base_url: &str) -> Vec<ChartLink> {
        eaip_chart_section(code, document, base_url, |title| title.replace('&', "and"))
    }
}
