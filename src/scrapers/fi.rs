//! Finland (ais.fi).
//!
//! The eAIP frame menu has one `a.level1` link per part; links following
//! `"AD 2 Lentopaikat"` up to the next `level1` link are aerodromes, with
//! text `"EFHK - HELSINKI-VANTAA"` (code, three separator characters, name).
//! Only aerodromes are published, no heliports.

use super::{IndexEvent, RegionScraper};
use crate::macros::selector;
use crate::models::{AerodromeEntry, AerodromeType, ChartLink};
use crate::regions::Region;
use crate::utils::{attr_or_empty, element_text, first_class, join_url, skip_chars, take_chars};
use scraper::Html;
use tracing::debug;

const AERODROMES_HEADING: &str = "AD 2 Lentopaikat";

#[derive(Debug, Clone, Copy, Default)]
pub struct Finland;

/// Code and name from menu link text such as `"EFHK - HELSINKI-VANTAA"`.
fn split_menu_text(text: &str) -> (String, String) {
    (take_chars(text, 4), skip_chars(text, 7))
}

impl RegionScraper for Finland {
    fn region(&self) -> Region {
        Region::Fi
    }

    fn index_path(&self) -> &'static str {
        "eaip/en/index3.htm"
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        let has_ad_part = document
            .select(selector!("div"))
            .any(|div| element_text(&div) == "AD");
        if !has_ad_part {
            debug!("No AD part in menu");
            return events;
        }

        let mut in_aerodromes = false;
        for link in document.select(selector!("a[class]")) {
            let text = element_text(&link).trim().to_string();
            if first_class(&link) == Some("level1") {
                in_aerodromes = text == AERODROMES_HEADING;
            }
            if !in_aerodromes || take_chars(&text, 4) == "AD 2" {
                continue;
            }

            let href = attr_or_empty(&link, "href");
            if !href.ends_with(".htm") {
                continue;
            }
            let (code, name) = split_menu_text(&text);
            if code.is_empty() {
                continue;
            }

            let url = join_url(base_url, &format!("eaip/{}", href.replace("../", "")));
            events.push(IndexEvent::add(
                AerodromeEntry::new(AerodromeType::Aerodrome, code, name).with_detail_url(url),
            ));
        }
        events
    }

    fn scrape_charts(&self, code: &str, document: &Html, base_url: &str) -> Vec<ChartLink> {
        let mut links = Vec::new();
        for td in document.select(selector!("td[class]")) {
            if first_class(&td) != Some("chartPad") {
                continue;
            }

            let mut title = String::new();
            let mut href = String::new();
            for a in td.select(selector!("a")) {
                title = element_text(&a);
                href = attr_or_empty(&a, "href");
            }

            if !title.is_empty() && !href.is_empty() {
                let url = join_url(base_url, &format!("eaip/ad/{}/{}", code.to_lowercase(), href));
                let link = ChartLink::new(code, title, url);
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
