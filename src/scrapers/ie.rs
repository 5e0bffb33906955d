//! Ireland (IAA iAIP).
//!
//! The directory page is one table row per aerodrome: a name link and a
//! `"Chart Information"` link to `aip_{code}_charts.htm`. One row folds both
//! into a single `"{name} Chart Information"` link.

use super::{IndexEvent, RegionScraper};
use crate::macros::selector;
use crate::models::{AerodromeEntry, AerodromeType, ChartLink};
use crate::regions::Region;
use crate::utils::{attr_or_empty, drop_last_chars, element_text, join_url, strip_line_breaks};
use scraper::Html;
use tracing::debug;

const CHART_LINK_TEXT: &str = "Chart Information";

#[derive(Debug, Clone, Copy, Default)]
pub struct Ireland;

/// Code from a chart page href such as `aip_eidw_charts.htm`.
fn href_code(href: &str) -> Option<String> {
    href.split('_')
        .nth(1)
        .filter(|code| !code.is_empty())
        .map(str::to_uppercase)
}

/// Name carried by a `"{name} Chart Information"` link, if any.
fn folded_name(text: &str) -> Option<String> {
    (text.chars().count() > 19).then(|| drop_last_chars(text, 18))
}

impl RegionScraper for Ireland {
    fn region(&self) -> Region {
        Region::Ie
    }

    fn index_path(&self) -> &'static str {
        "aip_directory.htm"
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        for tr in document.select(selector!("tr")) {
            if tr.select(selector!("td")).next().is_none() {
                continue;
            }

            let mut href = String::new();
            let mut code = None;
            let mut name = String::new();
            for link in tr.select(selector!("a")) {
                let text = element_text(&link);
                if text.contains(CHART_LINK_TEXT) {
                    href = attr_or_empty(&link, "href");
                    code = href_code(&href);
                    if let Some(folded) = folded_name(&text) {
                        name = folded;
                    }
                } else {
                    name = text.trim().to_string();
                }
            }

            let Some(code) = code else {
                continue;
            };
            let url = join_url(base_url, &href);
            events.push(IndexEvent::add(
                AerodromeEntry::new(AerodromeType::Aerodrome, code, name).with_detail_url(url),
            ));
        }
        events
    }

    fn scrape_charts(&self, code: &str, document: &Html, base_url: &str) -> Vec<ChartLink> {
        let mut links = Vec::new();
        for tr in document.select(selector!("tr")) {
            if tr.select(selector!("td")).next().is_none() {
                continue;
            }

            let title = tr
                .select(selector!("p"))
                .last()
                .map(|p| strip_line_breaks(&element_text(&p)))
                .unwrap_or_default();
            let href = tr
                .select(selector!("a[href]"))
                .last()
                .map(|a| attr_or_empty(&a, "href"))
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

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://iaip.iaa.ie/iaip";

    #[test]
    fn test_href_code() {
        assert_eq!(href_code("aip_eidw_charts.htm"), Some("EIDW".to_string()));
        assert_eq!(href_code("about.htm"), None);
    }

    #[test]
    fn test_folded_name() {
        assert_eq!(folded_name("Shannon Chart Information"), Some("Shannon".to_string()));
        assert_eq!(folded_name("Chart Information"), None);
    }

    #[test]
    fn test_scrape_index() {
        let html = Html::parse_document(
            r#"<table>
              <tr><th>Aerodrome</th></tr>
              <tr><td><a href="aip_dublin.htm">Dublin</a></td><td><a href="aip_eidw_charts.htm">Chart Information</a></td></tr>
              <tr><td><a href="aip_einn_charts.htm">Shannon Chart Information</a></td></tr>
              <tr><td><a href="about.htm">About</a></td></tr>
            </table>"#,
        );
        let events = Ireland.scrape_index(&html, BASE);
        assert_eq!(
            events,
            vec![
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Aerodrome, "EIDW", "Dublin")
                        .with_detail_url("http://iaip.iaa.ie/iaip/aip_eidw_charts.htm")
                ),
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Aerodrome, "EINN", "Shannon")
                        .with_detail_url("http://iaip.iaa.ie/iaip/aip_einn_charts.htm")
                ),
            ]
        );
    }

    #[test]
    fn test_scrape_charts() {
        let html = Html::parse_document(
            r#"<table>
              <tr><td><p>Aerodrome
Chart</p></td><td><a href="AIP_Charts/EIDW/EIDW_ADC.pdf">PDF</a></td></tr>
              <tr><td><p>Heading only</p></td></tr>
            </table>"#,
        );
        let links = Ireland.scrape_charts("EIDW", &html, BASE);
        assert_eq!(
            links,
            vec![ChartLink::new(
                "EIDW",
                "AerodromeChart",
                "http://iaip.iaa.ie/iaip/AIP_Charts/EIDW/EIDW_ADC.pdf"
            )]
        );
    }
}
