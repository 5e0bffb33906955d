//! Belgium (skeyes eAIP).
//!
//! The menu links aerodromes with anchor ids `AD-2.EBBR` / `AD-3.EBxx`; the
//! link text is the code padded to six characters, then the name. The site's
//! certificate chain is broken, so certificate verification is off.
//!
//! Detail pages list charts as table rows: a title cell followed by a cell
//! holding an image and the PDF link.

use super::{IndexEvent, RegionScraper};
use crate::fetch::TlsPolicy;
use crate::macros::selector;
use crate::models::{AerodromeEntry, AerodromeType, ChartLink};
use crate::regions::Region;
use crate::utils::{attr_or_empty, element_text, join_url, skip_chars};
use scraper::Html;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct Belgium;

/// Section and code from a menu anchor id such as `AD-2.EBBR`.
fn parse_menu_id(id: &str) -> Option<(AerodromeType, String)> {
    let kind = match id.get(..5)? {
        "AD-2." => AerodromeType::Aerodrome,
        "AD-3." => AerodromeType::Heliport,
        _ => return None,
    };
    match id.split('.').collect::<Vec<_>>().as_slice() {
        [_, code] if !code.is_empty() => Some((kind, code.to_string())),
        _ => None,
    }
}

/// Aerodrome name from menu link text, after the padded code.
fn menu_name(text: &str) -> String {
    skip_chars(text, 6)
}

impl RegionScraper for Belgium {
    fn region(&self) -> Region {
        Region::Be
    }

    fn index_path(&self) -> &'static str {
        "html/eAIP/EB-menu-en-GB.html"
    }

    fn tls(&self) -> TlsPolicy {
        TlsPolicy::SkipVerify
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        for link in document.select(selector!("a")) {
            let title = attr_or_empty(&link, "title");
            let href = attr_or_empty(&link, "href");
            let id = attr_or_empty(&link, "id");
            let Some((kind, code)) = parse_menu_id(&id) else {
                continue;
            };
            if title.is_empty() || href.is_empty() {
                continue;
            }

            let name = menu_name(&element_text(&link));
            let page = href.replace(&format!("#{}", id), "");
            let url = join_url(base_url, &format!("html/eAIP/{}", page));
            events.push(IndexEvent::add(
                AerodromeEntry::new(kind, code, name).with_detail_url(url),
            ));
        }
        events
    }

    fn scrape_charts(&self, code: &str, document: &Html, base_url: &str) -> Vec<ChartLink> {
        let mut links = Vec::new();
        // The title sits in the cell before the one holding the link, and
        // may be the last cell of the previous row.
        let mut next_title = String::new();
        for tr in document.select(selector!("tr")) {
            let mut title = String::new();
            let mut href = String::new();
            for td in tr.select(selector!("td")) {
                title = next_title.replace('&', "and");
                next_title = element_text(&td).trim().to_string();

                for div in td.select(selector!("div")) {
                    if div.select(selector!("img")).next().is_none() {
                        continue;
                    }
                    for a in div.select(selector!("a[href]")) {
                        href = attr_or_empty(&a, "href");
                    }
                }
            }

            if !title.is_empty() && !href.is_empty() {
                let url = join_url(base_url, &href.replace("../", ""));
                let link = ChartLink::new(code, title.clone(), url);
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

    const BASE: &str = "https://be.example/eAIP_Main";

    #[test]
    fn test_parse_menu_id() {
        assert_eq!(
            parse_menu_id("AD-2.EBBR"),
            Some((AerodromeType::Aerodrome, "EBBR".to_string()))
        );
        assert_eq!(
            parse_menu_id("AD-3.EBZH"),
            Some((AerodromeType::Heliport, "EBZH".to_string()))
        );
        assert_eq!(parse_menu_id("AD-2.EBBR.1"), None);
        assert_eq!(parse_menu_id("AD-2plus"), None);
        assert_eq!(parse_menu_id("GEN-2.1"), None);
        assert_eq!(parse_menu_id("AD"), None);
    }

    #[test]
    fn test_menu_name() {
        assert_eq!(menu_name("EBBR  BRUSSELS"), "BRUSSELS");
    }

    #[test]
    fn test_scrape_index() {
        let html = Html::parse_document(
            r##"<a id="AD-2plus" href="#">AD 2</a>
            <a id="AD-2.EBBR" title="EBBR" href="EB-AD-2.EBBR-en-GB.html#AD-2.EBBR">EBBR  BRUSSELS</a>
            <a id="AD-2.EBAW" href="EB-AD-2.EBAW-en-GB.html#AD-2.EBAW">EBAW  ANTWERPEN</a>
            <a id="AD-3.EBZH" title="EBZH" href="EB-AD-3.EBZH-en-GB.html#AD-3.EBZH">EBZH  KIEWIT</a>"##,
        );
        let events = Belgium.scrape_index(&html, BASE);
        assert_eq!(
            events,
            vec![
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Aerodrome, "EBBR", "BRUSSELS")
                        .with_detail_url(format!("{}/html/eAIP/EB-AD-2.EBBR-en-GB.html", BASE))
                ),
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Heliport, "EBZH", "KIEWIT")
                        .with_detail_url(format!("{}/html/eAIP/EB-AD-3.EBZH-en-GB.html", BASE))
                ),
            ]
        );
    }

    #[test]
    fn test_scrape_charts() {
        let html = Html::parse_document(
            r#"<table>
                <tr><td>Aerodrome Chart &amp; Parking</td>
                    <td><div><img src="pdf.gif"><a href="../../pdf/EBBR-ADC.pdf">ADC</a></div></td></tr>
                <tr><td>Text only</td><td><div><a href="../x.pdf">x</a></div></td></tr>
            </table>"#,
        );
        let links = Belgium.scrape_charts("EBBR", &html, BASE);
        assert_eq!(
            links,
            vec![ChartLink::new(
                "EBBR",
                "Aerodrome Chart and Parking",
                format!("{}/pdf/EBBR-ADC.pdf", BASE)
            )]
        );
    }
}
