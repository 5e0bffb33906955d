//! Netherlands (LVNL eAIP).
//!
//! Standard eAIP menu: `AD-2plus` / `AD-3plus` anchors open each part and
//! aerodrome links read `"EHAM - AMSTERDAM/Schiphol"`. Links holding a
//! `span.Numbering` are part headings.
//!
//! Detail pages carry a `{code}-AD-2.24` section (ids are compared
//! case-insensitively) whose rows have the title in their first cell.

use super::{IndexEvent, RegionScraper, is_chart_section_id, menu_href, menu_section};
use crate::macros::selector;
use crate::models::{AerodromeEntry, ChartLink};
use crate::regions::Region;
use crate::utils::{attr_or_empty, element_text, has_class, join_url, skip_chars, take_chars};
use scraper::Html;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct Netherlands;

/// Code and name from menu text such as `"EHAM - AMSTERDAM/Schiphol"`.
fn split_menu_text(text: &str) -> (String, String) {
    let text = text.trim();
    (take_chars(text, 4), skip_chars(text, 7))
}

impl RegionScraper for Netherlands {
    fn region(&self) -> Region {
        Region::Nl
    }

    fn index_path(&self) -> &'static str {
        "html/eAIP/EH-menu-en-GB.html"
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        let mut kind = None;
        for link in document.select(selector!("a")) {
            let href = attr_or_empty(&link, "href");
            let id = attr_or_empty(&link, "id");
            if let Some(section) = menu_section(&id) {
                kind = Some(section);
            }

            let is_heading = link
                .select(selector!("span[class]"))
                .any(|span| has_class(&span, "Numbering") && !element_text(&span).is_empty());
            let (code, name) = split_menu_text(&element_text(&link));
            let Some(section) = kind else {
                continue;
            };
            if is_heading || href.is_empty() || href == "#" || code.is_empty() {
                continue;
            }

            let url = join_url(base_url, &format!("html/{}", menu_href(&href, &id)));
            events.push(IndexEvent::add(
                AerodromeEntry::new(section, code, name).with_detail_url(url),
            ));
        }
        events
    }

    fn scrape_charts(&self, code: &str, document: &Html, base_url: &str) -> Vec<ChartLink> {
        let code = code.to_uppercase();
        let mut links = Vec::new();
        for div in document.select(selector!("div[id]")) {
            let id = attr_or_empty(&div, "id").to_uppercase();
            if !is_chart_section_id(&id, &code) {
                continue;
            }

            for tr in div.select(selector!("tr")) {
                let title = tr
                    .select(selector!("td"))
                    .map(|td| element_text(&td))
                    .find(|text| !text.is_empty())
                    .unwrap_or_default();
                let href = tr
                    .select(selector!("a[href]"))
                    .last()
                    .map(|a| attr_or_empty(&a, "href"))
                    .unwrap_or_default();

                if !title.is_empty() && !href.is_empty() {
                    let url = join_url(base_url, &href.replace("../", ""));
                    let link = ChartLink::new(&code, title, url);
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
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AerodromeType;

    const BASE: &str = "https://eaip.lvnl.nl/2022-01-13-AIRAC";

    #[test]
    fn test_split_menu_text() {
        assert_eq!(
            split_menu_text("  EHAM - AMSTERDAM/Schiphol "),
            ("EHAM".to_string(), "AMSTERDAM/Schiphol".to_string())
        );
    }

    #[test]
    fn test_scrape_index() {
        let html = Html::parse_document(
            r##"<a id="GEN" href="../eAIP/EH-GEN-en-GB.html">GEN</a>
            <a id="AD-2plus" href="#"><span class="Numbering">AD 2</span> AERODROMES</a>
            <a id="AD-2.EHAM" href="../eAIP/EH-AD-2.EHAM-en-GB.html#AD-2.EHAM">EHAM - AMSTERDAM/Schiphol</a>
            <a id="AD-3plus" href="#"><span class="Numbering">AD 3</span> HELIPORTS</a>
            <a id="AD-3.EHHO" href="../eAIP/EH-AD-3.EHHO-en-GB.html#AD-3.EHHO">EHHO - HOOGEVEEN</a>"##,
        );
        let events = Netherlands.scrape_index(&html, BASE);
        assert_eq!(
            events,
            vec![
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Aerodrome, "EHAM", "AMSTERDAM/Schiphol")
                        .with_detail_url(format!("{}/html/eAIP/EH-AD-2.EHAM-en-GB.html", BASE))
                ),
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Heliport, "EHHO", "HOOGEVEEN")
                        .with_detail_url(format!("{}/html/eAIP/EH-AD-3.EHHO-en-GB.html", BASE))
                ),
            ]
        );
    }

    #[test]
    fn test_scrape_charts() {
        let html = Html::parse_document(
            r#"<div id="eham-AD-2.24"><table>
                <tr><td>Aerodrome Chart - ICAO</td><td><a href="../../documents/EHAM_ADC.pdf">pdf</a></td></tr>
                <tr><td>Heading</td></tr>
            </table></div>
            <div id="EHRD-AD-2.24"><table>
                <tr><td>Other</td><td><a href="x.pdf">pdf</a></td></tr>
            </table></div>"#,
        );
        let links = Netherlands.scrape_charts("EHAM", &html, BASE);
        assert_eq!(
            links,
            vec![ChartLink::new(
                "EHAM",
                "Aerodrome Chart - ICAO",
                format!("{}/documents/EHAM_ADC.pdf", BASE)
            )]
        );
    }
}
