//! United Kingdom (NATS eAIP).
//!
//! Menu links open with the ICAO code and carry the aerodrome name in a
//! `span.SD`. Part headings have a `title` attribute and are skipped.

use super::{IndexEvent, RegionScraper, eaip_chart_section, menu_href, menu_section};
use crate::macros::selector;
use crate::models::{AerodromeEntry, ChartLink};
use crate::regions::Region;
use crate::utils::{attr_or_empty, element_text, has_class, join_url, strip_line_breaks};
use scraper::Html;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedKingdom;

impl RegionScraper for UnitedKingdom {
    fn region(&self) -> Region {
        Region::Uk
    }

    fn index_path(&self) -> &'static str {
        "html/eAIP/EG-menu-en-GB.html"
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

            let text = element_text(&link);
            let code = text.split_whitespace().next().unwrap_or_default().to_string();
            let name = link
                .select(selector!("span[class]"))
                .filter(|span| has_class(span, "SD"))
                .last()
                .map(|span| element_text(&span))
                .unwrap_or_default();

            let Some(section) = kind else {
                continue;
            };
            if !title.is_empty() || href.is_empty() || href == "#" || code.is_empty() {
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
        eaip_chart_section(code, document, base_url, |title| title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AerodromeType;

    const BASE: &str = "https://www.aurora.nats.co.uk/htmlAIP/Publications/2022-03-24-AIRAC";

    #[test]
    fn test_scrape_index() {
        let html = Html::parse_document(
            r##"<a id="AD-2plus" href="#" title="AD 2 AERODROMES">AD 2</a>
            <a id="AD-2.EGLL" href="../eAIP/EG-AD-2.EGLL-en-GB.html#AD-2.EGLL">EGLL <span class="SD">LONDON HEATHROW</span></a>
            <a href="#">Collapse</a>
            <a id="AD-3plus" href="#" title="AD 3 HELIPORTS">AD 3</a>
            <a id="AD-3.EGLW" href="../eAIP/EG-AD-3.EGLW-en-GB.html#AD-3.EGLW">EGLW <span class="SD">LONDON HELIPORT</span></a>"##,
        );
        let events = UnitedKingdom.scrape_index(&html, BASE);
        assert_eq!(
            events,
            vec![
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Aerodrome, "EGLL", "LONDON HEATHROW")
                        .with_detail_url(format!("{}/html/eAIP/EG-AD-2.EGLL-en-GB.html", BASE))
                ),
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Heliport, "EGLW", "LONDON HELIPORT")
                        .with_detail_url(format!("{}/html/eAIP/EG-AD-3.EGLW-en-GB.html", BASE))
                ),
            ]
        );
    }

    #[test]
    fn test_links_before_any_section_are_ignored() {
        let html =
            Html::parse_document(r#"<a id="GEN-0.1" href="../eAIP/EG-GEN-0.1-en-GB.html">GEN 0.1</a>"#);
        assert!(UnitedKingdom.scrape_index(&html, BASE).is_empty());
    }

    #[test]
    fn test_scrape_charts() {
        let html = Html::parse_document(
            r#"<div id="EGLW-AD-3.23"><table>
                <tr><td><p>Heliport Chart</p></td><td><a href="../../pdf/EGLW.pdf">pdf</a></td></tr>
            </table></div>"#,
        );
        let links = UnitedKingdom.scrape_charts("EGLW", &html, BASE);
        assert_eq!(
            links,
            vec![ChartLink::new("EGLW", "Heliport Chart", format!("{}/pdf/EGLW.pdf", BASE))]
        );
    }
}
