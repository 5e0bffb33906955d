//! France (SIA eAIP).
//!
//! Menu anchors `AD-2plus` / `AD-3plus` open the aerodrome and heliport
//! parts. Aerodrome links carry ids like `AD-2.eAIP.LFPG` (code in the
//! third part) and text `"AD 2 LFPG PARIS CHARLES DE GAULLE"`. Links
//! containing a `span.Number` are part headings, not aerodromes.
//!
//! Charts on detail pages sit in `div.graphic-box` links whose text starts
//! with the ten character prefix `"AD 2 LFPG "`.

use super::{IndexEvent, RegionScraper, menu_section};
use crate::macros::selector;
use crate::models::{AerodromeEntry, ChartLink};
use crate::regions::Region;
use crate::utils::{
    attr_or_empty, collapse_whitespace, element_text, first_class, has_class, join_url, skip_chars,
};
use scraper::Html;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct France;

/// Code from an aerodrome anchor id such as `AD-2.eAIP.LFPG`.
fn id_code(id: &str) -> Option<String> {
    match id.split('.').collect::<Vec<_>>().as_slice() {
        [_, _, code] if !code.is_empty() => Some(code.to_string()),
        _ => None,
    }
}

/// Name from menu text, after the `"AD 2 "` prefix.
fn menu_name(text: &str) -> String {
    skip_chars(&collapse_whitespace(text), 5)
}

/// Chart title from link text, after the `"AD 2 LFPG "` prefix.
fn chart_title(text: &str) -> String {
    skip_chars(text, 10)
}

impl RegionScraper for France {
    fn region(&self) -> Region {
        Region::Fr
    }

    fn index_path(&self) -> &'static str {
        "html/eAIP/FR-menu-fr-FR.html"
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        let mut kind = None;
        for link in document.select(selector!("a")) {
            let href = attr_or_empty(&link, "href");
            let id = attr_or_empty(&link, "id");
            let mut code = None;
            if let Some(section) = menu_section(&id) {
                kind = Some(section);
            } else {
                code = id_code(&id);
            }

            let is_heading = link
                .select(selector!("span[class]"))
                .any(|span| has_class(&span, "Number") && !element_text(&span).trim().is_empty());
            let Some(code) = code else {
                continue;
            };
            if is_heading || href.is_empty() || href == "#" {
                continue;
            }

            let name = menu_name(&element_text(&link));
            let Some(section) = kind else {
                info!(%code, %name, "Unknown AD type found, ignoring");
                continue;
            };
            let page = href.replace(&format!("#{}", id), "");
            let url = join_url(base_url, &format!("html/eAIP/{}", page));
            events.push(IndexEvent::add(
                AerodromeEntry::new(section, code, name).with_detail_url(url),
            ));
        }
        events
    }

    fn scrape_charts(&self, code: &str, document: &Html, base_url: &str) -> Vec<ChartLink> {
        let mut links = Vec::new();
        for div in document.select(selector!("div[class]")) {
            if first_class(&div) != Some("graphic-box") {
                continue;
            }
            for a in div.select(selector!("a")) {
                let title = chart_title(&element_text(&a));
                let href = attr_or_empty(&a, "href");
                if title.is_empty() || href.is_empty() {
                    continue;
                }
                let url = join_url(base_url, &format!("html/eAIP/{}", href.replace(' ', "%20")));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AerodromeType;

    const BASE: &str = "https://www.sia.aviation-civile.gouv.fr/dvd/eAIP_24_FEB_2022/FRANCE/AIRAC-2022-02-24";

    #[test]
    fn test_id_code() {
        assert_eq!(id_code("AD-2.eAIP.LFPG"), Some("LFPG".to_string()));
        assert_eq!(id_code("AD-3.eAIP.LFPI"), Some("LFPI".to_string()));
        assert_eq!(id_code("AD-2.LFPG"), None);
        assert_eq!(id_code(""), None);
    }

    #[test]
    fn test_menu_name() {
        assert_eq!(menu_name("AD 2\n   LFPG  PARIS CDG"), "LFPG PARIS CDG");
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(chart_title("AD 2 LFPG ADC 01"), "ADC 01");
    }

    #[test]
    fn test_scrape_index() {
        let html = Html::parse_document(
            r##"<a id="GEN-0.1.x" href="FR-GEN-0.1-fr-FR.html">GEN 0.1 Preface</a>
            <a id="AD-2plus" href="#"><span class="Number">AD 2</span> Aérodromes</a>
            <a id="AD-2.eAIP.LFPG" href="FR-AD-2-LFPG-fr-FR.html#AD-2.eAIP.LFPG">AD 2 LFPG PARIS CDG</a>
            <a id="AD-2.part.x" href="FR-AD-2.part.html"><span class="Number">AD 2.1</span> Part</a>
            <a id="AD-3plus" href="#"><span class="Number">AD 3</span> Hélistations</a>
            <a id="AD-3.eAIP.LFPI" href="FR-AD-3-LFPI-fr-FR.html#AD-3.eAIP.LFPI">AD 3 LFPI PARIS ISSY</a>"##,
        );
        let events = France.scrape_index(&html, BASE);
        assert_eq!(
            events,
            vec![
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Aerodrome, "LFPG", "LFPG PARIS CDG")
                        .with_detail_url(format!("{}/html/eAIP/FR-AD-2-LFPG-fr-FR.html", BASE))
                ),
                IndexEvent::add(
                    AerodromeEntry::new(AerodromeType::Heliport, "LFPI", "LFPI PARIS ISSY")
                        .with_detail_url(format!("{}/html/eAIP/FR-AD-3-LFPI-fr-FR.html", BASE))
                ),
            ]
        );
    }

    #[test]
    fn test_scrape_charts() {
        let html = Html::parse_document(
            r#"<div class="graphic-box"><a href="../Cartes/LFPG/AD 2 LFPG ADC 01.pdf">AD 2 LFPG ADC 01</a></div>
            <div class="text-box"><a href="x.pdf">AD 2 LFPG XXX</a></div>"#,
        );
        let links = France.scrape_charts("LFPG", &html, BASE);
        assert_eq!(
            links,
            vec![ChartLink::new(
                "LFPG",
                "ADC 01",
                format!("{}/html/eAIP/../Cartes/LFPG/AD%202%20LFPG%20ADC%2001.pdf", BASE)
            )]
        );
    }
}
