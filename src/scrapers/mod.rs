//! Per-region AIP scrapers.
//!
//! Every supported site lays out its AIP differently, so each region gets
//! its own [`RegionScraper`]. A scraper only ever sees parsed documents;
//! fetching is done by the pipeline, which keeps each region testable
//! against fixture HTML.
//!
//! # Supported Sites
//!
//! | Region | Module | Index page | Charts |
//! |--------|--------|------------|--------|
//! | Belgium | [`be`] | eAIP menu, `AD-2.xxxx` anchor ids | Detail page table rows with an image cell |
//! | Spain | [`es`] | `AD 2`/`AD 3` headings over `id`/`desc` cells | Inline on the index page |
//! | Finland | [`fi`] | `level1` menu section links | `chartPad` cells |
//! | France | [`fr`] | eAIP menu, `AD-2plus`/`AD-3plus` ids | `graphic-box` divs |
//! | Ireland | [`ie`] | "Chart Information" links | Table rows |
//! | Netherlands | [`nl`] | eAIP menu | `{code}-AD-2.24` section |
//! | Norway | [`no`] | eAIP menu | `{code}-AD-2.24` section |
//! | Russia | [`ru`] | Menu script `ItemBegin`/`ItemLink`/`ItemEnd` calls | Inline in the menu script |
//! | Sweden | [`se`] | Folder tables | `document-name` list items |
//! | UK | [`uk`] | eAIP menu | `{code}-AD-2.24` section |
//!
//! Code and name extraction often relies on fixed character offsets in link
//! text. Each of those lives in a small parsing function with its own test.

use crate::fetch::TlsPolicy;
use crate::macros::selector;
use crate::models::{AerodromeEntry, AerodromeType, ChartLink};
use crate::regions::Region;
use crate::utils::{element_text, join_url, strip_line_breaks};
use scraper::Html;
use tracing::debug;

pub mod be;
pub mod es;
pub mod fi;
pub mod fr;
pub mod ie;
pub mod nl;
pub mod no;
pub mod ru;
pub mod se;
pub mod uk;

/// One step of index page discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEvent {
    /// A newly listed aerodrome. If it carries a detail URL the pipeline
    /// fetches that page and scrapes its charts.
    Add {
        entry: AerodromeEntry,
        quiet_duplicates: bool,
    },
    /// Charts listed inline on the index page for an aerodrome announced
    /// earlier.
    Attach {
        kind: AerodromeType,
        code: String,
        name: String,
        links: Vec<ChartLink>,
    },
}

impl IndexEvent {
    pub fn add(entry: AerodromeEntry) -> Self {
        IndexEvent::Add {
            entry,
            quiet_duplicates: false,
        }
    }
}

/// Scraping strategy for one region's AIP site.
pub trait RegionScraper {
    fn region(&self) -> Region;

    /// Index page path, relative to the base URL.
    fn index_path(&self) -> &'static str;

    fn tls(&self) -> TlsPolicy {
        TlsPolicy::Verify
    }

    fn index_url(&self, base_url: &str) -> String {
        join_url(base_url, self.index_path())
    }

    /// Walk the index page and report aerodromes (and inline charts) in
    /// document order.
    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent>;

    /// Charts listed on an aerodrome's detail page.
    fn scrape_charts(&self, code: &str, _document: &Html, _base_url: &str) -> Vec<ChartLink> {
        debug!(region = %self.region(), %code, "Region lists charts on its index page");
        Vec::new()
    }
}

/// Scraper for `region`.
pub fn for_region(region: Region) -> Box<dyn RegionScraper> {
    match region {
        Region::Be => Box::new(be::Belgium),
        Region::Es => Box::new(es::Spain),
        Region::Fi => Box::new(fi::Finland),
        Region::Fr => Box::new(fr::France),
        Region::Ie => Box::new(ie::Ireland),
        Region::Nl => Box::new(nl::Netherlands),
        Region::No => Box::new(no::Norway),
        Region::Ru => Box::new(ru::Russia),
        Region::Se => Box::new(se::Sweden),
        Region::Uk => Box::new(uk::UnitedKingdom),
    }
}

/// Section of an eAIP menu anchor id: `AD-2plus` / `AD-3plus`.
pub(crate) fn menu_section(id: &str) -> Option<AerodromeType> {
    match id {
        "AD-2plus" => Some(AerodromeType::Aerodrome),
        "AD-3plus" => Some(AerodromeType::Heliport),
        _ => None,
    }
}

/// `href` with the `#{id}` fragment and any `../` segments removed.
pub(crate) fn menu_href(href: &str, id: &str) -> String {
    href.replace("../", "").replace(&format!("#{}", id), "")
}

pub(crate) fn is_chart_section_id(id: &str, code: &str) -> bool {
    id == format!("{}-AD-2.24", code) || id == format!("{}-AD-3.23", code)
}

/// Charts from the `{code}-AD-2.24` / `{code}-AD-3.23` section of an eAIP
/// aerodrome page, where each row carries the title in a `<p>` and the PDF
/// in an `<a>`.
///
/// The title carries over to following rows until a new `<p>` appears.
pub(crate) fn eaip_chart_section(
    code: &str,
    document: &Html,
    base_url: &str,
    title_fixup: impl Fn(String) -> String,
) -> Vec<ChartLink> {
    let mut links = Vec::new();
    for div in document.select(selector!("div[id]")) {
        let id = div.value().attr("id").unwrap_or_default();
        if !is_chart_section_id(id, code) {
            continue;
        }

        let mut title = String::new();
        let mut href = String::new();
        for tr in div.select(selector!("tr")) {
            for p in tr.select(selector!("p")) {
                title = title_fixup(strip_line_breaks(&element_text(&p)));
                href.clear();
            }
            for a in tr.select(selector!("a[href]")) {
                href = a.value().attr("href").unwrap_or_default().to_string();
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
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_section() {
        assert_eq!(menu_section("AD-2plus"), Some(AerodromeType::Aerodrome));
        assert_eq!(menu_section("AD-3plus"), Some(AerodromeType::Heliport));
        assert_eq!(menu_section("AD-1plus"), None);
    }

    #[test]
    fn test_menu_href() {
        assert_eq!(
            menu_href("../eAIP/EG-AD-2.EGLL-en-GB.html#AD-2.EGLL", "AD-2.EGLL"),
            "eAIP/EG-AD-2.EGLL-en-GB.html"
        );
    }

    #[test]
    fn test_every_region_has_a_scraper() {
        for region in Region::ALL {
            assert_eq!(for_region(region).region(), region);
        }
    }

    #[test]
    fn test_inline_regions_list_no_detail_charts() {
        let html = Html::parse_document(r#"<div id="LEMD-AD-2.24"><a href="x.pdf">x</a></div>"#);
        for region in [Region::Es, Region::Ru] {
            assert!(for_region(region).scrape_charts("LEMD", &html, "https://base").is_empty());
        }
    }

    #[test]
    fn test_chart_section_title_carries_over_rows() {
        let html = Html::parse_document(
            r#"<div id="EGLL-AD-2.24"><table>
                <tr><td><p>Aerodrome
Chart</p></td><td><a href="../pdf/adc.pdf">pdf</a></td></tr>
                <tr><td></td><td><a href="../pdf/adc-2.pdf">pdf</a></td></tr>
                <tr><td><p>No link</p></td></tr>
            </table></div>
            <div id="EGKK-AD-2.24"><table>
                <tr><td><p>Other</p></td><td><a href="x.pdf">pdf</a></td></tr>
            </table></div>"#,
        );
        let links = eaip_chart_section("EGLL", &html, "https://base", |t| t);
        assert_eq!(
            links,
            vec![
                ChartLink::new("EGLL", "AerodromeChart", "https://base/pdf/adc.pdf"),
                ChartLink::new("EGLL", "AerodromeChart", "https://base/pdf/adc-2.pdf"),
            ]
        );
    }
}
