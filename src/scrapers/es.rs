//! Spain (ENAIRE).
//!
//! A single page holds everything. `<h1>AD 2</h1>` and `<h1>AD 3</h1>` open
//! the aerodrome and heliport sections; each starts with a list of
//! `td.id` / `td.desc` cell pairs (code, name). Any other `<h1>` inside a
//! section starts the chart listings, where `td.id` carries the code at
//! characters 5..9 and an `onclick` opening the PDF, and the following
//! `td.desc` carries the chart title.
//!
//! Chart rows for one aerodrome are contiguous; they are gathered until the
//! code changes and then attached in one go.

use super::{IndexEvent, RegionScraper};
use crate::macros::selector;
use crate::models::{AerodromeEntry, AerodromeType, ChartLink};
use crate::regions::Region;
use crate::utils::{char_range, element_text, first_class, join_url, take_chars};
use scraper::Html;
use std::collections::HashMap;
use std::mem;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct Spain;

/// Code from an aerodrome list cell; dual codes like `GCXO/GCXO` keep the first.
fn list_code(text: &str) -> String {
    take_chars(text, 4)
}

/// Code from a chart row cell such as `"AD 2 LEMD ADC"`.
fn chart_row_code(text: &str) -> String {
    char_range(text, 5, 9)
}

/// PDF path from an `onclick` such as `window.open('AIP/AD/LEMD.pdf')`.
fn onclick_pdf(onclick: &str) -> Option<String> {
    if !onclick.contains(".pdf") {
        return None;
    }
    onclick.split('\'').nth(1).map(str::to_string)
}

#[derive(Debug)]
struct PendingCharts {
    kind: AerodromeType,
    code: String,
    links: Vec<ChartLink>,
}

fn flush(
    pending: &mut Option<PendingCharts>,
    names: &HashMap<String, String>,
    events: &mut Vec<IndexEvent>,
) {
    if let Some(PendingCharts { kind, code, links }) = pending.take() {
        let name = names.get(&code).cloned().unwrap_or_default();
        events.push(IndexEvent::Attach {
            kind,
            code,
            name,
            links,
        });
    }
}

impl RegionScraper for Spain {
    fn region(&self) -> Region {
        Region::Es
    }

    fn index_path(&self) -> &'static str {
        "AIP-es.html"
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        let mut names: HashMap<String, String> = HashMap::new();
        let mut pending: Option<PendingCharts> = None;

        let mut kind: Option<AerodromeType> = None;
        let mut in_charts = false;
        let mut code = String::new();
        let mut name = String::new();
        let mut title = String::new();
        let mut href = String::new();

        for item in document.select(selector!("h1, td")) {
            let text = element_text(&item);

            if item.value().name() == "h1" {
                match text.trim() {
                    "AD 2" => {
                        flush(&mut pending, &names, &mut events);
                        kind = Some(AerodromeType::Aerodrome);
                        in_charts = false;
                    }
                    "AD 3" => {
                        flush(&mut pending, &names, &mut events);
                        kind = Some(AerodromeType::Heliport);
                        in_charts = false;
                    }
                    _ => in_charts = kind.is_some(),
                }
                continue;
            }

            let Some(section) = kind else {
                continue;
            };
            let class = first_class(&item);

            if !in_charts {
                match class {
                    Some("id") => code = list_code(&text),
                    Some("desc") => name = text.trim().to_string(),
                    _ => {}
                }
                if !code.is_empty() && !name.is_empty() {
                    names.insert(code.clone(), name.clone());
                    events.push(IndexEvent::add(AerodromeEntry::new(
                        section,
                        mem::take(&mut code),
                        mem::take(&mut name),
                    )));
                }
                continue;
            }

            if class == Some("id") {
                code = chart_row_code(&text);
                if let Some(onclick) = item.value().attr("onclick") {
                    match onclick_pdf(onclick) {
                        Some(path) => href = join_url(base_url, &path),
                        None => {
                            code.clear();
                            href.clear();
                            title.clear();
                        }
                    }
                }
            }
            if class == Some("desc") && !code.is_empty() {
                title = text.trim().replace('&', "and");
            }

            if !code.is_empty() && !title.is_empty() && !href.is_empty() {
                let link = ChartLink::new(&code, mem::take(&mut title), mem::take(&mut href));
                debug!(
                    %code,
                    title = %link.title,
                    url = %link.url,
                    filename = %link.filename,
                    "Found chart"
                );

                let same_aerodrome = pending
                    .as_ref()
                    .is_some_and(|p| p.code == code && p.kind == section);
                if same_aerodrome {
                    if let Some(p) = pending.as_mut() {
                        p.links.push(link);
                    }
                } else {
                    flush(&mut pending, &names, &mut events);
                    pending = Some(PendingCharts {
                        kind: section,
                        code: code.clone(),
                        links: vec![link],
                    });
                }
                code.clear();
            }
        }

        flush(&mut pending, &names, &mut events);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://aip.enaire.es/AIP";

    fn chart(code: &str, title: &str, path: &str) -> ChartLink {
        ChartLink::new(code, title, format!("{}/{}", BASE, path))
    }

    #[test]
    fn test_code_offsets() {
        assert_eq!(list_code("GCXO/GCXO"), "GCXO");
        assert_eq!(chart_row_code("AD 2 LEMD ADC"), "LEMD");
        assert_eq!(chart_row_code("AD 2"), "");
    }

    #[test]
    fn test_onclick_pdf() {
        assert_eq!(
            onclick_pdf("window.open('contenido_AIP/AD/AD2/LEMD/LE_AD_2_LEMD_ADC_1_en.pdf')"),
            Some("contenido_AIP/AD/AD2/LEMD/LE_AD_2_LEMD_ADC_1_en.pdf".to_string())
        );
        assert_eq!(onclick_pdf("window.open('folder.html')"), None);
    }

    fn fixture() -> Html {
        Html::parse_document(
            r#"<h1>AD 2</h1>
            <table>
              <tr><td class="id">LEAB</td><td class="desc">ALBACETE</td></tr>
              <tr><td class="id">LEMD/LEMD</td><td class="desc">MADRID</td></tr>
            </table>
            <h1>Cartas</h1>
            <table>
              <tr><td class="id" onclick="window.open('AD/LEAB_ADC.pdf')">AD 2 LEAB ADC</td><td class="desc">Aerodrome chart</td></tr>
              <tr><td class="id" onclick="window.open('AD/LEAB_PDC.pdf')">AD 2 LEAB PDC</td><td class="desc">Parking &amp; docking</td></tr>
              <tr><td class="id" onclick="window.open('AD/LEMD.html')">AD 2 LEMD TXT</td><td class="desc">Text pages</td></tr>
              <tr><td class="id" onclick="window.open('AD/LEMD_ADC.pdf')">AD 2 LEMD ADC</td><td class="desc">Aerodrome chart</td></tr>
            </table>
            <h1>AD 3</h1>
            <table><tr><td class="id">LEHC</td><td class="desc">HELIPUERTO</td></tr></table>
            <h1>Cartas</h1>
            <table>
              <tr><td class="id" onclick="window.open('AD/LEHC_ADC.pdf')">AD 3 LEHC ADC</td><td class="desc">Heliport chart</td></tr>
            </table>"#,
        )
    }

    #[test]
    fn test_scrape_index_events() {
        let events = Spain.scrape_index(&fixture(), BASE);
        let aero = AerodromeType::Aerodrome;
        let heli = AerodromeType::Heliport;
        assert_eq!(
            events,
            vec![
                IndexEvent::add(AerodromeEntry::new(aero, "LEAB", "ALBACETE")),
                IndexEvent::add(AerodromeEntry::new(aero, "LEMD", "MADRID")),
                IndexEvent::Attach {
                    kind: aero,
                    code: "LEAB".to_string(),
                    name: "ALBACETE".to_string(),
                    links: vec![
                        chart("LEAB", "Aerodrome chart", "AD/LEAB_ADC.pdf"),
                        chart("LEAB", "Parking and docking", "AD/LEAB_PDC.pdf"),
                    ],
                },
                IndexEvent::Attach {
                    kind: aero,
                    code: "LEMD".to_string(),
                    name: "MADRID".to_string(),
                    links: vec![chart("LEMD", "Aerodrome chart", "AD/LEMD_ADC.pdf")],
                },
                IndexEvent::add(AerodromeEntry::new(heli, "LEHC", "HELIPUERTO")),
                IndexEvent::Attach {
                    kind: heli,
                    code: "LEHC".to_string(),
                    name: "HELIPUERTO".to_string(),
                    links: vec![chart("LEHC", "Heliport chart", "AD/LEHC_ADC.pdf")],
                },
            ]
        );
    }

    #[test]
    fn test_no_detail_pages() {
        let events = Spain.scrape_index(&fixture(), BASE);
        for event in events {
            if let IndexEvent::Add { entry, .. } = event {
                assert!(entry.detail_url.is_none());
            }
        }
    }
}
