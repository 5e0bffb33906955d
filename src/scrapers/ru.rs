//! Russia (CAIGA AIP).
//!
//! The menu page builds its tree from inline script calls, one per line:
//!
//! ```text
//! ItemBegin("id", "icon", "UUEE. Moscow/Sheremetyevo");
//! ItemLink("../pdf/UUEE-ADC.pdf", "(1) Aerodrome chart");
//! ItemEnd();
//! ```
//!
//! `ItemBegin` with the label `"AD 2. Aerodromes"` opens the aerodrome part,
//! `"AD 3 Helidromes"` switches to heliports and the AD 4 labels end the
//! parts of interest. Aerodrome folders are labelled `"CODE. Name"`; their
//! links are the charts. The site repeats aerodrome folders, so duplicates
//! are expected and added quietly.

use super::{IndexEvent, RegionScraper};
use crate::macros::selector;
use crate::models::{AerodromeEntry, AerodromeType, ChartLink};
use crate::regions::Region;
use crate::utils::{join_url, skip_chars, take_chars};
use scraper::Html;
use std::mem;
use tracing::debug;

const AERODROMES_LABEL: &str = "AD 2. Aerodromes";
const HELIPORTS_LABEL: &str = "AD 3 Helidromes";
const OTHER_LABELS: [&str; 3] = [
    "AD 4 Other aerodromes",
    "AD 4. Other aerodromes",
    "Aerodromes classes 4D",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Russia;

/// Arguments of a menu call line such as `ItemLink("a", "b");`. Quotes are
/// dropped, so commas inside an argument split it further.
fn call_args(line: &str, call: &str) -> Option<Vec<String>> {
    let inner = line
        .trim()
        .strip_prefix(call)?
        .strip_prefix('(')?
        .trim_end_matches(';')
        .strip_suffix(')')?;
    Some(
        inner
            .replace("\", ", ",")
            .replace('"', "")
            .split(',')
            .map(str::to_string)
            .collect(),
    )
}

/// Code and name from a folder label such as `"UUEE. Moscow/Sheremetyevo"`.
///
/// Part labels like `"AD 2. Aerodromes"` share the shape; a code must be
/// alphanumeric.
fn folder_code(label: &str) -> Option<(String, String)> {
    if label.chars().nth(4) != Some('.') {
        return None;
    }
    let code = take_chars(label, 4);
    if !code.chars().all(char::is_alphanumeric) {
        return None;
    }
    Some((code, skip_chars(label, 5).trim().to_string()))
}

/// Chart title from `ItemLink` arguments, without a leading `"(n) "` tag.
fn link_title(args: &[String]) -> String {
    let title = args.get(1..).unwrap_or_default().concat();
    if title.contains('(') {
        title.split(") ").skip(1).collect()
    } else {
        title
    }
}

#[derive(Debug, Default)]
struct MenuState {
    kind: Option<AerodromeType>,
    in_folder: bool,
    code: String,
    name: String,
    links: Vec<ChartLink>,
}

impl MenuState {
    fn item_begin(&mut self, args: &[String], events: &mut Vec<IndexEvent>) {
        let label = args.get(2).map(String::as_str).unwrap_or_default();

        let Some(kind) = self.kind else {
            if label == AERODROMES_LABEL {
                debug!("Found aerodrome section");
                self.kind = Some(AerodromeType::Aerodrome);
                self.in_folder = true;
            } else {
                self.in_folder = false;
            }
            return;
        };
        self.in_folder = true;

        if label == HELIPORTS_LABEL {
            debug!("Found heliport section");
            self.kind = Some(AerodromeType::Heliport);
            return;
        }
        if OTHER_LABELS.contains(&label) {
            debug!(%label, "Found other section, stopping");
            self.kind = None;
            self.in_folder = false;
            return;
        }

        // Nested folders keep the code, name and charts of the enclosing
        // aerodrome.
        if let Some((code, name)) = folder_code(label) {
            self.code = code;
            self.name = name;
        }
        if !self.code.is_empty() && !self.name.is_empty() {
            events.push(IndexEvent::Add {
                entry: AerodromeEntry::new(kind, self.code.clone(), self.name.clone()),
                quiet_duplicates: true,
            });
        }
    }

    fn item_link(&mut self, args: &[String], base_url: &str) {
        if !self.in_folder {
            return;
        }
        let href = args.first().map(String::as_str).unwrap_or_default();
        let title = link_title(args);
        if self.code.is_empty() || title.is_empty() || href.is_empty() {
            return;
        }

        let url = join_url(base_url, &href.replace("../", ""));
        let link = ChartLink::new(&self.code, title, url);
        debug!(
            code = %self.code,
            title = %link.title,
            url = %link.url,
            filename = %link.filename,
            "Found chart"
        );
        self.links.push(link);
    }

    fn item_end(&mut self, events: &mut Vec<IndexEvent>) {
        if !self.in_folder {
            return;
        }
        self.in_folder = false;

        let links = mem::take(&mut self.links);
        // Repeated folders list no charts; attaching them would wipe the
        // charts found earlier.
        let (Some(kind), false, false) = (self.kind, self.code.is_empty(), links.is_empty()) else {
            return;
        };
        events.push(IndexEvent::Attach {
            kind,
            code: self.code.clone(),
            name: self.name.clone(),
            links,
        });
    }
}

impl RegionScraper for Russia {
    fn region(&self) -> Region {
        Region::Ru
    }

    fn index_path(&self) -> &'static str {
        "html/menueng.htm"
    }

    fn scrape_index(&self, document: &Html, base_url: &str) -> Vec<IndexEvent> {
        let mut events = Vec::new();
        for script in document.select(selector!("script")) {
            if script.value().attr("language").is_some() {
                continue;
            }

            let mut state = MenuState::default();
            let body: String = script.text().collect();
            for line in body.lines() {
                if let Some(args) = call_args(line, "ItemBegin") {
                    state.item_begin(&args, &mut events);
                } else if let Some(args) = call_args(line, "ItemLink") {
                    state.item_link(&args, base_url);
                } else if line.trim().starts_with("ItemEnd") {
                    state.item_end(&mut events);
                }
            }
        }
        events
    }
}
