//! Data models for discovered aerodromes and their charts.
//!
//! - [`AerodromeType`]: the two AIP sections a listing can belong to
//! - [`AerodromeEntry`]: one aerodrome or heliport found on a region's index page
//! - [`ChartLink`]: one chart PDF found for an aerodrome
//! - [`ChartSet`]: the ordered, title-keyed charts of one aerodrome
//! - [`SortKey`]: whether output is keyed by aerodrome name or code
//! - [`ScheduleHeader`]: the `"0: ..."` header entry of the manifest

use crate::utils::chart_filename;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// AIP section an aerodrome listing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AerodromeType {
    /// AD 2, aerodromes.
    Aerodrome,
    /// AD 3, heliports.
    Heliport,
}

impl AerodromeType {
    pub const ALL: [AerodromeType; 2] = [AerodromeType::Aerodrome, AerodromeType::Heliport];

    /// Group name used in the manifest.
    pub fn section(self) -> &'static str {
        match self {
            AerodromeType::Aerodrome => "AD 2 AERODROMES",
            AerodromeType::Heliport => "AD 3 HELIPORT",
        }
    }
}

impl fmt::Display for AerodromeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// An aerodrome or heliport found on a region's index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AerodromeEntry {
    /// Site-specific code, usually the ICAO location indicator.
    pub code: String,
    /// Display name as printed on the site.
    pub name: String,
    pub kind: AerodromeType,
    /// Page listing the aerodrome's charts. `None` for regions that list
    /// charts inline on the index page.
    pub detail_url: Option<String>,
}

impl AerodromeEntry {
    pub fn new(kind: AerodromeType, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            kind,
            detail_url: None,
        }
    }

    pub fn with_detail_url(mut self, url: impl Into<String>) -> Self {
        self.detail_url = Some(url.into());
        self
    }
}

/// A chart PDF for one aerodrome.
///
/// Serializes to the `{"url": ..., "filename": ...}` object the chart viewer
/// reads; the title is the key of that object and is not repeated inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLink {
    #[serde(skip)]
    pub title: String,
    pub url: String,
    pub filename: String,
}

impl ChartLink {
    /// Build a link whose filename is derived from the aerodrome code and title.
    pub fn new(code: &str, title: impl Into<String>, url: impl Into<String>) -> Self {
        let title = title.into();
        let filename = chart_filename(code, &title);
        Self {
            title,
            url: url.into(),
            filename,
        }
    }

    /// Build a link with a fixed filename.
    pub fn with_filename(
        title: impl Into<String>,
        url: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            filename: filename.into(),
        }
    }
}

/// Charts of one aerodrome, keyed by title in first-seen order.
///
/// A repeated title replaces the earlier link in place. Sites do publish
/// two charts under one title now and then, so the replacement is logged
/// for the operator to review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSet {
    charts: Vec<ChartLink>,
}

impl ChartSet {
    pub fn from_links(owner: &str, links: impl IntoIterator<Item = ChartLink>) -> Self {
        let mut set = ChartSet::default();
        for link in links {
            set.insert(owner, link);
        }
        set
    }

    pub fn insert(&mut self, owner: &str, link: ChartLink) {
        match self.charts.iter_mut().find(|c| c.title == link.title) {
            Some(existing) => {
                warn!(
                    aerodrome = %owner,
                    title = %link.title,
                    replaced = %existing.url,
                    url = %link.url,
                    "Duplicate chart title, keeping the later link"
                );
                *existing = link;
            }
            None => self.charts.push(link),
        }
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartLink> {
        self.charts.iter()
    }
}

/// How aerodromes are keyed, ordered and labelled in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Code,
}

impl SortKey {
    /// Aggregation key; also the sort order of the output.
    pub fn key(self, code: &str, name: &str) -> String {
        match self {
            SortKey::Name => name.to_string(),
            SortKey::Code => code.to_string(),
        }
    }

    /// Label of an aerodrome entry in the manifest.
    pub fn label(self, code: &str, name: &str) -> String {
        match self {
            SortKey::Name => format!("{} : {}", name, code),
            SortKey::Code => format!("{} - {}", code, name),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => f.write_str("NAME"),
            SortKey::Code => f.write_str("CODE"),
        }
    }
}

/// The `"0: Generated - ..."` / `"0: Published - ..."` manifest header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleHeader {
    pub label: String,
    /// Fixed links shown under the header (the UK publication schedule).
    pub links: Vec<ChartLink>,
}
