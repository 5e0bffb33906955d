//! In-memory collection of everything one run discovers.
//!
//! Aerodromes are grouped by [`AerodromeType`] and keyed by name or code
//! according to the configured [`SortKey`]. Keys are unique per group: a
//! second aerodrome with the same key is a duplicate and is dropped.

use crate::models::{AerodromeEntry, AerodromeType, ChartLink, ChartSet, SortKey};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// One aerodrome and the charts attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aerodrome {
    pub entry: AerodromeEntry,
    pub charts: ChartSet,
}

#[derive(Debug, Default)]
pub struct Aggregator {
    sort_key: SortKey,
    groups: BTreeMap<AerodromeType, BTreeMap<String, Aerodrome>>,
}

impl Aggregator {
    pub fn new(sort_key: SortKey) -> Self {
        Self {
            sort_key,
            groups: BTreeMap::new(),
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn key_for(&self, code: &str, name: &str) -> String {
        self.sort_key.key(code, name)
    }

    /// Add a newly discovered aerodrome; returns `false` for a duplicate.
    ///
    /// `quiet_duplicates` suppresses the duplicate notice for sites that
    /// repeat the same listing several times.
    pub fn add(&mut self, entry: AerodromeEntry, quiet_duplicates: bool) -> bool {
        let key = self.key_for(&entry.code, &entry.name);
        let group = self.groups.entry(entry.kind).or_default();
        if group.contains_key(&key) {
            if !quiet_duplicates {
                info!(
                    sort_key = %self.sort_key,
                    %key,
                    kind = %entry.kind,
                    "Duplicate aerodrome found, ignoring"
                );
            }
            return false;
        }

        debug!(
            kind = %entry.kind,
            code = %entry.code,
            name = %entry.name,
            url = ?entry.detail_url,
            "Added aerodrome"
        );
        group.insert(
            key,
            Aerodrome {
                entry,
                charts: ChartSet::default(),
            },
        );
        true
    }

    /// Replace the charts of an aerodrome added earlier.
    ///
    /// Links for a key that was never added are logged and dropped; returns
    /// whether they were attached.
    pub fn attach_links(&mut self, kind: AerodromeType, key: &str, links: Vec<ChartLink>) -> bool {
        match self.groups.get_mut(&kind).and_then(|group| group.get_mut(key)) {
            Some(aerodrome) => {
                aerodrome.charts = ChartSet::from_links(&aerodrome.entry.code, links);
                debug!(%kind, %key, charts = aerodrome.charts.len(), "Attached chart links");
                true
            }
            None => {
                info!(
                    sort_key = %self.sort_key,
                    %key,
                    %kind,
                    "Unknown aerodrome, not adding links"
                );
                false
            }
        }
    }

    pub fn get(&self, kind: AerodromeType, key: &str) -> Option<&Aerodrome> {
        self.groups.get(&kind).and_then(|group| group.get(key))
    }

    /// Aerodromes of one type in ascending key order.
    pub fn group(&self, kind: AerodromeType) -> impl Iterator<Item = &Aerodrome> {
        self.groups.get(&kind).into_iter().flat_map(|group| group.values())
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of aerodromes with at least one chart.
    pub fn charted(&self) -> usize {
        self.groups
            .values()
            .flat_map(BTreeMap::values)
            .filter(|a| !a.charts.is_empty())
            .count()
    }
}
