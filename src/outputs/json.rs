//! JSON manifest generation for the chart viewer.
//!
//! # Output Structure
//!
//! ```text
//! {
//!   "eBagLib": {
//!     "0: Published - 2022-02-24": { ...fixed links... },
//!     "AD 2 AERODROMES": {
//!       "LONDON HEATHROW : EGLL": {
//!         "EGLL AD 2.24-1 Aerodrome Chart": { "url": "...", "filename": "..." }
//!       }
//!     },
//!     "AD 3 HELIPORT": { ... }
//!   }
//! }
//! ```
//!
//! Aerodromes without charts are left out, and so is a type group left
//! with no aerodromes. Object keys keep insertion order, which is the
//! aggregator's sorted key order.

use crate::aggregator::Aggregator;
use crate::error::AipError;
use crate::models::{AerodromeType, ChartLink, ScheduleHeader};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

const ROOT_KEY: &str = "eBagLib";

fn chart_object<'a>(
    links: impl Iterator<Item = &'a ChartLink>,
) -> Result<Map<String, Value>, AipError> {
    let mut object = Map::new();
    for link in links {
        object.insert(link.title.clone(), serde_json::to_value(link)?);
    }
    Ok(object)
}

/// Build the manifest as a JSON value.
pub fn manifest(header: &ScheduleHeader, aggregator: &Aggregator) -> Result<Value, AipError> {
    let sort_key = aggregator.sort_key();
    let mut library = Map::new();
    library.insert(
        header.label.clone(),
        Value::Object(chart_object(header.links.iter())?),
    );

    for kind in AerodromeType::ALL {
        let mut group = Map::new();
        for aerodrome in aggregator.group(kind).filter(|a| !a.charts.is_empty()) {
            let label = sort_key.label(&aerodrome.entry.code, &aerodrome.entry.name);
            group.insert(label, Value::Object(chart_object(aerodrome.charts.iter())?));
        }
        if !group.is_empty() {
            library.insert(kind.section().to_string(), Value::Object(group));
        }
    }

    let mut root = Map::new();
    root.insert(ROOT_KEY.to_string(), Value::Object(library));
    Ok(Value::Object(root))
}

/// Render the manifest as pretty-printed JSON text.
pub fn render(header: &ScheduleHeader, aggregator: &Aggregator) -> Result<String, AipError> {
    let mut text = serde_json::to_string_pretty(&manifest(header, aggregator)?)?;
    text.push('\n');
    Ok(text)
}

/// Write rendered manifest text to `{output_dir}/{filename}`.
#[instrument(level = "info", skip(contents), fields(bytes = contents.len()))]
pub async fn write_manifest(
    output_dir: &str,
    filename: &str,
    contents: &str,
) -> Result<PathBuf, AipError> {
    let path = Path::new(output_dir).join(filename);
    info!(path = %path.display(), "Generating output file");
    if let Err(source) = fs::write(&path, contents).await {
        error!(path = %path.display(), error = %source, "Failed to write manifest");
        return Err(AipError::Write {
            path: path.display().to_string(),
            source,
        });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AerodromeEntry, SortKey};
    use serde_json::json;

    fn header() -> ScheduleHeader {
        ScheduleHeader {
            label: "0: Published - 2022-02-24".to_string(),
            links: vec![ChartLink::with_filename(
                "10 Year Publishing Schedule",
                "https://example.org/10-year-AIRAC.pdf",
                "10_Year_AIRAC.pdf",
            )],
        }
    }

    fn sample(sort_key: SortKey) -> Aggregator {
        let mut agg = Aggregator::new(sort_key);
        agg.add(AerodromeEntry::new(AerodromeType::Aerodrome, "EGPH", "EDINBURGH"), false);
        agg.add(AerodromeEntry::new(AerodromeType::Aerodrome, "EGBB", "BIRMINGHAM"), false);
        agg.add(AerodromeEntry::new(AerodromeType::Aerodrome, "EGXX", "NO CHARTS"), false);
        agg.add(AerodromeEntry::new(AerodromeType::Heliport, "EGLW", "BATTERSEA"), false);
        let key = |code: &str, name: &str| sort_key.key(code, name);
        agg.attach_links(
            AerodromeType::Aerodrome,
            &key("EGPH", "EDINBURGH"),
            vec![ChartLink::new("EGPH", "ADC", "https://example.org/egph-adc.pdf")],
        );
        agg.attach_links(
            AerodromeType::Aerodrome,
            &key("EGBB", "BIRMINGHAM"),
            vec![
                ChartLink::new("EGBB", "ADC", "https://example.org/egbb-adc.pdf"),
                ChartLink::new("EGBB", "SID 1.2", "https://example.org/egbb-sid.pdf"),
            ],
        );
        agg
    }

    #[test]
    fn test_manifest_shape() {
        let value = manifest(&header(), &sample(SortKey::Name)).unwrap();
        assert_eq!(
            value,
            json!({
                "eBagLib": {
                    "0: Published - 2022-02-24": {
                        "10 Year Publishing Schedule": {
                            "url": "https://example.org/10-year-AIRAC.pdf",
                            "filename": "10_Year_AIRAC.pdf"
                        }
                    },
                    "AD 2 AERODROMES": {
                        "BIRMINGHAM : EGBB": {
                            "ADC": {
                                "url": "https://example.org/egbb-adc.pdf",
                                "filename": "EGBB - ADC.pdf"
                            },
                            "SID 1.2": {
                                "url": "https://example.org/egbb-sid.pdf",
                                "filename": "EGBB - SID 12.pdf"
                            }
                        },
                        "EDINBURGH : EGPH": {
                            "ADC": {
                                "url": "https://example.org/egph-adc.pdf",
                                "filename": "EGPH - ADC.pdf"
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_keys_follow_sorted_order() {
        let text = render(&header(), &sample(SortKey::Code)).unwrap();
        let birmingham = text.find("\"EGBB - BIRMINGHAM\"").unwrap();
        let edinburgh = text.find("\"EGPH - EDINBURGH\"").unwrap();
        assert!(birmingham < edinburgh);
        assert!(text.find("\"0: Published").unwrap() < text.find("\"AD 2 AERODROMES\"").unwrap());
    }

    #[test]
    fn test_empty_groups_and_aerodromes_are_omitted() {
        let text = render(&header(), &sample(SortKey::Name)).unwrap();
        assert!(!text.contains("NO CHARTS"));
        assert!(!text.contains("AD 3 HELIPORT"));
        assert!(!text.contains("BATTERSEA"));
    }

    #[test]
    fn test_titles_with_quotes_are_escaped() {
        let mut agg = Aggregator::new(SortKey::Code);
        agg.add(AerodromeEntry::new(AerodromeType::Aerodrome, "EFHK", "HELSINKI"), false);
        agg.attach_links(
            AerodromeType::Aerodrome,
            "EFHK",
            vec![ChartLink::new("EFHK", "Chart \"A\"", "https://example.org/a.pdf")],
        );
        let text = render(&header(), &agg).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert!(parsed["eBagLib"]["AD 2 AERODROMES"]["EFHK - HELSINKI"]["Chart \"A\""].is_object());
    }

    #[tokio::test]
    async fn test_write_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let path = write_manifest(dir, "AIP UK.json", "{}\n").await.unwrap();
        assert_eq!(path, tmp.path().join("AIP UK.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}\n");
    }

    #[tokio::test]
    async fn test_write_manifest_to_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");
        let err = write_manifest(missing.to_str().unwrap(), "AIP UK.json", "{}")
            .await
            .unwrap_err();
        assert!(matches!(err, AipError::Write { .. }));
    }
}
