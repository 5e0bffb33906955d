//! Text and markup helpers shared by the region scrapers.
//!
//! AIP menus encode codes and names at fixed character positions in link
//! text, so most scrapers slice strings by character offset. The slicing
//! helpers here count `char`s, never bytes, and clamp out-of-range offsets
//! to an empty result instead of panicking.

use crate::error::AipError;
use crate::macros::regex;
use scraper::ElementRef;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Suggested filename for a chart: `"{code} - {title}.pdf"` with `/`
/// turned into `-` and `.` dropped from the title.
pub fn chart_filename(code: &str, title: &str) -> String {
    let sanitized = title.replace('/', "-").replace('.', "");
    format!("{} - {}.pdf", code, sanitized)
}

/// Everything after the first `n` characters.
pub fn skip_chars(s: &str, n: usize) -> String {
    s.chars().skip(n).collect()
}

/// The first `n` characters.
pub fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Characters `start..end`.
pub fn char_range(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Everything except the last `n` characters.
pub fn drop_last_chars(s: &str, n: usize) -> String {
    let keep = s.chars().count().saturating_sub(n);
    s.chars().take(keep).collect()
}

pub fn strip_line_breaks(s: &str) -> String {
    s.replace(['\r', '\n'], "")
}

/// Collapse whitespace runs into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    regex!(r"\s+").replace_all(s, " ").trim().to_string()
}

/// All text below an element, concatenated as it appears.
pub fn element_text(elem: &ElementRef) -> String {
    elem.text().collect()
}

/// First entry of the `class` attribute.
pub fn first_class<'a>(elem: &ElementRef<'a>) -> Option<&'a str> {
    elem.value()
        .attr("class")
        .and_then(|classes| classes.split_whitespace().next())
}

pub fn has_class(elem: &ElementRef, class: &str) -> bool {
    elem.value()
        .attr("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

pub fn attr_or_empty(elem: &ElementRef, name: &str) -> String {
    elem.value().attr(name).unwrap_or_default().to_string()
}

/// Join a site base URL and a relative path with exactly one `/`.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Name of the scratch file written by [`ensure_writable_dir`].
const WRITE_CHECK_FILE: &str = ".aip_charts_write_check";

/// Create the output directory if needed and confirm a file can be written
/// into it.
///
/// Scraping a region takes one request per aerodrome, so an unwritable
/// output directory is reported before the first fetch.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), AipError> {
    let write_error = |source: std::io::Error| AipError::Write {
        path: path.to_string(),
        source,
    };
    fs::create_dir_all(path).await.map_err(write_error)?;

    let check = Path::new(path).join(WRITE_CHECK_FILE);
    fs::write(&check, b"").await.map_err(write_error)?;
    if let Err(err) = fs::remove_file(&check).await {
        warn!(file = %check.display(), error = %err, "Could not remove write check file");
    }
    info!("Output directory is writable");
    Ok(())
}
