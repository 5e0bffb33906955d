//! Fatal error kinds.
//!
//! Every variant here ends the run: `main` logs it and exits with status 1.
//! Data-shape anomalies found while scraping (unknown section labels,
//! duplicate aerodromes, links for an unknown aerodrome) are not errors and
//! never reach this type; they are logged where they happen and skipped.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AipError {
    #[error("Unknown region {0}, expected one of BE, ES, FI, FR, IE, NL, NO, RU, SE, UK")]
    UnknownRegion(String),
    #[error("{today} is before the first AIRAC cycle in the schedule table ({first}), add the earlier cycles")]
    ScheduleNotStarted { today: NaiveDate, first: NaiveDate },
    #[error("{today} is past the last AIRAC cycle in the schedule table, extend it from the published 10 year AIRAC schedule")]
    ScheduleExhausted { today: NaiveDate },
    #[error("{label} is the first cycle in the schedule table, there is no previous cycle to use")]
    NoPreviousCycle { label: String },
    #[error("Invalid URL {url}: {source}")]
    BadUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP error {status} {reason} fetching {url}")]
    Http {
        url: String,
        status: u16,
        reason: String,
    },
    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Failed to render manifest: {0}")]
    Render(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
