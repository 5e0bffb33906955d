//! Output generation.
//!
//! - [`json`]: renders the aggregated charts into the chart viewer's
//!   manifest format and writes `AIP {RegionName}.json`

pub mod json;
