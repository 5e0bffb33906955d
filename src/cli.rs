//! Command-line interface definitions for the AIP chart scraper.
//!
//! Every option can also be given through an environment variable where one
//! is listed.

use crate::fetch::DEFAULT_USER_AGENT;
use crate::models::SortKey;
use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # UK charts for the current AIRAC cycle
/// aip_charts
///
/// # French charts from the previous cycle, keyed by ICAO code
/// aip_charts --region FR --previous --codesort
///
/// # Re-run for a fixed date into another directory
/// aip_charts --region NO --date 2022-03-01 --output-dir ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Region code: BE, ES, FI, FR, IE, NL, NO, RU, SE or UK
    #[arg(short, long, env = "AIP_REGION", default_value = "UK")]
    pub region: String,

    /// Use the previous AIRAC cycle instead of the current one
    #[arg(short, long)]
    pub previous: bool,

    /// Key aerodromes by ICAO code instead of name
    #[arg(short, long)]
    pub codesort: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub debug: bool,

    /// Resolve the AIRAC cycle for this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Directory the JSON manifest is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Log file, truncated on each run
    #[arg(long, default_value = "aip_charts.log")]
    pub log_file: String,

    /// User agent sent with every request
    #[arg(long, env = "AIP_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Cli {
    pub fn sort_key(&self) -> SortKey {
        if self.codesort { SortKey::Code } else { SortKey::Name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["aip_charts"]);

        assert!(!cli.previous);
        assert!(!cli.debug);
        assert_eq!(cli.date, None);
        assert_eq!(cli.output_dir, ".");
        assert_eq!(cli.log_file, "aip_charts.log");
        assert_eq!(cli.sort_key(), SortKey::Name);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "aip_charts",
            "--region",
            "fr",
            "--previous",
            "--codesort",
            "--date",
            "2022-03-01",
            "--output-dir",
            "/tmp/aip",
        ]);

        assert_eq!(cli.region, "fr");
        assert!(cli.previous);
        assert_eq!(cli.sort_key(), SortKey::Code);
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2022, 3, 1));
        assert_eq!(cli.output_dir, "/tmp/aip");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["aip_charts", "-r", "NO", "-p", "-c", "-d", "-o", "/tmp/out"]);

        assert_eq!(cli.region, "NO");
        assert!(cli.previous);
        assert!(cli.codesort);
        assert!(cli.debug);
        assert_eq!(cli.output_dir, "/tmp/out");
    }

    #[test]
    fn test_cli_rejects_malformed_date() {
        assert!(Cli::try_parse_from(["aip_charts", "--date", "01/03/2022"]).is_err());
    }

    #[test]
    fn test_unknown_region_is_left_to_the_registry() {
        let cli = Cli::parse_from(["aip_charts", "--region", "XX"]);
        assert!(cli.region.parse::<crate::regions::Region>().is_err());
    }
}
