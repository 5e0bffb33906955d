//! Region registry: supported AIP sites and how their base URLs are built.
//!
//! | Code | Name | Base URL | Header |
//! |------|------|----------|--------|
//! | BE | Belgium | `{root}/eaip/eAIP_Main` | Generated |
//! | ES | Spain | `{root}/AIP` | Generated |
//! | FI | Finland | `{root}/ais` | Generated |
//! | FR | France | `{root}/eAIP_{DD_MON_YYYY}/FRANCE/AIRAC-{effective}` | Published |
//! | IE | Ireland | `{root}/iaip` | Generated |
//! | NL | Netherlands | `{root}/{published}-AIRAC` | Published |
//! | NO | Norway | `{root}/AIP/View/{sequence}/{effective}-AIRAC` | Published |
//! | RU | Russia | `{root}/common/AirInter/validaip` | Generated |
//! | SE | Sweden | `{root}` | Generated |
//! | UK | UK | `{root}/{effective}-AIRAC` | Published |
//!
//! Sites without a fixed AIRAC layout get a "Generated" header carrying the
//! run date; the others carry the effective date of the cycle scraped.

use crate::error::AipError;
use crate::models::{ChartLink, ScheduleHeader};
use crate::schedule::Cycle;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Norway numbers its AIRAC editions; edition = this + schedule offset.
const NORWAY_SEQUENCE_BASE: usize = 109;

const UK_SCHEDULE_TITLE: &str = "10 Year Publishing Schedule";
const UK_SCHEDULE_URL: &str = "https://nats-uk.ead-it.com/cms-nats/export/sites/default/en/Publications/publication-schedule/10-year-AIRAC.pdf";
const UK_SCHEDULE_FILENAME: &str = "10_Year_AIRAC.pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Be,
    Es,
    Fi,
    Fr,
    Ie,
    Nl,
    No,
    Ru,
    Se,
    Uk,
}

impl Region {
    pub const ALL: [Region; 10] = [
        Region::Be,
        Region::Es,
        Region::Fi,
        Region::Fr,
        Region::Ie,
        Region::Nl,
        Region::No,
        Region::Ru,
        Region::Se,
        Region::Uk,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Region::Be => "BE",
            Region::Es => "ES",
            Region::Fi => "FI",
            Region::Fr => "FR",
            Region::Ie => "IE",
            Region::Nl => "NL",
            Region::No => "NO",
            Region::Ru => "RU",
            Region::Se => "SE",
            Region::Uk => "UK",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Be => "Belgium",
            Region::Es => "Spain",
            Region::Fi => "Finland",
            Region::Fr => "France",
            Region::Ie => "Ireland",
            Region::Nl => "Netherlands",
            Region::No => "Norway",
            Region::Ru => "Russia",
            Region::Se => "Sweden",
            Region::Uk => "UK",
        }
    }

    pub fn root_url(self) -> &'static str {
        match self {
            Region::Be => "https://ops.skeyes.be/html/belgocontrol_static",
            Region::Es => "https://aip.enaire.es",
            Region::Fi => "https://ais.fi",
            Region::Fr => "https://www.sia.aviation-civile.gouv.fr/dvd",
            Region::Ie => "http://iaip.iaa.ie",
            Region::Nl => "https://eaip.lvnl.nl",
            Region::No => "https://ais.avinor.no/no",
            Region::Ru => "http://www.caiga.ru",
            Region::Se => "https://aro.lfv.se",
            Region::Uk => "https://www.aurora.nats.co.uk/htmlAIP/Publications",
        }
    }

    /// URL every page of this region's AIP hangs from for `cycle`.
    pub fn base_url(self, cycle: &Cycle) -> String {
        let root = self.root_url();
        match self {
            Region::Be => format!("{}/eaip/eAIP_Main", root),
            Region::Es => format!("{}/AIP", root),
            Region::Fi => format!("{}/ais", root),
            Region::Fr => format!(
                "{}/eAIP_{}/FRANCE/AIRAC-{}",
                root,
                cycle.effective_stamp(),
                cycle.effective
            ),
            Region::Ie => format!("{}/iaip", root),
            Region::Nl => format!("{}/{}-AIRAC", root, cycle.published),
            Region::No => format!(
                "{}/AIP/View/{}/{}-AIRAC",
                root,
                NORWAY_SEQUENCE_BASE + cycle.offset,
                cycle.effective
            ),
            Region::Ru => format!("{}/common/AirInter/validaip", root),
            Region::Se => root.to_string(),
            Region::Uk => format!("{}/{}-AIRAC", root, cycle.effective),
        }
    }

    /// Whether the site follows the AIRAC cycle for its published editions.
    pub fn is_airac_published(self) -> bool {
        matches!(self, Region::Fr | Region::Nl | Region::No | Region::Uk)
    }

    pub fn header(self, cycle: &Cycle, today: NaiveDate) -> ScheduleHeader {
        let label = if self.is_airac_published() {
            format!("0: Published - {}", cycle.effective)
        } else {
            format!("0: Generated - {}", today)
        };
        let links = match self {
            Region::Uk => vec![ChartLink::with_filename(
                UK_SCHEDULE_TITLE,
                UK_SCHEDULE_URL,
                UK_SCHEDULE_FILENAME,
            )],
            _ => Vec::new(),
        };
        ScheduleHeader { label, links }
    }

    pub fn output_filename(self) -> String {
        format!("AIP {}.json", self.name())
    }
}

impl FromStr for Region {
    type Err = AipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AipError::UnknownRegion(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
