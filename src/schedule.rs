//! AIRAC schedule table and cycle resolution.
//!
//! Several regions publish their AIP under a path built from the current
//! AIRAC effective date (or a running sequence number), so resolving the
//! cycle for "today" drives every base URL. The table below is the
//! published 10 year AIRAC schedule:
//! <https://nats-uk.ead-it.com/cms-nats/export/sites/default/en/Publications/publication-schedule/10-year-AIRAC.pdf>
//!
//! Rows are AIRAC label, sponsor change request cutoff, amendment published
//! date and effective date. Extending the table is a manual task; running
//! past its last row is a fatal error rather than a silently wrong date.

use crate::error::AipError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tracing::debug;

/// One row of the AIRAC schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveDateEntry {
    pub label: String,
    pub cutoff: NaiveDate,
    pub published: NaiveDate,
    pub effective: NaiveDate,
}

impl EffectiveDateEntry {
    pub fn parse(label: &str, cutoff: &str, published: &str, effective: &str) -> Option<Self> {
        let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
        Some(Self {
            label: label.to_string(),
            cutoff: date(cutoff)?,
            published: date(published)?,
            effective: date(effective)?,
        })
    }
}

/// A resolved publication cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub label: String,
    pub published: NaiveDate,
    pub effective: NaiveDate,
    /// 1-based position of the cycle's row in the schedule table.
    pub offset: usize,
    /// Effective date of the first cycle that is not yet active.
    pub upcoming: NaiveDate,
}

impl Cycle {
    /// Effective date as `DD_MON_YYYY`, e.g. `24_MAR_2022`.
    pub fn effective_stamp(&self) -> String {
        self.effective.format("%d_%b_%Y").to_string().to_uppercase()
    }
}

const AIRAC_ROWS: &[[&str; 4]] = &[
    ["AIRAC 01/2022", "2021-10-29", "2021-12-16", "2022-01-27"],
    ["AIRAC 02/2022", "2021-11-26", "2022-01-13", "2022-02-24"],
    ["AIRAC 03/2022", "2021-12-17", "2022-02-10", "2022-03-24"],
    ["AIRAC 04/2022", "2022-01-21", "2022-03-10", "2022-04-21"],
    ["AIRAC 05/2022", "2022-02-18", "2022-04-07", "2022-05-19"],
    ["AIRAC 06/2022", "2022-03-18", "2022-05-05", "2022-06-16"],
    ["AIRAC 07/2022", "2022-04-15", "2022-06-02", "2022-07-14"],
    ["AIRAC 08/2022", "2022-05-13", "2022-06-30", "2022-08-11"],
    ["AIRAC 09/2022", "2022-06-10", "2022-07-28", "2022-09-08"],
    ["AIRAC 10/2022", "2022-07-08", "2022-08-25", "2022-10-06"],
    ["AIRAC 11/2022", "2022-08-05", "2022-09-22", "2022-11-03"],
    ["AIRAC 12/2022", "2022-09-02", "2022-10-20", "2022-12-01"],
    ["AIRAC 13/2022", "2022-09-30", "2022-11-17", "2022-12-29"],
    ["AIRAC 01/2023", "2022-10-28", "2022-12-15", "2023-01-26"],
    ["AIRAC 02/2023", "2022-11-25", "2023-01-12", "2023-02-23"],
    ["AIRAC 03/2023", "2022-12-16", "2023-02-09", "2023-03-23"],
    ["AIRAC 04/2023", "2023-01-20", "2023-03-09", "2023-04-20"],
    ["AIRAC 05/2023", "2023-02-17", "2023-04-06", "2023-05-18"],
    ["AIRAC 06/2023", "2023-03-17", "2023-05-04", "2023-06-15"],
    ["AIRAC 07/2023", "2023-04-14", "2023-06-01", "2023-07-13"],
    ["AIRAC 08/2023", "2023-05-12", "2023-06-29", "2023-08-10"],
    ["AIRAC 09/2023", "2023-06-09", "2023-07-27", "2023-09-07"],
    ["AIRAC 10/2023", "2023-07-07", "2023-08-24", "2023-10-05"],
    ["AIRAC 11/2023", "2023-08-04", "2023-09-21", "2023-11-02"],
    ["AIRAC 12/2023", "2023-09-01", "2023-10-19", "2023-11-30"],
    ["AIRAC 13/2023", "2023-09-29", "2023-11-16", "2023-12-28"],
    ["AIRAC 01/2024", "2023-10-27", "2023-12-14", "2024-01-25"],
    ["AIRAC 02/2024", "2023-11-24", "2024-01-11", "2024-02-22"],
    ["AIRAC 03/2024", "2023-12-22", "2024-02-08", "2024-03-21"],
    ["AIRAC 04/2024", "2024-01-19", "2024-03-07", "2024-04-18"],
    ["AIRAC 05/2024", "2024-02-16", "2024-04-04", "2024-05-16"],
    ["AIRAC 06/2024", "2024-03-15", "2024-05-02", "2024-06-13"],
    ["AIRAC 07/2024", "2024-04-12", "2024-05-30", "2024-07-11"],
    ["AIRAC 08/2024", "2024-05-10", "2024-06-27", "2024-08-08"],
    ["AIRAC 09/2024", "2024-06-07", "2024-07-25", "2024-09-05"],
    ["AIRAC 10/2024", "2024-07-05", "2024-08-22", "2024-10-03"],
    ["AIRAC 11/2024", "2024-08-02", "2024-09-19", "2024-10-31"],
    ["AIRAC 12/2024", "2024-08-30", "2024-10-17", "2024-11-28"],
    ["AIRAC 13/2024", "2024-09-27", "2024-11-14", "2024-12-26"],
    ["AIRAC 01/2025", "2024-10-25", "2024-12-12", "2025-01-23"],
    ["AIRAC 02/2025", "2024-11-22", "2025-01-09", "2025-02-20"],
    ["AIRAC 03/2025", "2024-12-20", "2025-02-06", "2025-03-20"],
    ["AIRAC 04/2025", "2025-01-17", "2025-03-06", "2025-04-17"],
    ["AIRAC 05/2025", "2025-02-14", "2025-04-03", "2025-05-15"],
    ["AIRAC 06/2025", "2025-03-14", "2025-05-01", "2025-06-12"],
    ["AIRAC 07/2025", "2025-04-11", "2025-05-29", "2025-07-10"],
    ["AIRAC 08/2025", "2025-05-09", "2025-06-26", "2025-08-07"],
    ["AIRAC 09/2025", "2025-06-06", "2025-07-24", "2025-09-04"],
    ["AIRAC 10/2025", "2025-07-04", "2025-08-21", "2025-10-02"],
    ["AIRAC 11/2025", "2025-08-01", "2025-09-18", "2025-10-30"],
    ["AIRAC 12/2025", "2025-08-29", "2025-10-16", "2025-11-27"],
    ["AIRAC 13/2025", "2025-09-26", "2025-11-13", "2025-12-25"],
    ["AIRAC 01/2026", "2025-10-24", "2025-12-11", "2026-01-22"],
    ["AIRAC 02/2026", "2025-11-21", "2026-01-08", "2026-02-19"],
    ["AIRAC 03/2026", "2025-12-19", "2026-02-05", "2026-03-19"],
    ["AIRAC 04/2026", "2026-01-16", "2026-03-05", "2026-04-16"],
    ["AIRAC 05/2026", "2026-02-13", "2026-04-02", "2026-05-14"],
    ["AIRAC 06/2026", "2026-03-13", "2026-04-30", "2026-06-11"],
    ["AIRAC 07/2026", "2026-04-10", "2026-05-28", "2026-07-09"],
    ["AIRAC 08/2026", "2026-05-08", "2026-06-25", "2026-08-06"],
    ["AIRAC 09/2026", "2026-06-05", "2026-07-23", "2026-09-03"],
    ["AIRAC 10/2026", "2026-07-03", "2026-08-20", "2026-10-01"],
    ["AIRAC 11/2026", "2026-07-31", "2026-09-17", "2026-10-29"],
    ["AIRAC 12/2026", "2026-08-28", "2026-10-15", "2026-11-26"],
    ["AIRAC 13/2026", "2026-09-25", "2026-11-12", "2026-12-24"],
    ["AIRAC 01/2027", "2026-10-23", "2026-12-10", "2027-01-21"],
    ["AIRAC 02/2027", "2026-11-20", "2027-01-07", "2027-02-18"],
    ["AIRAC 03/2027", "2026-12-18", "2027-02-04", "2027-03-18"],
    ["AIRAC 04/2027", "2027-01-15", "2027-03-04", "2027-04-15"],
    ["AIRAC 05/2027", "2027-02-12", "2027-04-01", "2027-05-13"],
    ["AIRAC 06/2027", "2027-03-12", "2027-04-29", "2027-06-10"],
    ["AIRAC 07/2027", "2027-04-09", "2027-05-27", "2027-07-08"],
    ["AIRAC 08/2027", "2027-05-07", "2027-06-24", "2027-08-05"],
    ["AIRAC 09/2027", "2027-06-04", "2027-07-22", "2027-09-02"],
    ["AIRAC 10/2027", "2027-07-02", "2027-08-19", "2027-09-30"],
    ["AIRAC 11/2027", "2027-07-30", "2027-09-16", "2027-10-28"],
    ["AIRAC 12/2027", "2027-08-27", "2027-10-14", "2027-11-25"],
    ["AIRAC 13/2027", "2027-09-24", "2027-11-11", "2027-12-23"],
    ["AIRAC 01/2028", "2027-10-22", "2027-12-09", "2028-01-20"],
    ["AIRAC 02/2028", "2027-11-19", "2028-01-06", "2028-02-17"],
    ["AIRAC 03/2028", "2027-12-17", "2028-02-03", "2028-03-16"],
    ["AIRAC 04/2028", "2028-01-14", "2028-03-02", "2028-04-13"],
    ["AIRAC 05/2028", "2028-02-11", "2028-03-30", "2028-05-11"],
    ["AIRAC 06/2028", "2028-03-10", "2028-04-27", "2028-06-08"],
    ["AIRAC 07/2028", "2028-04-07", "2028-05-25", "2028-07-06"],
    ["AIRAC 08/2028", "2028-05-05", "2028-06-22", "2028-08-03"],
    ["AIRAC 09/2028", "2028-06-02", "2028-07-20", "2028-08-31"],
    ["AIRAC 10/2028", "2028-06-30", "2028-08-17", "2028-09-28"],
    ["AIRAC 11/2028", "2028-07-28", "2028-09-14", "2028-10-26"],
    ["AIRAC 12/2028", "2028-08-25", "2028-10-12", "2028-11-23"],
    ["AIRAC 13/2028", "2028-09-22", "2028-11-09", "2028-12-21"],
    ["AIRAC 01/2029", "2028-10-20", "2028-12-07", "2029-01-18"],
    ["AIRAC 02/2029", "2028-11-17", "2029-01-04", "2029-02-15"],
    ["AIRAC 03/2029", "2028-12-15", "2029-02-01", "2029-03-15"],
    ["AIRAC 04/2029", "2029-01-12", "2029-03-01", "2029-04-12"],
    ["AIRAC 05/2029", "2029-02-09", "2029-03-29", "2029-05-10"],
    ["AIRAC 06/2029", "2029-03-09", "2029-04-26", "2029-06-07"],
    ["AIRAC 07/2029", "2029-04-06", "2029-05-24", "2029-07-05"],
    ["AIRAC 08/2029", "2029-05-04", "2029-06-21", "2029-08-02"],
    ["AIRAC 09/2029", "2029-06-01", "2029-07-19", "2029-08-30"],
    ["AIRAC 10/2029", "2029-06-29", "2029-08-16", "2029-09-27"],
    ["AIRAC 11/2029", "2029-07-27", "2029-09-13", "2029-10-25"],
    ["AIRAC 12/2029", "2029-08-24", "2029-10-11", "2029-11-22"],
    ["AIRAC 13/2029", "2029-09-21", "2029-11-08", "2029-12-20"],
    ["AIRAC 01/2030", "2029-10-19", "2029-12-06", "2030-01-17"],
    ["AIRAC 02/2030", "2029-11-16", "2030-01-03", "2030-02-14"],
    ["AIRAC 03/2030", "2029-12-14", "2030-01-31", "2030-03-14"],
    ["AIRAC 04/2030", "2030-01-11", "2030-02-28", "2030-04-11"],
    ["AIRAC 05/2030", "2030-02-08", "2030-03-28", "2030-05-09"],
    ["AIRAC 06/2030", "2030-03-08", "2030-04-25", "2030-06-06"],
    ["AIRAC 07/2030", "2030-04-05", "2030-05-23", "2030-07-04"],
    ["AIRAC 08/2030", "2030-05-03", "2030-06-20", "2030-08-01"],
    ["AIRAC 09/2030", "2030-05-31", "2030-07-18", "2030-08-29"],
    ["AIRAC 10/2030", "2030-06-28", "2030-08-15", "2030-09-26"],
    ["AIRAC 11/2030", "2030-07-26", "2030-09-12", "2030-10-24"],
    ["AIRAC 12/2030", "2030-08-23", "2030-10-10", "2030-11-21"],
    ["AIRAC 13/2030", "2030-09-20", "2030-11-07", "2030-12-19"],
];

/// The built-in AIRAC schedule, ascending by effective date.
pub static AIRAC_SCHEDULE: Lazy<Vec<EffectiveDateEntry>> = Lazy::new(|| {
    AIRAC_ROWS
        .iter()
        .map(|[label, cutoff, published, effective]| {
            EffectiveDateEntry::parse(label, cutoff, published, effective)
                .expect("schedule rows use YYYY-MM-DD dates")
        })
        .collect()
});

/// Find the cycle active on `today`, or the one before it.
///
/// A cycle is active from its effective date onwards, so a cycle whose
/// effective date is `today` is already current. `today` must fall before
/// the last row: the cycle after the current one has to be known.
pub fn resolve(
    table: &[EffectiveDateEntry],
    today: NaiveDate,
    use_previous: bool,
) -> Result<Cycle, AipError> {
    let upcoming = table
        .iter()
        .position(|entry| entry.effective > today)
        .ok_or(AipError::ScheduleExhausted { today })?;
    if upcoming == 0 {
        return Err(AipError::ScheduleNotStarted {
            today,
            first: table[0].effective,
        });
    }

    let current = upcoming - 1;
    let index = if use_previous {
        if current == 0 {
            return Err(AipError::NoPreviousCycle {
                label: table[current].label.clone(),
            });
        }
        current - 1
    } else {
        current
    };

    let entry = &table[index];
    debug!(%today, label = %entry.label, offset = index + 1, use_previous, "Resolved AIRAC cycle");
    Ok(Cycle {
        label: entry.label.clone(),
        published: entry.published,
        effective: entry.effective,
        offset: index + 1,
        upcoming: table[upcoming].effective,
    })
}
