//! Day-range computation.
//!
//! The half-open [start-of-day, start-of-next-day) range for a local
//! calendar day. Day boundaries come from calendar date arithmetic
//! rather than +24h, so the range stays correct across daylight-saving
//! transitions.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat};

use crate::event::resolve_in;

/// The local day a query runs against.
#[derive(Debug, Clone)]
pub struct DayBounds {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl DayBounds {
    /// Bounds for the current local day.
    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Bounds for an arbitrary local date.
    pub fn for_date(date: NaiveDate) -> Self {
        let next = date.succ_opt().unwrap();

        DayBounds {
            start: local_midnight(date),
            end: local_midnight(next),
        }
    }

    /// The day's local date in YYYY-MM-DD form.
    pub fn date_string(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Range start as RFC 3339, for store queries.
    pub fn time_min(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Range end as RFC 3339, exclusive.
    pub fn time_max(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Local midnight for a date. Ambiguous midnights take the earliest
/// instant; a midnight erased by a DST gap moves to the first valid
/// instant after it.
fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    resolve_in(&Local, date.and_hms_opt(0, 0, 0).unwrap())
}
