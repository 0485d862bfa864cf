//! Store-neutral event types.
//!
//! Backends convert whatever their platform returns into these types;
//! the day-view pipeline works exclusively with them.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A calendar event as returned by a store backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Raw title; may be missing or empty. Shaping applies the placeholder.
    pub summary: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

impl Event {
    /// All-day events carry a bare date instead of a time of day.
    pub fn is_all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    DateTimeFloating(NaiveDateTime),
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl EventTime {
    /// UTC instant used for ordering and range overlap.
    ///
    /// All-day dates anchor at local midnight. Floating times, and zoned
    /// times whose TZID we can't resolve, are read in the process-local
    /// timezone.
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            EventTime::Date(d) => {
                resolve_in(&Local, d.and_hms_opt(0, 0, 0).unwrap()).with_timezone(&Utc)
            }
            EventTime::DateTimeUtc(dt) => *dt,
            EventTime::DateTimeFloating(dt) => resolve_in(&Local, *dt).with_timezone(&Utc),
            EventTime::DateTimeZoned { datetime, tzid } => match tzid.parse::<Tz>() {
                Ok(tz) => resolve_in(&tz, *datetime).with_timezone(&Utc),
                Err(_) => resolve_in(&Local, *datetime).with_timezone(&Utc),
            },
        }
    }

    /// Timezone-aware timestamp with millisecond precision, in the
    /// event's own stored zone. None for all-day dates.
    pub fn to_rfc3339(&self) -> Option<String> {
        match self {
            EventTime::Date(_) => None,
            EventTime::DateTimeUtc(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            EventTime::DateTimeFloating(dt) => {
                Some(resolve_in(&Local, *dt).to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            EventTime::DateTimeZoned { datetime, tzid } => match tzid.parse::<Tz>() {
                Ok(tz) => Some(resolve_in(&tz, *datetime).to_rfc3339_opts(SecondsFormat::Millis, true)),
                Err(_) => Some(resolve_in(&Local, *datetime).to_rfc3339_opts(SecondsFormat::Millis, true)),
            },
        }
    }

    /// Short time of day (e.g. "9:00 AM"): local timezone for absolute
    /// times, verbatim for floating times. None for all-day dates.
    pub fn local_short_time(&self) -> Option<String> {
        const SHORT: &str = "%-I:%M %p";
        match self {
            EventTime::Date(_) => None,
            EventTime::DateTimeUtc(dt) => Some(dt.with_timezone(&Local).format(SHORT).to_string()),
            EventTime::DateTimeFloating(dt) => Some(dt.format(SHORT).to_string()),
            EventTime::DateTimeZoned { .. } => {
                Some(self.instant().with_timezone(&Local).format(SHORT).to_string())
            }
        }
    }
}

/// Sort events ascending by start instant.
///
/// The sort is stable: events sharing a start instant keep the order
/// the store returned them in.
pub fn sort_by_start(events: &mut [Event]) {
    events.sort_by_key(|e| e.start.instant());
}

/// Resolve a naive wall-clock time in a timezone, taking the earliest
/// interpretation when DST makes it ambiguous.
pub(crate) fn resolve_in<Z: TimeZone>(tz: &Z, naive: NaiveDateTime) -> DateTime<Z> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Wall-clock time erased by a DST gap; the first valid
            // instant after the gap stands in.
            let mut probe = naive;
            for _ in 0..48 {
                probe = probe + Duration::minutes(30);
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt;
                }
            }
            unreachable!("no valid wall-clock time within 24h of {naive}")
        }
    }
}
