//! Event shaping and the day payload.
//!
//! Raw store events get shaped into the records both presenters work
//! from: titles defaulted, empty locations dropped, all-day events
//! stripped of start/end instants.

use crate::day::DayBounds;
use crate::error::{TodayError, TodayResult};
use crate::event::{Event, EventTime};
use crate::store::Store;
use serde::{Serialize, Serializer};

/// Title used when an event has no usable title of its own.
pub const NO_TITLE: &str = "(No title)";

/// A shaped event record.
#[derive(Debug, Clone, Serialize)]
pub struct EventItem {
    pub title: String,
    #[serde(serialize_with = "rfc3339_or_null")]
    pub start: Option<EventTime>,
    #[serde(serialize_with = "rfc3339_or_null")]
    pub end: Option<EventTime>,
    #[serde(rename = "allDay")]
    pub all_day: bool,
    pub location: Option<String>,
}

impl EventItem {
    /// Shape a raw store event into its output record.
    ///
    /// Missing and empty titles become the placeholder, whitespace-only
    /// locations are dropped rather than kept as empty strings, and
    /// all-day events carry no start/end instants.
    pub fn from_event(event: &Event) -> Self {
        let title = event
            .summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_TITLE)
            .to_string();
        let location = event.location.clone().filter(|l| !l.trim().is_empty());

        if event.is_all_day() {
            EventItem {
                title,
                start: None,
                end: None,
                all_day: true,
                location,
            }
        } else {
            EventItem {
                title,
                start: Some(event.start.clone()),
                end: Some(event.end.clone()),
                all_day: false,
                location,
            }
        }
    }
}

/// Serialize an optional event time as an RFC 3339 string; absent
/// values become JSON null, never an empty string.
fn rfc3339_or_null<S: Serializer>(time: &Option<EventTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match time.as_ref().and_then(EventTime::to_rfc3339) {
        Some(s) => serializer.serialize_some(&s),
        None => serializer.serialize_none(),
    }
}

/// The structured-mode payload: one local day and its ordered events.
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule {
    pub date: String,
    pub events: Vec<EventItem>,
}

impl DaySchedule {
    pub fn new(bounds: &DayBounds, events: &[Event]) -> Self {
        DaySchedule {
            date: bounds.date_string(),
            events: events.iter().map(EventItem::from_event).collect(),
        }
    }

    /// Compact single-line JSON for piping.
    pub fn to_json(&self) -> TodayResult<String> {
        serde_json::to_string(self).map_err(|e| TodayError::Serialization(e.to_string()))
    }
}

/// Run the day-view pipeline against a store: wait for the permission
/// outcome, compute today's bounds, fetch and shape.
pub async fn today_schedule(store: &Store) -> TodayResult<DaySchedule> {
    let outcome = store
        .request_access()
        .await
        .map_err(|_| TodayError::AccessRequest("access request ended without a reply".into()))?;

    if let Some(error) = outcome.error {
        return Err(TodayError::AccessRequest(error));
    }
    if !outcome.granted {
        return Err(TodayError::AccessDenied);
    }

    let bounds = DayBounds::today();
    let events = store.events_in_range(&bounds).await?;

    Ok(DaySchedule::new(&bounds, &events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn event(summary: Option<&str>, location: Option<&str>, start: EventTime, end: EventTime) -> Event {
        Event {
            id: "test-event@today".to_string(),
            summary: summary.map(String::from),
            location: location.map(String::from),
            start,
            end,
        }
    }

    fn utc_time(hour: u32, min: u32) -> EventTime {
        EventTime::DateTimeUtc(Utc.with_ymd_and_hms(2025, 3, 20, hour, min, 0).unwrap())
    }

    fn all_day() -> (EventTime, EventTime) {
        (
            EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()),
            EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 21).unwrap()),
        )
    }

    #[test]
    fn test_missing_or_empty_title_gets_placeholder() {
        let (start, end) = all_day();
        let none = EventItem::from_event(&event(None, None, start.clone(), end.clone()));
        let empty = EventItem::from_event(&event(Some(""), None, start.clone(), end.clone()));
        let named = EventItem::from_event(&event(Some("Standup"), None, start, end));

        assert_eq!(none.title, NO_TITLE);
        assert_eq!(empty.title, NO_TITLE);
        assert_eq!(named.title, "Standup");
    }

    #[test]
    fn test_blank_location_is_dropped() {
        let (start, end) = all_day();
        let empty = EventItem::from_event(&event(None, Some(""), start.clone(), end.clone()));
        let blank = EventItem::from_event(&event(None, Some("   "), start.clone(), end.clone()));
        let real = EventItem::from_event(&event(None, Some("Room 2"), start, end));

        assert!(empty.location.is_none());
        assert!(blank.location.is_none());
        assert_eq!(real.location.as_deref(), Some("Room 2"));
    }

    #[test]
    fn test_all_day_events_have_no_instants() {
        let (start, end) = all_day();
        let item = EventItem::from_event(&event(Some("Vacation"), None, start, end));

        assert!(item.all_day);
        assert!(item.start.is_none());
        assert!(item.end.is_none());
    }

    #[test]
    fn test_timed_events_keep_both_instants() {
        let item = EventItem::from_event(&event(
            Some("Standup"),
            None,
            utc_time(9, 0),
            utc_time(9, 15),
        ));

        assert!(!item.all_day);
        assert!(item.start.is_some());
        assert!(item.end.is_some());
    }

    #[test]
    fn test_payload_serializes_compact_with_nulls() {
        let (ad_start, ad_end) = all_day();
        let events = vec![
            event(Some("Vacation"), None, ad_start, ad_end),
            event(Some("Standup"), Some("Room 2"), utc_time(9, 0), utc_time(9, 15)),
        ];
        let bounds = DayBounds::for_date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        let schedule = DaySchedule::new(&bounds, &events);

        let json = schedule.to_json().expect("Should serialize");
        assert_eq!(
            json,
            "{\"date\":\"2025-03-20\",\"events\":[\
             {\"title\":\"Vacation\",\"start\":null,\"end\":null,\"allDay\":true,\"location\":null},\
             {\"title\":\"Standup\",\"start\":\"2025-03-20T09:00:00.000Z\",\
             \"end\":\"2025-03-20T09:15:00.000Z\",\"allDay\":false,\"location\":\"Room 2\"}]}"
        );
    }
}
