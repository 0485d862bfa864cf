//! ICS parsing using the icalendar crate's parser.

use icalendar::{
    DatePerhapsTime,
    parser::{read_calendar, unfold},
};
use today_core::{Event, EventTime};

/// Parse ICS content into an Event. Returns None when the content has
/// no well-formed VEVENT.
pub fn parse_event(content: &str) -> Option<Event> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    // Required fields
    let id = vevent.find_prop("UID")?.val.to_string();
    let start = to_event_time(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);
    let end = to_event_time(DatePerhapsTime::try_from(vevent.find_prop("DTEND")?).ok()?);

    // Titles and locations pass through untouched, empty strings
    // included; the consumer decides placeholders.
    let summary = vevent.find_prop("SUMMARY").map(|p| p.val.to_string());
    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());

    Some(Event {
        id,
        summary,
        location,
        start,
        end,
    })
}

/// Convert icalendar's DatePerhapsTime to our EventTime, preserving
/// timezone info
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            icalendar::CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, tzid } => {
                EventTime::DateTimeZoned {
                    datetime: date_time,
                    tzid,
                }
            }
        },
    }
}
