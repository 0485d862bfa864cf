//! Text-mode rendering of a day schedule.

use crate::schedule::{DaySchedule, EventItem};

/// Render the human-readable listing: one line per event in sorted
/// order, or exactly "No events today." when the day is empty.
pub fn render_schedule(schedule: &DaySchedule) -> String {
    if schedule.events.is_empty() {
        return "No events today.".to_string();
    }

    schedule
        .events
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One event line: `<start>[–<end>][ (all-day)]: <title>[ @ <location>]`
fn render_line(item: &EventItem) -> String {
    let when = if item.all_day {
        "All day (all-day)".to_string()
    } else {
        let start = item
            .start
            .as_ref()
            .and_then(|t| t.local_short_time())
            .unwrap_or_default();
        let end = item
            .end
            .as_ref()
            .and_then(|t| t.local_short_time())
            .unwrap_or_default();
        format!("{start}–{end}")
    };

    match &item.location {
        Some(location) => format!("{}: {} @ {}", when, item.title, location),
        None => format!("{}: {}", when, item.title),
    }
}
