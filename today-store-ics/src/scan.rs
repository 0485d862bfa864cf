//! Event discovery over the calendar directory.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use today_core::protocol::{AccessReply, ListEventsParams};
use today_core::{Event, TodayError, TodayResult};

use crate::parse::parse_event;

/// Probe read access to the calendar directory.
///
/// A permission refusal maps to a denied grant; a missing directory is
/// just an empty store and stays granted.
pub fn check_access(dir: &Path) -> AccessReply {
    match std::fs::read_dir(dir) {
        Ok(_) => AccessReply {
            granted: true,
            error: None,
        },
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => AccessReply {
            granted: false,
            error: None,
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => AccessReply {
            granted: true,
            error: None,
        },
        Err(e) => AccessReply {
            granted: false,
            error: Some(e.to_string()),
        },
    }
}

/// Load every event overlapping the requested half-open range, across
/// all calendars unless the params name specific ones.
pub fn events_in_range(dir: &Path, params: &ListEventsParams) -> TodayResult<Vec<Event>> {
    let time_min = parse_bound(&params.time_min)?;
    let time_max = parse_bound(&params.time_max)?;

    let mut events = Vec::new();
    for calendar_dir in calendar_dirs(dir, params.calendars.as_deref())? {
        collect_events(&calendar_dir, time_min, time_max, &mut events)?;
    }

    Ok(events)
}

fn parse_bound(value: &str) -> TodayResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TodayError::Store(format!("Invalid range bound '{}': {}", value, e)))
}

/// The store's calendars: the root directory itself plus each
/// first-level subdirectory, optionally restricted to named ones.
/// Subdirectories come back sorted so event order is deterministic.
fn calendar_dirs(root: &Path, filter: Option<&[String]>) -> TodayResult<Vec<PathBuf>> {
    if let Some(names) = filter {
        return Ok(names.iter().map(|name| root.join(name)).collect());
    }

    let mut dirs = vec![root.to_path_buf()];

    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(dirs),
        Err(e) => return Err(e.into()),
    };

    let mut subdirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();
    dirs.extend(subdirs);

    Ok(dirs)
}

/// Parse every .ics file in one directory, keeping events that overlap
/// the range.
fn collect_events(
    dir: &Path,
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
    out: &mut Vec<Event>,
) -> TodayResult<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "ics"))
        .collect();
    paths.sort();

    out.extend(
        paths
            .into_iter()
            .filter_map(|path| std::fs::read_to_string(&path).ok())
            .filter_map(|content| parse_event(&content))
            .filter(|event| overlaps(event, time_min, time_max)),
    );

    Ok(())
}

/// Half-open overlap test: the event must start before the range ends
/// and end after the range starts.
fn overlaps(event: &Event, time_min: DateTime<Utc>, time_max: DateTime<Utc>) -> bool {
    event.start.instant() < time_max && event.end.instant() > time_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use today_core::EventTime;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, h, m, 0).unwrap()
    }

    fn timed_event(start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event {
            id: "test@today".to_string(),
            summary: Some("Test".to_string()),
            location: None,
            start: EventTime::DateTimeUtc(start),
            end: EventTime::DateTimeUtc(end),
        }
    }

    #[test]
    fn test_overlap_is_half_open() {
        let min = utc(0, 0);
        let max = utc(23, 59);

        // Inside the range
        assert!(overlaps(&timed_event(utc(9, 0), utc(9, 15)), min, max));
        // Straddling the range start
        assert!(overlaps(
            &timed_event(utc(0, 0) - chrono::Duration::hours(1), utc(0, 30)),
            min,
            max
        ));
        // Ending exactly at range start does not overlap
        assert!(!overlaps(
            &timed_event(utc(0, 0) - chrono::Duration::hours(1), utc(0, 0)),
            min,
            max
        ));
        // Starting exactly at range end does not overlap
        assert!(!overlaps(&timed_event(max, max + chrono::Duration::hours(1)), min, max));
    }

    #[test]
    fn test_events_in_range_scans_root_and_subdirectories() {
        let root = tempfile::tempdir().expect("Should create tempdir");
        let work = root.path().join("work");
        std::fs::create_dir(&work).unwrap();

        let in_range = "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:TEST\nBEGIN:VEVENT\nUID:a\nSUMMARY:In\nDTSTART:20250320T090000Z\nDTEND:20250320T100000Z\nEND:VEVENT\nEND:VCALENDAR";
        let out_of_range = "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:TEST\nBEGIN:VEVENT\nUID:b\nSUMMARY:Out\nDTSTART:20250322T090000Z\nDTEND:20250322T100000Z\nEND:VEVENT\nEND:VCALENDAR";
        let in_subdir = "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:TEST\nBEGIN:VEVENT\nUID:c\nSUMMARY:Sub\nDTSTART:20250320T140000Z\nDTEND:20250320T150000Z\nEND:VEVENT\nEND:VCALENDAR";

        std::fs::write(root.path().join("a.ics"), in_range).unwrap();
        std::fs::write(root.path().join("b.ics"), out_of_range).unwrap();
        std::fs::write(root.path().join("notes.txt"), "not an event").unwrap();
        std::fs::write(work.join("c.ics"), in_subdir).unwrap();

        let params = ListEventsParams {
            time_min: "2025-03-20T00:00:00Z".to_string(),
            time_max: "2025-03-21T00:00:00Z".to_string(),
            calendars: None,
        };

        let events = events_in_range(root.path(), &params).expect("Should scan");
        let mut ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        ids.sort();

        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_calendar_filter_restricts_to_named_subdirectories() {
        let root = tempfile::tempdir().expect("Should create tempdir");
        let work = root.path().join("work");
        let home = root.path().join("home");
        std::fs::create_dir(&work).unwrap();
        std::fs::create_dir(&home).unwrap();

        let work_event = "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:TEST\nBEGIN:VEVENT\nUID:w\nSUMMARY:Work\nDTSTART:20250320T090000Z\nDTEND:20250320T100000Z\nEND:VEVENT\nEND:VCALENDAR";
        let home_event = "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:TEST\nBEGIN:VEVENT\nUID:h\nSUMMARY:Home\nDTSTART:20250320T090000Z\nDTEND:20250320T100000Z\nEND:VEVENT\nEND:VCALENDAR";

        std::fs::write(work.join("w.ics"), work_event).unwrap();
        std::fs::write(home.join("h.ics"), home_event).unwrap();

        let params = ListEventsParams {
            time_min: "2025-03-20T00:00:00Z".to_string(),
            time_max: "2025-03-21T00:00:00Z".to_string(),
            calendars: Some(vec!["work".to_string()]),
        };

        let events = events_in_range(root.path(), &params).expect("Should scan");
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["w"]);
    }

    #[test]
    fn test_missing_directory_is_an_empty_store() {
        let params = ListEventsParams {
            time_min: "2025-03-20T00:00:00Z".to_string(),
            time_max: "2025-03-21T00:00:00Z".to_string(),
            calendars: None,
        };

        let events =
            events_in_range(Path::new("/nonexistent/calendar"), &params).expect("Should scan");
        assert!(events.is_empty());

        let reply = check_access(Path::new("/nonexistent/calendar"));
        assert!(reply.granted);
    }
}
