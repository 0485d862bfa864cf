//! Core library for the today day-view tools.
//!
//! This crate provides everything the `today` and `today-json` binaries
//! share:
//! - `Event` and related types for calendar events
//! - `day` for local day-range computation
//! - `schedule` for shaping events into the day payload
//! - `render` for the human-readable listing
//! - `protocol` and `store` for talking to store backends

pub mod day;
pub mod error;
pub mod event;
pub mod protocol;
pub mod render;
pub mod schedule;
pub mod store;
pub mod today_config;

pub use error::{TodayError, TodayResult};
pub use event::{Event, EventTime};
pub use schedule::{DaySchedule, EventItem};
