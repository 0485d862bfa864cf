//! Store backend protocol types.
//!
//! Defines the JSON protocol spoken between the day-view binaries and
//! store backends over stdin/stdout.
//!
//! The protocol is designed to be language-agnostic: any executable
//! that speaks it can serve calendar data, including platform shims
//! that sit in front of an OS calendar service.

use serde::{Deserialize, Serialize};

/// Commands that store backends must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    RequestAccess,
    ListEvents,
}

/// Request sent to a backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a backend.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

/// Result of a `request_access` command, mirroring the platform's
/// asynchronous (granted, error) permission callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessReply {
    pub granted: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Parameters for `list_events`. The range is half-open: an event
/// matches when it overlaps [time_min, time_max).
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEventsParams {
    pub time_min: String,
    pub time_max: String,
    /// Restrict the query to these calendars; None searches every
    /// accessible one.
    #[serde(default)]
    pub calendars: Option<Vec<String>>,
}
