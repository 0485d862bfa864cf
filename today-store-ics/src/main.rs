//! today-store-ics - local .ics directory store backend.
//!
//! This binary implements the store backend protocol, answering
//! requests from the day-view binaries with JSON over stdin/stdout.
//! Events come from a directory of .ics files (one VEVENT per file),
//! with first-level subdirectories acting as separate calendars.

mod app_config;
mod parse;
mod scan;

use std::io::{self, BufRead, Write};

use app_config::StoreConfig;
use today_core::protocol::{Command, ListEventsParams, Request, Response};

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to read stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = Response::error(&format!("Failed to parse request: {}", e));
                writeln!(stdout, "{}", response).unwrap();
                stdout.flush().unwrap();
                continue;
            }
        };

        let response = handle_request(request);

        writeln!(stdout, "{}", response).unwrap();
        stdout.flush().unwrap();
    }
}

fn handle_request(request: Request) -> String {
    match request.command {
        Command::RequestAccess => handle_request_access(),
        Command::ListEvents => handle_list_events(&request.params),
    }
}

fn handle_request_access() -> String {
    let config = match StoreConfig::load() {
        Ok(c) => c,
        Err(e) => return Response::error(&e.to_string()),
    };

    Response::success(scan::check_access(&config.calendar_path()))
}

fn handle_list_events(params: &serde_json::Value) -> String {
    let params: ListEventsParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    let config = match StoreConfig::load() {
        Ok(c) => c,
        Err(e) => return Response::error(&e.to_string()),
    };

    match scan::events_in_range(&config.calendar_path(), &params) {
        Ok(events) => Response::success(events),
        Err(e) => Response::error(&e.to_string()),
    }
}
