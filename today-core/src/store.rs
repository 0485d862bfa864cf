//! Store backend subprocess client.
//!
//! Talks to an external store backend (e.g. `today-store-ics`) with
//! JSON over stdin/stdout. Backends own the actual calendar access,
//! including any OS permission prompt, so a `request_access` call may
//! sit behind a dialog for as long as the user leaves it open.

use crate::today_config::TodayConfig;
use crate::day::DayBounds;
use crate::error::{TodayError, TodayResult};
use crate::event::{self, Event};
use crate::protocol::{AccessReply, Command, ListEventsParams, Request, Response};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::sync::oneshot;

/// Outcome of the permission request, delivered exactly once.
#[derive(Debug)]
pub struct AccessOutcome {
    pub granted: bool,
    pub error: Option<String>,
}

/// Handle to a store backend, constructed once at startup and passed
/// explicitly through the pipeline.
#[derive(Clone)]
pub struct Store(String);

impl Store {
    pub fn from_name(name: &str) -> Self {
        Store(name.to_string())
    }

    pub fn from_config(config: &TodayConfig) -> Self {
        Self::from_name(&config.store)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn binary_path(&self) -> TodayResult<std::path::PathBuf> {
        let binary_name = format!("today-store-{}", self.0);
        let binary_path = which::which(&binary_name)
            .map_err(|_| TodayError::StoreNotInstalled(self.0.clone()))?;
        Ok(binary_path)
    }

    /// Ask the backend for read access to calendar data.
    ///
    /// The request runs on its own task; the returned receiver fires
    /// exactly once with the (granted, error) outcome. No timeout is
    /// applied anywhere on this path.
    pub fn request_access(&self) -> oneshot::Receiver<AccessOutcome> {
        let (tx, rx) = oneshot::channel();
        let store = self.clone();

        tokio::spawn(async move {
            tracing::debug!(backend = %store.0, "requesting calendar access");
            let outcome = match store
                .call::<AccessReply>(Command::RequestAccess, serde_json::json!({}))
                .await
            {
                Ok(reply) => AccessOutcome {
                    granted: reply.granted,
                    error: reply.error,
                },
                Err(e) => AccessOutcome {
                    granted: false,
                    error: Some(e.to_string()),
                },
            };
            // Send fails only if the caller stopped waiting.
            let _ = tx.send(outcome);
        });

        rx
    }

    /// Query every accessible calendar for events overlapping the day,
    /// sorted ascending by start instant. Ties keep the order the
    /// backend returned them in.
    pub async fn events_in_range(&self, bounds: &DayBounds) -> TodayResult<Vec<Event>> {
        let params = ListEventsParams {
            time_min: bounds.time_min(),
            time_max: bounds.time_max(),
            calendars: None,
        };
        let params =
            serde_json::to_value(params).map_err(|e| TodayError::Serialization(e.to_string()))?;

        let mut events: Vec<Event> = self.call(Command::ListEvents, params).await?;
        event::sort_by_start(&mut events);

        tracing::debug!(count = events.len(), "fetched events from store backend");
        Ok(events)
    }

    /// Send one command to the backend and parse its response.
    async fn call<R: DeserializeOwned>(
        &self,
        command: Command,
        params: serde_json::Value,
    ) -> TodayResult<R> {
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| TodayError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                TodayError::Store(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        // Wait for the backend and collect output
        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(TodayError::Store(format!(
                "Backend exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.is_empty() {
            return Err(TodayError::Store("Backend returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| TodayError::Store(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(TodayError::Store(error)),
        }
    }
}
