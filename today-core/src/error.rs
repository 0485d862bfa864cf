//! Error types for the today ecosystem.

use thiserror::Error;

/// Errors that can occur while assembling a day view.
#[derive(Error, Debug)]
pub enum TodayError {
    #[error("Error requesting calendar access: {0}")]
    AccessRequest(String),

    #[error(
        "Calendar access was not granted. Enable it in your system's privacy settings under Calendars."
    )]
    AccessDenied,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Store backend '{0}' not found in PATH")]
    StoreNotInstalled(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodayError {
    /// Process exit code for this error.
    ///
    /// 1 = the access request itself failed, 2 = access denied,
    /// 3 = output serialization failed. Failures with no dedicated
    /// code (store, config, IO) exit 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TodayError::AccessDenied => 2,
            TodayError::Serialization(_) => 3,
            _ => 1,
        }
    }
}

/// Result type alias for today operations.
pub type TodayResult<T> = Result<T, TodayError>;
