use thiserror::Error;

/// Fatal-ish application errors: configuration and persistence. Rejected user
/// input is never one of these; parse failures travel as plain message strings
/// back to the prompt.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Corrupt events file: {0}")]
    CorruptEvents(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;

impl From<std::io::Error> for SchedulerError {
    fn from(e: std::io::Error) -> Self {
        Self::Store(e.to_string())
    }
}
