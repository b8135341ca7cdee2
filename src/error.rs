use std::io;

use thiserror::Error;

/// Failure talking to the high-score store. Never reaches the engine.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score service request failed: {0}")]
    Http(Box<ureq::Error>),
    #[error("score store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("malformed score payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ureq::Error> for ScoreError {
    fn from(error: ureq::Error) -> Self {
        Self::Http(Box::new(error))
    }
}

/// Errors that stop the binary before or after a session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("could not start logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
