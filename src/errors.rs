use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error while reading input or writing output: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} Not found")]
    NotFound(String),

    #[error("Unrecognized command: '{0}'")]
    ParseCommand(String),

    #[error("Invalid number format: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl AppError {
    /// Whether the session can report this error and keep going.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Io(_))
    }
}
