use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    Fetch(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Could not open a new window: {0}")]
    WindowRefused(String),
}
