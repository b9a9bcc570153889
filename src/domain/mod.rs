pub mod config;
pub mod error;
pub mod model;

pub use config::DemoConfig;
pub use error::AppError;
pub use model::{
    DownloadAttempt, DownloadOutcome, DownloadTarget, SavedFile, Severity, StatusMessage,
    Strategy,
};
