use std::fmt;
use std::path::PathBuf;

/// The two configured URLs and the error-mode switch choosing between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub success_url: String,
    pub failure_url: String,
    pub use_failure: bool,
}

impl DownloadTarget {
    pub fn new(success_url: impl Into<String>, failure_url: impl Into<String>) -> Self {
        Self {
            success_url: success_url.into(),
            failure_url: failure_url.into(),
            use_failure: false,
        }
    }

    /// The URL every strategy downloads from.
    pub fn effective_url(&self) -> &str {
        if self.use_failure {
            &self.failure_url
        } else {
            &self.success_url
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Hand the URL to the system URL handler and forget about it
    NativeHandOff,
    /// Open the URL in a new browser window
    NewWindow,
    /// Request, check, buffer and save the payload ourselves
    FetchBlob,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Self::NativeHandOff, Self::NewWindow, Self::FetchBlob];

    pub fn label(self) -> &'static str {
        match self {
            Self::NativeHandOff => "System handler",
            Self::NewWindow => "New browser window",
            Self::FetchBlob => "Fetch + save",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Self::NativeHandOff => {
                "Native download. Server errors may open an error page or save the error body; \
                 they cannot be intercepted."
            }
            Self::NewWindow => {
                "Opens a new window. Server errors end up there and cannot be intercepted, \
                 but this window is never affected."
            }
            Self::FetchBlob => {
                "Recommended. Server errors are intercepted and reported here."
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    pub path: PathBuf,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    NativeNavigationTriggered,
    NewWindowOpened,
    BlobDownloaded { path: PathBuf },
    FetchFailed { reason: String },
}

/// One invocation of one strategy. Only ever logged.
#[derive(Debug, Clone)]
pub struct DownloadAttempt {
    pub url: String,
    pub strategy: Strategy,
    pub outcome: DownloadOutcome,
}

impl DownloadAttempt {
    pub fn new(url: impl Into<String>, strategy: Strategy, outcome: DownloadOutcome) -> Self {
        Self {
            url: url.into(),
            strategy,
            outcome,
        }
    }

    pub fn log(&self) {
        match &self.outcome {
            DownloadOutcome::FetchFailed { reason } => tracing::warn!(
                url = %self.url,
                strategy = %self.strategy,
                %reason,
                "download attempt failed"
            ),
            outcome => tracing::info!(
                url = %self.url,
                strategy = %self.strategy,
                ?outcome,
                "download attempt finished"
            ),
        }
    }
}
