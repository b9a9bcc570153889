use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SUCCESS_URL: &str =
    "https://cdn.wsform.com/wp-content/uploads/2020/06/industry.csv";
pub const DEFAULT_FAILURE_URL: &str =
    "https://cdn.wsform.com/wp-content/uploads/2020/06/not_exist.csv";

/// Filename used when neither the response nor the URL suggests one.
pub const FALLBACK_FILENAME: &str = "downloaded_file";

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(5);

/// Startup configuration of the demo window
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub success_url: String,
    pub failure_url: String,
    pub download_dir: PathBuf,
    pub status_ttl: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            success_url: DEFAULT_SUCCESS_URL.to_string(),
            failure_url: DEFAULT_FAILURE_URL.to_string(),
            download_dir: default_download_dir(),
            status_ttl: STATUS_TTL,
        }
    }
}

/// The user's download folder, falling back to `~/Downloads` and then `./downloads`.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("downloads")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert!(config.success_url.ends_with("industry.csv"));
        assert!(config.failure_url.ends_with("not_exist.csv"));
        assert_eq!(config.status_ttl, Duration::from_secs(5));
        assert!(!config.download_dir.as_os_str().is_empty());
    }
}
