pub mod download_coordinator;
pub mod status;

pub use download_coordinator::{DownloadCoordinator, SystemLauncher};
pub use status::{StatusReporter, Ticket};
