use crate::api::ApiClient;
use crate::application::{DownloadCoordinator, StatusReporter, SystemLauncher, Ticket};
use crate::domain::{
    AppError, DemoConfig, DownloadAttempt, DownloadOutcome, SavedFile, Severity, Strategy,
};
use crate::ui::{DemoMessage, DownloadView};
use iced::task;
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub struct DemoApp {
    view: DownloadView,
    coordinator: DownloadCoordinator,
    status: StatusReporter,
    status_ttl: Duration,
    // Abort handle for the timer that will clear the current status message
    status_timer: Option<task::Handle>,
}

impl Default for DemoApp {
    fn default() -> Self {
        Self::new(DemoConfig::default())
    }
}

impl DemoApp {
    pub fn new(config: DemoConfig) -> Self {
        let coordinator =
            DownloadCoordinator::new(ApiClient::default(), Arc::new(SystemLauncher));
        Self::with_coordinator(config, coordinator)
    }

    pub fn with_coordinator(config: DemoConfig, coordinator: DownloadCoordinator) -> Self {
        tracing::info!(
            download_dir = %config.download_dir.display(),
            "download demonstrator ready"
        );
        Self {
            view: DownloadView::new(&config),
            coordinator,
            status: StatusReporter::default(),
            status_ttl: config.status_ttl,
            status_timer: None,
        }
    }

    /// Replace the status message and restart its expiry timer.
    fn report(&mut self, text: impl Into<String>, severity: Severity) -> Task<Message> {
        self.cancel_status_timer();
        let ticket = self.status.post(text, severity);
        let ttl = self.status_ttl;

        let (timer, handle) = Task::perform(
            async move { tokio::time::sleep(ttl).await },
            move |()| Message::StatusExpired(ticket),
        )
        .abortable();
        self.status_timer = Some(handle);
        timer
    }

    fn clear_status(&mut self) {
        self.cancel_status_timer();
        self.status.clear();
    }

    fn cancel_status_timer(&mut self) {
        if let Some(handle) = self.status_timer.take() {
            handle.abort();
        }
    }

    fn start(&mut self, strategy: Strategy) -> Task<Message> {
        if strategy == Strategy::FetchBlob && self.view.is_fetching {
            tracing::debug!("fetch already in flight");
            return Task::none();
        }
        let url = self.view.target.effective_url().to_string();
        self.clear_status();

        // Launchers spawn processes, keep them off the UI thread
        let coordinator = self.coordinator.clone();
        match strategy {
            Strategy::NativeHandOff => Task::perform(
                async move {
                    let launch_url = url.clone();
                    let outcome = tokio::task::spawn_blocking(move || {
                        coordinator.trigger_native(&launch_url)
                    })
                    .await
                    .unwrap_or(DownloadOutcome::NativeNavigationTriggered);
                    (url, outcome)
                },
                |(url, outcome)| Message::NativeHandedOff(url, outcome),
            ),
            Strategy::NewWindow => Task::perform(
                async move {
                    let launch_url = url.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        coordinator.open_in_new_window(&launch_url)
                    })
                    .await
                    .unwrap_or_else(|e| Err(AppError::WindowRefused(e.to_string())));
                    (url, result)
                },
                |(url, result)| Message::WindowOpened(url, result),
            ),
            Strategy::FetchBlob => {
                self.view.is_fetching = true;

                let dir = self.view.download_dir.clone();
                Task::perform(
                    async move {
                        let result = coordinator.fetch_and_save(url.clone(), dir).await;
                        (url, result)
                    },
                    |(url, result)| Message::FetchFinished(url, result),
                )
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DemoMessage),
    /// The system handler was asked to take the URL; its result is unknowable
    NativeHandedOff(String, DownloadOutcome),
    WindowOpened(String, Result<DownloadOutcome, AppError>),
    /// (Requested URL, saved file or error)
    FetchFinished(String, Result<SavedFile, AppError>),
    DownloadDirSelected(Option<PathBuf>),
    StatusExpired(Ticket),
}

pub fn update(app: &mut DemoApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                DemoMessage::StrategyPressed(strategy) => return app.start(strategy),
                DemoMessage::ChooseFolderPressed => {
                    let current = app.view.download_dir.clone();
                    return Task::perform(
                        async move {
                            rfd::AsyncFileDialog::new()
                                .set_directory(&current)
                                .pick_folder()
                                .await
                                .map(|handle| handle.path().to_path_buf())
                        },
                        Message::DownloadDirSelected,
                    );
                }
                _ => {}
            }
        }
        Message::NativeHandedOff(url, outcome) => {
            DownloadAttempt::new(url, Strategy::NativeHandOff, outcome).log();
            return app.report(
                "Download triggered. If the server fails, the handler may show an error page \
                 or save the error body.",
                Severity::Warning,
            );
        }
        Message::WindowOpened(url, result) => match result {
            Ok(outcome) => {
                DownloadAttempt::new(url, Strategy::NewWindow, outcome).log();
                return app.report(
                    "Tried downloading in a new window. Server errors will show up there.",
                    Severity::Info,
                );
            }
            Err(e) => {
                tracing::warn!(%url, "new window refused: {}", e);
                return app.report(e.to_string(), Severity::Error);
            }
        },
        Message::FetchFinished(url, result) => {
            app.view.is_fetching = false;
            match result {
                Ok(saved) => {
                    let text = format!(
                        "Downloaded {} ({} bytes) to {}",
                        saved.filename,
                        saved.size,
                        saved.path.display()
                    );
                    let outcome = DownloadOutcome::BlobDownloaded { path: saved.path };
                    DownloadAttempt::new(url, Strategy::FetchBlob, outcome).log();
                    return app.report(text, Severity::Success);
                }
                Err(e) => {
                    let reason = e.to_string();
                    let text = format!("Download failed: {}", reason);
                    let outcome = DownloadOutcome::FetchFailed { reason };
                    DownloadAttempt::new(url, Strategy::FetchBlob, outcome).log();
                    return app.report(text, Severity::Error);
                }
            }
        }
        Message::DownloadDirSelected(Some(dir)) => {
            tracing::info!(dir = %dir.display(), "download directory changed");
            app.view.download_dir = dir;
        }
        Message::DownloadDirSelected(None) => {
            // User cancelled dialog
        }
        Message::StatusExpired(ticket) => {
            if app.status.expire(ticket) {
                app.status_timer = None;
            }
        }
    }
    Task::none()
}

pub fn view(app: &DemoApp) -> iced::Element<'_, Message> {
    app.view.view(app.status.current()).map(Message::UiMessage)
}
