pub mod comparison;

use std::path::PathBuf;

use iced::{
    widget::{button, column, container, row, text, text_input, toggler, Column, Row, Space},
    Alignment, Color, Element, Length,
};

use crate::domain::{DemoConfig, DownloadTarget, Severity, StatusMessage, Strategy};
use comparison::ComparisonTable;

const BLUE: Color = Color::from_rgb(0.145, 0.388, 0.922);
const RED: Color = Color::from_rgb(0.725, 0.110, 0.110);
const GREEN: Color = Color::from_rgb(0.020, 0.588, 0.412);
const AMBER: Color = Color::from_rgb(0.706, 0.325, 0.035);
const GREY: Color = Color::from_rgb(0.533, 0.533, 0.533);

/// Main view state
pub struct DownloadView {
    pub target: DownloadTarget,
    pub download_dir: PathBuf,
    pub is_fetching: bool,
    pub show_comparison: bool,
    comparison: ComparisonTable,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self::new(&DemoConfig::default())
    }
}

#[derive(Debug, Clone)]
pub enum DemoMessage {
    SuccessUrlChanged(String),
    FailureUrlChanged(String),
    FailureModeToggled(bool),
    StrategyPressed(Strategy),
    ChooseFolderPressed,
    ComparisonToggled,
}

impl DownloadView {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            target: DownloadTarget::new(&config.success_url, &config.failure_url),
            download_dir: config.download_dir.clone(),
            is_fetching: false,
            show_comparison: false,
            comparison: ComparisonTable::load(),
        }
    }

    pub fn update(&mut self, message: DemoMessage) {
        match message {
            // The target is frozen while a fetch holds a copy of it
            DemoMessage::SuccessUrlChanged(url) if !self.is_fetching => {
                self.target.success_url = url;
            }
            DemoMessage::FailureUrlChanged(url) if !self.is_fetching => {
                self.target.failure_url = url;
            }
            DemoMessage::FailureModeToggled(on) if !self.is_fetching => {
                self.target.use_failure = on;
            }
            DemoMessage::ComparisonToggled => {
                self.show_comparison = !self.show_comparison;
            }
            DemoMessage::SuccessUrlChanged(_)
            | DemoMessage::FailureUrlChanged(_)
            | DemoMessage::FailureModeToggled(_) => {
                tracing::debug!("ignoring configuration change during fetch");
            }
            DemoMessage::StrategyPressed(_) | DemoMessage::ChooseFolderPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn view<'a>(&'a self, status: Option<&'a StatusMessage>) -> Element<'a, DemoMessage> {
        let mut content = column![
            text("Download strategy comparison").size(24).color(BLUE),
            self.config_panel(),
            Row::with_children(Strategy::ALL.map(|s| self.strategy_card(s))).spacing(10),
        ]
        .spacing(14)
        .padding(20)
        .align_x(Alignment::Center);

        if let Some(status) = status {
            content = content.push(
                text(&status.text)
                    .size(15)
                    .color(severity_color(status.severity)),
            );
        }

        content.push(self.comparison_panel()).into()
    }

    fn config_panel(&self) -> Element<'_, DemoMessage> {
        let success_input = text_input("Download URL", &self.target.success_url).padding(8);
        let failure_input =
            text_input("Broken or invalid URL", &self.target.failure_url).padding(8);
        let mut failure_toggle = toggler(self.target.use_failure).label("Simulate server error");

        let (success_input, failure_input) = if self.is_fetching {
            (success_input, failure_input)
        } else {
            failure_toggle = failure_toggle.on_toggle(DemoMessage::FailureModeToggled);
            (
                success_input.on_input(DemoMessage::SuccessUrlChanged),
                failure_input.on_input(DemoMessage::FailureUrlChanged),
            )
        };

        container(
            column![
                row![
                    column![text("Working URL").size(13).color(BLUE), success_input]
                        .spacing(3)
                        .width(Length::FillPortion(3)),
                    column![text("Failing URL").size(13).color(RED), failure_input]
                        .spacing(3)
                        .width(Length::FillPortion(3)),
                    column![text("Error mode").size(13), failure_toggle]
                        .spacing(3)
                        .width(Length::FillPortion(2)),
                ]
                .spacing(10)
                .align_y(Alignment::End),
                row![
                    text(format!("Fetch saves to {}", self.download_dir.display())).size(12),
                    Space::new().width(Length::Fill),
                    button(text("Choose folder").size(12))
                        .on_press(DemoMessage::ChooseFolderPressed)
                        .padding([4, 10]),
                ]
                .align_y(Alignment::Center),
                text("Configure the URLs and the error switch, then try any strategy below.")
                    .size(12)
                    .color(GREY),
            ]
            .spacing(8),
        )
        .padding(16)
        .style(container::rounded_box)
        .into()
    }

    fn strategy_card(&self, strategy: Strategy) -> Element<'_, DemoMessage> {
        let busy = strategy == Strategy::FetchBlob && self.is_fetching;
        let label = if busy { "Downloading..." } else { "Download" };
        let accent = if strategy == Strategy::FetchBlob {
            GREEN
        } else {
            BLUE
        };

        container(
            column![
                text(strategy.label()).size(14).color(accent),
                button(text(label))
                    .on_press_maybe((!busy).then_some(DemoMessage::StrategyPressed(strategy)))
                    .padding([7, 18]),
                text(strategy.hint()).size(12).color(GREY),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
        )
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fixed(150.0))
        .style(container::rounded_box)
        .into()
    }

    fn comparison_panel(&self) -> Element<'_, DemoMessage> {
        let toggle_label = if self.show_comparison {
            "Hide comparison"
        } else {
            "Show comparison"
        };
        let mut panel = column![button(text(toggle_label).size(13))
            .on_press(DemoMessage::ComparisonToggled)
            .width(Length::Fill)]
        .spacing(6);

        if self.show_comparison {
            let header = Row::with_children(
                std::iter::once(Space::new().width(Length::FillPortion(2)).into()).chain(
                    self.comparison.columns.iter().map(|c| {
                        text(c)
                            .size(14)
                            .color(BLUE)
                            .width(Length::FillPortion(3))
                            .into()
                    }),
                ),
            );
            let rows = self.comparison.rows.iter().map(|r| {
                Row::with_children(
                    std::iter::once(
                        text(&r.aspect)
                            .size(13)
                            .color(GREY)
                            .width(Length::FillPortion(2))
                            .into(),
                    )
                    .chain(
                        r.cells
                            .iter()
                            .map(|cell| text(cell).size(13).width(Length::FillPortion(3)).into()),
                    ),
                )
                .into()
            });

            panel = panel.push(
                Column::with_children(std::iter::once(header.into()).chain(rows)).spacing(4),
            );
        }

        container(panel)
            .padding(8)
            .style(container::rounded_box)
            .into()
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => BLUE,
        Severity::Success => GREEN,
        Severity::Warning => AMBER,
        Severity::Error => RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> DownloadView {
        DownloadView::new(&DemoConfig {
            success_url: "https://x.test/ok.csv".to_string(),
            failure_url: "https://x.test/missing.csv".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_edits_update_target() {
        let mut view = view();
        view.update(DemoMessage::SuccessUrlChanged("https://y.test/a.bin".to_string()));
        view.update(DemoMessage::FailureModeToggled(true));

        assert_eq!(view.target.success_url, "https://y.test/a.bin");
        assert_eq!(view.target.effective_url(), "https://x.test/missing.csv");
    }

    #[test]
    fn test_target_is_read_only_while_fetching() {
        let mut view = view();
        view.is_fetching = true;
        view.update(DemoMessage::SuccessUrlChanged("https://evil.test".to_string()));
        view.update(DemoMessage::FailureUrlChanged("https://evil.test".to_string()));
        view.update(DemoMessage::FailureModeToggled(true));

        assert_eq!(view.target.effective_url(), "https://x.test/ok.csv");
        assert_eq!(view.target.failure_url, "https://x.test/missing.csv");
    }

    #[test]
    fn test_comparison_starts_collapsed() {
        let mut view = view();
        assert!(!view.show_comparison);
        view.update(DemoMessage::ComparisonToggled);
        assert!(view.show_comparison);
        view.update(DemoMessage::ComparisonToggled);
        assert!(!view.show_comparison);
    }

    #[test]
    fn test_severity_colors_are_distinct() {
        assert_ne!(severity_color(Severity::Success), severity_color(Severity::Error));
        assert_ne!(severity_color(Severity::Info), severity_color(Severity::Warning));
    }
}
