mod api;
mod app;
mod application;
mod domain;
mod logging;
mod ui;
mod utils;

use iced::window;

fn main() -> iced::Result {
    logging::init_logging();

    iced::application(app::DemoApp::default, app::update, app::view)
        .title("Download Strategy Demo")
        .window(window::Settings {
            size: iced::Size::new(760.0, 640.0),
            ..Default::default()
        })
        .run()
}
