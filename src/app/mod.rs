mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::cache::Preference;
use crate::config::AppConfig;
use crate::theme::Theme;
use folio_core::Content;
use iced::{Size, window};
use std::path::PathBuf;

/// Launch the viewer over already-loaded content.
pub fn run_app(
    content: Content,
    config: AppConfig,
    content_path: PathBuf,
    preference: Option<Preference>,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        exit_on_close_request: false,
        ..window::Settings::default()
    };

    iced::application("Folio", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| Theme::from(app.config.theme).into())
        .run_with(move || App::bootstrap(content, config, content_path, preference))
}
