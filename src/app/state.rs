use super::messages::Message;
use super::update::Effect;
use crate::cache::Preference;
use crate::config::AppConfig;
use folio_core::rotator::RotatorHandle;
use folio_core::shell::standard_shell;
use folio_core::tiles::CardTemplate;
use folio_core::typewriter::Typewriter;
use folio_core::{Content, Environment, Page, SharedDocument};
use iced::Task;
use std::path::PathBuf;
use tracing::info;

/// Application state: the shared document, the page mounted into it and the
/// background animators that write to it.
pub struct App {
    pub(super) doc: SharedDocument,
    pub(super) page: Page,
    pub(super) typewriter: Typewriter,
    pub(super) rotator: Option<RotatorHandle>,
    pub(super) rotator_generation: u64,
    pub(super) config: AppConfig,
    pub(super) content_path: PathBuf,
    /// Expand controls waiting for their settle timer.
    pub(super) pending_settles: usize,
}

impl App {
    pub fn bootstrap(
        content: Content,
        config: AppConfig,
        content_path: PathBuf,
        preference: Option<Preference>,
    ) -> (App, Task<Message>) {
        let mut app = App::new(content, config, content_path, preference);
        let effects = vec![Effect::StartTypewriters, Effect::StartRotator];
        let task = Task::batch(effects.into_iter().map(|effect| app.run_effect(effect)));
        (app, task)
    }

    /// Mount `content` without starting any background work.
    pub(super) fn new(
        content: Content,
        mut config: AppConfig,
        content_path: PathBuf,
        preference: Option<Preference>,
    ) -> App {
        if let Some(preference) = preference {
            config.theme = preference.theme;
        }
        let env = Environment {
            dark_mode: config.theme.is_dark(),
            reduced_motion: config.reduced_motion,
        };
        let mut doc = standard_shell();
        let page = Page::mount(&mut doc, &content, env, &CardTemplate);
        // Mounting activates the first slide, which is already in view.
        let _ = doc.take_scroll_request();
        info!(
            path = %content_path.display(),
            theme = %config.theme,
            "Viewer state ready"
        );
        App {
            doc: doc.into_shared(),
            page,
            typewriter: Typewriter::new(config.typewriter, config.reduced_motion),
            rotator: None,
            rotator_generation: 0,
            config,
            content_path,
            pending_settles: 0,
        }
    }

    pub(super) fn preference(&self) -> Preference {
        Preference {
            theme: self.config.theme,
        }
    }

    pub(super) fn active_slide(&self) -> Option<usize> {
        self.page.pager().and_then(|pager| pager.active())
    }

    /// Whether anything on screen is mid-animation and needs frame ticks.
    pub(super) fn is_animating(&self) -> bool {
        self.pending_settles > 0 || !self.typewriter.registry().is_empty()
    }

    pub(super) fn rotator_running(&self) -> bool {
        self.rotator.as_ref().is_some_and(|handle| !handle.is_stopped())
    }
}

#[cfg(test)]
pub(in crate::app) mod tests {
    use super::*;

    pub(in crate::app) const SAMPLE_CONTENT: &str = r#"{
        "greeting": {"heading": "Hi", "description": "I build Rust tools", "keywords": ["Rust"],
                     "platforms": {"items": ["web", "desktop"], "interval_ms": 1500}},
        "intro": {"lines": ["What do you do?", "Build things."],
                  "timeline": [
                      {"title": "School", "date": "2018"},
                      {"title": "Studio", "subtitle": "Engineer", "date": "2021", "description": "Shipped the engine."},
                      {"title": "Now", "date": "2024", "description": "Still shipping."}
                  ]},
        "projects": {"pro": [{"name": "Atlas", "details": "Maps"}, {"name": "Beacon"}],
                     "lines": ["Things I made."]},
        "socials": [{"platform": "GitHub", "username": "me", "url": "https://github.com/me"}]
    }"#;

    pub(in crate::app) fn sample_app() -> App {
        let content = Content::from_json(SAMPLE_CONTENT).expect("sample content parses");
        App::new(
            content,
            AppConfig::default(),
            PathBuf::from("sample.json"),
            None,
        )
    }

    #[test]
    fn cached_theme_wins_over_config() {
        let content = Content::from_json(SAMPLE_CONTENT).expect("sample content parses");
        let preference = Preference {
            theme: crate::config::ThemeMode::Night,
        };
        let app = App::new(
            content,
            AppConfig::default(),
            PathBuf::from("sample.json"),
            Some(preference),
        );
        assert_eq!(app.preference(), preference);
        assert!(app.page.env().dark_mode);
        assert_eq!(app.active_slide(), Some(0));
    }

    #[test]
    fn fresh_app_has_nothing_running() {
        let app = sample_app();
        assert!(!app.is_animating());
        assert!(!app.rotator_running());
        assert_eq!(app.doc.lock().pending_scroll(), None);
    }
}
