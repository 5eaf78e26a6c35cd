use super::super::state::App;
use super::Effect;
use tracing::info;

impl App {
    pub(super) fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.config.theme = self.config.theme.toggled();
        let dark_mode = self.config.theme.is_dark();
        {
            let mut doc = self.doc.lock();
            self.page.set_dark_mode(&mut doc, dark_mode);
        }
        info!(theme = %self.config.theme, "Toggled theme");
        // Typewriter frames carry the accent color, so they are restarted.
        effects.push(Effect::StartTypewriters);
        effects.push(Effect::SavePreference);
    }

    pub(super) fn handle_toggle_reduced_motion(&mut self, effects: &mut Vec<Effect>) {
        self.config.reduced_motion = !self.config.reduced_motion;
        self.typewriter.set_reduced_motion(self.config.reduced_motion);
        info!(reduced_motion = self.config.reduced_motion, "Toggled reduced motion");
        effects.push(Effect::StartTypewriters);
        effects.push(if self.config.reduced_motion {
            Effect::StopRotator
        } else {
            Effect::StartRotator
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::app::messages::Message;
    use crate::app::state::tests::sample_app;
    use crate::app::update::Effect;
    use folio_core::contrast::{DARK_TEXT, LIGHT_TEXT, TEXT_VAR};

    fn tile_text(app: &crate::app::App) -> Option<String> {
        let card = app.page.tiles()[0].card;
        let doc = app.doc.lock();
        doc.get(card)
            .and_then(|el| el.style_var(TEXT_VAR))
            .map(str::to_string)
    }

    #[test]
    fn reduced_motion_stops_the_rotator() {
        let mut app = sample_app();
        let effects = app.reduce(Message::ToggleReducedMotion);
        assert!(app.config.reduced_motion);
        assert_eq!(effects, vec![Effect::StartTypewriters, Effect::StopRotator]);

        let effects = app.reduce(Message::ToggleReducedMotion);
        assert!(effects.contains(&Effect::StartRotator));
    }

    #[test]
    fn toggling_twice_restores_card_tokens() {
        let mut app = sample_app();
        assert_eq!(tile_text(&app).as_deref(), Some(DARK_TEXT.text));
        app.reduce(Message::ToggleTheme);
        assert_eq!(tile_text(&app).as_deref(), Some(LIGHT_TEXT.text));
        app.reduce(Message::ToggleTheme);
        assert_eq!(tile_text(&app).as_deref(), Some(DARK_TEXT.text));
    }
}
