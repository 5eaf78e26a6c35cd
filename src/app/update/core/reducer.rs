use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use folio_core::ControlEvent;
use folio_core::timeline::NavKey;
use folio_core::typewriter::Outcome;
use iced::keyboard::{Key, key};
use tracing::{debug, info, warn};

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::ToggleReducedMotion => self.handle_toggle_reduced_motion(&mut effects),
            Message::PreviousSlide => {
                self.handle_navigation(ControlEvent::PreviousSlide, &mut effects)
            }
            Message::NextSlide => self.handle_navigation(ControlEvent::NextSlide, &mut effects),
            Message::SelectSlide(index) => {
                self.handle_navigation(ControlEvent::SelectSlide(index), &mut effects)
            }
            Message::TimelineExpand { control, checked } => {
                self.handle_timeline_expand(control, checked, &mut effects)
            }
            Message::TileExpand { control, checked } => {
                let event = ControlEvent::TileExpand { control, checked };
                self.handle_control_event(event, &mut effects);
            }
            Message::ContactExpand { control, checked } => {
                let event = ControlEvent::ContactExpand { control, checked };
                self.handle_control_event(event, &mut effects);
            }
            Message::ModalDismissed(target) => self.handle_modal_dismissed(target, &mut effects),
            Message::KeyPressed { key, modifiers } => {
                let nav = match key.as_ref() {
                    Key::Named(key::Named::ArrowLeft) => Some(NavKey::Left),
                    Key::Named(key::Named::ArrowRight) => Some(NavKey::Right),
                    _ => None,
                };
                if let Some(nav) = nav.filter(|_| modifiers.is_empty()) {
                    self.handle_navigation(ControlEvent::Key(nav), &mut effects);
                } else if matches!(key.as_ref(), Key::Named(key::Named::Escape)) {
                    self.handle_escape(&mut effects);
                } else if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::AnimationSettled(ticket) => {
                self.pending_settles = self.pending_settles.saturating_sub(1);
                self.handle_control_event(ControlEvent::AnimationSettled(ticket), &mut effects);
            }
            Message::TypewriterFinished { target, outcome } => match outcome {
                Outcome::Failed(reason) => {
                    warn!(target_node = target.index(), %reason, "Typewriter failed")
                }
                outcome => debug!(target_node = target.index(), ?outcome, "Typewriter ended"),
            },
            Message::RotatorStopped(generation) => {
                if generation == self.rotator_generation {
                    self.rotator = None;
                }
            }
            Message::SafeQuit => {
                info!("Quit requested");
                effects.push(Effect::QuitSafely);
            }
            Message::Tick(_) => {}
        }

        effects
    }

    /// Route an event through the page, queue a settle for every animation
    /// it started and reveal the trigger the pager asked to scroll to.
    pub(in crate::app) fn handle_control_event(
        &mut self,
        event: ControlEvent,
        effects: &mut Vec<Effect>,
    ) -> bool {
        let (reaction, scroll) = {
            let mut doc = self.doc.lock();
            let reaction = self.page.dispatch(&mut doc, event);
            (reaction, doc.take_scroll_request())
        };
        for ticket in reaction.animating {
            self.pending_settles += 1;
            effects.push(Effect::SettleLater(ticket));
        }
        // iced scrolls in one jump, so the requested behavior is not used.
        let revealed = scroll.and_then(|(trigger, _)| self.page.pager()?.slide_of_trigger(trigger));
        if let Some(slide) = revealed {
            effects.push(Effect::RevealTrigger(slide));
        }
        reaction.handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::sample_app;
    use crate::config::ThemeMode;
    use folio_core::timeline::is_animating;
    use iced::keyboard::Modifiers;

    fn key_press(named: key::Named) -> Message {
        Message::KeyPressed {
            key: Key::Named(named),
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn arrow_keys_page_the_timeline() {
        let mut app = sample_app();
        app.reduce(key_press(key::Named::ArrowLeft));
        assert_eq!(app.active_slide(), Some(2));
        app.reduce(key_press(key::Named::ArrowRight));
        assert_eq!(app.active_slide(), Some(0));
    }

    #[test]
    fn theme_shortcut_restarts_typewriters() {
        let mut app = sample_app();
        let effects = app.reduce(Message::KeyPressed {
            key: Key::Character("t".into()),
            modifiers: Modifiers::default(),
        });
        assert_eq!(app.config.theme, ThemeMode::Night);
        assert!(effects.iter().any(|e| matches!(e, Effect::StartTypewriters)));
        assert!(effects.iter().any(|e| matches!(e, Effect::SavePreference)));
    }

    #[test]
    fn settle_messages_drain_the_pending_count() {
        let mut app = sample_app();
        let control = app.page.tiles()[0].expand.expect("first tile has details");
        let effects = app.reduce(Message::TileExpand {
            control,
            checked: true,
        });
        let [Effect::SettleLater(ticket)] = effects.as_slice() else {
            panic!("expected a single settle, got {effects:?}");
        };
        assert_eq!(ticket.control, control);
        assert!(app.is_animating());

        app.reduce(Message::AnimationSettled(*ticket));
        assert_eq!(app.pending_settles, 0);
        assert!(!is_animating(&app.doc.lock(), control));
    }

    #[test]
    fn an_old_settle_timer_does_not_end_a_newer_animation() {
        let mut app = sample_app();
        let control = app.page.pager().expect("pager").slides()[1].expand;
        let open = || Message::TimelineExpand {
            control,
            checked: true,
        };
        let settle_of = |effects: Vec<Effect>| {
            effects.into_iter().find_map(|effect| match effect {
                Effect::SettleLater(ticket) => Some(ticket),
                _ => None,
            })
        };

        app.reduce(Message::SelectSlide(1));
        let first = settle_of(app.reduce(open())).expect("first open animates");
        app.reduce(Message::NextSlide);
        app.reduce(Message::PreviousSlide);
        let second = settle_of(app.reduce(open())).expect("second open animates");
        assert_ne!(first, second);

        app.reduce(Message::AnimationSettled(first));
        assert!(is_animating(&app.doc.lock(), control));
        app.reduce(Message::AnimationSettled(second));
        assert!(!is_animating(&app.doc.lock(), control));
        assert_eq!(app.pending_settles, 0);
    }

    #[test]
    fn quit_is_an_effect() {
        let mut app = sample_app();
        let effects = app.reduce(Message::SafeQuit);
        assert_eq!(effects, vec![Effect::QuitSafely]);
    }
}
