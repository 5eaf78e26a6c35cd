use super::super::state::App;
use super::Effect;
use folio_core::ControlEvent;
use tracing::debug;

impl App {
    pub(super) fn handle_navigation(&mut self, event: ControlEvent, effects: &mut Vec<Effect>) {
        let before = self.active_slide();
        if !self.handle_control_event(event, effects) {
            return;
        }
        let after = self.active_slide();
        if before != after {
            debug!(?before, ?after, "Active slide changed");
        }
    }
}
