use super::super::state::App;
use super::Effect;
use folio_core::{ControlEvent, NodeId};
use tracing::debug;

impl App {
    pub(super) fn handle_timeline_expand(
        &mut self,
        control: NodeId,
        checked: bool,
        effects: &mut Vec<Effect>,
    ) {
        let handled =
            self.handle_control_event(ControlEvent::TimelineExpand { control, checked }, effects);
        debug!(
            control = control.index(),
            checked,
            handled,
            modal_open = self.modal_open(),
            "Timeline expand toggled"
        );
    }

    pub(super) fn handle_modal_dismissed(&mut self, target: NodeId, effects: &mut Vec<Effect>) {
        self.handle_control_event(ControlEvent::Click(target), effects);
    }

    pub(super) fn handle_escape(&mut self, effects: &mut Vec<Effect>) {
        if self.handle_control_event(ControlEvent::Escape, effects) {
            debug!("Escape closed the detail modal");
        }
    }

    pub(in crate::app) fn modal_open(&self) -> bool {
        self.page.modal().is_some_and(|modal| modal.is_open())
    }
}
