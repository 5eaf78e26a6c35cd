use super::expand::{Transition, set_expand_state};
use super::modal::DetailModal;
use crate::dom::{Document, NodeId, ScrollBehavior};
use tracing::debug;

/// Navigation keys the timeline container reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

/// Nodes rendered for one timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideNodes {
    pub slide: NodeId,
    pub trigger: NodeId,
    pub card: NodeId,
    /// Disabled, but still present, when the entry has no details.
    pub expand: NodeId,
}

#[derive(Debug, Clone)]
pub struct TimelinePager {
    container: NodeId,
    slides: Vec<SlideNodes>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    active: usize,
}

impl TimelinePager {
    pub fn new(
        container: NodeId,
        slides: Vec<SlideNodes>,
        prev: Option<NodeId>,
        next: Option<NodeId>,
    ) -> Self {
        Self {
            container,
            slides,
            prev,
            next,
            active: 0,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn slides(&self) -> &[SlideNodes] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Active index, always in `0..len` when there are slides.
    pub fn active(&self) -> Option<usize> {
        (!self.slides.is_empty()).then_some(self.active)
    }

    pub fn slide_of_control(&self, control: NodeId) -> Option<usize> {
        self.slides.iter().position(|nodes| nodes.expand == control)
    }

    pub fn slide_of_trigger(&self, trigger: NodeId) -> Option<usize> {
        self.slides.iter().position(|nodes| nodes.trigger == trigger)
    }

    /// Activate `index` modulo the slide count, negative values included.
    ///
    /// Closes the modal (without restoring focus) when it belongs to a slide
    /// that is no longer active, and snaps every inactive slide's expand
    /// control shut.
    pub fn set_active_slide(
        &mut self,
        doc: &mut Document,
        modal: Option<&mut DetailModal>,
        index: isize,
        focus_trigger: bool,
        scroll: ScrollBehavior,
    ) {
        let count = self.slides.len();
        for control in [self.prev, self.next].into_iter().flatten() {
            doc.set_flag(control, "disabled", count <= 1);
            doc.set_attribute(control, "aria-disabled", if count <= 1 { "true" } else { "false" });
        }
        if count == 0 {
            return;
        }

        let active = index.rem_euclid(count as isize) as usize;
        self.active = active;
        for (idx, nodes) in self.slides.iter().enumerate() {
            let is_active = idx == active;
            doc.toggle_class(nodes.slide, "is-active", is_active);
            doc.set_flag(nodes.slide, "hidden", !is_active);
            doc.set_attribute(nodes.slide, "aria-hidden", if is_active { "false" } else { "true" });
            doc.set_attribute(nodes.slide, "tabindex", if is_active { "0" } else { "-1" });

            doc.toggle_class(nodes.trigger, "is-active", is_active);
            doc.set_attribute(
                nodes.trigger,
                "aria-selected",
                if is_active { "true" } else { "false" },
            );
            if is_active {
                doc.set_attribute(nodes.trigger, "aria-current", "true");
            } else {
                doc.remove_attribute(nodes.trigger, "aria-current");
            }
            doc.set_attribute(nodes.trigger, "tabindex", if is_active { "0" } else { "-1" });
        }

        let trigger = self.slides[active].trigger;
        doc.scroll_into_view(trigger, scroll);

        if let Some(modal) = modal {
            if modal.owner_slide().is_some_and(|owner| owner != active) {
                modal.close(doc, false);
            }
        }
        for (idx, nodes) in self.slides.iter().enumerate() {
            if idx == active {
                continue;
            }
            set_expand_state(doc, nodes.expand, false, Transition::Instant);
        }

        if focus_trigger {
            doc.focus(trigger);
        }
        debug!(active, count, "Timeline slide activated");
    }

    pub fn step(
        &mut self,
        doc: &mut Document,
        modal: Option<&mut DetailModal>,
        delta: isize,
        focus_trigger: bool,
    ) {
        let target = self.active as isize + delta;
        self.set_active_slide(doc, modal, target, focus_trigger, ScrollBehavior::Smooth);
    }

    /// Arrow keys move one slide and carry focus to its trigger.
    pub fn handle_key(&mut self, doc: &mut Document, modal: Option<&mut DetailModal>, key: NavKey) {
        let delta = match key {
            NavKey::Left => -1,
            NavKey::Right => 1,
        };
        self.step(doc, modal, delta, true);
    }
}
