use super::expand::{Transition, set_expand_state};
use crate::content::TimelineEntry;
use crate::dom::{Document, NodeId};
use tracing::{debug, info};

pub const MODAL_ID: &str = "timeline-modal";
pub const MODAL_TITLE_ID: &str = "timeline-modal-title";
pub const MODAL_META_ID: &str = "timeline-modal-meta";
pub const MODAL_DESCRIPTION_ID: &str = "timeline-modal-description";
pub const CLOSE_ATTR: &str = "data-modal-close";

/// The expand control currently holding the modal open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalOwner {
    pub control: NodeId,
    pub slide: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleResult {
    Opened,
    Closed,
    /// Entry has no details; the control was snapped back closed.
    Rejected,
}

/// Shared overlay showing one timeline entry's details.
///
/// At most one expand control owns the modal. Every mutation goes through
/// [`DetailModal::open`] or [`DetailModal::close`], and both leave the
/// overlay, the scroll lock and the owner consistent before returning.
#[derive(Debug, Clone)]
pub struct DetailModal {
    overlay: NodeId,
    title: NodeId,
    meta: NodeId,
    description: NodeId,
    owner: Option<ModalOwner>,
}

impl DetailModal {
    pub fn new(overlay: NodeId, title: NodeId, meta: NodeId, description: NodeId) -> Self {
        Self {
            overlay,
            title,
            meta,
            description,
            owner: None,
        }
    }

    /// Bind to the shell's modal markup; `None` when any part is missing.
    pub fn locate(doc: &Document) -> Option<Self> {
        Some(Self::new(
            doc.find_by_id(MODAL_ID)?,
            doc.find_by_id(MODAL_TITLE_ID)?,
            doc.find_by_id(MODAL_META_ID)?,
            doc.find_by_id(MODAL_DESCRIPTION_ID)?,
        ))
    }

    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    pub fn owner(&self) -> Option<ModalOwner> {
        self.owner
    }

    pub fn owner_slide(&self) -> Option<usize> {
        self.owner.map(|owner| owner.slide)
    }

    pub fn is_open(&self) -> bool {
        self.owner.is_some()
    }

    pub fn open(
        &mut self,
        doc: &mut Document,
        entry: &TimelineEntry,
        control: NodeId,
        slide: usize,
    ) {
        if let Some(previous) = self.owner.take() {
            if previous.control != control {
                set_expand_state(doc, previous.control, false, Transition::Instant);
            }
        }

        doc.set_text(self.title, entry.title.trim());
        doc.set_text(self.meta, &entry.meta_line());
        doc.set_text(self.description, entry.details().unwrap_or_default());

        if !set_expand_state(doc, control, true, Transition::Animated) {
            set_expand_state(doc, control, true, Transition::Instant);
        }
        self.owner = Some(ModalOwner { control, slide });

        doc.set_flag(self.overlay, "hidden", false);
        doc.set_attribute(self.overlay, "aria-hidden", "false");
        doc.add_class(self.overlay, "is-open");
        doc.set_scroll_locked(true);
        doc.focus(self.overlay);
        info!(slide, title = entry.title.as_str(), "Opened timeline detail modal");
    }

    pub fn close(&mut self, doc: &mut Document, restore_focus: bool) {
        self.hide(doc);
        if let Some(owner) = self.owner.take() {
            set_expand_state(doc, owner.control, false, Transition::Instant);
            if restore_focus {
                doc.focus(owner.control);
            }
            debug!(slide = owner.slide, restore_focus, "Closed timeline detail modal");
        }
    }

    fn hide(&self, doc: &mut Document) {
        doc.set_flag(self.overlay, "hidden", true);
        doc.set_attribute(self.overlay, "aria-hidden", "true");
        doc.remove_class(self.overlay, "is-open");
        doc.set_scroll_locked(false);
    }

    /// A slide's expand control changed to `checked`.
    pub fn on_expand_toggled(
        &mut self,
        doc: &mut Document,
        entry: &TimelineEntry,
        control: NodeId,
        slide: usize,
        checked: bool,
    ) -> ToggleResult {
        if checked {
            if !entry.has_details() {
                set_expand_state(doc, control, false, Transition::Instant);
                debug!(slide, "Expand rejected for entry without details");
                return ToggleResult::Rejected;
            }
            self.open(doc, entry, control, slide);
            return ToggleResult::Opened;
        }

        if self.owner.is_some_and(|owner| owner.control == control) {
            self.hide(doc);
            self.owner = None;
        }
        if !set_expand_state(doc, control, false, Transition::Animated) {
            set_expand_state(doc, control, false, Transition::Instant);
        }
        ToggleResult::Closed
    }

    /// Close when `target` sits inside a close affordance of this modal.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        if !self.is_open() || !doc.contains(self.overlay, target) {
            return false;
        }
        match doc.closest_with_attribute(target, CLOSE_ATTR) {
            Some(affordance) if doc.contains(self.overlay, affordance) => {
                self.close(doc, true);
                true
            }
            _ => false,
        }
    }

    pub fn handle_escape(&mut self, doc: &mut Document) -> bool {
        if !self.is_open() {
            return false;
        }
        self.close(doc, true);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::standard_shell;

    fn entry(title: &str, description: Option<&str>) -> TimelineEntry {
        TimelineEntry {
            title: title.to_string(),
            subtitle: "Studio".to_string(),
            date: "2022".to_string(),
            image: None,
            description: description.map(str::to_string),
        }
    }

    fn setup() -> (Document, DetailModal, NodeId, NodeId) {
        let mut doc = standard_shell();
        let modal = DetailModal::locate(&doc).expect("shell has a modal");
        let body = doc.body();
        let a = doc.create_element("input", body);
        let b = doc.create_element("input", body);
        (doc, modal, a, b)
    }

    #[test]
    fn opening_for_another_control_closes_the_first() {
        let (mut doc, mut modal, a, b) = setup();
        modal.open(&mut doc, &entry("A", Some("First")), a, 0);
        modal.open(&mut doc, &entry("B", Some("Second")), b, 1);

        assert!(!doc.get(a).expect("a").is_checked());
        assert!(doc.get(b).expect("b").is_checked());
        assert_eq!(modal.owner(), Some(ModalOwner { control: b, slide: 1 }));
        let title = doc.find_by_id(MODAL_TITLE_ID).expect("title");
        assert_eq!(doc.get(title).expect("title").html(), "B");
        let meta = doc.find_by_id(MODAL_META_ID).expect("meta");
        assert_eq!(doc.get(meta).expect("meta").html(), "Studio · 2022");
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn blank_entries_are_rejected_and_snap_closed() {
        let (mut doc, mut modal, a, _) = setup();
        let result = modal.on_expand_toggled(&mut doc, &entry("A", Some("  ")), a, 0, true);
        assert_eq!(result, ToggleResult::Rejected);
        assert!(!modal.is_open());
        let control = doc.get(a).expect("a");
        assert!(!control.is_checked());
        assert_eq!(control.attribute("aria-expanded"), Some("false"));
        let overlay = doc.get(modal.overlay()).expect("overlay");
        assert!(overlay.is_hidden());
    }

    #[test]
    fn unchecking_the_owner_closes_without_moving_focus() {
        let (mut doc, mut modal, a, b) = setup();
        doc.focus(b);
        modal.on_expand_toggled(&mut doc, &entry("A", Some("Body")), a, 0, true);
        crate::timeline::settle_expand_animation(&mut doc, a);
        doc.focus(b);

        let result = modal.on_expand_toggled(&mut doc, &entry("A", Some("Body")), a, 0, false);
        assert_eq!(result, ToggleResult::Closed);
        assert!(!modal.is_open());
        assert!(!doc.is_scroll_locked());
        assert_eq!(doc.focused(), Some(b));
        assert!(doc.get(a).expect("a").has_class("is-closing"));
    }

    #[test]
    fn close_affordance_and_escape_restore_focus() {
        let (mut doc, mut modal, a, _) = setup();
        modal.open(&mut doc, &entry("A", Some("Body")), a, 0);
        let close = doc
            .find_by_id("timeline-modal-close")
            .expect("shell has a close button");
        let outside = doc.body();

        assert!(!modal.handle_click(&mut doc, outside));
        assert!(modal.handle_click(&mut doc, close));
        assert_eq!(doc.focused(), Some(a));
        assert!(!doc.get(a).expect("a").is_checked());

        modal.open(&mut doc, &entry("A", Some("Body")), a, 0);
        assert!(modal.handle_escape(&mut doc));
        assert!(!modal.handle_escape(&mut doc));
        assert!(!doc.is_scroll_locked());
    }
}
