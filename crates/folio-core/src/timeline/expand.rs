use crate::dom::{Document, NodeId};
use tracing::debug;

/// Holds the sequence number of the running animation while one plays.
pub const ANIMATING_ATTR: &str = "data-animating";
/// Last sequence number handed out for the control; survives settling.
pub const ANIMATION_SEQ_ATTR: &str = "data-animation-seq";
pub const OPENING_CLASS: &str = "is-opening";
pub const CLOSING_CLASS: &str = "is-closing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Snap to the new state; always applies and clears any running animation.
    Instant,
    /// Play the open/close animation; refused while one is already running.
    Animated,
}

/// One run of an animated transition on a control. Settling with a ticket
/// from an earlier run is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationTicket {
    pub control: NodeId,
    pub seq: u64,
}

pub fn is_animating(doc: &Document, node: NodeId) -> bool {
    doc.get(node)
        .is_some_and(|el| el.has_attribute(ANIMATING_ATTR))
}

/// Ticket of the animation currently playing on `node`, if any.
pub fn current_animation(doc: &Document, node: NodeId) -> Option<AnimationTicket> {
    let seq = doc.get(node)?.attribute(ANIMATING_ATTR)?.parse().ok()?;
    Some(AnimationTicket { control: node, seq })
}

/// Move an expand control to `open`, returning whether the change applied.
pub fn set_expand_state(
    doc: &mut Document,
    node: NodeId,
    open: bool,
    transition: Transition,
) -> bool {
    let Some(element) = doc.get(node) else {
        return false;
    };
    match transition {
        Transition::Instant => {
            apply_state(doc, node, open);
            settle_expand_animation(doc, node);
        }
        Transition::Animated => {
            if is_animating(doc, node) {
                debug!(control = node.index(), open, "Expand transition refused while animating");
                return false;
            }
            let seq = element
                .attribute(ANIMATION_SEQ_ATTR)
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(0)
                .wrapping_add(1);
            let seq = seq.to_string();
            apply_state(doc, node, open);
            doc.set_attribute(node, ANIMATION_SEQ_ATTR, &seq);
            doc.set_attribute(node, ANIMATING_ATTR, &seq);
            doc.toggle_class(node, OPENING_CLASS, open);
            doc.toggle_class(node, CLOSING_CLASS, !open);
        }
    }
    true
}

/// Clear the animating guard once the transition has played out.
pub fn settle_expand_animation(doc: &mut Document, node: NodeId) {
    doc.remove_attribute(node, ANIMATING_ATTR);
    doc.remove_class(node, OPENING_CLASS);
    doc.remove_class(node, CLOSING_CLASS);
}

/// Settle the animation `ticket` was issued for, unless the control has
/// since been reset or started another one.
pub fn settle_animation(doc: &mut Document, ticket: AnimationTicket) -> bool {
    if current_animation(doc, ticket.control) != Some(ticket) {
        debug!(control = ticket.control.index(), seq = ticket.seq, "Stale settle ignored");
        return false;
    }
    settle_expand_animation(doc, ticket.control);
    true
}

fn apply_state(doc: &mut Document, node: NodeId, open: bool) {
    doc.set_checked(node, open);
    doc.set_attribute(node, "aria-expanded", if open { "true" } else { "false" });
    doc.toggle_class(node, "is-open", open);
}
