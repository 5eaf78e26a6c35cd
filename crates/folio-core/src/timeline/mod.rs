//! Timeline pager, its per-slide expand controls and the shared detail modal.

mod expand;
mod modal;
mod pager;

pub use expand::{
    ANIMATING_ATTR, ANIMATION_SEQ_ATTR, AnimationTicket, CLOSING_CLASS, OPENING_CLASS, Transition,
    current_animation, is_animating, set_expand_state, settle_animation, settle_expand_animation,
};
pub use modal::{
    CLOSE_ATTR, DetailModal, MODAL_DESCRIPTION_ID, MODAL_ID, MODAL_META_ID, MODAL_TITLE_ID,
    ModalOwner, ToggleResult,
};
pub use pager::{NavKey, SlideNodes, TimelinePager};
