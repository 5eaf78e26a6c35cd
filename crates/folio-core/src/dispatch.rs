use crate::dom::NodeId;
use crate::timeline::{AnimationTicket, NavKey};

/// Which family of control produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Timeline,
    Tile,
    Contact,
    Navigation,
    Keyboard,
    Pointer,
    Animation,
}

/// A user interaction, already classified by the control that fired it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    TimelineExpand { control: NodeId, checked: bool },
    TileExpand { control: NodeId, checked: bool },
    ContactExpand { control: NodeId, checked: bool },
    SelectSlide(usize),
    PreviousSlide,
    NextSlide,
    Key(NavKey),
    Escape,
    Click(NodeId),
    AnimationSettled(AnimationTicket),
}

impl ControlEvent {
    pub fn kind(&self) -> ControlKind {
        match self {
            ControlEvent::TimelineExpand { .. } => ControlKind::Timeline,
            ControlEvent::TileExpand { .. } => ControlKind::Tile,
            ControlEvent::ContactExpand { .. } => ControlKind::Contact,
            ControlEvent::SelectSlide(_)
            | ControlEvent::PreviousSlide
            | ControlEvent::NextSlide => ControlKind::Navigation,
            ControlEvent::Key(_) | ControlEvent::Escape => ControlKind::Keyboard,
            ControlEvent::Click(_) => ControlKind::Pointer,
            ControlEvent::AnimationSettled(_) => ControlKind::Animation,
        }
    }
}

/// What a dispatched event changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reaction {
    pub handled: bool,
    /// Animations left running; settle each once the transition has played.
    pub animating: Vec<AnimationTicket>,
}

impl Reaction {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            animating: Vec::new(),
        }
    }
}
