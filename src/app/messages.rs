use folio_core::NodeId;
use folio_core::timeline::AnimationTicket;
use folio_core::typewriter::Outcome;
use iced::keyboard::{Key, Modifiers};
use std::time::Instant;

/// Messages emitted by the UI and by background tasks.
#[derive(Debug, Clone)]
pub enum Message {
    ToggleTheme,
    ToggleReducedMotion,
    PreviousSlide,
    NextSlide,
    SelectSlide(usize),
    TimelineExpand {
        control: NodeId,
        checked: bool,
    },
    TileExpand {
        control: NodeId,
        checked: bool,
    },
    ContactExpand {
        control: NodeId,
        checked: bool,
    },
    /// A press on a modal close affordance: the button or the backdrop.
    ModalDismissed(NodeId),
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    AnimationSettled(AnimationTicket),
    TypewriterFinished {
        target: NodeId,
        outcome: Outcome,
    },
    /// Carries the generation of the rotator that ended.
    RotatorStopped(u64),
    SafeQuit,
    Tick(Instant),
}
