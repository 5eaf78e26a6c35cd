use folio_core::timeline::AnimationTicket;

mod appearance;
mod core;
mod detail;
mod navigation;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Effect {
    SavePreference,
    /// (Re)start every typewriter; a running one on the same target is cancelled.
    StartTypewriters,
    StartRotator,
    StopRotator,
    /// Settle an expand animation once its transition has had time to run.
    SettleLater(AnimationTicket),
    /// Scroll the trigger strip so this slide's trigger is visible.
    RevealTrigger(usize),
    QuitSafely,
}
