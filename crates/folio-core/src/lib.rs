//! Headless engine behind the portfolio viewer: content model, contrast-aware
//! theming, the typewriter animator and the timeline pager with its detail
//! modal, all rendering into a small document model.

pub mod cancellation;
pub mod color;
pub mod content;
pub mod contrast;
pub mod dispatch;
pub mod dom;
pub mod page;
pub mod rotator;
pub mod shell;
pub mod surface;
pub mod tiles;
pub mod timeline;
pub mod typewriter;

pub use content::{Content, ContentError, load_content};
pub use dispatch::{ControlEvent, ControlKind, Reaction};
pub use dom::{Document, NodeId, SharedDocument};
pub use page::{Environment, Page};
