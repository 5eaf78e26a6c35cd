use super::frame::Frame;
use crate::dom::{NodeId, SharedDocument};

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("typewriter target {0:?} is no longer attached")]
    Detached(NodeId),
}

/// Where a typewriter session paints its frames.
pub trait TypewriterSurface: Send + Sync {
    fn paint(&self, frame: &Frame, markup: String) -> Result<(), SurfaceError>;
    /// Accessible label kept on the first entry, not the animating text.
    fn set_label(&self, label: &str) -> Result<(), SurfaceError>;
    fn is_attached(&self) -> bool;
}

/// A node of the shared document.
#[derive(Debug, Clone)]
pub struct DocumentTarget {
    doc: SharedDocument,
    node: NodeId,
}

impl DocumentTarget {
    pub fn new(doc: SharedDocument, node: NodeId) -> Self {
        Self { doc, node }
    }
}

impl TypewriterSurface for DocumentTarget {
    fn paint(&self, frame: &Frame, markup: String) -> Result<(), SurfaceError> {
        let mut doc = self.doc.lock();
        if !doc.is_attached(self.node) {
            return Err(SurfaceError::Detached(self.node));
        }
        doc.paint_frame(self.node, frame.clone(), markup);
        Ok(())
    }

    fn set_label(&self, label: &str) -> Result<(), SurfaceError> {
        let mut doc = self.doc.lock();
        if !doc.is_attached(self.node) {
            return Err(SurfaceError::Detached(self.node));
        }
        doc.set_attribute(self.node, "aria-label", label);
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.doc.lock().is_attached(self.node)
    }
}
