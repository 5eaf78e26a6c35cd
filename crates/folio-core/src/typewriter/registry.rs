use crate::cancellation::CancellationToken;
use crate::dom::NodeId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Ownership map from a typewriter target to the token of its live session.
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    live: Arc<Mutex<HashMap<NodeId, CancellationToken>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh token for `target`, cancelling the previous owner
    /// before returning.
    pub fn claim(&self, target: NodeId) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = self.live.lock().insert(target, token.clone());
        if let Some(previous) = previous {
            debug!(target_node = target.index(), "Cancelling superseded typewriter session");
            previous.cancel();
        }
        token
    }

    /// Drop the entry only if `token` still owns it.
    pub fn release(&self, target: NodeId, token: &CancellationToken) {
        let mut live = self.live.lock();
        if live.get(&target).is_some_and(|current| current.same_as(token)) {
            live.remove(&target);
        }
    }

    pub fn cancel(&self, target: NodeId) {
        if let Some(token) = self.live.lock().remove(&target) {
            token.cancel();
        }
    }

    pub fn cancel_all(&self) {
        let drained: Vec<_> = self.live.lock().drain().collect();
        for (_, token) in drained {
            token.cancel();
        }
    }

    pub fn is_live(&self, target: NodeId) -> bool {
        self.live.lock().contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.live.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn claiming_again_cancels_the_previous_token() {
        let mut doc = Document::new();
        let body = doc.body();
        let target = doc.create_element("span", body);
        let registry = SessionRegistry::new();

        let first = registry.claim(target);
        let second = registry.claim(target);
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(registry.len(), 1);

        // A stale owner releasing must not evict the live one.
        registry.release(target, &first);
        assert!(registry.is_live(target));
        registry.release(target, &second);
        assert!(registry.is_empty());
    }

    #[test]
    fn cancel_all_signals_every_session() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_element("span", body);
        let b = doc.create_element("span", body);
        let registry = SessionRegistry::new();
        let ta = registry.claim(a);
        let tb = registry.claim(b);
        registry.cancel_all();
        assert!(ta.is_cancelled() && tb.is_cancelled());
        assert!(registry.is_empty());
    }
}
