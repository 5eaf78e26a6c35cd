use crate::cancellation::{CancellationToken, Wait};
use crate::content::PlatformRotation;
use crate::dom::{NodeId, SharedDocument};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_millis(2200);

/// Stops the rotator it was issued for, explicitly or when dropped.
#[derive(Debug)]
pub struct RotatorHandle {
    token: CancellationToken,
}

impl RotatorHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for RotatorHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Cycles the greeting's platform label.
#[derive(Debug)]
pub struct Rotator {
    doc: SharedDocument,
    target: NodeId,
    items: Vec<String>,
    interval: Duration,
    token: CancellationToken,
}

impl Rotator {
    /// Show the first item and hand back the handle plus the loop to drive.
    /// `None` when there is nothing to show.
    pub fn start(
        doc: &SharedDocument,
        target: NodeId,
        rotation: &PlatformRotation,
    ) -> Option<(RotatorHandle, Rotator)> {
        let items: Vec<String> = rotation
            .items
            .iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        let first = items.first()?;
        doc.lock().set_text(target, first);

        let interval = rotation
            .interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ROTATION_INTERVAL);
        let token = CancellationToken::new();
        let rotator = Rotator {
            doc: doc.clone(),
            target,
            items,
            interval,
            token: token.clone(),
        };
        Some((RotatorHandle { token }, rotator))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn run(self) {
        if self.items.len() < 2 {
            return;
        }
        let mut index = 0;
        loop {
            if self.token.sleep(self.interval).await == Wait::Cancelled {
                debug!(target_node = self.target.index(), "Platform rotator stopped");
                return;
            }
            index = (index + 1) % self.items.len();
            let shown = {
                let mut doc = self.doc.lock();
                let attached = doc.is_attached(self.target);
                if attached {
                    doc.set_text(self.target, &self.items[index]);
                }
                attached
            };
            if !shown {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn shown(doc: &SharedDocument, node: NodeId) -> String {
        doc.lock().get(node).expect("target").html().to_string()
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_until_the_handle_is_dropped() {
        let doc = Document::new().into_shared();
        let node = {
            let mut doc = doc.lock();
            let body = doc.body();
            doc.create_element("span", body)
        };
        let rotation = PlatformRotation {
            items: vec!["web".to_string(), " ".to_string(), "desktop".to_string()],
            interval_ms: Some(100),
        };
        let (handle, rotator) = Rotator::start(&doc, node, &rotation).expect("items present");
        assert_eq!(shown(&doc, node), "web");
        let task = tokio::spawn(rotator.run());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(shown(&doc, node), "desktop");
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(shown(&doc, node), "web");

        drop(handle);
        task.await.expect("rotator task should not panic");
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(shown(&doc, node), "web");
    }

    #[test]
    fn empty_rotation_does_not_start() {
        let doc = Document::new().into_shared();
        let body = doc.lock().body();
        let rotation = PlatformRotation::default();
        assert!(Rotator::start(&doc, body, &rotation).is_none());
    }
}
