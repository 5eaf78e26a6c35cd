use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Debug, thiserror::Error)]
#[error("operation cancelled at stage={stage}")]
pub struct Cancelled {
    pub stage: &'static str,
}

/// How a cancellable wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Elapsed,
    Cancelled,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    pub fn check_cancelled(&self, stage: &'static str) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled { stage });
        }
        Ok(())
    }

    /// True when both handles refer to the same token.
    pub fn same_as(&self, other: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register before re-checking so a cancel in between still wakes us.
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Sleep for `delay`, returning early if the token fires.
    pub async fn sleep(&self, delay: Duration) -> Wait {
        if self.is_cancelled() {
            return Wait::Cancelled;
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Wait::Cancelled,
            _ = tokio::time::sleep(delay) => {
                if self.is_cancelled() { Wait::Cancelled } else { Wait::Elapsed }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleep_elapses_when_not_cancelled() {
        let token = CancellationToken::new();
        assert_eq!(token.sleep(Duration::from_millis(40)).await, Wait::Elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_short_circuits_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let started = tokio::time::Instant::now();
        assert_eq!(token.sleep(Duration::from_secs(60)).await, Wait::Cancelled);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert!(token.check_cancelled("test").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_wakes_a_pending_sleep_early() {
        let token = CancellationToken::new();
        let sleeper = token.clone();
        let handle = tokio::spawn(async move { sleeper.sleep(Duration::from_secs(60)).await });
        tokio::time::sleep(Duration::from_millis(5)).await;
        token.cancel();
        let started = tokio::time::Instant::now();
        let outcome = handle.await.expect("sleeper task should not panic");
        assert_eq!(outcome, Wait::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn identity_follows_clones() {
        let token = CancellationToken::new();
        assert!(token.same_as(&token.clone()));
        assert!(!token.same_as(&CancellationToken::new()));
    }
}
