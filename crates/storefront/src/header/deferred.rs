//! Deferred values tied to a render cycle.
//!
//! A page render kicks off the slow lookups the header depends on (login
//! state, cart) without waiting for them. Each lookup runs as a task owned by
//! the [`RenderCycle`] and is observed through a [`Deferred`] handle that is
//! `Pending` until the task settles it to `Resolved` or `Failed`.
//!
//! Tearing the cycle down abandons every unsettled lookup: the tasks are
//! aborted and any resolution that still arrives is discarded.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use uncmfrt_core::DeferredState;

/// Owner of the deferred lookups started during one render.
#[derive(Debug)]
pub struct RenderCycle {
    tasks: JoinSet<()>,
    live: Arc<AtomicBool>,
}

impl Default for RenderCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderCycle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Start resolving `future` and return a handle observing it.
    ///
    /// An `Err` settles the value as `Failed` and is logged under `label`;
    /// it never reaches the caller.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn defer<T, E, F>(&mut self, label: &'static str, future: F) -> Deferred<T>
    where
        T: Send + Sync + 'static,
        E: Display + Send + 'static,
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(DeferredState::Pending);
        let live = Arc::clone(&self.live);

        self.tasks.spawn(async move {
            let outcome = match future.await {
                Ok(value) => DeferredState::Resolved(value),
                Err(e) => {
                    tracing::warn!(deferred = label, error = %e, "Deferred value rejected");
                    DeferredState::Failed
                }
            };

            let applied = tx.send_if_modified(|state| {
                if !live.load(Ordering::Acquire) || state.is_settled() {
                    return false;
                }
                *state = outcome;
                true
            });

            if !applied {
                tracing::debug!(deferred = label, "Discarding resolution after teardown");
            }
        });

        Deferred { rx }
    }

    /// End the cycle, abandoning unsettled lookups. Same as dropping it.
    pub fn teardown(self) {
        drop(self);
    }

    fn close(&mut self) {
        self.live.store(false, Ordering::Release);
        self.tasks.abort_all();
    }
}

impl Drop for RenderCycle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Read side of a deferred value.
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    rx: watch::Receiver<DeferredState<T>>,
}

impl<T: Clone> Deferred<T> {
    /// A value that is already settled. Used when no lookup is needed.
    #[must_use]
    pub fn ready(state: DeferredState<T>) -> Self {
        let (_tx, rx) = watch::channel(state);
        Self { rx }
    }

    /// Current state, without waiting.
    #[must_use]
    pub fn state(&self) -> DeferredState<T> {
        self.rx.borrow().clone()
    }

    /// Wait until the value settles.
    ///
    /// Returns `Pending` if the lookup was abandoned before settling.
    pub async fn settled(&mut self) -> DeferredState<T> {
        let settled = self
            .rx
            .wait_for(DeferredState::is_settled)
            .await
            .map(|state| DeferredState::clone(&state));
        settled.unwrap_or_else(|_| self.state())
    }

    /// Wait up to `budget` for the value to settle and return its state.
    pub async fn settle_within(&mut self, budget: Duration) -> DeferredState<T> {
        tokio::time::timeout(budget, self.settled())
            .await
            .unwrap_or_else(|_| self.state())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn test_resolves() {
        let mut cycle = RenderCycle::new();
        let mut value = cycle.defer("login", async { Ok::<_, Infallible>(true) });
        assert_eq!(value.settled().await, DeferredState::Resolved(true));
    }

    #[tokio::test]
    async fn test_rejection_settles_as_failed() {
        let mut cycle = RenderCycle::new();
        let mut value = cycle.defer("cart", async { Err::<u32, _>("upstream 502") });
        assert_eq!(value.settled().await, DeferredState::Failed);
    }

    #[tokio::test]
    async fn test_pending_until_resolved() {
        let mut cycle = RenderCycle::new();
        let (tx, rx) = oneshot::channel::<u32>();
        let mut value = cycle.defer("cart", rx);

        assert_eq!(value.state(), DeferredState::Pending);
        assert!(tx.send(3).is_ok());
        assert_eq!(value.settled().await, DeferredState::Resolved(3));
        // Terminal: still resolved on later observation.
        assert_eq!(value.state(), DeferredState::Resolved(3));
    }

    #[tokio::test]
    async fn test_values_settle_independently() {
        let mut cycle = RenderCycle::new();
        let mut never = cycle.defer("login", std::future::pending::<Result<bool, Infallible>>());
        let mut cart = cycle.defer("cart", async { Ok::<_, Infallible>(2_u32) });

        assert_eq!(cart.settled().await, DeferredState::Resolved(2));
        assert_eq!(
            never.settle_within(Duration::from_millis(20)).await,
            DeferredState::Pending
        );
    }

    #[tokio::test]
    async fn test_teardown_abandons_pending_lookups() {
        let mut cycle = RenderCycle::new();
        let (tx, rx) = oneshot::channel::<u32>();
        let mut value = cycle.defer("cart", rx);

        cycle.teardown();
        // The task was aborted, so nobody is listening any more.
        let _ = tx.send(9);

        assert_eq!(
            value.settle_within(Duration::from_secs(1)).await,
            DeferredState::Pending
        );
    }

    #[tokio::test]
    async fn test_ready_value() {
        let mut value = Deferred::ready(DeferredState::Resolved(false));
        assert_eq!(value.settled().await, DeferredState::Resolved(false));
    }
}
