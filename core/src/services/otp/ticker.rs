//! Background countdown ticker for the resend cooldown.
//!
//! The ticker decrements the flow's [`ResendCountdown`](crate::domain::entities::ResendCountdown)
//! once per second on a spawned tokio task. It stops on its own as soon as
//! the flow is closed, and aborting the task is always safe because every
//! state mutation happens inside a single short-lived write lock.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::debug;

use crate::domain::entities::CountdownPhase;

use super::service::FlowInner;

/// Handle to the background task driving the resend countdown.
///
/// Owned by the flow service; dropping the service (or calling
/// [`cancel`](Self::cancel) through `close`) aborts the task so no timer
/// outlives the flow it belongs to.
pub(super) struct CountdownTicker {
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Spawn the one-second tick loop over the shared flow state.
    pub(super) fn spawn(state: Arc<RwLock<FlowInner>>) -> Self {
        let handle = tokio::spawn(async move {
            let mut timer = interval(Duration::from_secs(1));
            // The first tick of a tokio interval fires immediately; consume
            // it so the countdown only starts moving after a full second.
            timer.tick().await;

            loop {
                timer.tick().await;

                let mut inner = state.write().await;
                if inner.closed {
                    break;
                }

                let before = inner.countdown.phase();
                let after = inner.countdown.tick();
                if before == CountdownPhase::Counting && after == CountdownPhase::Ready {
                    debug!(event = "resend_ready", "Resend cooldown elapsed");
                }
            }
        });

        Self { handle }
    }

    /// Stop the tick loop immediately.
    pub(super) fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
