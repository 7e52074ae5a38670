//! Debounced scheduling of matcher runs.
//!
//! Every query or filter change re-arms a single timer. Arming cancels
//! whatever the previous timer was doing, whether it was still waiting or
//! already running the match, so only the latest change ever produces
//! results.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::data_models::FilterValue;

pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Where the scheduler is for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebouncePhase {
    Idle,
    Pending {
        query: String,
        filter: FilterValue,
        deadline: Instant,
    },
    Running {
        query: String,
        filter: FilterValue,
    },
}

impl DebouncePhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, DebouncePhase::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, DebouncePhase::Pending { .. })
    }

    pub fn is_running(&self) -> bool {
        matches!(self, DebouncePhase::Running { .. })
    }
}

/// A re-armable, cancellable quiescence timer.
#[derive(Debug)]
pub struct DebounceTimer {
    window: Duration,
    armed: Mutex<Option<CancellationToken>>,
}

impl DebounceTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed: Mutex::new(None),
        }
    }

    /// Deadline a timer armed right now would fire at.
    pub fn deadline_from_now(&self) -> Instant {
        Instant::now() + self.window
    }

    /// Cancel the outstanding timer (and its task, if it already fired) and
    /// run `task` once the window elapses without another `arm`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let previous = self
            .armed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let window = self.window;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = async {
                    tokio::time::sleep(window).await;
                    task.await;
                } => {}
            }
        });
    }

    pub fn cancel(&self) {
        if let Some(token) = self
            .armed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.cancel();
        }
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
