//! # Quote Context
//!
//! Request-scoped deadline and cancellation signal.
//!
//! A [`QuoteContext`] travels with every quote request into every source
//! call. Sources wrap their network future with [`QuoteContext::run`], so a
//! slow source never outlives the request that asked for it: when the
//! deadline passes or the [`CancelHandle`] fires, the call returns a
//! [`SourceError`] immediately instead of waiting for its own timeout.
//!
//! # Examples
//!
//! ```
//! use best_execution::infrastructure::sources::context::CancelHandle;
//! use std::time::Duration;
//!
//! let handle = CancelHandle::new();
//! let ctx = handle.context().with_timeout(Duration::from_secs(5));
//! assert!(!ctx.is_cancelled());
//!
//! handle.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use crate::infrastructure::sources::error::{SourceError, SourceResult};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Owner side of a cancellation signal.
///
/// Every context created from the handle observes [`CancelHandle::cancel`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Creates a new, not yet cancelled, handle.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Signals cancellation to every derived context.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Creates a context without a deadline that observes this handle.
    #[must_use]
    pub fn context(&self) -> QuoteContext {
        QuoteContext {
            deadline: None,
            cancel: Some(self.tx.subscribe()),
        }
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Deadline and cancellation signal of one quote request.
#[derive(Debug, Clone, Default)]
pub struct QuoteContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

impl QuoteContext {
    /// A context that never expires and is never cancelled.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a copy whose deadline is at most `timeout` from now.
    ///
    /// An earlier existing deadline is kept.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns a copy whose deadline is at most `deadline`.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns true if the request has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drives `call` until it completes, the deadline passes, or the
    /// request is cancelled, whichever comes first.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `call`, `SourceError::Timeout` when the
    /// deadline passes first, or `SourceError::Cancelled` when the request
    /// is cancelled first.
    pub async fn run<T, F>(&self, call: F) -> SourceResult<T>
    where
        F: Future<Output = SourceResult<T>>,
    {
        if self.is_cancelled() {
            return Err(SourceError::cancelled("request cancelled"));
        }

        tokio::select! {
            biased;
            reason = self.done() => Err(reason),
            result = call => result,
        }
    }

    /// Resolves once the request is past its deadline or cancelled.
    async fn done(&self) -> SourceError {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        let cancelled = async {
            let Some(mut rx) = self.cancel.clone() else {
                return std::future::pending::<()>().await;
            };
            let fired = rx.wait_for(|cancelled| *cancelled).await.is_ok();
            if !fired {
                // Handle dropped without cancelling.
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            () = deadline => SourceError::timeout("request deadline exceeded"),
            () = cancelled => SourceError::cancelled("request cancelled"),
        }
    }
}
