//! Retry behavior: re-runs the remainder of the chain on failure.

use herald_core::{Behavior, CancellationToken, DispatchError, Next, Request};

/// A behavior that re-runs its continuation — the inner behaviors and
/// the handler — until it succeeds or the attempt budget is spent.
///
/// Cancellation is respected between attempts: an observed token or a
/// `Cancelled` outcome ends the retry loop immediately.
pub struct RetryBehavior {
    attempts: u32,
}

impl RetryBehavior {
    /// Create a retry behavior making at most `attempts` runs (minimum 1).
    pub fn new(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
        }
    }
}

impl<R: Request> Behavior<R> for RetryBehavior {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R::Response>,
        cancel: &CancellationToken,
    ) -> Result<R::Response, DispatchError> {
        let mut outcome = next.run().await;
        for _ in 1..self.attempts {
            match &outcome {
                Ok(_) | Err(DispatchError::Cancelled) => break,
                Err(_) if cancel.is_cancelled() => break,
                Err(_) => outcome = next.run().await,
            }
        }
        outcome
    }
}
