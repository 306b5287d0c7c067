//! Timeout behavior for time-limited pipelines.

use herald_core::{Behavior, CancellationToken, DispatchError, Next, Request};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Error returned when a pipeline exceeds its deadline.
#[derive(Error, Debug, Clone)]
#[error("request pipeline timed out after {0:?}")]
pub struct TimeoutElapsed(pub Duration);

/// A behavior that bounds the rest of the chain with a deadline.
///
/// On expiry the downstream future is dropped and the failure surfaces
/// as a [`TimeoutElapsed`] handler error.
pub struct TimeoutBehavior {
    duration: Duration,
}

impl TimeoutBehavior {
    /// Create a timeout behavior with the given deadline.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl<R: Request> Behavior<R> for TimeoutBehavior {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R::Response>,
        _cancel: &CancellationToken,
    ) -> Result<R::Response, DispatchError> {
        match timeout(self.duration, next.run()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(DispatchError::Handler(Box::new(TimeoutElapsed(
                self.duration,
            )))),
        }
    }
}
