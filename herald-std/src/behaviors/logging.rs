//! Logging behavior for request observation.

use herald_core::{Behavior, CancellationToken, DispatchError, Next, Request};

/// A behavior that logs each request and its outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBehavior;

impl<R: Request + std::fmt::Debug> Behavior<R> for LoggingBehavior {
    async fn handle(
        &self,
        request: &R,
        next: Next<'_, R::Response>,
        _cancel: &CancellationToken,
    ) -> Result<R::Response, DispatchError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(?request, "dispatching request");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = request; // Suppress unused warning
        }

        let outcome = next.run().await;

        #[cfg(feature = "tracing")]
        if let Err(error) = &outcome {
            tracing::warn!(%error, "request pipeline failed");
        }
        outcome
    }
}
