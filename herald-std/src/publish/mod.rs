//! Delivery strategies for notification fan-out.
//!
//! A publish resolves its handler set, builds one chain per handler, and
//! hands the chains to a [`PublishStrategy`] for execution. Strategies
//! differ in scheduling only; the failure collapse rule is shared:
//!
//! - no chain failed: the publish succeeds;
//! - exactly one chain failed: that failure propagates bare;
//! - two or more failed: every failure is collected into one
//!   [`AggregateError`], in completion order.
//!
//! Every chain always runs to completion before the outcome is decided,
//! even when an early one fails, so the failure count is exact.

mod concurrent;
mod sequential;

pub use concurrent::ConcurrentPublish;
pub use sequential::SequentialPublish;

use herald_core::{AggregateError, DispatchError, Next};
use std::future::Future;

/// Strategy for executing the per-handler chains of one publish.
///
/// This abstraction allows different execution models (concurrent,
/// sequential, etc.) to be plugged into the mediator.
pub trait PublishStrategy: Send + Sync {
    /// Execute every chain and collapse the failures.
    fn deliver<'a>(
        &self,
        chains: Vec<Next<'a, ()>>,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Shared failure collapse: zero failures succeed, a lone failure
/// propagates bare, several aggregate.
pub(crate) fn collapse(mut failures: Vec<DispatchError>) -> Result<(), DispatchError> {
    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0)),
        _ => Err(AggregateError::new(failures).into()),
    }
}
