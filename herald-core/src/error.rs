//! Error types for Herald.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Failures raised by the dispatch pipeline
//! - [`AggregateError`] - Collected failures from a notification fan-out

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures raised while dispatching a request, stream request, or notification.
///
/// Handler- and behavior-raised failures ride in the transparent
/// [`Handler`](DispatchError::Handler) variant so they reach the caller
/// unchanged; the dispatcher itself never retries or recovers.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A registry entry found under a type key did not match the shape
    /// registered for that type.
    #[error("invalid registration for `{0}`: entry does not match the dispatched type")]
    InvalidArgument(&'static str),

    /// No handler is registered for the dispatched request type.
    #[error("no handler registered for `{0}`")]
    HandlerNotFound(&'static str),

    /// The dispatch observed its cancellation signal.
    #[error("dispatch was cancelled")]
    Cancelled,

    /// A failure raised by a handler or behavior.
    #[error(transparent)]
    Handler(BoxError),

    /// Two or more notification handler chains failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl DispatchError {
    /// Wrap a handler- or behavior-raised failure.
    pub fn handler(err: impl Into<BoxError>) -> Self {
        DispatchError::Handler(err.into())
    }

    /// Whether this failure is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DispatchError::Cancelled)
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Handler(err)
    }
}

/// Collected failures from a notification fan-out.
///
/// Produced only when two or more handler chains fail within one publish;
/// a lone failing chain propagates its failure bare. Failures are ordered
/// by completion, which carries no semantic weight.
#[derive(Error, Debug)]
#[error("{} notification handler chains failed", .failures.len())]
pub struct AggregateError {
    failures: Vec<DispatchError>,
}

impl AggregateError {
    /// Collect failures into an aggregate.
    pub fn new(failures: Vec<DispatchError>) -> Self {
        Self { failures }
    }

    /// The individual failures, in completion order.
    pub fn failures(&self) -> &[DispatchError] {
        &self.failures
    }

    /// Consume the aggregate, yielding the individual failures.
    pub fn into_failures(self) -> Vec<DispatchError> {
        self.failures
    }

    /// Number of collected failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether the aggregate is empty.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}
