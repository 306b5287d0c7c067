//! Testing utilities for Herald.
//!
//! This module provides spies to make testing pipelines easier:
//!
//! - [`RecordingBehavior`]: logs enter/exit around its continuation
//! - [`ShortCircuit`]: answers without ever running its continuation
//! - [`CountingNotificationHandler`]: counts deliveries
//! - [`RecordingNotificationHandler`]: records delivered notifications
//! - [`FailingNotificationHandler`]: always fails with a fixed message

use herald_core::{
    Behavior, CancellationToken, DispatchError, Next, Notification, NotificationHandler, Request,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Behavior
// ============================================================================

/// A behavior that records `<label>:enter` before and `<label>:exit`
/// after running its continuation.
///
/// Useful for asserting pipeline composition order; several instances
/// can share one log.
pub struct RecordingBehavior {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingBehavior {
    /// Create a recording behavior writing to the shared log.
    pub fn new(label: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { label, log }
    }
}

impl<R: Request> Behavior<R> for RecordingBehavior {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R::Response>,
        _cancel: &CancellationToken,
    ) -> Result<R::Response, DispatchError> {
        self.log.lock().unwrap().push(format!("{}:enter", self.label));
        let outcome = next.run().await;
        self.log.lock().unwrap().push(format!("{}:exit", self.label));
        outcome
    }
}

// ============================================================================
// Short-circuit Behavior
// ============================================================================

/// A behavior that answers with a fixed value and never runs its
/// continuation: the handler and every inner behavior are skipped.
pub struct ShortCircuit<T> {
    value: T,
}

impl<T> ShortCircuit<T> {
    /// Create a short-circuiting behavior answering with `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<R, T> Behavior<R> for ShortCircuit<T>
where
    R: Request<Response = T>,
    T: Clone + Send + Sync + 'static,
{
    async fn handle(
        &self,
        _request: &R,
        _next: Next<'_, T>,
        _cancel: &CancellationToken,
    ) -> Result<T, DispatchError> {
        Ok(self.value.clone())
    }
}

// ============================================================================
// Notification handler spies
// ============================================================================

/// A notification handler that counts deliveries.
pub struct CountingNotificationHandler {
    count: Arc<AtomicUsize>,
}

impl CountingNotificationHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current delivery count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for CountingNotificationHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingNotificationHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<N: Notification> NotificationHandler<N> for CountingNotificationHandler {
    async fn handle(
        &self,
        _notification: &N,
        _cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A notification handler that records everything delivered to it.
pub struct RecordingNotificationHandler<N> {
    seen: Arc<Mutex<Vec<N>>>,
}

impl<N> RecordingNotificationHandler<N> {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded notifications.
    pub fn seen(&self) -> Vec<N>
    where
        N: Clone,
    {
        self.seen.lock().unwrap().clone()
    }

    /// Get the number of recorded notifications.
    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl<N> Default for RecordingNotificationHandler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for RecordingNotificationHandler<N> {
    fn clone(&self) -> Self {
        Self {
            seen: self.seen.clone(),
        }
    }
}

impl<N: Notification + Clone> NotificationHandler<N> for RecordingNotificationHandler<N> {
    async fn handle(
        &self,
        notification: &N,
        _cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        self.seen.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// A notification handler that always fails with a fixed message.
pub struct FailingNotificationHandler {
    message: &'static str,
}

impl FailingNotificationHandler {
    /// Create a handler failing with the given message.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<N: Notification> NotificationHandler<N> for FailingNotificationHandler {
    async fn handle(
        &self,
        _notification: &N,
        _cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        Err(DispatchError::handler(std::io::Error::other(self.message)))
    }
}
