//! Behavior traits and the continuations that chain them.
//!
//! A behavior is a middleware unit wrapped around a handler. It receives
//! the message, a continuation standing for everything downstream of it,
//! and the dispatch's cancellation signal. The behavior alone decides how
//! often its continuation runs: zero times (short-circuit — the handler
//! and every inner behavior are skipped), exactly once (pass-through),
//! or several times (a retry re-runs the remainder of the chain,
//! handler included).
//!
//! Behaviors execute in reverse registration order: the last-registered
//! behavior is outermost and runs first.

use crate::{
    error::DispatchError,
    handler::{DispatchFuture, ItemStream},
    notification::Notification,
    request::{Request, StreamRequest},
};
use std::{future::Future, sync::Arc};
use tokio_util::sync::CancellationToken;

/// The continuation handed to a behavior: everything downstream of it,
/// folded into one invocable value.
///
/// Built fresh for each dispatch and never reused across dispatches.
/// Each [`run`](Next::run) produces and awaits a fresh execution of the
/// downstream chain, so a behavior may run it any number of times.
pub struct Next<'a, T> {
    inner: Arc<dyn Fn() -> DispatchFuture<'a, T> + Send + Sync + 'a>,
}

impl<'a, T> Next<'a, T> {
    /// Wrap a closure producing a fresh downstream future per invocation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> DispatchFuture<'a, T> + Send + Sync + 'a,
    {
        Self {
            inner: Arc::new(f),
        }
    }

    /// Execute the downstream chain once.
    pub async fn run(&self) -> Result<T, DispatchError> {
        (self.inner)().await
    }
}

impl<T> Clone for Next<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// The streaming counterpart of [`Next`]: opening it yields a fresh,
/// independent enumeration of the downstream chain.
pub struct NextStream<T> {
    inner: Arc<dyn Fn() -> ItemStream<T> + Send + Sync>,
}

impl<T> NextStream<T> {
    /// Wrap a closure producing a fresh downstream stream per invocation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> ItemStream<T> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(f),
        }
    }

    /// Open a fresh enumeration of the downstream chain.
    ///
    /// A behavior that never opens its continuation fully short-circuits
    /// the chain: the handler and every inner behavior stay untouched.
    pub fn open(&self) -> ItemStream<T> {
        (self.inner)()
    }
}

impl<T> Clone for NextStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// A middleware unit wrapped around a request handler.
///
/// Implementations generic over `R` apply to every request type they are
/// registered under; one instance may serve many chains concurrently, so
/// per-call state belongs in the future, not in `self`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot wrap requests of type `{R}`",
    label = "missing `Behavior<{R}>` implementation",
    note = "Implement `Behavior<{R}>` to participate in this request type's pipeline."
)]
pub trait Behavior<R: Request>: Send + Sync + 'static {
    /// Run this behavior, invoking `next` zero or more times.
    fn handle(
        &self,
        request: &R,
        next: Next<'_, R::Response>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, DispatchError>> + Send;
}

/// Object-safe version of [`Behavior`] for registry storage.
pub trait DynBehavior<R: Request>: Send + Sync + 'static {
    /// Run this behavior (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        next: Next<'a, R::Response>,
        cancel: &'a CancellationToken,
    ) -> DispatchFuture<'a, R::Response>;
}

impl<R: Request, B: Behavior<R>> DynBehavior<R> for B {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        next: Next<'a, R::Response>,
        cancel: &'a CancellationToken,
    ) -> DispatchFuture<'a, R::Response> {
        Box::pin(self.handle(request, next, cancel))
    }
}

/// A middleware unit wrapped around a stream request handler.
///
/// The behavior may transform, filter, buffer, or replace the item
/// sequence — including substituting its own stream without ever opening
/// the inner continuation.
///
/// Object-safe as written; no `Dyn*` twin is needed.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot wrap stream requests of type `{R}`",
    label = "missing `StreamBehavior<{R}>` implementation",
    note = "Implement `StreamBehavior<{R}>` to participate in this stream request type's pipeline."
)]
pub trait StreamBehavior<R: StreamRequest>: Send + Sync + 'static {
    /// Produce this behavior's view of the item sequence.
    fn handle(
        &self,
        request: &R,
        next: NextStream<R::Item>,
        cancel: CancellationToken,
    ) -> ItemStream<R::Item>;
}

/// A middleware unit wrapped around each notification handler.
///
/// One notification dispatch builds an independent chain per handler, and
/// every chain shares the same resolved behavior instances; an
/// implementation holding state must tolerate concurrent reentry.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot wrap notifications of type `{N}`",
    label = "missing `NotificationBehavior<{N}>` implementation",
    note = "Implement `NotificationBehavior<{N}>` to participate in this notification type's pipeline."
)]
pub trait NotificationBehavior<N: Notification>: Send + Sync + 'static {
    /// Run this behavior, invoking `next` zero or more times.
    fn handle(
        &self,
        notification: &N,
        next: Next<'_, ()>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Object-safe version of [`NotificationBehavior`] for registry storage.
pub trait DynNotificationBehavior<N: Notification>: Send + Sync + 'static {
    /// Run this behavior (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        next: Next<'a, ()>,
        cancel: &'a CancellationToken,
    ) -> DispatchFuture<'a, ()>;
}

impl<N: Notification, B: NotificationBehavior<N>> DynNotificationBehavior<N> for B {
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        next: Next<'a, ()>,
        cancel: &'a CancellationToken,
    ) -> DispatchFuture<'a, ()> {
        Box::pin(self.handle(notification, next, cancel))
    }
}
