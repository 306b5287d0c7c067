//! Handler capability traits.
//!
//! Handlers are the terminal operation of a dispatch pipeline: the point
//! where the work for a request or notification actually happens. Each
//! handler is bound to exactly one message type (and, for requests, the
//! response type that message declares).
//!
//! Handlers borrow their message. The dispatcher owns the message for the
//! duration of the call and may re-run the terminal operation (a behavior
//! such as retry invokes its continuation more than once), so a consuming
//! signature would force a `Clone` bound onto every message type.
//!
//! # Static vs Dynamic Dispatch
//!
//! The user-facing traits use native `async fn` for zero-cost static
//! dispatch. Registries and other collections store the object-safe
//! `Dyn*` counterparts, which every implementation provides through a
//! blanket impl.

use crate::{
    error::DispatchError,
    notification::Notification,
    request::{Request, StreamRequest},
};
use futures_core::Stream;
use std::{fmt, future::Future, pin::Pin};
use tokio_util::sync::CancellationToken;

/// A boxed future resolving to a dispatch outcome.
pub type DispatchFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, DispatchError>> + Send + 'a>>;

/// A boxed stream of dispatch item outcomes.
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T, DispatchError>> + Send>>;

/// The single handler for a request type.
///
/// Exactly one handler serves each concrete request type; the dispatcher
/// enforces this at dispatch time by resolving the type's sole
/// registration.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests of type `{R}`",
    label = "missing `RequestHandler<{R}>` implementation",
    note = "Implement `RequestHandler<{R}>` to serve this request type."
)]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    /// Handle the request, producing its declared response.
    ///
    /// Cooperative cancellation: implementations that run long should
    /// check `cancel` and bail out with
    /// [`DispatchError::Cancelled`].
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, DispatchError>> + Send;
}

/// Object-safe version of [`RequestHandler`] for registry storage.
pub trait DynRequestHandler<R: Request>: Send + Sync + 'static {
    /// Handle the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> DispatchFuture<'a, R::Response>;
}

impl<R: Request> fmt::Debug for dyn DynRequestHandler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynRequestHandler").finish_non_exhaustive()
    }
}

impl<R: Request, H: RequestHandler<R>> DynRequestHandler<R> for H {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> DispatchFuture<'a, R::Response> {
        Box::pin(self.handle(request, cancel))
    }
}

/// The single handler for a stream request type, producing a lazy item
/// sequence.
///
/// The returned stream owns its state: implementations clone whatever
/// they need out of the borrowed request. Producers are responsible for
/// checking `cancel` between items when they do long work per yield; the
/// dispatcher additionally cuts the sequence off at the next poll once
/// the token is cancelled.
///
/// Object-safe as written; no `Dyn*` twin is needed.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle stream requests of type `{R}`",
    label = "missing `StreamRequestHandler<{R}>` implementation",
    note = "Implement `StreamRequestHandler<{R}>` to serve this stream request type."
)]
pub trait StreamRequestHandler<R: StreamRequest>: Send + Sync + 'static {
    /// Open the item sequence for the request.
    ///
    /// Called once per enumeration; opening twice yields two independent
    /// sequences.
    fn handle(&self, request: &R, cancel: CancellationToken) -> ItemStream<R::Item>;
}

/// One of the handlers for a notification type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle notifications of type `{N}`",
    label = "missing `NotificationHandler<{N}>` implementation",
    note = "Implement `NotificationHandler<{N}>` to receive this notification type."
)]
pub trait NotificationHandler<N: Notification>: Send + Sync + 'static {
    /// Handle the notification.
    fn handle(
        &self,
        notification: &N,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Object-safe version of [`NotificationHandler`] for registry storage.
pub trait DynNotificationHandler<N: Notification>: Send + Sync + 'static {
    /// Handle the notification (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        cancel: &'a CancellationToken,
    ) -> DispatchFuture<'a, ()>;
}

impl<N: Notification, H: NotificationHandler<N>> DynNotificationHandler<N> for H {
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        cancel: &'a CancellationToken,
    ) -> DispatchFuture<'a, ()> {
        Box::pin(self.handle(notification, cancel))
    }
}
