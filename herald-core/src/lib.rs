//! # herald-core
//!
//! Core traits for the Herald in-process mediator.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! handler and behavior crates that don't need the full `herald-std`
//! implementation.
//!
//! # Dispatch Model
//!
//! Herald decouples callers from the code that serves them. A caller
//! hands the mediator a typed message; the mediator locates the
//! registered handler(s), wraps each in an onion of behaviors, and runs
//! the resulting chain:
//!
//! ## Requests ([`Request`], [`RequestHandler`])
//!
//! One concrete request type, one handler, one response. The handler is
//! the terminal operation of the chain.
//!
//! ## Stream requests ([`StreamRequest`], [`StreamRequestHandler`])
//!
//! Like requests, but the handler opens a lazy item sequence instead of
//! resolving a single value. Nothing is produced until the caller starts
//! consuming.
//!
//! ## Notifications ([`Notification`], [`NotificationHandler`])
//!
//! Zero or more handlers per concrete type; each gets its own
//! independently-built chain, and the chains run concurrently.
//!
//! ## Behaviors ([`Behavior`], [`StreamBehavior`], [`NotificationBehavior`])
//!
//! Cross-cutting middleware wrapped around handlers. A behavior receives
//! a continuation ([`Next`] / [`NextStream`]) for everything downstream
//! and may run it zero times (short-circuit), once (pass-through), or
//! several times (retry). Execution order is the reverse of registration
//! order: the last-registered behavior runs outermost.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Failures raised by the dispatch pipeline
//! - [`AggregateError`] - Collected failures from a notification fan-out

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod error;
mod handler;
mod notification;
mod request;
mod unit;

// Re-exports
pub use behavior::{
    Behavior, DynBehavior, DynNotificationBehavior, Next, NextStream, NotificationBehavior,
    StreamBehavior,
};
pub use error::{AggregateError, BoxError, DispatchError};
pub use handler::{
    DispatchFuture, DynNotificationHandler, DynRequestHandler, ItemStream, NotificationHandler,
    RequestHandler, StreamRequestHandler,
};
pub use notification::Notification;
pub use request::{Request, StreamRequest};
pub use unit::Unit;

// The cancellation signal threaded through every dispatch.
pub use tokio_util::sync::CancellationToken;
