//! # herald-std
//!
//! Standard implementations for the Herald mediator.
//!
//! This crate provides:
//! - **Dispatch**: [`Mediator`] — requests, stream requests, notifications
//! - **Registration**: [`RegistryBuilder`] / [`Registry`] / [`HandlerProvider`]
//! - **Chain construction**: [`request_chain`], [`notification_chain`], [`stream_chain`]
//! - **Fan-out delivery**: [`ConcurrentPublish`] (default), [`SequentialPublish`]
//! - **Stock behaviors**: logging, retry, timeout
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use herald_core;

// Modules
pub mod behaviors;
mod mediator;
mod pipeline;
pub mod publish;
mod registry;
mod stream;
pub mod testing;

pub use mediator::Mediator;
pub use pipeline::{notification_chain, request_chain, stream_chain};
pub use publish::{ConcurrentPublish, PublishStrategy, SequentialPublish};
pub use registry::{HandlerProvider, Registry, RegistryBuilder};
pub use stream::ResponseStream;
