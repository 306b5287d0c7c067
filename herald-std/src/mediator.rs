//! The mediator: dispatch entry points.

use crate::{
    pipeline,
    publish::{ConcurrentPublish, PublishStrategy},
    registry::HandlerProvider,
    stream::ResponseStream,
};
use herald_core::{CancellationToken, DispatchError, Next, Notification, Request, StreamRequest};
use std::sync::Arc;

/// Dispatches requests, stream requests, and notifications to their
/// registered handlers through each type's behavior pipeline.
///
/// The mediator holds no mutable state of its own: every dispatch
/// resolves fresh from the provider, builds a fresh chain, and runs it
/// exactly once. Concurrent dispatches are fully independent.
///
/// `S` selects how notification fan-out is scheduled; the default
/// [`ConcurrentPublish`] runs every handler chain concurrently.
#[derive(Clone)]
pub struct Mediator<P, S = ConcurrentPublish> {
    provider: P,
    strategy: S,
}

impl<P: HandlerProvider> Mediator<P> {
    /// Create a mediator over the given provider with concurrent
    /// notification delivery.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            strategy: ConcurrentPublish,
        }
    }
}

impl<P, S> Mediator<P, S> {
    /// Create a mediator with an explicit publish strategy.
    pub fn with_strategy(provider: P, strategy: S) -> Self {
        Self { provider, strategy }
    }

    /// Get a reference to the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: HandlerProvider, S: PublishStrategy> Mediator<P, S> {
    /// Dispatch a request to its single handler through the behavior
    /// pipeline, with a token that is never cancelled.
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, DispatchError> {
        self.send_with(request, CancellationToken::new()).await
    }

    /// Dispatch a request to its single handler through the behavior
    /// pipeline.
    ///
    /// Fails with `HandlerNotFound` (naming the concrete request type)
    /// when nothing is registered for `R`, or with `Cancelled` when the
    /// token is already cancelled on entry. Handler and behavior
    /// failures propagate unchanged.
    pub async fn send_with<R: Request>(
        &self,
        request: R,
        cancel: CancellationToken,
    ) -> Result<R::Response, DispatchError> {
        if cancel.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }
        let handler = self.provider.request_handler::<R>()?;
        let behaviors = self.provider.request_behaviors::<R>();

        let chain = pipeline::request_chain(&*handler, &behaviors, &request, &cancel);
        chain.run().await
    }

    /// Dispatch a stream request, with a token that is never cancelled.
    pub fn stream<R: StreamRequest>(
        &self,
        request: R,
    ) -> Result<ResponseStream<R::Item>, DispatchError> {
        self.stream_with(request, CancellationToken::new())
    }

    /// Dispatch a stream request to its single handler through the
    /// behavior pipeline.
    ///
    /// Resolution is eager: `HandlerNotFound` surfaces here, at call
    /// time. Execution is deferred: no handler or behavior code runs
    /// until the returned stream is polled, and polling it twice never
    /// shares state with another call — each dispatch re-executes the
    /// pipeline from scratch.
    pub fn stream_with<R: StreamRequest>(
        &self,
        request: R,
        cancel: CancellationToken,
    ) -> Result<ResponseStream<R::Item>, DispatchError> {
        let handler = self.provider.stream_handler::<R>()?;
        let behaviors = self.provider.stream_behaviors::<R>();

        let chain = pipeline::stream_chain(handler, &behaviors, Arc::new(request), cancel.clone());
        Ok(ResponseStream::new(chain, cancel))
    }

    /// Publish a notification, with a token that is never cancelled.
    pub async fn publish<N: Notification>(&self, notification: N) -> Result<(), DispatchError> {
        self.publish_with(notification, CancellationToken::new()).await
    }

    /// Publish a notification to every registered handler, each wrapped
    /// in its own behavior pipeline.
    ///
    /// An empty handler set succeeds without running anything. The
    /// shared token reaches every chain; one chain observing it does not
    /// cancel its siblings. Failure collapse follows the strategy's
    /// shared rule: one failing chain propagates bare, two or more
    /// aggregate.
    pub async fn publish_with<N: Notification>(
        &self,
        notification: N,
        cancel: CancellationToken,
    ) -> Result<(), DispatchError> {
        if cancel.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }
        let handlers = self.provider.notification_handlers::<N>();
        if handlers.is_empty() {
            return Ok(());
        }
        let behaviors = self.provider.notification_behaviors::<N>();

        let chains: Vec<Next<'_, ()>> = handlers
            .iter()
            .map(|handler| {
                pipeline::notification_chain(&**handler, &behaviors, &notification, &cancel)
            })
            .collect();
        self.strategy.deliver(chains).await
    }
}
