//! Pipeline chain construction.
//!
//! Folds an ordered behavior list and a terminal handler invocation into
//! a single continuation. The fold walks the list in registration order,
//! wrapping each behavior around everything accumulated so far, so the
//! last-registered behavior ends up outermost and runs first; the
//! first-registered behavior runs last, immediately around the handler.
//!
//! The builder never skips, reorders, or deduplicates: duplicate entries
//! in the resolved list execute twice. A chain is built fresh for each
//! dispatch and used exactly once; it is never cached or replayed.

use herald_core::{
    CancellationToken, DynBehavior, DynNotificationBehavior, DynNotificationHandler,
    DynRequestHandler, Next, NextStream, Notification, Request, StreamBehavior, StreamRequest,
    StreamRequestHandler,
};
use std::sync::Arc;

/// Fold a request pipeline into a single continuation.
///
/// The terminal invocation closes over the borrowed request and
/// cancellation signal; every layer can therefore be re-run by an outer
/// behavior without consuming anything.
pub fn request_chain<'a, R: Request>(
    handler: &'a dyn DynRequestHandler<R>,
    behaviors: &'a [Arc<dyn DynBehavior<R>>],
    request: &'a R,
    cancel: &'a CancellationToken,
) -> Next<'a, R::Response> {
    let mut next = Next::new(move || handler.handle_dyn(request, cancel));
    for behavior in behaviors {
        let inner = next;
        next = Next::new(move || behavior.handle_dyn(request, inner.clone(), cancel));
    }
    next
}

/// Fold one notification handler's pipeline into a single continuation.
///
/// A publish builds one chain per resolved handler; the behavior slice is
/// shared across all of them, so each chain wraps the same instances.
pub fn notification_chain<'a, N: Notification>(
    handler: &'a dyn DynNotificationHandler<N>,
    behaviors: &'a [Arc<dyn DynNotificationBehavior<N>>],
    notification: &'a N,
    cancel: &'a CancellationToken,
) -> Next<'a, ()> {
    let mut next = Next::new(move || handler.handle_dyn(notification, cancel));
    for behavior in behaviors {
        let inner = next;
        next = Next::new(move || behavior.handle_dyn(notification, inner.clone(), cancel));
    }
    next
}

/// Fold a stream pipeline into a single continuation.
///
/// The returned continuation outlives the dispatch call (the caller
/// consumes the stream at its own pace), so every layer captures owned
/// state: the request rides in an `Arc` and each invocation borrows it
/// only for as long as it takes to open the next layer's stream.
pub fn stream_chain<R: StreamRequest>(
    handler: Arc<dyn StreamRequestHandler<R>>,
    behaviors: &[Arc<dyn StreamBehavior<R>>],
    request: Arc<R>,
    cancel: CancellationToken,
) -> NextStream<R::Item> {
    let terminal_request = Arc::clone(&request);
    let terminal_cancel = cancel.clone();
    let mut next =
        NextStream::new(move || handler.handle(&terminal_request, terminal_cancel.clone()));
    for behavior in behaviors {
        let inner = next;
        let behavior = Arc::clone(behavior);
        let request = Arc::clone(&request);
        let cancel = cancel.clone();
        next = NextStream::new(move || behavior.handle(&request, inner.clone(), cancel.clone()));
    }
    next
}

#[cfg(test)]
mod tests {
    use super::request_chain;
    use herald_core::{CancellationToken, DispatchError, Request, RequestHandler};

    #[derive(Clone, Debug)]
    struct Echo(&'static str);

    impl Request for Echo {
        type Response = String;
    }

    struct EchoHandler;

    impl RequestHandler<Echo> for EchoHandler {
        async fn handle(
            &self,
            request: &Echo,
            _cancel: &CancellationToken,
        ) -> Result<String, DispatchError> {
            Ok(request.0.to_string())
        }
    }

    #[tokio::test]
    async fn empty_behavior_list_runs_the_handler_directly() {
        let handler = EchoHandler;
        let request = Echo("hello");
        let cancel = CancellationToken::new();

        let chain = request_chain(&handler, &[], &request, &cancel);
        assert_eq!(chain.run().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn chain_can_be_run_more_than_once() {
        let handler = EchoHandler;
        let request = Echo("again");
        let cancel = CancellationToken::new();

        let chain = request_chain(&handler, &[], &request, &cancel);
        assert_eq!(chain.run().await.unwrap(), "again");
        assert_eq!(chain.run().await.unwrap(), "again");
    }
}
