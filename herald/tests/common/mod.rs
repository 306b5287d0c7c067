#![allow(dead_code)]

use herald::{
    CancellationToken, DispatchError, ItemStream, Notification, NotificationHandler, Request,
    RequestHandler, StreamRequest, StreamRequestHandler, Unit,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Ping {
    pub label: String,
}

impl Request for Ping {
    type Response = Pong;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pong {
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct TestQuery;

impl Request for TestQuery {
    type Response = Unit;
}

#[derive(Clone, Debug)]
pub struct Marker;

impl Request for Marker {
    type Response = Unit;
}

#[derive(Clone, Debug)]
pub struct Add {
    pub a: u64,
    pub b: u64,
}

impl Request for Add {
    type Response = u64;
}

// ============================================================================
// Request Handlers
// ============================================================================

pub struct PingHandler;

impl RequestHandler<Ping> for PingHandler {
    async fn handle(
        &self,
        request: &Ping,
        _cancel: &CancellationToken,
    ) -> Result<Pong, DispatchError> {
        Ok(Pong {
            label: format!("{} pong", request.label),
        })
    }
}

/// Records every invocation into a shared log before answering.
pub struct MarkerHandler {
    pub log: Arc<Mutex<Vec<String>>>,
}

impl RequestHandler<Marker> for MarkerHandler {
    async fn handle(
        &self,
        _request: &Marker,
        _cancel: &CancellationToken,
    ) -> Result<Unit, DispatchError> {
        self.log.lock().unwrap().push("handler".to_string());
        Ok(Unit)
    }
}

/// Counts invocations; used to prove a handler never ran.
pub struct CountingMarkerHandler {
    pub calls: Arc<AtomicUsize>,
}

impl RequestHandler<Marker> for CountingMarkerHandler {
    async fn handle(
        &self,
        _request: &Marker,
        _cancel: &CancellationToken,
    ) -> Result<Unit, DispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Unit)
    }
}

pub struct FailingMarkerHandler;

impl RequestHandler<Marker> for FailingMarkerHandler {
    async fn handle(
        &self,
        _request: &Marker,
        _cancel: &CancellationToken,
    ) -> Result<Unit, DispatchError> {
        Err(DispatchError::handler(std::io::Error::other(
            "marker exploded",
        )))
    }
}

/// Sleeps before answering; pairs with a sibling to prove overlap.
pub struct SlowAddHandler {
    pub delay: Duration,
}

impl RequestHandler<Add> for SlowAddHandler {
    async fn handle(
        &self,
        request: &Add,
        _cancel: &CancellationToken,
    ) -> Result<u64, DispatchError> {
        tokio::time::sleep(self.delay).await;
        Ok(request.a + request.b)
    }
}

// ============================================================================
// Notification Types and Handlers
// ============================================================================

#[derive(Clone, Debug)]
pub struct Heartbeat {
    pub seq: u64,
}

impl Notification for Heartbeat {}

/// Sleeps, then counts. Three of these publishing concurrently finish in
/// roughly one delay, not three.
pub struct SlowCountingHandler {
    pub delay: Duration,
    pub count: Arc<AtomicUsize>,
}

impl NotificationHandler<Heartbeat> for SlowCountingHandler {
    async fn handle(
        &self,
        _notification: &Heartbeat,
        _cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        tokio::time::sleep(self.delay).await;
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Sleeps, then fails; the delay spreads completion times apart.
pub struct DelayedFailingHandler {
    pub delay: Duration,
    pub message: &'static str,
}

impl NotificationHandler<Heartbeat> for DelayedFailingHandler {
    async fn handle(
        &self,
        _notification: &Heartbeat,
        _cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        tokio::time::sleep(self.delay).await;
        Err(DispatchError::handler(std::io::Error::other(self.message)))
    }
}

/// A handler that observed the cancellation signal.
pub struct CancelledHandler;

impl NotificationHandler<Heartbeat> for CancelledHandler {
    async fn handle(
        &self,
        _notification: &Heartbeat,
        _cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        Err(DispatchError::Cancelled)
    }
}

// ============================================================================
// Stream Types and Handlers
// ============================================================================

#[derive(Clone, Debug)]
pub struct CountTo {
    pub count: u32,
}

impl StreamRequest for CountTo {
    type Item = u32;
}

/// Yields `1..=count`, recording how many times it was opened.
pub struct CountToHandler {
    pub opens: Arc<AtomicUsize>,
}

impl StreamRequestHandler<CountTo> for CountToHandler {
    fn handle(&self, request: &CountTo, _cancel: CancellationToken) -> ItemStream<u32> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Box::pin(futures::stream::iter(
            (1..=request.count).map(Ok::<u32, DispatchError>),
        ))
    }
}
