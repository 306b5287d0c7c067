//! Notification fan-out tests: aggregation, concurrency, strategies.

use herald::{
    CancellationToken, DispatchError, Mediator, Next, Notification, NotificationBehavior,
    RegistryBuilder, SequentialPublish,
    testing::{CountingNotificationHandler, FailingNotificationHandler},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

mod common;
use common::{CancelledHandler, DelayedFailingHandler, Heartbeat, SlowCountingHandler};

#[tokio::test]
async fn zero_handlers_is_a_successful_no_op() {
    let log = Arc::new(Mutex::new(Vec::new()));

    struct Probe {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl<N: Notification> NotificationBehavior<N> for Probe {
        async fn handle(
            &self,
            _notification: &N,
            next: Next<'_, ()>,
            _cancel: &CancellationToken,
        ) -> Result<(), DispatchError> {
            self.log.lock().unwrap().push("behavior".to_string());
            next.run().await
        }
    }

    let mediator = Mediator::new(
        RegistryBuilder::new()
            .register_notification_behavior::<Heartbeat, _>(Probe { log: log.clone() })
            .build(),
    );

    mediator.publish(Heartbeat { seq: 1 }).await.unwrap();

    assert!(
        log.lock().unwrap().is_empty(),
        "no chain should be built when nothing is registered"
    );
}

#[tokio::test]
async fn every_handler_receives_the_notification() {
    let first = CountingNotificationHandler::new();
    let second = CountingNotificationHandler::new();
    let mediator = Mediator::new(
        RegistryBuilder::new()
            .register_notification_handler::<Heartbeat, _>(first.clone())
            .register_notification_handler::<Heartbeat, _>(second.clone())
            .build(),
    );

    mediator.publish(Heartbeat { seq: 2 }).await.unwrap();

    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 1);
}

#[tokio::test]
async fn one_failure_among_many_propagates_bare() {
    let survivor = CountingNotificationHandler::new();
    let mediator = Mediator::new(
        RegistryBuilder::new()
            .register_notification_handler::<Heartbeat, _>(survivor.clone())
            .register_notification_handler::<Heartbeat, _>(FailingNotificationHandler::new(
                "lone failure",
            ))
            .register_notification_handler::<Heartbeat, _>(survivor.clone())
            .build(),
    );

    let err = mediator.publish(Heartbeat { seq: 3 }).await.unwrap_err();

    assert!(
        matches!(err, DispatchError::Handler(_)),
        "a lone failure must not be wrapped: {err}"
    );
    assert_eq!(survivor.count(), 2, "healthy handlers still run");
}

#[tokio::test]
async fn multiple_failures_aggregate_in_completion_order() {
    let mediator = Mediator::new(
        RegistryBuilder::new()
            .register_notification_handler::<Heartbeat, _>(DelayedFailingHandler {
                delay: Duration::from_millis(120),
                message: "slow",
            })
            .register_notification_handler::<Heartbeat, _>(DelayedFailingHandler {
                delay: Duration::from_millis(10),
                message: "fast",
            })
            .register_notification_handler::<Heartbeat, _>(DelayedFailingHandler {
                delay: Duration::from_millis(60),
                message: "middling",
            })
            .build(),
    );

    let err = mediator.publish(Heartbeat { seq: 4 }).await.unwrap_err();

    match err {
        DispatchError::Aggregate(aggregate) => {
            let messages: Vec<String> = aggregate
                .failures()
                .iter()
                .map(|failure| failure.to_string())
                .collect();
            assert_eq!(messages, vec!["fast", "middling", "slow"]);
        }
        other => panic!("expected an aggregate of 3 failures, got {other}"),
    }
}

#[tokio::test]
async fn chains_run_concurrently() {
    let count = Arc::new(AtomicUsize::new(0));
    let delay = Duration::from_millis(50);
    let mediator = Mediator::new(
        RegistryBuilder::new()
            .register_notification_handler::<Heartbeat, _>(SlowCountingHandler {
                delay,
                count: count.clone(),
            })
            .register_notification_handler::<Heartbeat, _>(SlowCountingHandler {
                delay,
                count: count.clone(),
            })
            .register_notification_handler::<Heartbeat, _>(SlowCountingHandler {
                delay,
                count: count.clone(),
            })
            .build(),
    );

    let start = std::time::Instant::now();
    mediator.publish(Heartbeat { seq: 5 }).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(count.load(Ordering::SeqCst), 3);
    // Sequential would take 150ms; overlapped waits should stay well under.
    assert!(
        elapsed.as_millis() < 120,
        "handlers should overlap, took {}ms",
        elapsed.as_millis()
    );
}

#[tokio::test]
async fn a_lone_cancellation_propagates_bare() {
    let survivor = CountingNotificationHandler::new();
    let mediator = Mediator::new(
        RegistryBuilder::new()
            .register_notification_handler::<Heartbeat, _>(CancelledHandler)
            .register_notification_handler::<Heartbeat, _>(survivor.clone())
            .build(),
    );

    let err = mediator.publish(Heartbeat { seq: 6 }).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(survivor.count(), 1);
}

#[tokio::test]
async fn behaviors_wrap_every_handler_chain() {
    let entered = Arc::new(AtomicUsize::new(0));

    struct CountingBehavior {
        entered: Arc<AtomicUsize>,
    }

    impl<N: Notification> NotificationBehavior<N> for CountingBehavior {
        async fn handle(
            &self,
            _notification: &N,
            next: Next<'_, ()>,
            _cancel: &CancellationToken,
        ) -> Result<(), DispatchError> {
            self.entered.fetch_add(1, Ordering::SeqCst);
            next.run().await
        }
    }

    let first = CountingNotificationHandler::new();
    let second = CountingNotificationHandler::new();
    let mediator = Mediator::new(
        RegistryBuilder::new()
            .register_notification_handler::<Heartbeat, _>(first.clone())
            .register_notification_handler::<Heartbeat, _>(second.clone())
            .register_notification_behavior::<Heartbeat, _>(CountingBehavior {
                entered: entered.clone(),
            })
            .build(),
    );

    mediator.publish(Heartbeat { seq: 7 }).await.unwrap();

    assert_eq!(
        entered.load(Ordering::SeqCst),
        2,
        "the shared behavior instance wraps each handler's chain"
    );
    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 1);
}

#[tokio::test]
async fn sequential_strategy_delivers_in_provider_order_with_same_collapse() {
    let mediator = Mediator::with_strategy(
        RegistryBuilder::new()
            .register_notification_handler::<Heartbeat, _>(FailingNotificationHandler::new(
                "first",
            ))
            .register_notification_handler::<Heartbeat, _>(FailingNotificationHandler::new(
                "second",
            ))
            .build(),
        SequentialPublish,
    );

    let err = mediator.publish(Heartbeat { seq: 8 }).await.unwrap_err();

    match err {
        DispatchError::Aggregate(aggregate) => {
            let messages: Vec<String> = aggregate
                .failures()
                .iter()
                .map(|failure| failure.to_string())
                .collect();
            assert_eq!(messages, vec!["first", "second"]);
        }
        other => panic!("expected an aggregate, got {other}"),
    }
}

#[tokio::test]
async fn a_pre_cancelled_token_fails_fast() {
    let survivor = CountingNotificationHandler::new();
    let mediator = Mediator::new(
        RegistryBuilder::new()
            .register_notification_handler::<Heartbeat, _>(survivor.clone())
            .build(),
    );

    let token = CancellationToken::new();
    token.cancel();
    let err = mediator
        .publish_with(Heartbeat { seq: 9 }, token)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(survivor.count(), 0);
}
