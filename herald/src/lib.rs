//! # herald - In-Process Mediator
//!
//! `herald` decouples callers from the code that serves them: a caller
//! hands the [`Mediator`] a typed request or notification, and the
//! mediator locates the registered handler(s), wraps each in an
//! onion-shaped chain of [`Behavior`]s, and runs the chain.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::{Mediator, RegistryBuilder, Request, RequestHandler};
//!
//! #[derive(Clone, Debug)]
//! struct GetUser { id: u64 }
//! impl Request for GetUser { type Response = User; }
//!
//! struct GetUserHandler { store: Store }
//! impl RequestHandler<GetUser> for GetUserHandler { ... }
//!
//! let mediator = Mediator::new(
//!     RegistryBuilder::new()
//!         .register_handler(GetUserHandler::new(store))
//!         .build(),
//! );
//! let user = mediator.send(GetUser { id: 7 }).await?;
//! ```

#![warn(missing_docs)]

pub use herald_core::{
    // Errors
    AggregateError,
    // Behaviors and continuations
    Behavior,
    BoxError,
    // Cancellation
    CancellationToken,
    DispatchError,
    DispatchFuture,
    DynBehavior,
    DynNotificationBehavior,
    DynNotificationHandler,
    DynRequestHandler,
    ItemStream,
    Next,
    NextStream,
    // Messages
    Notification,
    NotificationBehavior,
    // Handlers
    NotificationHandler,
    Request,
    RequestHandler,
    StreamBehavior,
    StreamRequest,
    StreamRequestHandler,
    Unit,
};

pub use herald_std::{
    ConcurrentPublish, HandlerProvider, Mediator, PublishStrategy, Registry, RegistryBuilder,
    ResponseStream, SequentialPublish,
};

/// Stock behavior implementations.
pub mod behaviors {
    pub use herald_std::behaviors::{LoggingBehavior, RetryBehavior};
    #[cfg(feature = "timeout")]
    pub use herald_std::behaviors::{TimeoutBehavior, TimeoutElapsed};
}

/// Pipeline chain construction.
pub mod pipeline {
    pub use herald_std::{notification_chain, request_chain, stream_chain};
}

/// Delivery strategies for notification fan-out.
pub mod publish {
    pub use herald_std::publish::{ConcurrentPublish, PublishStrategy, SequentialPublish};
}

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{
        CountingNotificationHandler, FailingNotificationHandler, RecordingBehavior,
        RecordingNotificationHandler, ShortCircuit,
    };
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Behaviors
        Behavior,
        // Errors
        BoxError,
        // Cancellation
        CancellationToken,
        DispatchError,
        // Dispatch
        Mediator,
        Next,
        NextStream,
        // Messages
        Notification,
        NotificationBehavior,
        NotificationHandler,
        // Registration
        Registry,
        RegistryBuilder,
        Request,
        // Handlers
        RequestHandler,
        StreamBehavior,
        StreamRequest,
        StreamRequestHandler,
        Unit,
    };
}
