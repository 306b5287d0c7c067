//! Registry for handler and behavior lookup.
//!
//! This module provides a builder pattern for registering handlers and
//! behaviors, and a frozen registry for immutable, thread-safe resolution
//! at dispatch time.
//!
//! Storage is keyed by the message's [`TypeId`]: a type-erased entry per
//! request type, a list per notification type. Resolution finds exactly
//! the registration made for the dispatched concrete type — never a
//! supertype or trait — because the response type is fixed at the call
//! site by the request type itself.

use herald_core::{
    Behavior, DispatchError, DynBehavior, DynNotificationBehavior, DynNotificationHandler,
    DynRequestHandler, Notification, NotificationBehavior, NotificationHandler, Request,
    RequestHandler, StreamBehavior, StreamRequest, StreamRequestHandler,
};
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    sync::Arc,
};

type AnyEntry = Box<dyn Any + Send + Sync>;

/// Resolution of handlers and behaviors for a dispatched message type.
///
/// This is the seam between the dispatch engines and whatever owns the
/// registrations. [`Registry`] is the stock implementation; an
/// application embedding its own container implements this instead.
pub trait HandlerProvider: Send + Sync {
    /// The single handler registered for a request type.
    fn request_handler<R: Request>(&self) -> Result<Arc<dyn DynRequestHandler<R>>, DispatchError>;

    /// The single handler registered for a stream request type.
    fn stream_handler<R: StreamRequest>(
        &self,
    ) -> Result<Arc<dyn StreamRequestHandler<R>>, DispatchError>;

    /// All handlers registered for a notification type. May be empty.
    fn notification_handlers<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationHandler<N>>>;

    /// Behaviors for a request type, in registration order. May be empty.
    fn request_behaviors<R: Request>(&self) -> Vec<Arc<dyn DynBehavior<R>>>;

    /// Behaviors for a stream request type, in registration order.
    fn stream_behaviors<R: StreamRequest>(&self) -> Vec<Arc<dyn StreamBehavior<R>>>;

    /// Behaviors for a notification type, in registration order.
    fn notification_behaviors<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationBehavior<N>>>;
}

impl<P: HandlerProvider> HandlerProvider for Arc<P> {
    fn request_handler<R: Request>(&self) -> Result<Arc<dyn DynRequestHandler<R>>, DispatchError> {
        (**self).request_handler::<R>()
    }

    fn stream_handler<R: StreamRequest>(
        &self,
    ) -> Result<Arc<dyn StreamRequestHandler<R>>, DispatchError> {
        (**self).stream_handler::<R>()
    }

    fn notification_handlers<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationHandler<N>>> {
        (**self).notification_handlers::<N>()
    }

    fn request_behaviors<R: Request>(&self) -> Vec<Arc<dyn DynBehavior<R>>> {
        (**self).request_behaviors::<R>()
    }

    fn stream_behaviors<R: StreamRequest>(&self) -> Vec<Arc<dyn StreamBehavior<R>>> {
        (**self).stream_behaviors::<R>()
    }

    fn notification_behaviors<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationBehavior<N>>> {
        (**self).notification_behaviors::<N>()
    }
}

// ============================================================================
// RegistryBuilder - for constructing registries
// ============================================================================

/// Builder for constructing a [`Registry`].
///
/// Register handlers and behaviors, then call `.build()` to create an
/// immutable, thread-safe registry.
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new()
///     .register_handler(GetUserHandler::new(store))
///     .register_behavior::<GetUser, _>(LoggingBehavior)
///     .build();
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    request_handlers: HashMap<TypeId, AnyEntry>,
    stream_handlers: HashMap<TypeId, AnyEntry>,
    notification_handlers: HashMap<TypeId, Vec<AnyEntry>>,
    request_behaviors: HashMap<TypeId, Vec<AnyEntry>>,
    stream_behaviors: HashMap<TypeId, Vec<AnyEntry>>,
    notification_behaviors: HashMap<TypeId, Vec<AnyEntry>>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a request type.
    ///
    /// Each request type has at most one handler; registering a second
    /// replaces the first. Having none at all only surfaces at dispatch
    /// time, as `HandlerNotFound`.
    pub fn register_handler<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R>,
    {
        let entry: Arc<dyn DynRequestHandler<R>> = Arc::new(handler);
        self.request_handlers.insert(TypeId::of::<R>(), Box::new(entry));
        self
    }

    /// Register the handler for a stream request type.
    ///
    /// Same replacement rule as [`register_handler`](Self::register_handler).
    pub fn register_stream_handler<R, H>(mut self, handler: H) -> Self
    where
        R: StreamRequest,
        H: StreamRequestHandler<R>,
    {
        let entry: Arc<dyn StreamRequestHandler<R>> = Arc::new(handler);
        self.stream_handlers.insert(TypeId::of::<R>(), Box::new(entry));
        self
    }

    /// Register a handler for a notification type. Appends; any number of
    /// handlers may serve one notification type.
    pub fn register_notification_handler<N, H>(mut self, handler: H) -> Self
    where
        N: Notification,
        H: NotificationHandler<N>,
    {
        let entry: Arc<dyn DynNotificationHandler<N>> = Arc::new(handler);
        self.notification_handlers
            .entry(TypeId::of::<N>())
            .or_default()
            .push(Box::new(entry));
        self
    }

    /// Register a behavior for a request type.
    ///
    /// Appends in registration order. The list is never deduplicated:
    /// registering equivalent behaviors twice runs them twice. A behavior
    /// generic over all request types is registered once per concrete
    /// type it should wrap.
    pub fn register_behavior<R, B>(mut self, behavior: B) -> Self
    where
        R: Request,
        B: Behavior<R>,
    {
        let entry: Arc<dyn DynBehavior<R>> = Arc::new(behavior);
        self.request_behaviors
            .entry(TypeId::of::<R>())
            .or_default()
            .push(Box::new(entry));
        self
    }

    /// Register a behavior for a stream request type. Appends.
    pub fn register_stream_behavior<R, B>(mut self, behavior: B) -> Self
    where
        R: StreamRequest,
        B: StreamBehavior<R>,
    {
        let entry: Arc<dyn StreamBehavior<R>> = Arc::new(behavior);
        self.stream_behaviors
            .entry(TypeId::of::<R>())
            .or_default()
            .push(Box::new(entry));
        self
    }

    /// Register a behavior for a notification type. Appends. The same
    /// resolved instance wraps every handler chain of one publish.
    pub fn register_notification_behavior<N, B>(mut self, behavior: B) -> Self
    where
        N: Notification,
        B: NotificationBehavior<N>,
    {
        let entry: Arc<dyn DynNotificationBehavior<N>> = Arc::new(behavior);
        self.notification_behaviors
            .entry(TypeId::of::<N>())
            .or_default()
            .push(Box::new(entry));
        self
    }

    /// Build the immutable registry.
    pub fn build(self) -> Registry {
        Registry {
            request_handlers: self.request_handlers,
            stream_handlers: self.stream_handlers,
            notification_handlers: self.notification_handlers,
            request_behaviors: self.request_behaviors,
            stream_behaviors: self.stream_behaviors,
            notification_behaviors: self.notification_behaviors,
        }
    }
}

// ============================================================================
// Registry - immutable, thread-safe handler storage
// ============================================================================

/// An immutable, thread-safe registry of handlers and behaviors.
///
/// Created by [`RegistryBuilder::build`]. Can be shared via `Arc` and
/// used as the [`HandlerProvider`] of any number of mediators.
pub struct Registry {
    request_handlers: HashMap<TypeId, AnyEntry>,
    stream_handlers: HashMap<TypeId, AnyEntry>,
    notification_handlers: HashMap<TypeId, Vec<AnyEntry>>,
    request_behaviors: HashMap<TypeId, Vec<AnyEntry>>,
    stream_behaviors: HashMap<TypeId, Vec<AnyEntry>>,
    notification_behaviors: HashMap<TypeId, Vec<AnyEntry>>,
}

fn single<T: Clone + 'static>(
    map: &HashMap<TypeId, AnyEntry>,
    key: TypeId,
    requested: &'static str,
) -> Result<T, DispatchError> {
    let entry = map
        .get(&key)
        .ok_or(DispatchError::HandlerNotFound(requested))?;
    entry
        .downcast_ref::<T>()
        .cloned()
        .ok_or(DispatchError::InvalidArgument(requested))
}

fn many<T: Clone + 'static>(map: &HashMap<TypeId, Vec<AnyEntry>>, key: TypeId) -> Vec<T> {
    map.get(&key)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.downcast_ref::<T>().cloned())
                .collect()
        })
        .unwrap_or_default()
}

impl HandlerProvider for Registry {
    fn request_handler<R: Request>(&self) -> Result<Arc<dyn DynRequestHandler<R>>, DispatchError> {
        single(&self.request_handlers, TypeId::of::<R>(), type_name::<R>())
    }

    fn stream_handler<R: StreamRequest>(
        &self,
    ) -> Result<Arc<dyn StreamRequestHandler<R>>, DispatchError> {
        single(&self.stream_handlers, TypeId::of::<R>(), type_name::<R>())
    }

    fn notification_handlers<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationHandler<N>>> {
        many(&self.notification_handlers, TypeId::of::<N>())
    }

    fn request_behaviors<R: Request>(&self) -> Vec<Arc<dyn DynBehavior<R>>> {
        many(&self.request_behaviors, TypeId::of::<R>())
    }

    fn stream_behaviors<R: StreamRequest>(&self) -> Vec<Arc<dyn StreamBehavior<R>>> {
        many(&self.stream_behaviors, TypeId::of::<R>())
    }

    fn notification_behaviors<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationBehavior<N>>> {
        many(&self.notification_behaviors, TypeId::of::<N>())
    }
}
