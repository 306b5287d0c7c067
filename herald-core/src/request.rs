//! Request traits for dispatchable message types.

/// A message dispatched to exactly one handler, producing a response.
///
/// The concrete type of the request selects the handler; the associated
/// [`Response`](Request::Response) type fixes what that handler returns.
/// Command-style requests with no meaningful result use
/// [`Unit`](crate::Unit) as their response.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Debug)]
/// struct GetUser { id: u64 }
///
/// impl Request for GetUser {
///     type Response = User;
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatchable request",
    label = "missing `Request` implementation",
    note = "Requests must declare a `Response` type and be `Send + Sync + 'static`."
)]
pub trait Request: Send + Sync + 'static {
    /// The value produced by this request's handler.
    type Response: Send + 'static;
}

/// A message dispatched to exactly one handler, producing a lazy sequence
/// of items instead of a single response.
///
/// The sequence may be finite or infinite; nothing is produced until the
/// caller starts consuming it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatchable stream request",
    label = "missing `StreamRequest` implementation",
    note = "Stream requests must declare an `Item` type and be `Send + Sync + 'static`."
)]
pub trait StreamRequest: Send + Sync + 'static {
    /// The items produced by this request's handler.
    type Item: Send + 'static;
}
