//! Notification trait for fan-out message types.

/// A message delivered to zero or more handlers, producing no response.
///
/// Unlike [`Request`](crate::Request), any number of handlers may be
/// registered for one notification type, including none; publishing with
/// no handlers registered is not an error. Handlers of the same
/// notification run independently and must not assume any ordering
/// relative to each other.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a publishable notification",
    label = "missing `Notification` implementation",
    note = "Notifications must be `Send + Sync + 'static`."
)]
pub trait Notification: Send + Sync + 'static {}
