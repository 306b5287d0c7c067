//! The stream returned by a streaming dispatch.

use futures::Stream;
use herald_core::{CancellationToken, DispatchError, ItemStream, NextStream};
use std::{
    fmt,
    pin::Pin,
    task::{Context, Poll},
};

enum State<T> {
    /// Chain built but not opened; nothing has run yet.
    Idle(NextStream<T>),
    Running(ItemStream<T>),
    Done,
}

/// A lazy stream of response items from one streaming dispatch.
///
/// The pipeline behind it is opened on the first poll — until then no
/// handler or behavior code has run. The cancellation token is checked
/// before every poll of the pipeline: once cancelled, the stream yields
/// a single [`DispatchError::Cancelled`] and then terminates. Items
/// already yielded are not retracted.
pub struct ResponseStream<T> {
    state: State<T>,
    cancel: CancellationToken,
}

impl<T> ResponseStream<T> {
    pub(crate) fn new(chain: NextStream<T>, cancel: CancellationToken) -> Self {
        Self {
            state: State::Idle(chain),
            cancel,
        }
    }
}

impl<T> fmt::Debug for ResponseStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStream").finish_non_exhaustive()
    }
}

impl<T> Stream for ResponseStream<T> {
    type Item = Result<T, DispatchError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.cancel.is_cancelled() && !matches!(this.state, State::Done) {
            this.state = State::Done;
            return Poll::Ready(Some(Err(DispatchError::Cancelled)));
        }

        loop {
            match &mut this.state {
                State::Idle(chain) => {
                    let opened = chain.open();
                    this.state = State::Running(opened);
                }
                State::Running(inner) => {
                    return match inner.as_mut().poll_next(cx) {
                        Poll::Ready(None) => {
                            this.state = State::Done;
                            Poll::Ready(None)
                        }
                        other => other,
                    };
                }
                State::Done => return Poll::Ready(None),
            }
        }
    }
}
