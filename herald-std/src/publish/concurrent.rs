use super::{PublishStrategy, collapse};
use futures::stream::{FuturesUnordered, StreamExt};
use herald_core::{DispatchError, Next};

/// The default delivery strategy: every chain runs concurrently.
///
/// Chains overlap their suspension points on the caller's task; none is
/// spawned, so no runtime handle is required. All chains are awaited
/// before the outcome is decided, and collected failures keep the order
/// the chains finished in.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcurrentPublish;

impl PublishStrategy for ConcurrentPublish {
    async fn deliver<'a>(&self, chains: Vec<Next<'a, ()>>) -> Result<(), DispatchError> {
        let mut in_flight: FuturesUnordered<_> = chains
            .into_iter()
            .map(|chain| async move { chain.run().await })
            .collect();

        let mut failures = Vec::new();
        while let Some(outcome) = in_flight.next().await {
            if let Err(failure) = outcome {
                failures.push(failure);
            }
        }
        collapse(failures)
    }
}
