use super::{PublishStrategy, collapse};
use herald_core::{DispatchError, Next};

/// An opt-in delivery strategy that awaits each chain in turn, in the
/// order the provider resolved the handlers.
///
/// A failing chain does not stop the ones after it; every handler still
/// runs, and the collapse rule is the same as the concurrent strategy's.
/// Callers must not rely on the ordering — it is a scheduling choice,
/// not part of the notification contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialPublish;

impl PublishStrategy for SequentialPublish {
    async fn deliver<'a>(&self, chains: Vec<Next<'a, ()>>) -> Result<(), DispatchError> {
        let mut failures = Vec::new();
        for chain in &chains {
            if let Err(failure) = chain.run().await {
                failures.push(failure);
            }
        }
        collapse(failures)
    }
}
