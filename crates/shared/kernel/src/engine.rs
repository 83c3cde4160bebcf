//! The aggregation engine: one `status` call per tick.

use crate::deadline::Deadline;
use crate::error::StatusError;
use crate::provider::{Provider, ProviderError};
use crate::registry::{ExecutionMode, Registry};
use futures_util::FutureExt;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::trace;

impl Registry {
    /// Runs one round and joins the outputs in requested order.
    ///
    /// Returns after every provider of the round has finished, including those whose
    /// results are discarded because another provider already failed.
    ///
    /// # Errors
    /// The first provider failure of the round, tagged with the provider name. A round
    /// is all-or-nothing: partial results are never returned.
    pub async fn status(&self, parent: &Deadline) -> Result<String, StatusError> {
        trace!(features = self.providers.len(), mode = ?self.mode, "Round started");

        let parts = match self.mode {
            ExecutionMode::Sequential => self.sequential(parent).await?,
            ExecutionMode::Parallel => self.parallel(parent).await?,
        };

        Ok(join(&parts, &self.separator))
    }

    async fn sequential(&self, parent: &Deadline) -> Result<Vec<String>, StatusError> {
        let mut parts = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let text = AssertUnwindSafe(fetch_one(provider.as_ref(), parent, self.timeout))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| Err(panicked(panic_message(payload))))
                .map_err(|source| StatusError::provider(provider.name().to_owned(), source))?;
            parts.push(text);
        }
        Ok(parts)
    }

    async fn parallel(&self, parent: &Deadline) -> Result<Vec<String>, StatusError> {
        let round = parent.child();
        let first = Arc::new(FirstError::new(round.clone()));

        let mut tasks = JoinSet::new();
        let mut owners = FxHashMap::default();

        for (index, provider) in self.providers.iter().enumerate() {
            let provider = Arc::clone(provider);
            let round = round.clone();
            let first = Arc::clone(&first);
            let timeout = self.timeout;

            let handle = tasks.spawn(async move {
                match fetch_one(provider.as_ref(), &round, timeout).await {
                    Ok(text) => Some((index, text)),
                    Err(source) => {
                        first.record(StatusError::provider(provider.name().to_owned(), source));
                        None
                    }
                }
            });
            owners.insert(handle.id(), index);
        }

        let mut parts = vec![String::new(); self.providers.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some((index, text))) => parts[index] = text,
                Ok(None) => {}
                Err(err) => {
                    let name = owners
                        .get(&err.id())
                        .map_or("unknown", |&index| self.providers[index].name())
                        .to_owned();
                    let message = if err.is_panic() {
                        panic_message(err.into_panic())
                    } else {
                        "task aborted".to_owned()
                    };
                    first.record(StatusError::provider(name, panicked(message)));
                }
            }
        }

        first.take().map_or(Ok(parts), Err)
    }
}

/// Joins the non-empty parts with `separator`, without leading or trailing separators.
#[must_use]
pub fn join<S: AsRef<str>>(parts: &[S], separator: &str) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part: &&str| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

async fn fetch_one(
    provider: &dyn Provider,
    deadline: &Deadline,
    timeout: Duration,
) -> Result<String, ProviderError> {
    tokio::time::timeout(timeout, provider.fetch(deadline))
        .await
        .map_err(|_| ProviderError::Timeout { after: timeout, context: None })?
}

/// Single-assignment error slot shared by the tasks of one parallel round.
///
/// The first writer wins and cancels the round; later errors (typically the
/// cancellations that first write caused) are dropped.
#[derive(Debug)]
struct FirstError {
    slot: Mutex<Option<StatusError>>,
    round: Deadline,
}

impl FirstError {
    const fn new(round: Deadline) -> Self {
        Self { slot: Mutex::new(None), round }
    }

    fn record(&self, err: StatusError) {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            trace!(error = %err, "Round already failed, dropping error");
            return;
        }
        *slot = Some(err);
        self.round.cancel();
    }

    fn take(&self) -> Option<StatusError> {
        self.slot.lock().take()
    }
}

fn panicked(message: String) -> ProviderError {
    ProviderError::Panicked { message: std::borrow::Cow::Owned(message), context: None }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload.downcast_ref::<&str>().map_or_else(
        || payload.downcast_ref::<String>().cloned().unwrap_or_else(|| "unknown panic".to_owned()),
        |message| (*message).to_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_skips_empty_parts() {
        assert_eq!(join(&["a", "", "b", ""], " | "), "a | b");
        assert_eq!(join(&["", ""], " | "), "");
        assert_eq!(join::<&str>(&[], " | "), "");
        assert_eq!(join(&["only"], ", "), "only");
    }

    #[test]
    fn test_first_error_wins_and_cancels_once() {
        let round = Deadline::new();
        let first = FirstError::new(round.clone());

        first.record(StatusError::provider("a", "boom".into()));
        assert!(round.is_cancelled());
        first.record(StatusError::provider("b", ProviderError::cancelled()));

        let err = first.take().expect("recorded");
        assert_eq!(err.to_string(), "a: boom");
        assert!(first.take().is_none());
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(Box::new("static")), "static");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(42_u8)), "unknown panic");
    }
}
