//! The provider contract.
//!
//! A provider is a named, independently pluggable unit that produces one piece of
//! status text per round. Providers hold only their own configuration; the registry
//! never looks inside them.

mod error;

pub use error::{ProviderError, ProviderErrorExt};

use crate::deadline::Deadline;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// A status provider.
///
/// `fetch` returns `Ok(String::new())` when there is nothing to show this round; that
/// is not an error and the slot is simply left out of the line.
///
/// Implementations are expected to honour `deadline`: check it before blocking work
/// (see [`Deadline::check`]) and run subprocesses or requests under
/// [`Deadline::guard`] so they are dropped (and `kill_on_drop` children killed) once
/// the round is cancelled.
#[async_trait]
pub trait Provider: Debug + Send + Sync {
    /// Stable, unique name used for lookup and error attribution.
    fn name(&self) -> &str;

    /// Produces this round's text.
    async fn fetch(&self, deadline: &Deadline) -> Result<String, ProviderError>;
}

/// Constructor stored in the [`Directory`](crate::directory::Directory).
pub type ProviderFactory = Arc<dyn Fn() -> Arc<dyn Provider> + Send + Sync>;
