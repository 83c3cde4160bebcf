//! Cooperative cancellation for provider calls.

use crate::provider::ProviderError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// A cancellation token with an optional hard expiry.
///
/// Cancellation is cooperative: a [`Deadline`] signals, it never stops anything by
/// itself. Providers observe it through [`Deadline::check`], [`Deadline::done`] or
/// [`Deadline::guard`].
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    token: CancellationToken,
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires and is only cancelled explicitly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing token, e.g. one cancelled by the shutdown signal handler.
    #[must_use]
    pub const fn from_token(token: CancellationToken) -> Self {
        Self { token, expires_at: None }
    }

    /// Caps the deadline at `timeout` from now. An earlier expiry is kept.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let at = Instant::now() + timeout;
        self.expires_at = Some(self.expires_at.map_or(at, |current| current.min(at)));
        self
    }

    /// Derives a deadline that is cancelled with `self` but can also be cancelled on its own.
    #[must_use]
    pub fn child(&self) -> Self {
        Self { token: self.token.child_token(), expires_at: self.expires_at }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }

    #[must_use]
    pub const fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Time left before expiry; `None` when the deadline has no expiry.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Checkpoint for providers about to start blocking work.
    ///
    /// # Errors
    /// [`ProviderError::Cancelled`] or [`ProviderError::DeadlineExceeded`].
    pub fn check(&self) -> Result<(), ProviderError> {
        if self.is_cancelled() {
            return Err(ProviderError::cancelled());
        }
        if self.is_expired() {
            return Err(ProviderError::DeadlineExceeded { context: None });
        }
        Ok(())
    }

    /// Resolves once the deadline is cancelled or expires, yielding the reason.
    pub async fn done(&self) -> ProviderError {
        match self.expires_at {
            Some(at) => tokio::select! {
                () = self.token.cancelled() => ProviderError::cancelled(),
                () = tokio::time::sleep_until(at) => {
                    ProviderError::DeadlineExceeded { context: None }
                }
            },
            None => {
                self.token.cancelled().await;
                ProviderError::cancelled()
            }
        }
    }

    /// Runs `fut` until it completes or the deadline fires, whichever happens first.
    ///
    /// On cancellation `fut` is dropped, which kills any child process spawned with
    /// `kill_on_drop(true)` and aborts in-flight HTTP requests.
    ///
    /// # Errors
    /// The cancellation reason when the deadline wins.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, ProviderError> {
        self.check()?;
        tokio::select! {
            biased;
            reason = self.done() => Err(reason),
            out = fut => Ok(out),
        }
    }
}
