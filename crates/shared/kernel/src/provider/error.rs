use std::borrow::Cow;
use std::time::Duration;

/// Failures a single provider can report for one round.
///
/// None of these are fatal: the round that produced them is dropped and the next
/// tick simply tries again.
#[wsb_derive::wsb_error]
pub enum ProviderError {
    /// Reading a proc file, pid file or message file failed.
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// An external command ran but reported a failure.
    #[error("command failed{}: {message}", format_context(.context))]
    Command { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The data source answered with something we could not make sense of.
    #[error("parse error{}: {message}", format_context(.context))]
    Parse { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A remote service (HTTP) failed.
    #[error("remote error{}: {source}", format_context(.context))]
    Remote {
        source: Box<dyn std::error::Error + Send + Sync>,
        context: Option<Cow<'static, str>>,
    },

    /// The round was cancelled, usually because another provider already failed.
    #[error("cancelled{}", format_context(.context))]
    Cancelled { context: Option<Cow<'static, str>> },

    /// The deadline handed to the provider expired.
    #[error("deadline exceeded{}", format_context(.context))]
    DeadlineExceeded { context: Option<Cow<'static, str>> },

    /// The provider did not finish within the per-provider timeout.
    #[error("timeout after {after:?}{}", format_context(.context))]
    Timeout { after: Duration, context: Option<Cow<'static, str>> },

    /// The provider task panicked.
    #[error("panicked{}: {message}", format_context(.context))]
    Panicked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Free-form failure; `"boom".into()` lands here.
    #[error("{message}{}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ProviderError {
    #[must_use]
    pub const fn cancelled() -> Self {
        Self::Cancelled { context: None }
    }

    /// `true` for cancellation and expiry, i.e. failures caused by the round itself.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::DeadlineExceeded { .. })
    }
}
