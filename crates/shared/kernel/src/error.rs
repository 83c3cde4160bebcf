use crate::provider::ProviderError;
use std::borrow::Cow;

/// Errors returned by registry construction and by a status round.
#[wsb_derive::wsb_error]
pub enum StatusError {
    /// A requested feature is not registered in the directory.
    #[error("unknown feature \"{name}\"{}", format_context(.context))]
    UnknownFeature { name: String, context: Option<Cow<'static, str>> },

    /// A requested feature name is malformed (empty, contains whitespace).
    #[error("invalid feature{}: {message}", format_context(.context))]
    InvalidFeature { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A provider failed during a round. Displays as `<name>: <error>`.
    #[error("{name}{}: {source}", format_context(.context))]
    Provider {
        name: Cow<'static, str>,
        source: ProviderError,
        context: Option<Cow<'static, str>>,
    },
}

impl StatusError {
    /// Tags a provider failure with the provider's name.
    #[must_use]
    pub fn provider(name: impl Into<Cow<'static, str>>, source: ProviderError) -> Self {
        Self::Provider { name: name.into(), source, context: None }
    }

    /// Name of the feature this error is about, if any.
    #[must_use]
    pub fn feature(&self) -> Option<&str> {
        match self {
            Self::UnknownFeature { name, .. } => Some(name.as_str()),
            Self::Provider { name, .. } => Some(&**name),
            Self::InvalidFeature { .. } | Self::InvalidConfiguration { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Provider { source: ProviderError::Timeout { .. }, .. })
    }
}
