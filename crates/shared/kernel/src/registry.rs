//! Registry construction: validating and instantiating the requested features.

use crate::directory::Directory;
use crate::error::StatusError;
use crate::provider::Provider;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_SEPARATOR: &str = " | ";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How the providers of a round are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One after another, in requested order. The first failure stops the round.
    Sequential,
    /// One task per provider; the first failure cancels the rest.
    #[default]
    Parallel,
}

impl ExecutionMode {
    #[must_use]
    pub const fn from_parallel(parallel: bool) -> Self {
        if parallel { Self::Parallel } else { Self::Sequential }
    }
}

/// An ordered, validated list of providers plus the aggregation settings.
///
/// Immutable once built. Duplicated names are allowed and each occurrence is a
/// separate provider instance.
#[derive(Debug)]
pub struct Registry {
    pub(crate) providers: Vec<Arc<dyn Provider>>,
    pub(crate) separator: String,
    pub(crate) mode: ExecutionMode,
    pub(crate) timeout: Duration,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Provider names in requested order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|provider| provider.name())
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    separator: String,
    mode: ExecutionMode,
    timeout: Duration,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            mode: ExecutionMode::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RegistryBuilder {
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn parallel(self, parallel: bool) -> Self {
        self.mode(ExecutionMode::from_parallel(parallel))
    }

    /// Upper bound for a single provider within a round.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves `names` against `directory` and instantiates one provider per name.
    ///
    /// Every name is validated and resolved before the first provider is created, so
    /// a bad list never instantiates anything.
    ///
    /// # Errors
    /// * [`StatusError::InvalidConfiguration`] for a zero timeout.
    /// * [`StatusError::InvalidFeature`] for an empty name or one containing whitespace.
    /// * [`StatusError::UnknownFeature`] for the first name not in `directory`.
    pub fn build<S: AsRef<str>>(
        self,
        directory: &Directory,
        names: &[S],
    ) -> Result<Registry, StatusError> {
        if self.timeout.is_zero() {
            return Err(StatusError::InvalidConfiguration {
                message: "timeout must be greater than zero".into(),
                context: None,
            });
        }

        for name in names.iter().map(AsRef::as_ref) {
            validate_name(name)?;
            if !directory.contains(name) {
                return Err(StatusError::UnknownFeature { name: name.to_owned(), context: None });
            }
        }

        let providers = names
            .iter()
            .map(|name| directory.create(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            features = providers.len(),
            mode = ?self.mode,
            timeout = ?self.timeout,
            "Registry built"
        );

        Ok(Registry {
            providers,
            separator: self.separator,
            mode: self.mode,
            timeout: self.timeout,
        })
    }
}

/// Splits a comma-separated feature list into trimmed names.
///
/// Blank input yields an empty list. Empty entries such as `"a,,b"` are kept so
/// that [`RegistryBuilder::build`] can reject them.
#[must_use]
pub fn parse_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|name| name.trim().to_owned()).collect()
}

fn validate_name(name: &str) -> Result<(), StatusError> {
    if name.is_empty() {
        return Err(StatusError::InvalidFeature {
            message: "feature name cannot be empty".into(),
            context: None,
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(StatusError::InvalidFeature {
            message: format!("feature \"{name}\" cannot contain spaces").into(),
            context: None,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(" keyboard, loadavg ,date"), ["keyboard", "loadavg", "date"]);
        assert_eq!(parse_list("date,date"), ["date", "date"]);
        assert_eq!(parse_list("a,,b"), ["a", "", "b"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list("   ").is_empty());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("date").is_ok());
        assert!(matches!(validate_name(""), Err(StatusError::InvalidFeature { .. })));
        assert!(matches!(validate_name("da te"), Err(StatusError::InvalidFeature { .. })));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Registry::builder()
            .timeout(Duration::ZERO)
            .build::<&str>(&Directory::new(), &[])
            .expect_err("zero timeout");
        assert!(matches!(err, StatusError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_builder_defaults() {
        let registry =
            Registry::builder().build::<&str>(&Directory::new(), &[]).expect("empty list");
        assert_eq!(registry.separator(), DEFAULT_SEPARATOR);
        assert_eq!(registry.mode(), ExecutionMode::Parallel);
        assert_eq!(registry.timeout(), DEFAULT_TIMEOUT);
        assert!(registry.is_empty());
    }
}
