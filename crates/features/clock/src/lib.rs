//! The `date` feature: local time rendered with a `strftime` format.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::{Display, Write};
use wsb_kernel::domain::config::DateConfig;
use wsb_kernel::prelude::*;

pub const DATE: &str = "date";

#[must_use]
pub fn register(directory: Directory, config: &DateConfig) -> Directory {
    let format = config.format.clone();
    directory.register(DATE, move || DateProvider::new(format.clone()))
}

#[derive(Debug, Clone)]
pub struct DateProvider {
    format: String,
}

impl DateProvider {
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self { format: format.into() }
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for DateProvider {
    fn default() -> Self {
        Self::new(DateConfig::default().format)
    }
}

#[async_trait]
impl Provider for DateProvider {
    fn name(&self) -> &str {
        DATE
    }

    async fn fetch(&self, deadline: &Deadline) -> Result<String, ProviderError> {
        deadline.check()?;
        render(&Local::now(), &self.format)
    }
}

/// Formats `at` with `format`.
///
/// # Errors
/// [`ProviderError::Parse`] when `format` contains an unknown specifier.
pub fn render<Tz>(at: &DateTime<Tz>, format: &str) -> Result<String, ProviderError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", at.format(format)).map_err(|_| ProviderError::Parse {
        message: format!("invalid date format \"{format}\"").into(),
        context: None,
    })?;
    Ok(out)
}

/// Checks a format once at startup instead of failing every round.
///
/// # Errors
/// See [`render`].
pub fn validate_format(format: &str) -> Result<(), ProviderError> {
    render(&Local::now(), format).map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date")
    }

    #[test]
    fn test_default_format() {
        let text = render(&new_year(), &DateConfig::default().format).expect("render");
        assert_eq!(text, "Mon Jan 1 00:00:00");
    }

    #[test]
    fn test_custom_format() {
        assert_eq!(render(&new_year(), "%Y-%m-%d %H:%M").expect("render"), "2024-01-01 00:00");
        assert_eq!(render(&new_year(), "fixed").expect("render"), "fixed");
    }

    #[test]
    fn test_invalid_format_is_an_error() {
        let err = render(&new_year(), "%Q").expect_err("unknown specifier");
        assert!(matches!(err, ProviderError::Parse { .. }));
        assert!(validate_format("%H:%M").is_ok());
    }

    #[tokio::test]
    async fn test_fetch_uses_configured_format() {
        let directory = register(Directory::new(), &DateConfig { format: "%Y".to_owned() });
        let provider = directory.create(DATE).expect("registered");
        let year = provider.fetch(&Deadline::new()).await.expect("fetch");
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }
}
