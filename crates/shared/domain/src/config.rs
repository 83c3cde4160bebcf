use serde::Deserialize;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level status bar configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatusBarConfigInner {
    /// Comma-separated, ordered feature list (`"keyboard,loadavg,date"`).
    pub features: String,
    pub separator: String,
    pub parallel: bool,
    /// Upper bound for a single provider within a round.
    pub timeout_secs: u64,
    pub interval_secs: u64,
    pub oneshot: bool,
    pub output: OutputKind,
    pub ignore_os: bool,
    pub feature: FeatureSettings,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into provider factories.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct StatusBarConfig {
    #[serde(flatten, default)]
    inner: Arc<StatusBarConfigInner>,
}

impl Deref for StatusBarConfig {
    type Target = StatusBarConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for StatusBarConfig {
    fn deref_mut(&mut self) -> &mut StatusBarConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

impl From<StatusBarConfigInner> for StatusBarConfig {
    fn from(inner: StatusBarConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl StatusBarConfigInner {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Where each status line goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Stdout,
    Stderr,
    /// Root window name via `xsetroot -name`, read by dwm-like window managers.
    Xsetroot,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::Xsetroot => "xsetroot",
        })
    }
}

/// Per-provider settings handed to the provider factories.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    pub date: DateConfig,
    pub keyboard: KeyboardConfig,
    pub weather: WeatherConfig,
}

/// `strftime`-style format understood by `chrono`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    pub format: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Append the layout variant (e.g. `us intl`).
    pub variant: bool,
}

/// wttr.in query settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub city: String,
    pub format: String,
    pub timeout_secs: u64,
    pub endpoint: String,
}

impl WeatherConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for the rolling log file; `None` keeps logging on stderr only.
    pub dir: Option<PathBuf>,
    pub level: String,
    pub json: bool,
}

// --- Default ---

impl Default for StatusBarConfigInner {
    fn default() -> Self {
        Self {
            features: "date".to_owned(),
            separator: " | ".to_owned(),
            parallel: true,
            timeout_secs: 5,
            interval_secs: 1,
            oneshot: false,
            output: OutputKind::Stdout,
            ignore_os: false,
            feature: FeatureSettings::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for DateConfig {
    fn default() -> Self {
        Self { format: "%a %b %-d %H:%M:%S".to_owned() }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            city: String::new(),
            format: "%t".to_owned(),
            timeout_secs: 5,
            endpoint: "https://wttr.in".to_owned(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { dir: None, level: "info".to_owned(), json: false }
    }
}
