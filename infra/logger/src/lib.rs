//! # Logger
//!
//! `tracing` setup for `wmstatusbar`.
//!
//! The status line owns stdout, so log events never go there: the console layer
//! writes to stderr, colored only when stderr is a terminal. Pointing the builder
//! at a directory adds a daily rolling file next to it, `<dir>/<name>.<date>.log`,
//! where `<name>` is usually `<user>-wmstatusbar` so that several users can share
//! one directory such as `/tmp`.
//!
//! `RUST_LOG` refines the level set on the builder, e.g.
//! `RUST_LOG=wsb_kernel=trace` to watch individual rounds.
//!
//! ## Example
//!
//! ```rust
//! # use wsb_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("alice-wmstatusbar")
//!     .level(LevelFilter::WARN)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use std::fs;
use std::io::IsTerminal;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Days of rolled log files kept in the log directory.
const KEPT_DAYS: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct Options {
    console: bool,
    ansi: bool,
    dir: Option<PathBuf>,
    level: LevelFilter,
    kept_days: usize,
    json: bool,
    directives: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            console: true,
            ansi: std::io::stderr().is_terminal(),
            dir: None,
            level: LevelFilter::INFO,
            kept_days: KEPT_DAYS,
            json: false,
            directives: None,
        }
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for WithFile {}

/// Builds the global subscriber.
///
/// A name is required before [`LoggerBuilder::init`]; file-only settings become
/// available after [`LoggerBuilder::dir`].
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, F: Sealed = ConsoleOnly> {
    options: Options,
    name: N,
    file: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<Unnamed, F> {
    /// Name of the process in the logs, and the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { name: Named(name.into()), options: self.options, file: PhantomData }
    }
}

impl LoggerBuilder<Named, WithFile> {
    #[must_use]
    pub const fn kept_days(mut self, days: usize) -> Self {
        self.options.kept_days = days;
        self
    }

    /// Writes the file as JSON lines instead of plain text.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.options.json = enabled;
        self
    }
}

impl<F: Sealed> LoggerBuilder<Named, F> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.options.level = level;
        self
    }

    /// Extra directives on top of the level, e.g. `wsb_weather=debug,reqwest=warn`.
    ///
    /// When set, `RUST_LOG` is not consulted.
    #[must_use]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.options.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.options.console = enabled;
        self
    }

    /// Overrides the terminal detection for console colors.
    #[must_use]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.options.ansi = enabled;
        self
    }

    /// Also logs to a daily rolling file in `dir`, created if missing.
    pub fn dir(self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFile> {
        let mut options = self.options;
        options.dir = Some(dir.into());
        LoggerBuilder { options, name: self.name, file: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] until exit: it owns the file writer's flush guard.
    ///
    /// # Errors
    /// * [`LoggerError::Subscriber`] when a subscriber is already installed.
    /// * [`LoggerError::Appender`] when the log file cannot be opened.
    /// * [`LoggerError::InvalidConfiguration`] for a blank name, zero kept days, bad
    ///   directives or no layer at all.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Named(name) = self.name;
        let options = self.options;
        validate(&options, &name)?;
        let filter = env_filter(&options)?;

        let mut layers = Vec::new();
        if options.console {
            layers.push(
                layer().compact().with_writer(std::io::stderr).with_ansi(options.ansi).boxed(),
            );
        }

        let guard = match &options.dir {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("create {}", dir.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(options.kept_days)
                    .build(dir)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = layer().with_writer(writer).with_ansi(false);

                layers.push(if options.json { file.json().boxed() } else { file.boxed() });
                Some(guard)
            }
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "console and file logging are both off".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        if let Some(dir) = &options.dir {
            debug!(dir = %dir.display(), name = %name, "Logging to file");
        }
        Ok(Logger { guard })
    }
}

/// Keeps file logging alive; dropping it flushes what is still buffered.
#[must_use = "dropping the logger stops file logging"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { options: Options::default(), name: Unnamed, file: PhantomData }
    }

    /// `true` when a log file is being written.
    #[must_use]
    pub const fn has_file(&self) -> bool {
        self.guard.is_some()
    }
}

/// Parses `--log-level` values: `error`, `warn`, `info`, `debug`, `trace` or `off`,
/// in any case.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] for anything else.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("log level \"{level}\": {e}").into(),
        context: None,
    })
}

fn validate(options: &Options, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "name cannot be empty".into(),
            context: None,
        });
    }
    if options.kept_days == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "at least one day of log files must be kept".into(),
            context: None,
        });
    }
    Ok(())
}

fn env_filter(options: &Options) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(options.level.into());
    match &options.directives {
        None => Ok(builder.from_env_lossy()),
        Some(directives) => {
            builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("directives \"{directives}\": {e}").into(),
                context: None,
            })
        }
    }
}
