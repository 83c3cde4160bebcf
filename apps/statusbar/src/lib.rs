//! # wmstatusbar
//!
//! Periodically assembles a one-line status from the requested features and sends it
//! to stdout, stderr or the X root window name.
//!
//! ## Example
//! ```no_run
//! use clap::Parser;
//! use wsb_statusbar::Args;
//!
//! # async fn example() -> anyhow::Result<()> {
//! wsb_statusbar::run(Args::parse_from(["wmstatusbar", "--oneshot"])).await
//! # }
//! ```

mod args;
mod prechecks;
mod sink;

pub use crate::args::Args;
pub use crate::sink::Sink;

use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tokio::signal;
use tracing::{debug, error, info, warn};
use wsb::domain::config::{LogConfig, StatusBarConfig, StatusBarConfigInner};
use wsb::kernel::config::load_config;
use wsb::kernel::prelude::{Deadline, Directory, Registry, SessionEnv, parse_list};
use wsb_logger::{Logger, parse_level};

pub const BIN_NAME: &str = "wmstatusbar";

/// Resolves the effective configuration: defaults, config file, environment, flags.
///
/// # Errors
/// A missing or malformed config file or environment value.
pub fn settings(args: &Args) -> Result<StatusBarConfig> {
    let mut config: StatusBarConfigInner =
        load_config(args.config.as_deref()).context("Critical: Configuration is malformed")?;
    args.apply(&mut config);
    Ok(config.into())
}

/// Runs the status bar until it is done (`--oneshot`) or a shutdown signal arrives.
///
/// # Errors
/// Invalid configuration, failed prechecks, an unknown feature, or, with `--oneshot`,
/// a failed round.
pub async fn run(args: Args) -> Result<()> {
    let config = settings(&args)?;
    let session = SessionEnv::detect();
    let directory = wsb::directory(&config.feature, &session);

    if args.list_features {
        return list_features(&directory);
    }

    let _logger = init_logging(&config.log, &session)?;

    let names = parse_list(&config.features);
    prechecks::check(&config, &names)?;

    let status_bar = StatusBar::new(&config, &directory, &names)?;

    let shutdown = Deadline::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = shutdown_signal().await {
            error!("Error while waiting for shutdown signal: {e}");
            return;
        }
        info!("Shutdown signal received, stopping status bar...");
        trigger.cancel();
    });

    status_bar.run(&shutdown).await
}

/// The scheduler: one round per tick, forwarded to the sink.
#[derive(Debug)]
pub struct StatusBar {
    registry: Registry,
    sink: Sink,
    interval: Duration,
    oneshot: bool,
}

impl StatusBar {
    /// Builds the registry for `names`.
    ///
    /// # Errors
    /// An invalid or unknown feature name, or a zero timeout.
    pub fn new(config: &StatusBarConfig, directory: &Directory, names: &[String]) -> Result<Self> {
        let registry = Registry::builder()
            .separator(config.separator.as_str())
            .parallel(config.parallel)
            .timeout(config.timeout())
            .build(directory, names)?;

        Ok(Self {
            registry,
            sink: Sink::new(config.output),
            interval: config.interval(),
            oneshot: config.oneshot,
        })
    }

    /// Runs rounds until `shutdown` is cancelled, or once with `oneshot`.
    ///
    /// A failed round is logged and nothing is written for that tick; the next tick
    /// tries again.
    ///
    /// # Errors
    /// With `oneshot`, the failure of the single round.
    pub async fn run(&self, shutdown: &Deadline) -> Result<()> {
        info!(
            features = ?self.registry.names().collect::<Vec<_>>(),
            mode = ?self.registry.mode(),
            output = %self.sink,
            "Status bar started"
        );

        loop {
            match self.registry.status(shutdown).await {
                Ok(line) => {
                    if let Err(e) = self.sink.write(&line).await {
                        warn!(output = %self.sink, "Failed to write status line: {e:#}");
                    }
                }
                Err(e) if shutdown.is_cancelled() => {
                    debug!(error = %e, "Round interrupted by shutdown");
                    break;
                }
                Err(e) if self.oneshot => return Err(e.into()),
                Err(e) => warn!(feature = e.feature(), "Status round failed: {e}"),
            }

            if self.oneshot {
                break;
            }

            tokio::select! {
                () = shutdown.token().cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Status bar stopped");
        Ok(())
    }
}

fn list_features(directory: &Directory) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for name in directory.names() {
        writeln!(out, "{name}").context("Failed to list features")?;
    }
    Ok(())
}

fn init_logging(config: &LogConfig, session: &SessionEnv) -> Result<Logger> {
    let builder =
        Logger::builder().name(session.prefixed(BIN_NAME)).level(parse_level(&config.level)?);

    let logger = match &config.dir {
        Some(dir) => builder.dir(dir).json(config.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsb::domain::config::OutputKind;
    use wsb::kernel::prelude::{Provider, ProviderError, async_trait};

    #[derive(Debug)]
    struct Counter(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    #[async_trait]
    impl Provider for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        async fn fetch(&self, _deadline: &Deadline) -> Result<String, ProviderError> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(String::new())
        }
    }

    #[derive(Debug)]
    struct Crash(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    #[async_trait]
    impl Provider for Crash {
        fn name(&self) -> &str {
            "crash"
        }

        async fn fetch(&self, _deadline: &Deadline) -> Result<String, ProviderError> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            panic!("crash provider");
        }
    }

    fn config(oneshot: bool) -> StatusBarConfig {
        StatusBarConfigInner { oneshot, output: OutputKind::Stderr, ..Default::default() }.into()
    }

    fn sequential(oneshot: bool) -> StatusBarConfig {
        StatusBarConfigInner {
            oneshot,
            parallel: false,
            output: OutputKind::Stderr,
            ..Default::default()
        }
        .into()
    }

    #[test]
    fn test_unknown_feature_fails_construction() {
        let err = StatusBar::new(&config(true), &Directory::new(), &["nope".to_owned()])
            .expect_err("unknown feature");
        assert!(err.to_string().contains("unknown feature \"nope\""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_ticks_until_shutdown() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&calls);
        let directory =
            Directory::new().register("counter", move || Counter(std::sync::Arc::clone(&counter)));
        let status_bar =
            StatusBar::new(&config(false), &directory, &["counter".to_owned()]).expect("valid");

        let shutdown = Deadline::new();
        let stopper = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(3500)).await;
            stopper.cancel();
        });

        status_bar.run(&shutdown).await.expect("clean stop");
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 4, "ticks at 0s, 1s, 2s, 3s");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_panics_do_not_stop_the_loop() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&calls);
        let directory =
            Directory::new().register("crash", move || Crash(std::sync::Arc::clone(&counter)));
        let status_bar =
            StatusBar::new(&sequential(false), &directory, &["crash".to_owned()]).expect("valid");

        let shutdown = Deadline::new();
        let stopper = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            stopper.cancel();
        });

        status_bar.run(&shutdown).await.expect("failed rounds are not fatal");
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3, "ticks at 0s, 1s, 2s");
    }

    #[tokio::test]
    async fn test_oneshot_panic_is_an_error() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&calls);
        let directory =
            Directory::new().register("crash", move || Crash(std::sync::Arc::clone(&counter)));
        let status_bar =
            StatusBar::new(&sequential(true), &directory, &["crash".to_owned()]).expect("valid");

        let err = status_bar.run(&Deadline::new()).await.expect_err("round fails");
        assert!(err.to_string().contains("crash provider"), "{err:#}");
    }

    #[tokio::test]
    async fn test_oneshot_runs_once() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&calls);
        let directory =
            Directory::new().register("counter", move || Counter(std::sync::Arc::clone(&counter)));
        let status_bar =
            StatusBar::new(&config(true), &directory, &["counter".to_owned()]).expect("valid");

        status_bar.run(&Deadline::new()).await.expect("one round");
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
