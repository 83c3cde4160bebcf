//! # Runtime
//!
//! Tokio runtime bootstrap for the status bar.
//!
//! A status bar spends nearly all of its life asleep between ticks and only fans out
//! a handful of short tasks per round, so the presets here favour a small footprint.
//!
//! ## Presets
//! * **Lightweight**: two worker threads with small stacks. Enough for one round of providers.
//! * **Default**: worker threads detected from `TOKIO_WORKER_THREADS` or the hardware.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[wsb_runtime::main(lightweight)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use wsb_derive::main;

use anyhow::anyhow;
use std::{sync::OnceLock, thread::available_parallelism, time::Duration};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// The default number of worker threads if detection fails.
const DEFAULT_WORKER_THREADS: usize = 2;
/// Upper bound for worker threads; a status bar never needs more.
const MAX_WORKER_THREADS: usize = 64;
/// The default stack size for worker threads (2 `MiB`).
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
/// Minimum allowed stack size (512 `KiB`).
const MIN_STACK_SIZE: usize = 512 * 1024;
/// Maximum allowed stack size (8 `MiB`).
const MAX_STACK_SIZE: usize = 8 * 1024 * 1024;
/// How long an idle blocking thread stays alive.
const THREAD_KEEP_ALIVE: Duration = Duration::from_secs(10);
const DEFAULT_THREAD_NAME: &str = "wsb-worker";

static WORKER_THREADS: OnceLock<usize> = OnceLock::new();

fn detect_worker_threads() -> usize {
    *WORKER_THREADS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0 && n <= MAX_WORKER_THREADS)
            .unwrap_or_else(|| {
                available_parallelism()
                    .map(std::num::NonZero::get)
                    .unwrap_or(DEFAULT_WORKER_THREADS)
                    .min(MAX_WORKER_THREADS)
            })
    })
}

fn thread_name_or_default(name: String) -> String {
    if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name }
}

/// Configuration for the Tokio runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: detect_worker_threads(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }
}

impl RuntimeConfig {
    /// Preset for the status bar binary: two workers, 1 `MiB` stacks.
    #[must_use = "Use this configuration to build the runtime"]
    pub fn lightweight() -> Self {
        Self {
            worker_threads: 2,
            stack_size: 1024 * 1024,
            thread_name: "wsb-light".to_owned(),
            thread_keep_alive: Duration::from_secs(5),
        }
    }

    #[must_use = "Customize the number of worker threads for the runtime"]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    #[must_use = "Customize the stack size for worker threads"]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use = "Customize the thread name"]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = thread_name_or_default(name.into());
        self
    }

    #[must_use = "Customize how long idle threads stay alive"]
    pub const fn with_thread_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.thread_keep_alive = keep_alive;
        self
    }

    fn normalized(&self) -> Self {
        Self {
            worker_threads: self.worker_threads.clamp(1, MAX_WORKER_THREADS),
            stack_size: self.stack_size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE),
            thread_name: thread_name_or_default(self.thread_name.clone()),
            thread_keep_alive: self.thread_keep_alive,
        }
    }
}

/// Builds a multithreaded Tokio runtime with I/O and timers enabled.
///
/// Out-of-range values in `config` are clamped before the runtime is built.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the OS refuses to create the worker threads.
///
/// # Examples
///
/// ```rust,ignore
/// use wsb_runtime::{build_runtime, RuntimeConfig};
///
/// let rt = build_runtime(&RuntimeConfig::lightweight())?;
/// rt.block_on(async { /* ... */ });
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_runtime(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.normalized();
    debug!(config = ?config, "Building tokio runtime");

    Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}
