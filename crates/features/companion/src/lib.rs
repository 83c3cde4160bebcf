//! Companion process features.
//!
//! A companion program announces itself with `$TMPDIR/$USER-<tag>.pid` and publishes
//! a one-line message in a sibling file. While the companion is alive the message is
//! shown; otherwise the feature stays empty.
//!
//! | feature | pid file            | message file               |
//! |---------|---------------------|----------------------------|
//! | `gorum` | `$USER-gorum.pid`   | `$USER-gorum-wm.txt`       |
//! | `lru`   | `$USER-lru.pid`     | `$USER-lru-message.txt`    |
mod process;

use crate::process::{ProcessTable, read_message};
use std::path::{Path, PathBuf};
use wsb_kernel::prelude::*;

pub const GORUM: &str = "gorum";
pub const LRU: &str = "lru";

#[must_use]
pub fn register(directory: Directory, session: &SessionEnv) -> Directory {
    let gorum = session.clone();
    let lru = session.clone();
    directory
        .register(GORUM, move || CompanionProvider::gorum(&gorum))
        .register(LRU, move || CompanionProvider::lru(&lru))
}

#[derive(Debug, Clone)]
pub struct CompanionProvider {
    name: &'static str,
    pid_file: PathBuf,
    message_file: PathBuf,
    processes: ProcessTable,
}

impl CompanionProvider {
    #[must_use]
    pub fn gorum(session: &SessionEnv) -> Self {
        Self::new(GORUM, session.file(GORUM, ".pid"), session.file(GORUM, "-wm.txt"))
    }

    #[must_use]
    pub fn lru(session: &SessionEnv) -> Self {
        Self::new(LRU, session.file(LRU, ".pid"), session.file(LRU, "-message.txt"))
    }

    fn new(name: &'static str, pid_file: PathBuf, message_file: PathBuf) -> Self {
        Self { name, pid_file, message_file, processes: ProcessTable::default() }
    }

    #[must_use]
    pub fn pid_file(&self) -> &Path {
        &self.pid_file
    }

    #[must_use]
    pub fn message_file(&self) -> &Path {
        &self.message_file
    }
}

#[async_trait]
impl Provider for CompanionProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch(&self, deadline: &Deadline) -> Result<String, ProviderError> {
        deadline.check()?;

        if !self.processes.is_running(&self.pid_file).await {
            return Ok(String::new());
        }
        read_message(&self.message_file).await
    }
}
