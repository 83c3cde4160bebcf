use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::trace;
use wsb_kernel::prelude::*;

const PROC_ROOT: &str = "/proc";

/// Liveness of processes announced through pid files.
#[derive(Debug, Clone)]
pub(crate) struct ProcessTable {
    root: PathBuf,
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self { root: PathBuf::from(PROC_ROOT) }
    }
}

impl ProcessTable {
    /// `true` when `pid_file` holds a pid whose `/proc/<pid>` entry exists.
    ///
    /// A missing or malformed pid file means the companion is not running.
    pub(crate) async fn is_running(&self, pid_file: &Path) -> bool {
        let Some(pid) = read_pid(pid_file).await else {
            return false;
        };
        tokio::fs::try_exists(self.root.join(pid.to_string())).await.unwrap_or(false)
    }
}

async fn read_pid(pid_file: &Path) -> Option<u32> {
    let content = tokio::fs::read_to_string(pid_file).await.ok()?;
    match content.trim().parse::<u32>() {
        Ok(pid) if pid > 0 => Some(pid),
        _ => {
            trace!(path = %pid_file.display(), "Invalid pid file");
            None
        }
    }
}

/// Trimmed content of `path`; a missing file reads as empty.
pub(crate) async fn read_message(path: &Path) -> Result<String, ProviderError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content.trim().to_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).context(format!("read {}", path.display())),
    }
}
