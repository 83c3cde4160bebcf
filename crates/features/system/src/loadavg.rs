use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::trace;
use wsb_kernel::prelude::*;

pub const LOADAVG: &str = "loadavg";
const PROC_LOADAVG: &str = "/proc/loadavg";

#[derive(Debug, Clone)]
pub struct LoadavgProvider {
    path: PathBuf,
}

impl LoadavgProvider {
    /// Reads from `path` instead of `/proc/loadavg`.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for LoadavgProvider {
    fn default() -> Self {
        Self::with_path(PROC_LOADAVG)
    }
}

#[async_trait]
impl Provider for LoadavgProvider {
    fn name(&self) -> &str {
        LOADAVG
    }

    async fn fetch(&self, deadline: &Deadline) -> Result<String, ProviderError> {
        deadline.check()?;

        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(format_loadavg(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "No load average file");
                Ok(String::new())
            }
            Err(e) => Err(e).context(format!("read {}", self.path.display())),
        }
    }
}

/// First three fields of `/proc/loadavg`; empty when the file is short.
fn format_loadavg(content: &str) -> String {
    let fields: Vec<&str> = content.split_whitespace().take(3).collect();
    if fields.len() < 3 {
        return String::new();
    }
    format!("load average: {}", fields.join(", "))
}
