use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use wsb_kernel::prelude::*;

pub const CAMERA: &str = "camera";
const PROC_MODULES: &str = "/proc/modules";

// name, size, use count
static UVCVIDEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^uvcvideo\s+\d+\s+(\d+)").expect("uvcvideo pattern is valid")
});

#[derive(Debug, Clone)]
pub struct CameraProvider {
    path: PathBuf,
}

impl CameraProvider {
    /// Reads from `path` instead of `/proc/modules`.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for CameraProvider {
    fn default() -> Self {
        Self::with_path(PROC_MODULES)
    }
}

#[async_trait]
impl Provider for CameraProvider {
    fn name(&self) -> &str {
        CAMERA
    }

    async fn fetch(&self, deadline: &Deadline) -> Result<String, ProviderError> {
        deadline.check()?;

        let modules = tokio::fs::read_to_string(&self.path)
            .await
            .context(format!("read {}", self.path.display()))?;
        camera_state(&modules).map(str::to_owned)
    }
}

/// The camera is on while the `uvcvideo` module has users.
fn camera_state(modules: &str) -> Result<&'static str, ProviderError> {
    let Some(captures) = UVCVIDEO.captures(modules) else {
        return Ok("cam: off");
    };
    let users: u32 = captures[1].parse().map_err(|e| ProviderError::Parse {
        message: format!("uvcvideo use count: {e}").into(),
        context: None,
    })?;
    Ok(if users > 0 { "cam: on" } else { "cam: off" })
}
