//! Session facts shared by providers and the binary: temp dir and user name.

use std::env;
use std::path::{Path, PathBuf};

const FALLBACK_USER: &str = "unknown";

/// Where per-user runtime files (pid files, message files, logs) live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnv {
    tmp_dir: PathBuf,
    user_name: String,
}

impl SessionEnv {
    #[must_use]
    pub fn new(tmp_dir: impl Into<PathBuf>, user_name: impl Into<String>) -> Self {
        Self { tmp_dir: tmp_dir.into(), user_name: user_name.into() }
    }

    /// Reads the system temp dir and the user name from `USER`, then `LOGNAME`.
    #[must_use]
    pub fn detect() -> Self {
        let user_name = ["USER", "LOGNAME"]
            .into_iter()
            .find_map(|key| env::var(key).ok().filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| FALLBACK_USER.to_owned());
        Self::new(env::temp_dir(), user_name)
    }

    #[must_use]
    pub fn tmp_dir(&self) -> &Path {
        &self.tmp_dir
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// `<tmp>/<user>-<tag><suffix>`, e.g. `/tmp/alice-gorum.pid`.
    #[must_use]
    pub fn file(&self, tag: &str, suffix: &str) -> PathBuf {
        self.tmp_dir.join(format!("{}-{tag}{suffix}", self.user_name))
    }

    /// Per-user name prefix, e.g. `alice-wmstatusbar` for the log file.
    #[must_use]
    pub fn prefixed(&self, name: &str) -> String {
        format!("{}-{name}", self.user_name)
    }
}

impl Default for SessionEnv {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layout() {
        let session = SessionEnv::new("/tmp", "alice");
        assert_eq!(session.file("gorum", ".pid"), Path::new("/tmp/alice-gorum.pid"));
        assert_eq!(session.file("lru", "-message.txt"), Path::new("/tmp/alice-lru-message.txt"));
        assert_eq!(session.prefixed("wmstatusbar"), "alice-wmstatusbar");
    }

    #[test]
    fn test_detect_is_never_blank() {
        let session = SessionEnv::detect();
        assert!(!session.user_name().trim().is_empty());
        assert_eq!(session.tmp_dir(), env::temp_dir());
    }
}
