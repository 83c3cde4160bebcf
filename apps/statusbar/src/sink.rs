use anyhow::{Context, Result, bail};
use std::fmt;
use std::process::Stdio;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use wsb::domain::config::OutputKind;

const XSETROOT: &str = "xsetroot";

/// Destination of each status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sink {
    kind: OutputKind,
}

impl Sink {
    #[must_use]
    pub const fn new(kind: OutputKind) -> Self {
        Self { kind }
    }

    /// Writes one status line.
    ///
    /// # Errors
    /// I/O failures, or `xsetroot` failing to run.
    pub async fn write(&self, line: &str) -> Result<()> {
        match self.kind {
            OutputKind::Stdout => write_line(&mut tokio::io::stdout(), line).await,
            OutputKind::Stderr => write_line(&mut tokio::io::stderr(), line).await,
            OutputKind::Xsetroot => set_root_name(line).await,
        }
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> Result<()> {
    out.write_all(line.as_bytes()).await.context("Failed to write status line")?;
    out.write_all(b"\n").await.context("Failed to write status line")?;
    out.flush().await.context("Failed to flush status line")
}

async fn set_root_name(line: &str) -> Result<()> {
    let status = Command::new(XSETROOT)
        .arg("-name")
        .arg(line)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .with_context(|| format!("Failed to run {XSETROOT}"))?;

    if !status.success() {
        bail!("{XSETROOT} exited with {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_line_appends_newline() {
        let mut buffer = Vec::new();
        write_line(&mut buffer, "load average: 0.10, 0.20, 0.15").await.expect("write");
        assert_eq!(buffer, b"load average: 0.10, 0.20, 0.15\n");
    }

    #[test]
    fn test_display_names_the_output() {
        assert_eq!(Sink::new(OutputKind::Xsetroot).to_string(), "xsetroot");
    }
}
