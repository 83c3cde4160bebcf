use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace};
use wsb_kernel::prelude::*;

/// Runs `program args..` under `deadline` and returns its stdout.
///
/// `Ok(None)` means the program is not installed, which providers report as "nothing
/// to show". The child is spawned with `kill_on_drop`, so a cancelled round kills it.
pub(crate) async fn run(
    deadline: &Deadline,
    program: &str,
    args: &[&str],
) -> Result<Option<String>, ProviderError> {
    deadline.check()?;

    let child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(program, "Command not found");
            return Ok(None);
        }
        Err(e) => return Err(e).context(format!("spawn {program}")),
    };

    let output =
        deadline.guard(child.wait_with_output()).await?.context(format!("wait {program}"))?;
    trace!(program, status = %output.status, "Command finished");

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProviderError::Command {
            message: format!(
                "{program} {} failed ({}): {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )
            .into(),
            context: None,
        });
    }

    Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_missing_program_is_none() {
        let out = run(&Deadline::new(), "wsb-definitely-not-installed", &[]).await.expect("run");
        assert!(out.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout() {
        let out = run(&Deadline::new(), "echo", &["hello"]).await.expect("run");
        assert_eq!(out.as_deref().map(str::trim), Some("hello"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_status_is_a_command_error() {
        let err = run(&Deadline::new(), "false", &[]).await.expect_err("false fails");
        assert!(matches!(err, ProviderError::Command { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cancellation_stops_the_child() {
        let deadline = Deadline::new().with_timeout(Duration::from_millis(100));
        let err = run(&deadline, "sleep", &["30"]).await.expect_err("deadline wins");
        assert!(err.is_cancellation());
    }
}
