//! Per-call adapter subprocess orchestration.
//!
//! Every [`CommandTransport::send_commands`] call owns exactly one spawned
//! adapter process, scoped to that call: spawn with the single-device-mode
//! flags, write the queued command lines to its stdin, close stdin, collect
//! stdout/stderr, and judge the exit.  There is no pooling and no state
//! shared between calls, so concurrent intents simply run concurrent
//! processes.
//!
//! A timer starts at spawn.  If it fires before the adapter exits, the
//! process is forcibly terminated (`kill_on_drop`) and the call fails with
//! [`ChannelError::Timeout`].  The only other failure modes are the memoized
//! availability check, spawn I/O errors, and a non-zero exit code.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::ControllerConfig;
use crate::locator::AdapterLocator;

/// Error type for adapter channel operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// No non-empty command line was queued.
    #[error("no command to send")]
    Empty,

    /// The adapter binary is not resolvable on the search path (memoized).
    #[error("adapter binary {0:?} not found on the search path")]
    AdapterNotFound(String),

    /// The process could not be spawned or awaited.
    #[error("failed to run adapter process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The adapter exited with a non-zero code.
    #[error("adapter exited with code {code}: {message}")]
    Adapter { code: i32, message: String },

    /// The adapter outlived the per-call timeout and was terminated.
    #[error("adapter did not exit within {ms} ms and was terminated")]
    Timeout { ms: u64 },
}

/// The seam between the controller facade and the adapter process.
///
/// The facade only ever needs "send these lines, give me the text back", so
/// tests can substitute a mock transport and never spawn anything.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandTransport: Send + Sync {
    /// Sends `commands` through one adapter invocation and returns the
    /// trimmed output text.
    async fn send_commands(
        &self,
        commands: &[String],
        timeout: Duration,
    ) -> Result<String, ChannelError>;
}

/// The real transport: one `cec-client` style process per call.
#[derive(Debug, Clone)]
pub struct CecChannel {
    locator: Arc<AdapterLocator>,
    args: Vec<String>,
}

impl CecChannel {
    /// Creates a channel over an explicit locator (tests inject theirs here).
    pub fn new(locator: Arc<AdapterLocator>, args: Vec<String>) -> CecChannel {
        CecChannel { locator, args }
    }

    /// Creates a channel with a fresh locator for the configured binary.
    pub fn from_config(config: &ControllerConfig) -> CecChannel {
        CecChannel::new(
            Arc::new(AdapterLocator::new(config.adapter_binary.clone())),
            config.adapter_args.clone(),
        )
    }
}

#[async_trait]
impl CommandTransport for CecChannel {
    async fn send_commands(
        &self,
        commands: &[String],
        timeout: Duration,
    ) -> Result<String, ChannelError> {
        let queued: Vec<&str> = commands
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if queued.is_empty() {
            return Err(ChannelError::Empty);
        }

        let path = self.locator.resolve().ok_or_else(|| {
            ChannelError::AdapterNotFound(self.locator.binary().to_string())
        })?;

        debug!(
            "spawning adapter {path:?} for {} command line(s)",
            queued.len()
        );
        let mut child = Command::new(path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            for command in &queued {
                // A fast-exiting adapter may close its end first; the exit
                // status below is the authoritative outcome either way.
                if let Err(e) = stdin.write_all(command.as_bytes()).await {
                    debug!("adapter stdin write failed: {e}");
                    break;
                }
                if let Err(e) = stdin.write_all(b"\n").await {
                    debug!("adapter stdin write failed: {e}");
                    break;
                }
            }
            // Dropping the handle closes the adapter's stdin.
        }

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
                } else {
                    let code = output.status.code().unwrap_or(-1);
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    let message = if stderr.is_empty() {
                        "adapter produced no diagnostic output".to_string()
                    } else {
                        stderr
                    };
                    debug!("adapter exited with code {code}");
                    Err(ChannelError::Adapter { code, message })
                }
            }
            Ok(Err(e)) => Err(ChannelError::Spawn(e)),
            Err(_elapsed) => {
                // Dropping the wait future drops the child handle, and
                // kill_on_drop terminates the process.
                let ms = timeout.as_millis() as u64;
                warn!("adapter outlived {ms} ms timeout, terminating");
                Err(ChannelError::Timeout { ms })
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_for(binary: &str, args: &[&str]) -> CecChannel {
        CecChannel::new(
            Arc::new(AdapterLocator::new(binary)),
            args.iter().map(|a| a.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_empty_command_list_fails_before_spawn() {
        let channel = channel_for("definitely-not-a-real-adapter", &[]);

        let result = channel
            .send_commands(&[], Duration::from_millis(100))
            .await;

        assert!(matches!(result, Err(ChannelError::Empty)));
    }

    #[tokio::test]
    async fn test_whitespace_only_commands_count_as_empty() {
        let channel = channel_for("definitely-not-a-real-adapter", &[]);

        let result = channel
            .send_commands(&["   ".to_string(), "".to_string()], Duration::from_millis(100))
            .await;

        assert!(matches!(result, Err(ChannelError::Empty)));
    }

    #[tokio::test]
    async fn test_unresolvable_binary_fails_with_availability_error() {
        let channel = channel_for("definitely-not-a-real-adapter", &[]);

        let result = channel
            .send_commands(&["scan".to_string()], Duration::from_millis(100))
            .await;

        match result {
            Err(ChannelError::AdapterNotFound(name)) => {
                assert_eq!(name, "definitely-not-a-real-adapter");
            }
            other => panic!("expected AdapterNotFound, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_process_returns_trimmed_stdout() {
        // `cat` echoes the command lines back and exits once stdin closes.
        let channel = channel_for("cat", &[]);

        let output = channel
            .send_commands(
                &["tx 40:36".to_string(), "scan".to_string()],
                Duration::from_secs(5),
            )
            .await
            .expect("cat must succeed");

        assert_eq!(output, "tx 40:36\nscan");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_surfaces_captured_stderr() {
        let channel = channel_for("sh", &["-c", "echo boom >&2; exit 3"]);

        let result = channel
            .send_commands(&["standby 0".to_string()], Duration::from_secs(5))
            .await;

        match result {
            Err(ChannelError::Adapter { code, message }) => {
                assert_eq!(code, 3);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Adapter error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_without_stderr_gets_generic_message() {
        let channel = channel_for("sh", &["-c", "exit 7"]);

        let result = channel
            .send_commands(&["standby 0".to_string()], Duration::from_secs(5))
            .await;

        match result {
            Err(ChannelError::Adapter { code, message }) => {
                assert_eq!(code, 7);
                assert!(!message.is_empty());
            }
            other => panic!("expected Adapter error, got {other:?}"),
        }
    }
}
