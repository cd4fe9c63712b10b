//! Bounded external command execution.
//!
//! Commands run from an argument vector (never through a shell). Both output
//! pipes are drained on reader threads while the caller polls for exit, so a
//! chatty child cannot block on a full pipe. One deadline covers both the
//! child's exit and the pipes closing: a grandchild that inherited a pipe
//! cannot hold the run open. A child still running at the deadline is killed.

use crate::error::{AppsError, Result};
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Human-readable command line, for diagnostics only.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn run(&self) -> Result<CommandOutput> {
        let deadline = Instant::now() + self.timeout;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppsError::CommandFailed {
                command: self.display(),
                details: e.to_string(),
            })?;

        let (tx, rx) = mpsc::channel();
        drain(child.stdout.take(), Pipe::Stdout, tx.clone());
        drain(child.stderr.take(), Pipe::Stderr, tx);

        let status = self.wait_until(&mut child, deadline)?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((Pipe::Stdout, buf)) => stdout = buf,
                Ok((Pipe::Stderr, buf)) => stderr = buf,
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => return Err(self.timed_out()),
            }
        }

        Ok(CommandOutput {
            status,
            stdout,
            stderr,
        })
    }

    fn wait_until(&self, child: &mut Child, deadline: Instant) -> Result<ExitStatus> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(self.timed_out());
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    return Err(AppsError::CommandFailed {
                        command: self.display(),
                        details: e.to_string(),
                    });
                }
            }
        }
    }

    fn timed_out(&self) -> AppsError {
        AppsError::CommandTimedOut {
            command: self.display(),
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

/// Reads `pipe` to EOF on its own thread and sends the bytes once.
/// The sender drops with the thread, so the receiver sees a disconnect when every pipe is done.
fn drain<R: Read + Send + 'static>(pipe: Option<R>, which: Pipe, tx: Sender<(Pipe, Vec<u8>)>) {
    let Some(mut pipe) = pipe else {
        return;
    };
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send((which, buf));
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_stderr_separately() {
        let command = ExternalCommand::new(
            "sh",
            vec!["-c".to_string(), "echo out; echo err >&2".to_string()],
            Duration::from_secs(5),
        );

        let output = command.run().expect("run");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "out");
        assert_eq!(output.stderr_lossy(), "err");
    }

    #[test]
    fn drains_output_larger_than_a_pipe_buffer() {
        let command = ExternalCommand::new(
            "sh",
            vec![
                "-c".to_string(),
                "i=0; while [ $i -lt 20000 ]; do echo 0123456789; i=$((i+1)); done".to_string(),
            ],
            Duration::from_secs(30),
        );

        let output = command.run().expect("run");
        assert_eq!(output.stdout.len(), 20000 * 11);
    }

    #[test]
    fn kills_child_after_timeout() {
        let command = ExternalCommand::new(
            "sleep",
            vec!["5".to_string()],
            Duration::from_millis(100),
        );

        let started = Instant::now();
        let err = command.run().unwrap_err();
        assert!(matches!(err, AppsError::CommandTimedOut { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn background_grandchild_holding_stdout_does_not_outlive_timeout() {
        let command = ExternalCommand::new(
            "sh",
            vec!["-c".to_string(), "sleep 8 & echo '[]'".to_string()],
            Duration::from_millis(500),
        );

        let started = Instant::now();
        let err = command.run().unwrap_err();
        assert!(matches!(err, AppsError::CommandTimedOut { .. }));
        assert!(
            started.elapsed() < Duration::from_secs(4),
            "run took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn missing_program_is_a_command_failure() {
        let command = ExternalCommand::new(
            "/definitely/not/a/real/binary",
            vec![],
            Duration::from_secs(1),
        );

        let err = command.run().unwrap_err();
        assert!(matches!(err, AppsError::CommandFailed { .. }));
    }

    #[test]
    fn display_joins_program_and_args() {
        let command = ExternalCommand::new(
            "yabai",
            vec!["-m".to_string(), "query".to_string(), "--windows".to_string()],
            Duration::from_secs(1),
        );
        assert_eq!(command.display(), "yabai -m query --windows");
    }
}
