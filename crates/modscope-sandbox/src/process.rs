//! Processes spawned inside the sandbox.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout, Command};

use crate::Result;

/// Collected output of a finished sandbox process.
#[derive(Debug)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code; `None` when terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr; the error-text channel for failed runs.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// A process running inside the sandbox root with a scrubbed environment.
#[derive(Debug)]
pub struct SandboxProcess {
    child: Child,
}

impl SandboxProcess {
    pub(crate) fn spawn(
        program: impl AsRef<OsStr>,
        args: &[&str],
        root: &Path,
    ) -> Result<Self> {
        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(root)
            .env_clear()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // PATH survives so bare program names still resolve; everything
        // else from the host environment is withheld.
        if let Some(path) = std::env::var_os("PATH") {
            command.env("PATH", path);
        }

        let child = command.spawn()?;
        Ok(Self { child })
    }

    /// Take the raw stdout stream for incremental reads. The orchestrator
    /// prefers [`wait_with_output`](Self::wait_with_output), which drains
    /// everything until exit.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Drain stdout and stderr completely, then wait for exit. Accumulating
    /// the full stream before anyone parses it avoids truncation on large
    /// outputs.
    pub async fn wait_with_output(mut self) -> Result<ProcessOutput> {
        let mut out = self.child.stdout.take();
        let mut err = self.child.stderr.take();

        // Both pipes drain concurrently; reading them one after the other
        // can deadlock once the unread pipe's buffer fills.
        let (stdout, stderr) = tokio::join!(
            async {
                let mut buf = Vec::new();
                if let Some(out) = out.as_mut() {
                    out.read_to_end(&mut buf).await?;
                }
                Ok::<_, std::io::Error>(buf)
            },
            async {
                let mut buf = Vec::new();
                if let Some(err) = err.as_mut() {
                    err.read_to_end(&mut buf).await?;
                }
                Ok::<_, std::io::Error>(buf)
            }
        );
        let (stdout, stderr) = (stdout?, stderr?);

        let status = self.child.wait().await?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            exit_code: status.code(),
        })
    }
}
