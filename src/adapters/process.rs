//! Child process output as an async byte stream

use std::io;
use std::pin::Pin;
use std::process::Stdio;
use std::task::{Context, Poll};

use pin_project_lite::pin_project;
use tokio::io::{AsyncRead, ReadBuf};
use tokio::process::{Child, ChildStdout, Command};

pin_project! {
    /// Standard output of a running child process
    ///
    /// Owns the child handle, so the process lives as long as its output is
    /// being read and is killed if the reader is dropped early.
    #[derive(Debug)]
    pub struct ChildOutput {
        _child: Child,
        #[pin]
        stdout: ChildStdout,
    }
}

impl ChildOutput {
    /// Spawn `command` with stdout piped and stdin closed
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the process could not be started.
    pub fn spawn(command: &mut Command) -> io::Result<Self> {
        command.stdin(Stdio::null()).stdout(Stdio::piped()).kill_on_drop(true);
        let mut child = command.spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
        Ok(Self {
            _child: child,
            stdout,
        })
    }
}

impl AsyncRead for ChildOutput {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        self.project().stdout.poll_read(cx, buf)
    }
}
