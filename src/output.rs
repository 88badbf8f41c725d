//! Output sink for formatted commit records
//!
//! One record per line, in the order the pipeline produces them. A reader
//! that goes away early (e.g. `repolog | head`) ends the run quietly.

use std::io::{self, Write};

use crate::core::stream::RecordStream;

/// What happened to the records handed to the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    /// Every record was written
    Completed {
        /// Number of records written
        printed: usize,
    },
    /// The reader closed the output before the stream ended
    Closed {
        /// Number of records written before the close
        printed: usize,
    },
}

/// Writes formatted records to a sink
#[derive(Debug)]
pub struct LogPrinter<W: Write> {
    writer: W,
}

impl<W: Write> LogPrinter<W> {
    /// Create a printer over `writer`
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Print every line of `lines` until it ends
    ///
    /// A pipeline error stops printing and is returned; nothing after it is
    /// written.
    pub async fn print_all(&mut self, mut lines: RecordStream<String>) -> anyhow::Result<PrintOutcome> {
        let mut printed = 0;
        while let Some(line) = lines.next().await {
            if !self.print_line(&line?)? {
                return Ok(PrintOutcome::Closed { printed });
            }
            printed += 1;
        }
        if !self.flush()? {
            return Ok(PrintOutcome::Closed { printed });
        }
        Ok(PrintOutcome::Completed { printed })
    }

    /// Write one record; `false` if the reader has gone away
    pub fn print_line(&mut self, line: &str) -> io::Result<bool> {
        closed_is_ok(writeln!(self.writer, "{line}"))
    }

    fn flush(&mut self) -> io::Result<bool> {
        closed_is_ok(self.writer.flush())
    }

    /// Consume the printer and return its writer
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn closed_is_ok(result: io::Result<()>) -> io::Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(false),
        Err(err) => Err(err),
    }
}
