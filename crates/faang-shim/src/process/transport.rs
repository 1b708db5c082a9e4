//! Content-Length framed transport.
//!
//! The protocol frames each message as:
//! ```text
//! Content-Length: <length>\r\n
//! \r\n
//! <payload>
//! ```

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process::{ChildStdin, ChildStdout};

use super::error::TransportError;

/// Reads and writes framed messages over a pair of byte streams.
///
/// Generic over the streams so tests exercise framing against in-memory
/// buffers while production code runs on a child process's stdio.
pub struct Transport<R, W> {
    reader: R,
    writer: W,
}

/// Transport bound to a child process's standard streams.
pub type StdioTransport = Transport<BufReader<ChildStdout>, BufWriter<ChildStdin>>;

impl StdioTransport {
    /// Wraps the child's stdio handles in buffered streams.
    #[must_use]
    pub fn from_child_io(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Transport::new(BufReader::new(stdout), BufWriter::new(stdin))
    }
}

impl<R: BufRead, W: Write> Transport<R, W> {
    /// Builds a transport over the supplied streams.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes one framed message.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let header = format!("Content-Length: {}\r\n\r\n", payload.len());
        self.writer.write_all(header.as_bytes())?;
        self.writer.write_all(payload)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Reads one framed message, blocking until it is complete.
    pub fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        let content_length = self.read_content_length()?;
        let mut payload = vec![0u8; content_length];
        self.reader.read_exact(&mut payload)?;
        Ok(payload)
    }

    /// Consumes header lines up to the blank separator and extracts the
    /// Content-Length value. Other headers (e.g. Content-Type) are ignored.
    fn read_content_length(&mut self) -> Result<usize, TransportError> {
        let mut content_length = None;

        loop {
            let mut line = String::new();
            let bytes_read = self.reader.read_line(&mut line)?;
            if bytes_read == 0 {
                return Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "connection closed while reading headers",
                )));
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }

            if let Some(value) = trimmed.strip_prefix("Content-Length: ") {
                content_length = Some(value.parse().map_err(|_| TransportError::InvalidHeader)?);
            }
        }

        content_length.ok_or(TransportError::MissingContentLength)
    }
}
