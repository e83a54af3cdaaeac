//! Line-delimited JSON framing over an arbitrary duplex channel.
//!
//! Each message is a single JSON object terminated by `\n`. The transport
//! is generic over reader and writer so tests can drive it with in-memory
//! channels; production uses stdin/stdout. The two halves split apart so
//! the serve loop can read and write concurrently.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::trace;

use super::error::{TransportError, TransportResult};

/// The inbound half: reads newline-delimited messages.
pub struct LineReader<R> {
    reader: BufReader<R>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read the next non-empty line. Returns `None` on EOF.
    pub async fn read_line(&mut self) -> TransportResult<Option<String>> {
        loop {
            let mut line = String::new();
            let bytes_read = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(|e| TransportError::read(e.to_string()))?;

            if bytes_read == 0 {
                return Ok(None);
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            trace!(len = trimmed.len(), "Read message");
            return Ok(Some(trimmed.to_string()));
        }
    }
}

/// The outbound half: writes one message per line.
pub struct LineWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one message line and flush.
    pub async fn write_line(&mut self, message: &str) -> TransportResult<()> {
        trace!(len = message.len(), "Writing message");

        self.writer
            .write_all(message.as_bytes())
            .await
            .map_err(|e| TransportError::write(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| TransportError::write(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| TransportError::write(e.to_string()))?;

        Ok(())
    }
}

/// A duplex line transport: a reader and a writer half.
pub struct LineTransport<R, W> {
    reader: LineReader<R>,
    writer: LineWriter<W>,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a transport over the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: LineReader::new(reader),
            writer: LineWriter::new(writer),
        }
    }

    /// Split into independently usable halves.
    pub fn into_split(self) -> (LineReader<R>, LineWriter<W>) {
        (self.reader, self.writer)
    }
}

/// A transport over the process's stdin and stdout.
pub fn stdio() -> LineTransport<Stdin, Stdout> {
    LineTransport::new(tokio::io::stdin(), tokio::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_read_single_line() {
        let input = b"{\"id\":1}\n".to_vec();
        let mut reader = LineReader::new(Cursor::new(input));

        let line = reader.read_line().await.unwrap();
        assert_eq!(line.as_deref(), Some("{\"id\":1}"));
    }

    #[tokio::test]
    async fn test_read_eof_returns_none() {
        let mut reader = LineReader::new(Cursor::new(Vec::new()));
        assert!(reader.read_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let input = b"\n\nhello\n".to_vec();
        let mut reader = LineReader::new(Cursor::new(input));

        let line = reader.read_line().await.unwrap();
        assert_eq!(line.as_deref(), Some("hello"));
        assert!(reader.read_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_multiple_lines() {
        let input = b"one\ntwo\n".to_vec();
        let mut reader = LineReader::new(Cursor::new(input));

        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("one"));
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("two"));
        assert!(reader.read_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_appends_newline() {
        let mut writer = LineWriter::new(Vec::new());
        writer.write_line("{\"ok\":true}").await.unwrap();

        let output = String::from_utf8(writer.writer.clone()).unwrap();
        assert_eq!(output, "{\"ok\":true}\n");
    }
}
