//! Line-oriented terminal I/O over any tokio reader/writer pair.

use crate::error::InterviewError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub struct Terminal<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes `text` without a newline, then blocks for one line of input.
    ///
    /// The raw line is decoded lossily and trimmed; an empty line is a valid
    /// answer. If the input ends before any byte arrives the session cannot
    /// continue, which is reported as `InputClosed(waiting_for)`.
    pub async fn prompt(
        &mut self,
        text: &str,
        waiting_for: &'static str,
    ) -> Result<String, InterviewError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line).await? == 0 {
            return Err(InterviewError::InputClosed(waiting_for));
        }
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }

    /// Writes one line.
    pub async fn say(&mut self, line: &str) -> Result<(), InterviewError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
