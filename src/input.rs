use crate::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Split};
use tracing::warn;

/// Newline-separated feedback entries read from an async source.
///
/// A line that is not valid UTF-8 is logged and skipped instead of ending
/// the session.
pub struct FeedbackLines<R> {
    segments: Split<R>,
}

impl<R: AsyncBufRead + Unpin> FeedbackLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            segments: reader.split(b'\n'),
        }
    }

    pub async fn next_line(&mut self) -> Result<Option<String>> {
        while let Some(segment) = self.segments.next_segment().await? {
            match String::from_utf8(segment) {
                Ok(mut line) => {
                    if line.ends_with('\r') {
                        line.pop();
                    }
                    return Ok(Some(line));
                }
                Err(e) => warn!("Skipping input line that is not valid UTF-8: {}", e),
            }
        }
        Ok(None)
    }
}
