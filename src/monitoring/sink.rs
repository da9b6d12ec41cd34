//! Result stream and sinks
//!
//! All checkers share one bounded channel; exactly one consumer drains it.
//! A full channel makes checkers wait on publish, which delays their next
//! probe rather than dropping results.

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::traits::ResultSink;
use crate::core::types::CheckResult;
use crate::utils::error::Result;

/// Create the shared result stream with room for `capacity` pending results
pub fn result_stream(capacity: usize) -> (mpsc::Sender<CheckResult>, mpsc::Receiver<CheckResult>) {
    mpsc::channel(capacity.max(1))
}

/// Drain the stream into `sink` until every producer has gone away.
///
/// Sink failures are logged and the record is dropped. Returns the number of
/// results emitted successfully.
pub async fn drain<S: ResultSink + ?Sized>(
    mut rx: mpsc::Receiver<CheckResult>,
    sink: &mut S,
) -> usize {
    let mut emitted = 0;
    while let Some(result) = rx.recv().await {
        match sink.emit(&result).await {
            Ok(()) => emitted += 1,
            Err(e) => warn!(url = %result.url, "Failed to emit check result: {}", e),
        }
    }
    debug!(emitted, "result stream closed");
    emitted
}

/// Writes each result as one JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<tokio::io::Stdout> {
    /// Sink writing to the process's standard output
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> ResultSink for JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&mut self, result: &CheckResult) -> Result<()> {
        let mut line = serde_json::to_vec(result)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
