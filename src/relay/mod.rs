//! The CSS relay: bridges an input stream to the transform pipeline
//! and relays resolved results to an output stream.
//!
//! Two read policies are supported:
//!
//! - **Buffered** (default): the stream is read to end-of-stream and
//!   transformed as one complete document.
//! - **Chunked**: each read window is transformed independently.
//!   Transforms run concurrently and outputs are written in completion
//!   order, not arrival order. Read windows are re-aligned to UTF-8
//!   character boundaries by carrying incomplete trailing bytes into
//!   the next read.
//!
//! A rejected transform produces no output for that unit of work; the
//! rejection is logged and counted in the [`RelaySummary`], and the
//! relay keeps processing. I/O failures on either stream are fatal.

use crate::error::{Error, IoError, Result};
use crate::io::{split_complete_utf8, validate_utf8};
use crate::pipeline::Transform;
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::task::JoinSet;

/// Default read window for chunked mode (64KB).
pub const DEFAULT_READ_BUFFER: usize = 64 * 1024;

/// Relay read policy and tuning.
#[derive(Debug, Clone)]
pub struct RelayOptions {
    /// Transform each read window independently instead of buffering
    /// the whole stream.
    pub chunked: bool,
    /// Read window size in bytes for chunked mode.
    pub read_buffer: usize,
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            chunked: false,
            read_buffer: DEFAULT_READ_BUFFER,
        }
    }
}

/// Outcome of one relay run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelaySummary {
    /// Chunks handed to the transform pipeline.
    pub chunks_in: usize,
    /// Chunks whose transformed output was written.
    pub chunks_out: usize,
    /// Bytes written to the output stream.
    pub bytes_out: usize,
    /// Chunks rejected by the transform pipeline.
    pub failures: usize,
    /// Diagnostic for the first rejection, if any.
    pub first_error: Option<String>,
}

impl RelaySummary {
    /// Folds another summary into this one, keeping the earliest
    /// rejection diagnostic.
    pub fn merge(&mut self, other: Self) {
        self.chunks_in += other.chunks_in;
        self.chunks_out += other.chunks_out;
        self.bytes_out += other.bytes_out;
        self.failures += other.failures;
        if self.first_error.is_none() {
            self.first_error = other.first_error;
        }
    }

    fn record_failure(&mut self, message: String) {
        self.failures += 1;
        if self.first_error.is_none() {
            self.first_error = Some(message);
        }
    }
}

/// Relays CSS from `reader` through `transform` to `writer`.
///
/// Output bytes for an accepted chunk are exactly the transform's
/// output for that chunk; nothing is added or removed. An input stream
/// that yields no bytes produces no transform call and no output.
///
/// The writer is shared behind a mutex so concurrent completions in
/// chunked mode never interleave partial writes.
///
/// # Errors
///
/// Returns an error when reading or writing fails or the input is not
/// valid UTF-8. Transform rejections are *not* errors here; they are
/// reported through the returned [`RelaySummary`].
pub async fn relay<R, W, T>(
    reader: R,
    writer: Arc<Mutex<W>>,
    transform: Arc<T>,
    options: &RelayOptions,
) -> Result<RelaySummary>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    T: Transform + ?Sized + 'static,
{
    if options.chunked {
        relay_chunked(reader, writer, transform, options.read_buffer).await
    } else {
        relay_buffered(reader, writer, transform).await
    }
}

/// Buffered policy: one transform over the whole stream.
async fn relay_buffered<R, W, T>(
    mut reader: R,
    writer: Arc<Mutex<W>>,
    transform: Arc<T>,
) -> Result<RelaySummary>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    T: Transform + ?Sized + 'static,
{
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw).await?;

    let mut summary = RelaySummary::default();
    if raw.is_empty() {
        return Ok(summary);
    }

    let css = validate_utf8(&raw)
        .map_err(|offset| IoError::InvalidUtf8 { offset })?
        .to_owned();

    summary.chunks_in = 1;
    match transform.transform(css).await {
        Ok(out) => {
            let mut w = writer.lock().await;
            w.write_all(out.as_bytes()).await?;
            w.flush().await?;
            summary.chunks_out = 1;
            summary.bytes_out = out.len();
        }
        Err(e) => {
            tracing::warn!(error = %e, "transform pipeline rejected input");
            summary.record_failure(e.to_string());
        }
    }

    Ok(summary)
}

/// Chunked policy: one transform per read window, completion-ordered
/// output.
async fn relay_chunked<R, W, T>(
    mut reader: R,
    writer: Arc<Mutex<W>>,
    transform: Arc<T>,
    read_buffer: usize,
) -> Result<RelaySummary>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    T: Transform + ?Sized + 'static,
{
    let mut summary = RelaySummary::default();
    let mut tasks: JoinSet<Result<usize>> = JoinSet::new();
    let mut buf = vec![0u8; read_buffer];
    let mut carry: Vec<u8> = Vec::new();

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }

        carry.extend_from_slice(&buf[..n]);
        let (chunk, tail) =
            split_complete_utf8(&carry).map_err(|offset| IoError::InvalidUtf8 { offset })?;
        let chunk = chunk.to_owned();
        carry = tail.to_vec();

        if chunk.is_empty() {
            continue;
        }

        summary.chunks_in += 1;
        tracing::debug!(bytes = chunk.len(), "dispatching chunk");

        let writer = Arc::clone(&writer);
        let transform = Arc::clone(&transform);
        tasks.spawn(async move {
            let out = transform.transform(chunk).await?;
            let mut w = writer.lock().await;
            w.write_all(out.as_bytes()).await?;
            w.flush().await?;
            Ok(out.len())
        });
    }

    if !carry.is_empty() {
        return Err(IoError::TruncatedUtf8.into());
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(bytes)) => {
                summary.chunks_out += 1;
                summary.bytes_out += bytes;
            }
            Ok(Err(Error::Pipeline(e))) => {
                tracing::warn!(error = %e, "transform pipeline rejected chunk");
                summary.record_failure(e.to_string());
            }
            Ok(Err(other)) => return Err(other),
            Err(join_err) => {
                return Err(Error::Pipeline(crate::error::PipelineError::Worker(
                    join_err.to_string(),
                )));
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Passes input through unchanged, counting calls.
    struct Identity {
        calls: AtomicUsize,
    }

    impl Identity {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Transform for Identity {
        async fn transform(&self, css: String) -> std::result::Result<String, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(css)
        }
    }

    /// Uppercases input, resolving slowly for inputs starting with 'a'.
    struct SlowUpper;

    #[async_trait]
    impl Transform for SlowUpper {
        async fn transform(&self, css: String) -> std::result::Result<String, PipelineError> {
            let delay = if css.starts_with('a') { 100 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(css.to_uppercase())
        }
    }

    /// Rejects every input.
    struct Rejecting;

    #[async_trait]
    impl Transform for Rejecting {
        async fn transform(&self, _css: String) -> std::result::Result<String, PipelineError> {
            Err(PipelineError::Parse {
                message: "bad input".to_string(),
            })
        }
    }

    fn sink() -> Arc<Mutex<Vec<u8>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    async fn contents(writer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(writer.lock().await.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_buffered_passthrough_is_exact() {
        let writer = sink();
        let transform = Identity::new();
        let summary = relay(
            &b"a{color:red}"[..],
            Arc::clone(&writer),
            transform,
            &RelayOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(contents(&writer).await, "a{color:red}");
        assert_eq!(summary.chunks_in, 1);
        assert_eq!(summary.chunks_out, 1);
        assert_eq!(summary.bytes_out, 12);
        assert_eq!(summary.failures, 0);
    }

    #[tokio::test]
    async fn test_empty_input_skips_transform() {
        let writer = sink();
        let transform = Identity::new();
        let summary = relay(
            &b""[..],
            Arc::clone(&writer),
            Arc::clone(&transform),
            &RelayOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(transform.calls.load(Ordering::SeqCst), 0);
        assert!(contents(&writer).await.is_empty());
        assert_eq!(summary.chunks_in, 0);
        assert_eq!(summary.chunks_out, 0);
    }

    #[tokio::test]
    async fn test_empty_input_skips_transform_chunked() {
        let writer = sink();
        let transform = Identity::new();
        let options = RelayOptions {
            chunked: true,
            ..RelayOptions::default()
        };
        relay(&b""[..], Arc::clone(&writer), Arc::clone(&transform), &options)
            .await
            .unwrap();

        assert_eq!(transform.calls.load(Ordering::SeqCst), 0);
        assert!(contents(&writer).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_chunked_outputs_in_completion_order() {
        let writer = sink();
        // Two read windows: "aaaa" (slow) then "bb" (fast)
        let reader = (&b"aaaa"[..]).chain(&b"bb"[..]);
        let options = RelayOptions {
            chunked: true,
            ..RelayOptions::default()
        };
        let summary = relay(reader, Arc::clone(&writer), Arc::new(SlowUpper), &options)
            .await
            .unwrap();

        assert_eq!(contents(&writer).await, "BBAAAA");
        assert_eq!(summary.chunks_in, 2);
        assert_eq!(summary.chunks_out, 2);
    }

    #[tokio::test]
    async fn test_chunked_realigns_utf8_boundaries() {
        let writer = sink();
        let bytes = "a{content:'世'}".as_bytes();
        // Split inside the three-byte character
        let reader = (&bytes[..12]).chain(&bytes[12..]);
        let options = RelayOptions {
            chunked: true,
            ..RelayOptions::default()
        };
        relay(reader, Arc::clone(&writer), Identity::new(), &options)
            .await
            .unwrap();

        assert_eq!(contents(&writer).await, "a{content:'世'}");
    }

    #[tokio::test]
    async fn test_rejection_produces_no_output_and_no_crash() {
        let writer = sink();
        let summary = relay(
            &b"not css"[..],
            Arc::clone(&writer),
            Arc::new(Rejecting),
            &RelayOptions::default(),
        )
        .await
        .unwrap();

        assert!(contents(&writer).await.is_empty());
        assert_eq!(summary.chunks_in, 1);
        assert_eq!(summary.chunks_out, 0);
        assert_eq!(summary.failures, 1);
        assert!(summary.first_error.as_deref().is_some_and(|e| e.contains("bad input")));
    }

    #[tokio::test]
    async fn test_chunked_rejection_keeps_processing() {
        let writer = sink();
        let reader = (&b"xx"[..]).chain(&b"yy"[..]);
        let options = RelayOptions {
            chunked: true,
            ..RelayOptions::default()
        };
        let summary = relay(reader, Arc::clone(&writer), Arc::new(Rejecting), &options)
            .await
            .unwrap();

        assert!(contents(&writer).await.is_empty());
        assert_eq!(summary.chunks_in, 2);
        assert_eq!(summary.failures, 2);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_io_error() {
        let writer = sink();
        let result = relay(
            &[0xFF, 0xFE][..],
            Arc::clone(&writer),
            Identity::new(),
            &RelayOptions::default(),
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Io(IoError::InvalidUtf8 { offset: 0 }))
        ));
    }

    #[tokio::test]
    async fn test_chunked_truncated_utf8_at_eof() {
        let writer = sink();
        let bytes = "世".as_bytes();
        let options = RelayOptions {
            chunked: true,
            ..RelayOptions::default()
        };
        // Stream ends one byte into the character
        let result = relay(&bytes[..2], Arc::clone(&writer), Identity::new(), &options).await;

        assert!(matches!(result, Err(Error::Io(IoError::TruncatedUtf8))));
    }

    #[tokio::test]
    async fn test_summary_merge() {
        let mut a = RelaySummary {
            chunks_in: 1,
            chunks_out: 1,
            bytes_out: 10,
            failures: 0,
            first_error: None,
        };
        let b = RelaySummary {
            chunks_in: 2,
            chunks_out: 1,
            bytes_out: 5,
            failures: 1,
            first_error: Some("boom".to_string()),
        };
        a.merge(b);
        assert_eq!(a.chunks_in, 3);
        assert_eq!(a.chunks_out, 2);
        assert_eq!(a.bytes_out, 15);
        assert_eq!(a.failures, 1);
        assert_eq!(a.first_error.as_deref(), Some("boom"));
    }
}
