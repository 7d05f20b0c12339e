//! Integration tests for css-relay.
//!
//! Exercises the relay end-to-end against the real prefixing pipeline,
//! through the library API.

#![allow(clippy::expect_used)]

use css_relay::pipeline::Autoprefixer;
use css_relay::relay::{RelayOptions, relay};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::Mutex;

fn prefixer(queries: &[&str], minify: bool) -> Arc<Autoprefixer> {
    let queries: Vec<String> = queries.iter().map(ToString::to_string).collect();
    Arc::new(Autoprefixer::new(&queries, minify).expect("valid browserslist queries"))
}

fn sink() -> Arc<Mutex<Vec<u8>>> {
    Arc::new(Mutex::new(Vec::new()))
}

async fn contents(writer: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(writer.lock().await.clone()).expect("output is UTF-8")
}

#[tokio::test]
async fn test_buffered_relay_prefixes_stylesheet() {
    let writer = sink();
    let input = ".toolbar { user-select: none; }";
    let summary = relay(
        input.as_bytes(),
        Arc::clone(&writer),
        prefixer(&["safari 12"], false),
        &RelayOptions::default(),
    )
    .await
    .expect("relay succeeds");

    let out = contents(&writer).await;
    assert!(out.contains("-webkit-user-select"));
    assert!(out.contains("user-select: none"));
    assert_eq!(summary.chunks_in, 1);
    assert_eq!(summary.chunks_out, 1);
    assert_eq!(summary.failures, 0);
    assert_eq!(summary.bytes_out, out.len());
}

#[tokio::test]
async fn test_buffered_relay_minified() {
    let writer = sink();
    let summary = relay(
        "a { color: red; }".as_bytes(),
        Arc::clone(&writer),
        prefixer(&["defaults"], true),
        &RelayOptions::default(),
    )
    .await
    .expect("relay succeeds");

    // Output is exactly the pipeline's output: no framing, no newline
    assert_eq!(contents(&writer).await, "a{color:red}");
    assert_eq!(summary.bytes_out, 12);
}

#[tokio::test]
async fn test_empty_stream_produces_no_output() {
    let writer = sink();
    let summary = relay(
        &b""[..],
        Arc::clone(&writer),
        prefixer(&["defaults"], false),
        &RelayOptions::default(),
    )
    .await
    .expect("relay succeeds");

    assert!(contents(&writer).await.is_empty());
    assert_eq!(summary.chunks_in, 0);
    assert_eq!(summary.chunks_out, 0);
}

#[tokio::test]
async fn test_chunked_relay_transforms_fragments_independently() {
    let writer = sink();
    // Two read windows, each a self-contained stylesheet fragment
    let reader = (".a { user-select: none; }".as_bytes())
        .chain(".b { user-select: none; }".as_bytes());
    let options = RelayOptions {
        chunked: true,
        ..RelayOptions::default()
    };
    let summary = relay(
        reader,
        Arc::clone(&writer),
        prefixer(&["safari 12"], true),
        &options,
    )
    .await
    .expect("relay succeeds");

    let out = contents(&writer).await;
    assert_eq!(out.matches("-webkit-user-select").count(), 2);
    assert_eq!(summary.chunks_in, 2);
    assert_eq!(summary.chunks_out, 2);
}

#[tokio::test]
async fn test_rejected_input_is_counted_not_fatal() {
    let writer = sink();
    let summary = relay(
        "..x { color: red; }".as_bytes(),
        Arc::clone(&writer),
        prefixer(&["defaults"], false),
        &RelayOptions::default(),
    )
    .await
    .expect("relay itself succeeds");

    assert!(contents(&writer).await.is_empty());
    assert_eq!(summary.failures, 1);
    assert!(
        summary
            .first_error
            .as_deref()
            .is_some_and(|e| e.contains("parse"))
    );
}
