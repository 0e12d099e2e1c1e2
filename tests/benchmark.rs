//! Latency measurement runs off-thread and reports once

mod common;

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use common::FakeEngine;
use syntaxkit::{HighlightError, HighlightedBuffer};

/// 50 characters of pseudo code
const SNIPPET: &str = "fn area(r) { let a = r * r * 3; if a { return a } ";

#[test]
fn test_snippet_is_fifty_chars() {
    assert_eq!(SNIPPET.chars().count(), 50);
}

#[test]
fn test_measurement_returns_before_work_finishes() {
    let (engine, gate) = FakeEngine::gated();
    let buffer = HighlightedBuffer::new(Arc::new(engine), "pseudo", "dark").unwrap();

    // Every highlight call blocks on the gate, so returning at all proves
    // the work happens elsewhere
    let handle = buffer.measure_highlight_latency(SNIPPET, "pseudo", 3);
    assert!(handle.try_result().is_none());

    gate.open();
    let report = handle.wait().unwrap();
    assert_eq!(report.iterations, 3);
}

#[test]
fn test_total_is_iterations_times_average() {
    let engine = Arc::new(FakeEngine::with_delay(Duration::from_millis(2)));
    let buffer = HighlightedBuffer::new(engine.clone(), "pseudo", "dark").unwrap();

    let report = buffer
        .measure_highlight_latency(SNIPPET, "pseudo", 10)
        .wait()
        .unwrap();

    assert_eq!(report.iterations, 10);
    assert_eq!(engine.calls(), 10);
    assert!(report.total >= Duration::from_millis(20));
    let expected = 10.0 * report.average_seconds();
    assert!((report.total_seconds() - expected).abs() <= expected * 0.01);
}

#[test]
fn test_measurement_leaves_buffer_alone() {
    let mut buffer =
        HighlightedBuffer::new(Arc::new(FakeEngine::new()), "pseudo", "dark").unwrap();
    buffer.set_text("let kept").unwrap();
    let runs = buffer.styled_runs().to_vec();
    let events = buffer.subscribe();

    buffer
        .measure_highlight_latency(SNIPPET, "pseudo", 5)
        .wait()
        .unwrap();

    assert_eq!(buffer.text(), "let kept");
    assert_eq!(buffer.styled_runs(), runs.as_slice());
    assert!(events.try_recv().is_err());
}

#[test]
fn test_callback_delivers_report() {
    let buffer = HighlightedBuffer::new(Arc::new(FakeEngine::new()), "pseudo", "dark").unwrap();
    let (tx, rx) = mpsc::channel();

    buffer.measure_highlight_latency_with(SNIPPET, "pseudo", 4, move |result| {
        tx.send(result).unwrap();
    });

    let report = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
    assert_eq!(report.iterations, 4);
}

#[test]
fn test_unsupported_language_is_measured_plain() {
    let engine = Arc::new(FakeEngine::new());
    let buffer = HighlightedBuffer::new(engine.clone(), "pseudo", "dark").unwrap();
    let report = buffer
        .measure_highlight_latency(SNIPPET, "klingon", 3)
        .wait()
        .unwrap();
    assert_eq!(report.iterations, 3);
    assert_eq!(engine.calls(), 3);
}

#[test]
fn test_zero_iterations() {
    let engine = Arc::new(FakeEngine::new());
    let buffer = HighlightedBuffer::new(engine.clone(), "pseudo", "dark").unwrap();
    let report = buffer
        .measure_highlight_latency(SNIPPET, "pseudo", 0)
        .wait()
        .unwrap();
    assert_eq!(report.iterations, 0);
    assert_eq!(report.average_seconds(), 0.0);
    assert_eq!(engine.calls(), 0);
}

#[test]
fn test_cancel_stops_measurement() {
    let (engine, gate) = FakeEngine::gated();
    let buffer = HighlightedBuffer::new(Arc::new(engine), "pseudo", "dark").unwrap();

    let handle = buffer.measure_highlight_latency(SNIPPET, "pseudo", 1_000);
    handle.cancel();
    gate.open();

    assert_eq!(handle.wait(), Err(HighlightError::Cancelled));
}

#[test]
fn test_cancel_token_from_callback_variant() {
    let (engine, gate) = FakeEngine::gated();
    let buffer = HighlightedBuffer::new(Arc::new(engine), "pseudo", "dark").unwrap();
    let (tx, rx) = mpsc::channel();

    let token = buffer.measure_highlight_latency_with(SNIPPET, "pseudo", 1_000, move |result| {
        let _ = tx.send(result);
    });
    token.cancel();
    gate.open();

    let result = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(result, Err(HighlightError::Cancelled));
}
