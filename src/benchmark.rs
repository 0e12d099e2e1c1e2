//! Highlight latency measurement on a worker thread
//!
//! A measurement repeats one highlight pass back-to-back and reports the
//! wall-clock total. It never touches the buffer that started it: the job
//! owns a copy of the text and a handle to the shared engine.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::engine::{highlight_or_plain, HighlightEngine};
use crate::error::HighlightError;
use crate::syntax::LanguageId;
use crate::theme::{Color, ThemeId};

/// Result of a completed latency measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyReport {
    pub iterations: u32,
    pub total: Duration,
}

impl LatencyReport {
    pub fn total_seconds(&self) -> f64 {
        self.total.as_secs_f64()
    }

    /// Mean wall-clock time per pass; 0 when no pass ran
    pub fn average_seconds(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_seconds() / self.iterations as f64
    }
}

impl fmt::Display for LatencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "This code was highlighted {} times.\n\
             It took an average of {:.4} seconds to process each time,\n\
             with a total of {:.3} seconds",
            self.iterations,
            self.average_seconds(),
            self.total_seconds()
        )
    }
}

/// Shared flag asking a running measurement to stop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything a worker needs to measure latency without the buffer
pub(crate) struct LatencyJob {
    pub engine: Arc<dyn HighlightEngine>,
    pub text: String,
    pub language: LanguageId,
    pub theme: ThemeId,
    pub foreground: Color,
    pub iterations: u32,
    pub cancel: CancelToken,
}

impl LatencyJob {
    /// Run all iterations on the current thread
    pub fn run(self) -> Result<LatencyReport, HighlightError> {
        tracing::debug!(
            "Measuring highlight latency: {} iterations of {} chars as {}",
            self.iterations,
            self.text.len(),
            self.language
        );

        let start = Instant::now();
        for _ in 0..self.iterations {
            if self.cancel.is_cancelled() {
                tracing::info!("Latency measurement cancelled");
                return Err(HighlightError::Cancelled);
            }
            highlight_or_plain(
                self.engine.as_ref(),
                &self.text,
                &self.language,
                &self.theme,
                self.foreground,
            )?;
        }
        let report = LatencyReport {
            iterations: self.iterations,
            total: start.elapsed(),
        };

        tracing::info!(
            "Highlighted {} times in {:.3}s ({:.4}s avg)",
            report.iterations,
            report.total_seconds(),
            report.average_seconds()
        );
        Ok(report)
    }

    /// Run on a new thread and hand the result to `on_done` there
    pub fn spawn<F>(self, on_done: F)
    where
        F: FnOnce(Result<LatencyReport, HighlightError>) + Send + 'static,
    {
        std::thread::spawn(move || on_done(self.run()));
    }
}

/// Pending latency measurement
///
/// Poll with `try_result` from the thread that drives the UI, or block with
/// `wait`.
pub struct LatencyHandle {
    rx: Receiver<Result<LatencyReport, HighlightError>>,
    cancel: CancelToken,
}

impl LatencyHandle {
    pub(crate) fn start(job: LatencyJob) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = job.cancel.clone();
        job.spawn(move |result| {
            let _ = tx.send(result);
        });
        Self { rx, cancel }
    }

    /// Result if the measurement has finished, without blocking
    pub fn try_result(&self) -> Option<Result<LatencyReport, HighlightError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(HighlightError::WorkerDisconnected)),
        }
    }

    /// Block until the measurement finishes
    pub fn wait(self) -> Result<LatencyReport, HighlightError> {
        self.rx
            .recv()
            .unwrap_or(Err(HighlightError::WorkerDisconnected))
    }

    /// Ask the worker to stop before its next iteration
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_is_total_over_iterations() {
        let report = LatencyReport {
            iterations: 10,
            total: Duration::from_millis(250),
        };
        assert!((report.average_seconds() - 0.025).abs() < 1e-12);
        assert!((report.total_seconds() - 10.0 * report.average_seconds()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_iterations_average_is_zero() {
        let report = LatencyReport {
            iterations: 0,
            total: Duration::ZERO,
        };
        assert_eq!(report.average_seconds(), 0.0);
    }

    #[test]
    fn test_summary_wording() {
        let report = LatencyReport {
            iterations: 100,
            total: Duration::from_millis(1234),
        };
        assert_eq!(
            report.to_string(),
            "This code was highlighted 100 times.\n\
             It took an average of 0.0123 seconds to process each time,\n\
             with a total of 1.234 seconds"
        );
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
