//! Viewer model - the complete state of the viewer
//!
//! Follows the Elm Architecture: only `update` mutates it, on the main thread.

pub mod chrome;

pub use chrome::{blend_over, ChromePalette, PROMPT_ALPHA};

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use crate::benchmark::LatencyReport;
use crate::buffer::{BufferEvent, HighlightedBuffer};
use crate::error::HighlightError;

/// The complete viewer model
#[derive(Debug)]
pub struct ViewerModel {
    /// Text, language, theme and styled runs
    pub buffer: HighlightedBuffer,
    /// Language name shown in the header (e.g., "Python")
    pub language_label: String,
    /// Theme name shown in the header (e.g., "Tomorrow Night Blue")
    pub theme_label: String,
    /// Bar colors derived from the theme
    pub chrome: ChromePalette,
    /// File the text came from, if any
    pub source: Option<PathBuf>,
    /// A latency measurement is in flight
    pub benchmark_running: bool,
    /// Outcome of the last latency measurement
    pub last_benchmark: Option<Result<LatencyReport, HighlightError>>,
    /// Iterations used when a benchmark request gives none
    pub benchmark_iterations: u32,
    /// One-line status shown in the footer
    pub status: Option<String>,
    /// Change events from `buffer`, drained after each update
    buffer_events: Receiver<BufferEvent>,
}

impl ViewerModel {
    pub fn new(mut buffer: HighlightedBuffer, benchmark_iterations: u32) -> Self {
        let buffer_events = buffer.subscribe();
        Self {
            chrome: ChromePalette::from_metadata(&buffer.theme_metadata()),
            language_label: buffer.language().display_name(),
            theme_label: buffer.theme().title(),
            buffer,
            source: None,
            benchmark_running: false,
            last_benchmark: None,
            benchmark_iterations,
            status: None,
            buffer_events,
        }
    }

    /// Apply pending buffer events to the labels and chrome
    ///
    /// Returns true when anything shown in the chrome changed.
    pub fn apply_buffer_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.buffer_events.try_recv() {
            match event {
                BufferEvent::ThemeChanged(metadata) => {
                    self.theme_label = self.buffer.theme().title();
                    self.chrome = ChromePalette::from_metadata(&metadata);
                    changed = true;
                }
                BufferEvent::RunsChanged | BufferEvent::LanguageUnsupported(_) => {
                    let label = self.buffer.language().display_name();
                    if label != self.language_label {
                        self.language_label = label;
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }
}
