//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::benchmark::LatencyReport;
use crate::error::HighlightError;
use crate::syntax::LanguageId;
use crate::theme::ThemeId;

/// Viewer messages (user selections and requests)
#[derive(Debug, Clone)]
pub enum ViewerMsg {
    /// Switch language and load its sample snippet, if any
    PickLanguage(LanguageId),
    /// Switch theme
    PickTheme(ThemeId),
    /// Replace the displayed text
    SetText(String),
    /// Read a file on a worker and display it
    LoadFile(PathBuf),
    /// Measure highlight latency of the current text (None = configured count)
    RunBenchmark(Option<u32>),
    /// Stop a running measurement
    CancelBenchmark,
    /// Render the current state again
    Show,
    /// Print supported languages
    ListLanguages,
    /// Print available themes
    ListThemes,
}

/// Application lifecycle messages and async results
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// A line typed on stdin
    CommandLine(String),
    /// Stdin reached EOF
    InputClosed,
    /// File load completed (from async worker)
    FileLoaded {
        path: PathBuf,
        result: Result<String, String>,
    },
    /// Latency measurement finished (from benchmark worker)
    BenchmarkCompleted(Result<LatencyReport, HighlightError>),
    /// Exit the viewer
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Viewer(ViewerMsg),
    App(AppMsg),
}

impl From<ViewerMsg> for Msg {
    fn from(msg: ViewerMsg) -> Self {
        Msg::Viewer(msg)
    }
}

impl From<AppMsg> for Msg {
    fn from(msg: AppMsg) -> Self {
        Msg::App(msg)
    }
}
