//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::syntax::LanguageId;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Render the model to the terminal
    Redraw,
    /// Measure highlight latency on a worker
    /// Sends Msg::App(BenchmarkCompleted) when done
    MeasureLatency {
        text: String,
        language: LanguageId,
        iterations: u32,
    },
    /// Ask the running measurement to stop
    CancelLatency,
    /// Load file asynchronously
    LoadFile { path: PathBuf },
    /// Write a block of text to stdout
    Print(String),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Workers report back through messages, which trigger their own redraw
            Cmd::None
            | Cmd::MeasureLatency { .. }
            | Cmd::CancelLatency
            | Cmd::LoadFile { .. }
            | Cmd::Print(_)
            | Cmd::Quit => false,
        }
    }

    /// Check if this command exits the viewer
    pub fn is_quit(&self) -> bool {
        match self {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.is_quit()),
            _ => false,
        }
    }
}
