//! SyntaxKit - highlighted text buffer
//!
//! A `HighlightedBuffer` holds plain text plus a language and a theme, and
//! keeps a list of styled runs covering the text in sync with all three.
//! Highlighting goes through the `HighlightEngine` trait; `TreeSitterEngine`
//! implements it with bundled tree-sitter grammars and YAML themes.
//!
//! The remaining modules make up a small Elm-style terminal viewer around
//! the buffer.

pub mod benchmark;
pub mod buffer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod messages;
pub mod model;
pub mod samples;
pub mod syntax;
pub mod theme;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use benchmark::{CancelToken, LatencyHandle, LatencyReport};
pub use buffer::{BufferEvent, HighlightedBuffer};
pub use commands::Cmd;
pub use config::ViewerConfig;
pub use engine::{HighlightEngine, TreeSitterEngine};
pub use error::HighlightError;
pub use messages::Msg;
pub use model::ViewerModel;
pub use syntax::{LanguageId, StyledRun};
pub use theme::{invert_rgb, Color, RunStyle, ThemeId, ThemeMetadata};
