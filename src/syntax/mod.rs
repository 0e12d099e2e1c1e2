//! Syntax highlighting module
//!
//! Provides tree-sitter based syntax highlighting with:
//! - Language identification and grammar lookup
//! - Highlight extraction into char-offset tokens
//! - Flattening of nested tokens into contiguous styled runs
//!
//! ## Pipeline
//!
//! ```text
//! source + Grammar → ParserState::highlight → Vec<HighlightToken>
//!                  → build_runs(theme)      → Vec<StyledRun>
//! ```

mod highlights;
mod languages;
mod parser;
mod runs;

pub use highlights::{
    highlight_id_for_name, highlight_name, HighlightId, HighlightToken, HIGHLIGHT_NAMES,
};
pub(crate) use languages::capitalize;
pub use languages::{Grammar, LanguageId};
pub use parser::ParserState;
pub use runs::{build_runs, plain_runs, runs_cover, StyledRun};
