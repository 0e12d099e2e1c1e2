//! Error kinds surfaced by the highlighting engine and buffer

use thiserror::Error;

use crate::syntax::LanguageId;
use crate::theme::ThemeId;

/// Errors returned by highlighting operations
///
/// `UnsupportedLanguage` is normally recovered inside the buffer by degrading
/// to plain styling; the other kinds reach the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    /// The engine has no grammar for this language
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(LanguageId),

    /// The engine has no theme with this id
    #[error("unsupported theme: {0}")]
    UnsupportedTheme(ThemeId),

    /// A grammar or theme the engine lists could not be loaded
    #[error("missing engine resource '{resource}': {reason}")]
    EngineResourceMissing { resource: String, reason: String },

    /// A latency measurement was cancelled before completing
    #[error("latency measurement cancelled")]
    Cancelled,

    /// The benchmark worker went away without reporting a result
    #[error("latency worker disconnected before reporting")]
    WorkerDisconnected,
}

impl HighlightError {
    pub(crate) fn missing(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EngineResourceMissing {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}
