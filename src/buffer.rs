//! Highlighted text buffer
//!
//! Owns a plain-text value and keeps a styled rendering of it in sync with
//! the active language and theme. Every change to text, language or theme
//! re-highlights the whole text; there is no incremental patching.
//!
//! Mutations take `&mut self` and are all-or-nothing: on error the buffer is
//! left exactly as it was.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::benchmark::{CancelToken, LatencyHandle, LatencyJob, LatencyReport};
use crate::engine::{highlight_or_plain, HighlightEngine, HighlightPass};
use crate::error::HighlightError;
use crate::syntax::{LanguageId, StyledRun};
use crate::theme::{ThemeId, ThemeMetadata};

/// Change notifications published to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferEvent {
    /// The styled runs were recomputed
    RunsChanged,
    /// A new theme was applied
    ThemeChanged(ThemeMetadata),
    /// The active language has no grammar; runs are unstyled
    LanguageUnsupported(LanguageId),
}

pub struct HighlightedBuffer {
    engine: Arc<dyn HighlightEngine>,
    text: String,
    language: LanguageId,
    language_supported: bool,
    theme: ThemeId,
    metadata: ThemeMetadata,
    runs: Vec<StyledRun>,
    subscribers: Vec<Sender<BufferEvent>>,
}

impl HighlightedBuffer {
    /// Create an empty buffer
    ///
    /// Fails only when the initial theme is unknown or cannot be loaded; an
    /// unsupported language is accepted and rendered unstyled.
    pub fn new(
        engine: Arc<dyn HighlightEngine>,
        language: impl Into<LanguageId>,
        theme: impl Into<ThemeId>,
    ) -> Result<Self, HighlightError> {
        let language = language.into();
        let theme = theme.into();

        if !engine.supports_theme(&theme) {
            return Err(HighlightError::UnsupportedTheme(theme));
        }
        let metadata = engine.theme_info(&theme)?;
        let language_supported = engine.supports_language(&language);

        Ok(Self {
            engine,
            text: String::new(),
            language,
            language_supported,
            theme,
            metadata,
            runs: Vec::new(),
            subscribers: Vec::new(),
        })
    }

    /// Replace the text and re-highlight it
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), HighlightError> {
        let text = text.into();
        let pass = highlight_or_plain(
            self.engine.as_ref(),
            &text,
            &self.language,
            &self.theme,
            self.metadata.foreground,
        )?;

        self.text = text;
        self.language_supported = !pass.degraded;
        self.runs = pass.runs;
        tracing::debug!(
            "Text replaced: {} chars, {} runs",
            self.text.chars().count(),
            self.runs.len()
        );
        self.publish(BufferEvent::RunsChanged);
        Ok(())
    }

    /// Switch language and re-highlight
    ///
    /// An unsupported language is still accepted as the active language so
    /// the host can display it; the text is then rendered in the theme's
    /// default foreground with no token styling.
    pub fn set_language(&mut self, language: impl Into<LanguageId>) -> Result<(), HighlightError> {
        let language = language.into();
        let pass = highlight_or_plain(
            self.engine.as_ref(),
            &self.text,
            &language,
            &self.theme,
            self.metadata.foreground,
        )?;
        self.commit_language(language, pass);
        Ok(())
    }

    /// Replace text and language together with a single highlight pass
    ///
    /// Same degrade rules as `set_language`. On error neither changes.
    pub fn set_content(
        &mut self,
        text: impl Into<String>,
        language: impl Into<LanguageId>,
    ) -> Result<(), HighlightError> {
        let text = text.into();
        let language = language.into();
        let pass = highlight_or_plain(
            self.engine.as_ref(),
            &text,
            &language,
            &self.theme,
            self.metadata.foreground,
        )?;
        self.text = text;
        self.commit_language(language, pass);
        Ok(())
    }

    fn commit_language(&mut self, language: LanguageId, pass: HighlightPass) {
        if pass.degraded {
            tracing::warn!("No grammar for '{}', rendering as plain text", language);
        } else {
            tracing::debug!("Language set to {}", language);
        }

        self.language = language;
        self.language_supported = !pass.degraded;
        self.runs = pass.runs;
        if pass.degraded {
            self.publish(BufferEvent::LanguageUnsupported(self.language.clone()));
        }
        self.publish(BufferEvent::RunsChanged);
    }

    /// Switch theme, reload its metadata and re-highlight
    ///
    /// Unknown themes are rejected with `UnsupportedTheme` and change nothing.
    pub fn set_theme(&mut self, theme: impl Into<ThemeId>) -> Result<(), HighlightError> {
        let theme = theme.into();
        if !self.engine.supports_theme(&theme) {
            tracing::warn!("Rejecting unknown theme '{}'", theme);
            return Err(HighlightError::UnsupportedTheme(theme));
        }

        let metadata = self.engine.theme_info(&theme)?;
        let pass = highlight_or_plain(
            self.engine.as_ref(),
            &self.text,
            &self.language,
            &theme,
            metadata.foreground,
        )?;

        tracing::debug!("Theme set to {}", theme);
        self.theme = theme;
        self.metadata = metadata;
        self.language_supported = !pass.degraded;
        self.runs = pass.runs;
        self.publish(BufferEvent::ThemeChanged(metadata));
        self.publish(BufferEvent::RunsChanged);
        Ok(())
    }

    /// Runs from the most recent successful highlight pass
    pub fn styled_runs(&self) -> &[StyledRun] {
        &self.runs
    }

    pub fn theme_metadata(&self) -> ThemeMetadata {
        self.metadata
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    pub fn theme(&self) -> &ThemeId {
        &self.theme
    }

    /// Whether the active language is actually highlighted
    pub fn is_language_supported(&self) -> bool {
        self.language_supported
    }

    pub fn engine(&self) -> &Arc<dyn HighlightEngine> {
        &self.engine
    }

    /// Receive change events until the receiver is dropped
    pub fn subscribe(&mut self) -> Receiver<BufferEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Highlight `text` as `language` with the current theme `iterations`
    /// times on a worker thread. Returns immediately.
    pub fn measure_highlight_latency(
        &self,
        text: impl Into<String>,
        language: impl Into<LanguageId>,
        iterations: u32,
    ) -> LatencyHandle {
        LatencyHandle::start(self.latency_job(text.into(), language.into(), iterations))
    }

    /// Like `measure_highlight_latency`, but delivers the result by calling
    /// `on_done` on the worker thread
    pub fn measure_highlight_latency_with<F>(
        &self,
        text: impl Into<String>,
        language: impl Into<LanguageId>,
        iterations: u32,
        on_done: F,
    ) -> CancelToken
    where
        F: FnOnce(Result<LatencyReport, HighlightError>) + Send + 'static,
    {
        let job = self.latency_job(text.into(), language.into(), iterations);
        let cancel = job.cancel.clone();
        job.spawn(on_done);
        cancel
    }

    fn latency_job(&self, text: String, language: LanguageId, iterations: u32) -> LatencyJob {
        LatencyJob {
            engine: Arc::clone(&self.engine),
            text,
            language,
            theme: self.theme.clone(),
            foreground: self.metadata.foreground,
            iterations,
            cancel: CancelToken::new(),
        }
    }

    fn publish(&mut self, event: BufferEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl std::fmt::Debug for HighlightedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightedBuffer")
            .field("language", &self.language)
            .field("theme", &self.theme)
            .field("chars", &self.text.chars().count())
            .field("runs", &self.runs.len())
            .finish()
    }
}
