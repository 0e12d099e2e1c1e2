//! Highlighting engine capability
//!
//! `HighlightedBuffer` only talks to an engine through `HighlightEngine`, so
//! tests can swap the tree-sitter engine for a fake one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::HighlightError;
use crate::syntax::{build_runs, plain_runs, Grammar, LanguageId, ParserState, StyledRun};
use crate::theme::{Color, Theme, ThemeCatalog, ThemeId, ThemeMetadata};

/// Turns (text, language, theme) into styled runs
///
/// Implementations are shared across threads (the latency benchmark runs on
/// a worker), so they must be `Send + Sync`.
pub trait HighlightEngine: Send + Sync {
    /// Languages this engine can highlight, sorted
    fn supported_languages(&self) -> Vec<LanguageId>;

    /// Themes this engine can apply, sorted
    fn supported_themes(&self) -> Vec<ThemeId>;

    /// Highlight `text`, returning runs that exactly cover it
    fn highlight(
        &self,
        text: &str,
        language: &LanguageId,
        theme: &ThemeId,
    ) -> Result<Vec<StyledRun>, HighlightError>;

    /// Background and default foreground of a theme
    fn theme_info(&self, theme: &ThemeId) -> Result<ThemeMetadata, HighlightError>;

    fn supports_language(&self, language: &LanguageId) -> bool {
        self.supported_languages().contains(language)
    }

    fn supports_theme(&self, theme: &ThemeId) -> bool {
        self.supported_themes().contains(theme)
    }
}

/// Outcome of one highlight pass, degraded to plain styling when the
/// engine has no grammar for the language
#[derive(Debug, Clone)]
pub(crate) struct HighlightPass {
    pub runs: Vec<StyledRun>,
    pub degraded: bool,
}

/// Run one highlight pass, degrading unsupported languages to plain runs
pub(crate) fn highlight_or_plain(
    engine: &dyn HighlightEngine,
    text: &str,
    language: &LanguageId,
    theme: &ThemeId,
    foreground: Color,
) -> Result<HighlightPass, HighlightError> {
    match engine.highlight(text, language, theme) {
        Ok(runs) => Ok(HighlightPass {
            runs,
            degraded: false,
        }),
        Err(HighlightError::UnsupportedLanguage(_)) => Ok(HighlightPass {
            runs: plain_runs(text.chars().count(), foreground),
            degraded: true,
        }),
        Err(e) => Err(e),
    }
}

/// Engine backed by the bundled tree-sitter grammars and YAML themes
pub struct TreeSitterEngine {
    parser: Mutex<ParserState>,
    catalog: ThemeCatalog,
    /// Themes loaded so far, keyed by id
    themes: Mutex<HashMap<ThemeId, Arc<Theme>>>,
}

impl TreeSitterEngine {
    /// Engine over built-in themes plus the user themes directory
    pub fn new() -> Self {
        Self::with_catalog(ThemeCatalog::new())
    }

    pub fn with_catalog(catalog: ThemeCatalog) -> Self {
        Self {
            parser: Mutex::new(ParserState::new()),
            catalog,
            themes: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Load (or fetch from cache) a resolved theme
    pub fn theme(&self, id: &ThemeId) -> Result<Arc<Theme>, HighlightError> {
        if let Some(theme) = lock(&self.themes).get(id) {
            return Ok(Arc::clone(theme));
        }

        if self.catalog.find(id).is_none() {
            return Err(HighlightError::UnsupportedTheme(id.clone()));
        }

        let theme = self.catalog.load(id).map_err(|reason| {
            tracing::error!("Theme '{}' is listed but failed to load: {}", id, reason);
            HighlightError::missing(format!("theme {}", id), reason)
        })?;
        let theme = Arc::new(theme);
        lock(&self.themes).insert(id.clone(), Arc::clone(&theme));
        Ok(theme)
    }
}

impl Default for TreeSitterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightEngine for TreeSitterEngine {
    fn supported_languages(&self) -> Vec<LanguageId> {
        let mut languages: Vec<LanguageId> =
            Grammar::ALL.iter().map(|g| g.language_id()).collect();
        languages.sort();
        languages
    }

    fn supported_themes(&self) -> Vec<ThemeId> {
        self.catalog.list().into_iter().map(|t| t.id).collect()
    }

    fn highlight(
        &self,
        text: &str,
        language: &LanguageId,
        theme: &ThemeId,
    ) -> Result<Vec<StyledRun>, HighlightError> {
        let grammar = Grammar::from_language(language)
            .ok_or_else(|| HighlightError::UnsupportedLanguage(language.clone()))?;
        let theme = self.theme(theme)?;

        let tokens = lock(&self.parser).highlight(text, grammar)?;
        let runs = build_runs(text.chars().count(), &tokens, &theme);
        tracing::trace!(
            "Highlighted {} chars as {}: {} tokens, {} runs",
            text.len(),
            grammar.name(),
            tokens.len(),
            runs.len()
        );
        Ok(runs)
    }

    fn theme_info(&self, theme: &ThemeId) -> Result<ThemeMetadata, HighlightError> {
        self.theme(theme).map(|t| t.metadata())
    }

    fn supports_language(&self, language: &LanguageId) -> bool {
        Grammar::from_language(language).is_some()
    }

    fn supports_theme(&self, theme: &ThemeId) -> bool {
        lock(&self.themes).contains_key(theme) || self.catalog.find(theme).is_some()
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
