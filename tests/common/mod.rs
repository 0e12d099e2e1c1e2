//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use syntaxkit::syntax::runs_cover;
use syntaxkit::{
    Color, HighlightEngine, HighlightError, LanguageId, RunStyle, StyledRun, ThemeId,
    ThemeMetadata,
};

/// Words the fake grammar styles as keywords
pub const KEYWORDS: &[&str] = &["fn", "let", "if", "else", "return"];

/// Engine with one language (`pseudo`) and two themes (`light`, `dark`)
///
/// Keywords are bold in the theme's keyword color; everything else uses the
/// theme foreground. A gate can hold every highlight call until opened, and
/// a delay slows each call down. While `failing` is set every highlight call
/// reports a missing grammar.
#[derive(Default)]
pub struct FakeEngine {
    gate: Option<Gate>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

/// Blocks highlight calls until opened
#[derive(Clone, Default)]
pub struct Gate(Arc<(Mutex<bool>, Condvar)>);

impl Gate {
    pub fn open(&self) {
        let (lock, cvar) = &*self.0;
        *lock.lock().unwrap() = true;
        cvar.notify_all();
    }

    fn wait(&self) {
        let (lock, cvar) = &*self.0;
        let mut open = lock.lock().unwrap();
        while !*open {
            open = cvar.wait(open).unwrap();
        }
    }
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> (Self, Gate) {
        let gate = Gate::default();
        (
            Self {
                gate: Some(gate.clone()),
                ..Self::default()
            },
            gate,
        )
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Make highlight calls fail with `EngineResourceMissing`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of highlight calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn metadata(theme: &ThemeId) -> Option<ThemeMetadata> {
        match theme.as_str() {
            "light" => Some(ThemeMetadata {
                background: Color::rgb(0xFF, 0xFF, 0xFF),
                foreground: Color::rgb(0x33, 0x33, 0x33),
            }),
            "dark" => Some(ThemeMetadata {
                background: Color::rgb(0x1E, 0x1E, 0x1E),
                foreground: Color::rgb(0xD4, 0xD4, 0xD4),
            }),
            _ => None,
        }
    }

    fn keyword_color(theme: &ThemeId) -> Color {
        if theme.as_str() == "light" {
            Color::rgb(0x00, 0x00, 0xFF)
        } else {
            Color::rgb(0xC5, 0x86, 0xC0)
        }
    }
}

impl HighlightEngine for FakeEngine {
    fn supported_languages(&self) -> Vec<LanguageId> {
        vec![LanguageId::new("pseudo")]
    }

    fn supported_themes(&self) -> Vec<ThemeId> {
        vec![ThemeId::new("dark"), ThemeId::new("light")]
    }

    fn highlight(
        &self,
        text: &str,
        language: &LanguageId,
        theme: &ThemeId,
    ) -> Result<Vec<StyledRun>, HighlightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.wait();
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(HighlightError::EngineResourceMissing {
                resource: format!("grammar {}", language),
                reason: "query failed to compile".to_string(),
            });
        }
        if !self.supports_language(language) {
            return Err(HighlightError::UnsupportedLanguage(language.clone()));
        }
        let metadata =
            Self::metadata(theme).ok_or_else(|| HighlightError::UnsupportedTheme(theme.clone()))?;
        let plain = RunStyle::plain(metadata.foreground);
        let keyword = RunStyle {
            bold: true,
            ..RunStyle::plain(Self::keyword_color(theme))
        };

        // Split into maximal word / non-word char spans
        let chars: Vec<char> = text.chars().collect();
        let mut runs: Vec<StyledRun> = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let is_word = chars[start].is_alphanumeric();
            let mut end = start + 1;
            while end < chars.len() && chars[end].is_alphanumeric() == is_word {
                end += 1;
            }
            let word: String = chars[start..end].iter().collect();
            let style = if is_word && KEYWORDS.contains(&word.as_str()) {
                keyword
            } else {
                plain
            };
            match runs.last_mut() {
                Some(last) if last.style == style => last.range.end = end,
                _ => runs.push(StyledRun {
                    range: start..end,
                    style,
                    highlight: None,
                }),
            }
            start = end;
        }

        debug_assert!(runs_cover(&runs, chars.len()));
        Ok(runs)
    }

    fn theme_info(&self, theme: &ThemeId) -> Result<ThemeMetadata, HighlightError> {
        Self::metadata(theme).ok_or_else(|| HighlightError::UnsupportedTheme(theme.clone()))
    }
}

/// Text covered by a run
pub fn run_text(text: &str, run: &StyledRun) -> String {
    text.chars()
        .skip(run.range.start)
        .take(run.range.len())
        .collect()
}

/// Check that runs tile `[0, char_len)` in order
pub fn assert_covers(runs: &[StyledRun], text: &str) {
    let len = text.chars().count();
    assert!(
        runs_cover(runs, len),
        "runs {:?} do not cover {} chars",
        runs.iter().map(|r| r.range.clone()).collect::<Vec<_>>(),
        len
    );
}
