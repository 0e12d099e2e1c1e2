//! Flattening highlight tokens into contiguous styled runs
//!
//! Captures from a query nest and overlap (a `string` inside a `function`
//! call, an `escape` inside a `string`). Runs are the flat view: contiguous,
//! non-overlapping and covering the whole text.

use std::ops::Range;

use super::highlights::{HighlightId, HighlightToken};
use crate::theme::{Color, RunStyle, Theme};

/// A contiguous char range of the text with its resolved style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// Char offsets into the text
    pub range: Range<usize>,
    pub style: RunStyle,
    /// Capture that produced this run, `None` for default-styled text
    pub highlight: Option<HighlightId>,
}

impl StyledRun {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Build runs covering `[0, char_len)` from possibly nested tokens.
///
/// Tokens are applied in order, so a later (inner) capture wins over an
/// earlier (outer) one. Out-of-range tokens are clipped.
pub fn build_runs(char_len: usize, tokens: &[HighlightToken], theme: &Theme) -> Vec<StyledRun> {
    let mut per_char: Vec<Option<HighlightId>> = vec![None; char_len];
    for token in tokens {
        let end = token.end.min(char_len);
        if token.start >= end {
            continue;
        }
        for slot in &mut per_char[token.start..end] {
            *slot = Some(token.highlight);
        }
    }

    let mut runs: Vec<StyledRun> = Vec::new();
    for (offset, highlight) in per_char.into_iter().enumerate() {
        let style = theme.style_for(highlight);
        match runs.last_mut() {
            Some(last) if last.highlight == highlight && last.style == style => {
                last.range.end = offset + 1;
            }
            _ => runs.push(StyledRun {
                range: offset..offset + 1,
                style,
                highlight,
            }),
        }
    }
    runs
}

/// Runs for unhighlighted text: one run in the default foreground, or none
/// for empty text
pub fn plain_runs(char_len: usize, foreground: Color) -> Vec<StyledRun> {
    if char_len == 0 {
        return Vec::new();
    }
    vec![StyledRun {
        range: 0..char_len,
        style: RunStyle::plain(foreground),
        highlight: None,
    }]
}

/// Check that runs are contiguous, non-empty and cover exactly `[0, char_len)`
pub fn runs_cover(runs: &[StyledRun], char_len: usize) -> bool {
    let mut expected_start = 0;
    for run in runs {
        if run.range.start != expected_start || run.is_empty() {
            return false;
        }
        expected_start = run.range.end;
    }
    expected_start == char_len
}
