//! Column helpers for terminal rendering
//!
//! Pure functions, no I/O.

use std::borrow::Cow;

/// Tab stop width in columns
pub const TAB_WIDTH: usize = 4;

/// Spaces a tab expands to when it starts at `visual_col`
#[inline]
pub fn tab_advance(visual_col: usize) -> usize {
    TAB_WIDTH - (visual_col % TAB_WIDTH)
}

/// Expand tab characters to spaces for display.
///
/// `start_col` is the visual column of the first character, so a run that
/// starts mid-line keeps tab stops aligned with the rest of the line.
/// Returns `Cow::Borrowed` when there are no tabs.
pub fn expand_tabs_from(text: &str, start_col: usize) -> Cow<'_, str> {
    if !text.contains('\t') {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() * 2);
    let mut visual_col = start_col;
    for ch in text.chars() {
        if ch == '\t' {
            let spaces = tab_advance(visual_col);
            result.extend(std::iter::repeat(' ').take(spaces));
            visual_col += spaces;
        } else {
            result.push(ch);
            visual_col += 1;
        }
    }
    Cow::Owned(result)
}

/// Visual column after displaying `text` starting at `start_col`
pub fn advance_col(text: &str, start_col: usize) -> usize {
    text.chars().fold(start_col, |col, ch| {
        if ch == '\t' {
            col + tab_advance(col)
        } else {
            col + 1
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tabs_borrows() {
        assert!(matches!(expand_tabs_from("abc", 0), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_tab_expands_to_next_stop() {
        assert_eq!(expand_tabs_from("a\tb", 0), "a   b");
        assert_eq!(expand_tabs_from("\tb", 2), "  b");
    }

    #[test]
    fn test_advance_col_matches_expansion() {
        let text = "x\ty\t";
        assert_eq!(advance_col(text, 1), 1 + expand_tabs_from(text, 1).chars().count());
    }
}
