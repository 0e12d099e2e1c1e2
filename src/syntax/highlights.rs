//! Capture names and highlight tokens
//!
//! Tree-sitter queries emit captures like `@keyword.function`. Every capture the
//! engine understands is an index into `HIGHLIGHT_NAMES`; themes assign styles
//! by the same names.

/// Standard tree-sitter capture names mapped to theme styles.
/// Index into this array is the HighlightId.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",             // @attribute
    "boolean",               // @boolean (true, false)
    "comment",               // @comment
    "constant",              // @constant
    "constant.builtin",      // @constant.builtin (null, nil)
    "constructor",           // @constructor (new Foo)
    "escape",                // @escape (string escapes)
    "function",              // @function
    "function.builtin",      // @function.builtin (echo, print)
    "function.macro",        // @function.macro (println!)
    "function.method",       // @function.method
    "keyword",               // @keyword
    "keyword.function",      // @keyword.function (fn, def, func)
    "keyword.operator",      // @keyword.operator (and, or)
    "keyword.return",        // @keyword.return
    "label",                 // @label
    "number",                // @number
    "operator",              // @operator
    "property",              // @property
    "punctuation",           // @punctuation (general)
    "punctuation.bracket",   // @punctuation.bracket
    "punctuation.delimiter", // @punctuation.delimiter
    "punctuation.special",   // @punctuation.special
    "string",                // @string
    "string.special",        // @string.special (regex, heredoc)
    "tag",                   // @tag
    "type",                  // @type
    "type.builtin",          // @type.builtin (int, bool)
    "variable",              // @variable
    "variable.builtin",      // @variable.builtin (self, this)
    "variable.parameter",    // @variable.parameter
];

/// Index into HIGHLIGHT_NAMES
pub type HighlightId = u16;

/// A highlighted span of the source, in char offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightToken {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Index into HIGHLIGHT_NAMES
    pub highlight: HighlightId,
}

/// Look up highlight ID by capture name
pub fn highlight_id_for_name(name: &str) -> Option<HighlightId> {
    // Handle hierarchical names: try exact match first, then progressively shorter
    // parents (e.g. "keyword.control.import" -> "keyword.control" -> "keyword").
    let mut current = name;
    loop {
        if let Some(pos) = HIGHLIGHT_NAMES.iter().position(|&n| n == current) {
            return Some(pos as HighlightId);
        }

        let Some(dot_pos) = current.rfind('.') else {
            break;
        };
        current = &current[..dot_pos];
    }

    None
}

/// Capture name for a highlight ID
pub fn highlight_name(id: HighlightId) -> Option<&'static str> {
    HIGHLIGHT_NAMES.get(id as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_id_lookup() {
        assert!(highlight_id_for_name("keyword").is_some());
        assert!(highlight_id_for_name("keyword.function").is_some());
        assert!(highlight_id_for_name("string").is_some());
        assert!(highlight_id_for_name("nonexistent").is_none());
    }

    #[test]
    fn test_hierarchical_fallback() {
        assert_eq!(
            highlight_id_for_name("keyword.control.import"),
            highlight_id_for_name("keyword")
        );
        assert_eq!(
            highlight_id_for_name("function.method.call"),
            highlight_id_for_name("function.method")
        );
    }

    #[test]
    fn test_highlight_name_round_trip() {
        let id = highlight_id_for_name("comment").unwrap();
        assert_eq!(highlight_name(id), Some("comment"));
        assert_eq!(highlight_name(HIGHLIGHT_NAMES.len() as HighlightId), None);
    }
}
