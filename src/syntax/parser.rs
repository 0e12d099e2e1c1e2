//! Tree-sitter parser state and highlight extraction
//!
//! Manages parsers and compiled highlight queries per grammar. Every call
//! parses the whole source; there is no tree cache.

use std::collections::{HashMap, HashSet};

use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor, Tree};

use super::highlights::{highlight_id_for_name, HighlightToken};
use super::languages::Grammar;
use crate::error::HighlightError;

// Highlight queries shipped with the grammar crates
const RUST_HIGHLIGHTS: &str = tree_sitter_rust::HIGHLIGHTS_QUERY;
const PYTHON_HIGHLIGHTS: &str = tree_sitter_python::HIGHLIGHTS_QUERY;
const GO_HIGHLIGHTS: &str = tree_sitter_go::HIGHLIGHTS_QUERY;
const PHP_HIGHLIGHTS: &str = tree_sitter_php::HIGHLIGHTS_QUERY;
// Some crates export HIGHLIGHT_QUERY (singular)
const C_HIGHLIGHTS: &str = tree_sitter_c::HIGHLIGHT_QUERY;
const CPP_HIGHLIGHTS: &str = tree_sitter_cpp::HIGHLIGHT_QUERY;
const JAVA_HIGHLIGHTS: &str = tree_sitter_java::HIGHLIGHTS_QUERY;
const BASH_HIGHLIGHTS: &str = tree_sitter_bash::HIGHLIGHT_QUERY;

fn grammar_source(grammar: Grammar) -> (tree_sitter::Language, &'static str) {
    match grammar {
        Grammar::Rust => (tree_sitter_rust::LANGUAGE.into(), RUST_HIGHLIGHTS),
        Grammar::Python => (tree_sitter_python::LANGUAGE.into(), PYTHON_HIGHLIGHTS),
        Grammar::Go => (tree_sitter_go::LANGUAGE.into(), GO_HIGHLIGHTS),
        Grammar::C => (tree_sitter_c::LANGUAGE.into(), C_HIGHLIGHTS),
        Grammar::Cpp => (tree_sitter_cpp::LANGUAGE.into(), CPP_HIGHLIGHTS),
        Grammar::Java => (tree_sitter_java::LANGUAGE.into(), JAVA_HIGHLIGHTS),
        Grammar::Bash => (tree_sitter_bash::LANGUAGE.into(), BASH_HIGHLIGHTS),
        Grammar::Php => (tree_sitter_php::LANGUAGE_PHP.into(), PHP_HIGHLIGHTS),
    }
}

/// Parser state (tree-sitter parsers are !Sync)
pub struct ParserState {
    /// Parser instances per grammar
    parsers: HashMap<Grammar, Parser>,
    /// Compiled queries per grammar
    queries: HashMap<Grammar, Query>,
    /// Grammars that failed to initialize, with the reason
    failures: HashMap<Grammar, String>,
}

impl ParserState {
    /// Create a new parser state with every bundled grammar initialized
    pub fn new() -> Self {
        let mut state = Self {
            parsers: HashMap::new(),
            queries: HashMap::new(),
            failures: HashMap::new(),
        };

        for grammar in Grammar::ALL {
            state.init_grammar(*grammar);
        }

        state
    }

    /// Initialize a grammar's parser and query
    fn init_grammar(&mut self, grammar: Grammar) {
        let (ts_lang, highlights_scm) = grammar_source(grammar);

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&ts_lang) {
            tracing::error!("Failed to set language for {:?}: {}", grammar, e);
            self.failures
                .insert(grammar, format!("incompatible grammar: {}", e));
            return;
        }

        // Create query (may fail if query syntax is invalid)
        match Query::new(&ts_lang, highlights_scm) {
            Ok(query) => {
                self.parsers.insert(grammar, parser);
                self.queries.insert(grammar, query);
            }
            Err(e) => {
                tracing::error!("Failed to compile query for {:?}: {:?}", grammar, e);
                self.failures.insert(
                    grammar,
                    format!("highlight query failed at row {}: {}", e.row, e.message),
                );
            }
        }
    }

    /// Whether a grammar is ready to highlight
    pub fn is_ready(&self, grammar: Grammar) -> bool {
        self.queries.contains_key(&grammar)
    }

    /// Parse the source and extract highlight tokens in char offsets
    pub fn highlight(
        &mut self,
        source: &str,
        grammar: Grammar,
    ) -> Result<Vec<HighlightToken>, HighlightError> {
        if let Some(reason) = self.failures.get(&grammar) {
            return Err(HighlightError::missing(grammar.name(), reason.clone()));
        }

        let parser = self.parsers.get_mut(&grammar).ok_or_else(|| {
            HighlightError::missing(grammar.name(), "grammar was never initialized")
        })?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            tracing::error!("Parse failed for {:?}", grammar);
            HighlightError::missing(grammar.name(), "parser returned no tree")
        })?;

        Ok(self.extract_highlights(source, &tree, grammar))
    }

    /// Extract highlight tokens from a parsed tree
    ///
    /// Tokens are ordered outer-before-inner. When several patterns capture
    /// the same node, the first pattern wins.
    fn extract_highlights(&self, source: &str, tree: &Tree, grammar: Grammar) -> Vec<HighlightToken> {
        let Some(query) = self.queries.get(&grammar) else {
            return Vec::new();
        };

        // Byte offset of every char, for byte -> char conversion
        let char_starts: Vec<usize> = source.char_indices().map(|(i, _)| i).collect();
        let byte_to_char = |byte: usize| char_starts.partition_point(|&start| start < byte);

        let mut tokens = Vec::new();
        let mut seen_ranges = HashSet::new();
        let mut cursor = QueryCursor::new();

        let mut captures = cursor.captures(query, tree.root_node(), source.as_bytes());
        while let Some((query_match, capture_idx)) = captures.next() {
            let capture = &query_match.captures[*capture_idx];
            let capture_name = &query.capture_names()[capture.index as usize];

            // Map capture name to highlight ID
            let highlight = match highlight_id_for_name(capture_name) {
                Some(id) => id,
                None => continue, // Skip unknown captures
            };

            let node = capture.node;
            let start = byte_to_char(node.start_byte());
            let end = byte_to_char(node.end_byte());
            if start >= end || !seen_ranges.insert((start, end)) {
                continue;
            }

            tokens.push(HighlightToken {
                start,
                end,
                highlight,
            });
        }

        // Stable: outer spans first so inner spans paint over them
        tokens.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        tokens
    }
}

impl Default for ParserState {
    fn default() -> Self {
        Self::new()
    }
}
