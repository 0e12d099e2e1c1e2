//! Language identification and detection
//!
//! `LanguageId` is the user-facing, case-insensitive name of a language.
//! `Grammar` is the closed set of tree-sitter grammars compiled into the crate.

use std::fmt;
use std::path::Path;

/// Case-insensitive language identifier (e.g. "python", "swift")
///
/// Any string is a valid `LanguageId`; whether it gets highlighted depends on
/// the engine it is handed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name as shown in chrome ("python" -> "Python")
    pub fn display_name(&self) -> String {
        capitalize(&self.0)
    }

    /// Detect language from file extension, falling back to the extension itself
    pub fn from_extension(ext: &str) -> Self {
        match Grammar::from_extension(ext) {
            Some(grammar) => grammar.language_id(),
            None => Self::new(ext),
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LanguageId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Uppercase the first letter of each word
pub(crate) fn capitalize(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Grammars bundled with the tree-sitter engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    Rust,
    Python,
    Go,
    C,
    Cpp,
    Java,
    Bash,
    Php,
}

impl Grammar {
    pub const ALL: &'static [Grammar] = &[
        Grammar::Rust,
        Grammar::Python,
        Grammar::Go,
        Grammar::C,
        Grammar::Cpp,
        Grammar::Java,
        Grammar::Bash,
        Grammar::Php,
    ];

    /// Canonical language id for this grammar
    pub fn name(&self) -> &'static str {
        match self {
            Grammar::Rust => "rust",
            Grammar::Python => "python",
            Grammar::Go => "go",
            Grammar::C => "c",
            Grammar::Cpp => "cpp",
            Grammar::Java => "java",
            Grammar::Bash => "bash",
            Grammar::Php => "php",
        }
    }

    pub fn language_id(&self) -> LanguageId {
        LanguageId::new(self.name())
    }

    /// Resolve a language id, accepting a few common aliases
    pub fn from_language(id: &LanguageId) -> Option<Self> {
        match id.as_str() {
            "rust" => Some(Grammar::Rust),
            "python" | "python3" => Some(Grammar::Python),
            "go" | "golang" => Some(Grammar::Go),
            "c" => Some(Grammar::C),
            "cpp" | "c++" => Some(Grammar::Cpp),
            "java" => Some(Grammar::Java),
            "bash" | "sh" | "shell" => Some(Grammar::Bash),
            "php" => Some(Grammar::Php),
            _ => None,
        }
    }

    /// Detect grammar from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "rs" => Some(Grammar::Rust),
            "py" | "pyi" => Some(Grammar::Python),
            "go" => Some(Grammar::Go),
            "c" | "h" => Some(Grammar::C),
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" => Some(Grammar::Cpp),
            "java" => Some(Grammar::Java),
            "sh" | "bash" => Some(Grammar::Bash),
            "php" => Some(Grammar::Php),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_id_is_case_insensitive() {
        assert_eq!(LanguageId::new("Python"), LanguageId::new("python"));
        assert_eq!(LanguageId::new("  SWIFT "), LanguageId::new("swift"));
        assert_eq!(LanguageId::new("Swift").as_str(), "swift");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(LanguageId::new("python").display_name(), "Python");
        assert_eq!(LanguageId::new("objectivec").display_name(), "Objectivec");
        assert_eq!(LanguageId::new("").display_name(), "");
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageId::from_extension("rs"), LanguageId::new("rust"));
        assert_eq!(LanguageId::from_extension("PY"), LanguageId::new("python"));
        assert_eq!(LanguageId::from_extension("hpp"), LanguageId::new("cpp"));
        assert_eq!(LanguageId::from_extension("swift"), LanguageId::new("swift"));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("/path/to/main.go")),
            Some(LanguageId::new("go"))
        );
        assert_eq!(LanguageId::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_grammar_aliases() {
        assert_eq!(
            Grammar::from_language(&LanguageId::new("C++")),
            Some(Grammar::Cpp)
        );
        assert_eq!(
            Grammar::from_language(&LanguageId::new("sh")),
            Some(Grammar::Bash)
        );
        assert_eq!(Grammar::from_language(&LanguageId::new("swift")), None);
    }

    #[test]
    fn test_every_grammar_round_trips_through_its_name() {
        for grammar in Grammar::ALL {
            assert_eq!(
                Grammar::from_language(&grammar.language_id()),
                Some(*grammar)
            );
        }
    }
}
