//! Sample snippets shown when a language is picked
//!
//! Each language may have a `default.txt` snippet. A user copy at
//! `~/.config/syntaxkit/samples/<language>/default.txt` takes precedence over
//! the bundled one.

use std::path::{Component, Path};

use crate::syntax::LanguageId;

pub struct BundledSample {
    pub language: &'static str,
    pub text: &'static str,
}

/// Bundled snippets, sorted by language id
///
/// `swift` has no grammar and shows the plain-text fallback.
pub const BUNDLED_SAMPLES: &[BundledSample] = &[
    BundledSample {
        language: "bash",
        text: include_str!("../samples/bash/default.txt"),
    },
    BundledSample {
        language: "c",
        text: include_str!("../samples/c/default.txt"),
    },
    BundledSample {
        language: "go",
        text: include_str!("../samples/go/default.txt"),
    },
    BundledSample {
        language: "python",
        text: include_str!("../samples/python/default.txt"),
    },
    BundledSample {
        language: "rust",
        text: include_str!("../samples/rust/default.txt"),
    },
    BundledSample {
        language: "swift",
        text: include_str!("../samples/swift/default.txt"),
    },
];

/// Bundled snippet for a language
pub fn bundled_sample(language: &LanguageId) -> Option<&'static str> {
    BUNDLED_SAMPLES
        .iter()
        .find(|s| s.language == language.as_str())
        .map(|s| s.text)
}

/// Snippet for a language, preferring the user samples directory
pub fn load_sample(language: &LanguageId) -> Option<String> {
    let user_dir = crate::config_paths::samples_dir();
    load_sample_from(user_dir.as_deref(), language)
}

/// Snippet for a language, preferring `user_dir/<language>/default.txt`
pub fn load_sample_from(user_dir: Option<&Path>, language: &LanguageId) -> Option<String> {
    if let Some(dir) = user_dir.filter(|_| is_single_dir_name(language.as_str())) {
        let path = dir.join(language.as_str()).join("default.txt");
        if path.is_file() {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    tracing::debug!("Loaded user sample {}", path.display());
                    return Some(text);
                }
                Err(e) => {
                    tracing::warn!("Failed to read sample {}: {}", path.display(), e);
                }
            }
        }
    }
    bundled_sample(language).map(str::to_string)
}

/// True when `name` is one plain path component (no separators, no `..`)
fn is_single_dir_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
