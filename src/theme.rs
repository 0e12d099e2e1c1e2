//! Theme system for highlighted buffers
//!
//! Provides YAML-based themes with compile-time embedded built-ins and
//! user-defined themes from the config directory.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/syntaxkit/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::syntax::{capitalize, HighlightId, HIGHLIGHT_NAMES};

// Embed theme YAML files at compile time
pub const GITHUB_YAML: &str = include_str!("../themes/github.yaml");
pub const POJOAQUE_YAML: &str = include_str!("../themes/pojoaque.yaml");
pub const TOMORROW_NIGHT_BLUE_YAML: &str = include_str!("../themes/tomorrow-night-blue.yaml");
pub const ATOM_ONE_DARK_YAML: &str = include_str!("../themes/atom-one-dark.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier (e.g. "github", "pojoaque")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "atom-one-dark",
        yaml: ATOM_ONE_DARK_YAML,
    },
    BuiltinTheme {
        id: "github",
        yaml: GITHUB_YAML,
    },
    BuiltinTheme {
        id: "pojoaque",
        yaml: POJOAQUE_YAML,
    },
    BuiltinTheme {
        id: "tomorrow-night-blue",
        yaml: TOMORROW_NIGHT_BLUE_YAML,
    },
];

/// Identifier of a color scheme, stored lowercased
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThemeId(String);

impl ThemeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable title ("tomorrow-night-blue" -> "Tomorrow Night Blue")
    pub fn title(&self) -> String {
        capitalize(&self.0.replace('-', " "))
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ThemeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Where the theme came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme file
    User(PathBuf),
    /// Built-in theme embedded in binary
    Builtin,
}

/// An available theme, as listed by a catalog
#[derive(Debug, Clone)]
pub struct ThemeListing {
    pub id: ThemeId,
    /// Display name from YAML (e.g., "Tomorrow Night Blue")
    pub name: String,
    pub source: ThemeSource,
}

/// Background and default text color of a theme
///
/// Drives both the buffer's default style and surrounding chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeMetadata {
    pub background: Color,
    pub foreground: Color,
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Build an opaque color from unit-range channels (clamped to [0, 1])
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        fn channel(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// RGB channels in the unit range
    pub fn to_unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    /// Opaque complement, used for chrome drawn on top of a theme background
    pub fn inverted(&self) -> Self {
        let (r, g, b) = self.to_unit();
        let (r, g, b) = invert_rgb(r, g, b);
        Self::from_unit(r, g, b)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB" (or "#RRGGBBAA" when not opaque)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Invert unit-range RGB channels: (1-r, 1-g, 1-b)
pub fn invert_rgb(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    (1.0 - r, 1.0 - g, 1.0 - b)
}

/// Resolved display style of a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStyle {
    pub foreground: Color,
    pub background: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl RunStyle {
    /// Unstyled text in the given color
    pub const fn plain(foreground: Color) -> Self {
        Self {
            foreground,
            background: None,
            bold: false,
            italic: false,
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
    /// Capture name -> token style
    #[serde(default)]
    pub syntax: HashMap<String, TokenStyleData>,
}

/// UI theme colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub editor: EditorThemeData,
}

/// Editor area colors
#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
}

/// Token style for one capture name (raw strings from YAML)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenStyleData {
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub foreground: Color,
    /// Style per HighlightId; `None` falls back to the default style
    styles: Vec<Option<RunStyle>>,
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let background = Color::from_hex(&data.ui.editor.background)?;
        let foreground = Color::from_hex(&data.ui.editor.foreground)?;

        let mut parsed = HashMap::with_capacity(data.syntax.len());
        for (name, style) in &data.syntax {
            let resolved = RunStyle {
                foreground: style
                    .foreground
                    .as_deref()
                    .map(Color::from_hex)
                    .transpose()?
                    .unwrap_or(foreground),
                background: style
                    .background
                    .as_deref()
                    .map(Color::from_hex)
                    .transpose()?,
                bold: style.bold,
                italic: style.italic,
            };
            parsed.insert(name.as_str(), resolved);
        }

        // Inherit from the closest styled parent ("keyword.return" -> "keyword")
        let styles = HIGHLIGHT_NAMES
            .iter()
            .map(|name| {
                let mut current = *name;
                loop {
                    if let Some(style) = parsed.get(current) {
                        return Some(*style);
                    }
                    let dot = current.rfind('.')?;
                    current = &current[..dot];
                }
            })
            .collect();

        Ok(Theme {
            name: data.name,
            background,
            foreground,
            styles,
        })
    }

    pub fn metadata(&self) -> ThemeMetadata {
        ThemeMetadata {
            background: self.background,
            foreground: self.foreground,
        }
    }

    /// Style for text outside any capture
    pub fn default_style(&self) -> RunStyle {
        RunStyle::plain(self.foreground)
    }

    /// Style for a capture, falling back to the default style
    pub fn style_for(&self, highlight: Option<HighlightId>) -> RunStyle {
        highlight
            .and_then(|id| self.styles.get(id as usize).copied().flatten())
            .unwrap_or_else(|| self.default_style())
    }
}

/// Lists and loads themes from the user directory and the built-in set
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    user_dir: Option<PathBuf>,
}

impl ThemeCatalog {
    /// Catalog over `~/.config/syntaxkit/themes/` plus built-ins
    pub fn new() -> Self {
        Self {
            user_dir: crate::config_paths::themes_dir(),
        }
    }

    /// Catalog over an explicit user directory (or built-ins only)
    pub fn with_user_dir(user_dir: Option<PathBuf>) -> Self {
        Self { user_dir }
    }

    pub fn user_dir(&self) -> Option<&Path> {
        self.user_dir.as_deref()
    }

    /// List all available themes, sorted by id
    ///
    /// User themes override builtins with the same id.
    pub fn list(&self) -> Vec<ThemeListing> {
        let mut themes = Vec::new();
        let mut seen_ids = HashSet::new();

        if let Some(user_dir) = &self.user_dir {
            if let Ok(entries) = std::fs::read_dir(user_dir) {
                for entry in entries.filter_map(|e| e.ok()) {
                    let path = entry.path();
                    if !path
                        .extension()
                        .is_some_and(|ext| ext == "yaml" || ext == "yml")
                    {
                        continue;
                    }
                    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    let id = ThemeId::new(stem);
                    if seen_ids.insert(id.clone()) {
                        let name = extract_theme_name(&path).unwrap_or_else(|| id.title());
                        themes.push(ThemeListing {
                            id,
                            name,
                            source: ThemeSource::User(path),
                        });
                    }
                }
            }
        }

        for builtin in BUILTIN_THEMES {
            let id = ThemeId::new(builtin.id);
            if seen_ids.insert(id.clone()) {
                let name = Theme::from_yaml(builtin.yaml)
                    .map(|t| t.name)
                    .unwrap_or_else(|_| id.title());
                themes.push(ThemeListing {
                    id,
                    name,
                    source: ThemeSource::Builtin,
                });
            }
        }

        themes.sort_by(|a, b| a.id.cmp(&b.id));
        themes
    }

    /// Look up where a theme would be loaded from
    pub fn find(&self, id: &ThemeId) -> Option<ThemeListing> {
        self.list().into_iter().find(|t| &t.id == id)
    }

    /// Load theme by id with priority: user -> builtin
    pub fn load(&self, id: &ThemeId) -> Result<Theme, String> {
        let listing = self
            .find(id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;

        match listing.source {
            ThemeSource::User(path) => {
                tracing::info!("Loading user theme from {}", path.display());
                from_file(&path)
            }
            ThemeSource::Builtin => {
                tracing::info!("Loading builtin theme: {}", id);
                Theme::from_builtin(id.as_str())
            }
        }
    }
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Extract theme name from YAML file without full parsing
fn extract_theme_name(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(value) = trimmed.strip_prefix("name:") {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            return Some(value.to_string());
        }
    }
    None
}
