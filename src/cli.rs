//! Command-line argument parsing for the viewer
//!
//! Supports:
//! - Showing a file or the bundled sample for a language
//! - Overriding the configured language and theme
//! - Running a latency benchmark
//! - Listing languages and themes
//! - An interactive command loop

use clap::Parser;
use std::path::PathBuf;

use crate::config::ViewerConfig;
use crate::syntax::LanguageId;
use crate::theme::ThemeId;

/// Syntax-highlighted code viewer
#[derive(Parser, Debug)]
#[command(name = "syntaxkit", version, about = "Syntax-highlighted code viewer")]
pub struct CliArgs {
    /// File to show (defaults to the bundled sample for the language)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Language id (inferred from the file extension when omitted)
    #[arg(short = 'l', long, value_name = "ID")]
    pub language: Option<String>,

    /// Theme id
    #[arg(short = 't', long, value_name = "ID")]
    pub theme: Option<String>,

    /// Highlight the text N times on a worker and report the latency
    #[arg(short = 'b', long, value_name = "N")]
    pub benchmark: Option<u32>,

    /// Print supported language ids and exit
    #[arg(long)]
    pub list_languages: bool,

    /// Print available theme ids and exit
    #[arg(long)]
    pub list_themes: bool,

    /// Read `:` commands from stdin after the first render
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

/// What the viewer does after startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Render once and exit
    Show,
    /// Render, then measure latency with N iterations
    Benchmark(u32),
    ListLanguages,
    ListThemes,
    /// Render, then process commands until `:quit` or EOF
    Interactive,
}

/// Configuration derived from CLI arguments and the persisted config
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    /// File to load instead of the bundled sample
    pub path: Option<PathBuf>,
    pub language: LanguageId,
    pub theme: ThemeId,
    /// Iterations used by `:bench` without an argument
    pub benchmark_iterations: u32,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration, filling gaps from
    /// the persisted config
    pub fn into_config(self, defaults: &ViewerConfig) -> Result<StartupConfig, String> {
        let modes = [
            self.benchmark.is_some(),
            self.list_languages,
            self.list_themes,
            self.interactive,
        ];
        if modes.iter().filter(|m| **m).count() > 1 {
            return Err(
                "--benchmark, --list-languages, --list-themes and --interactive are exclusive"
                    .to_string(),
            );
        }

        let mode = if let Some(n) = self.benchmark {
            StartupMode::Benchmark(n)
        } else if self.list_languages {
            StartupMode::ListLanguages
        } else if self.list_themes {
            StartupMode::ListThemes
        } else if self.interactive {
            StartupMode::Interactive
        } else {
            StartupMode::Show
        };

        let language = match (&self.language, &self.path) {
            (Some(id), _) => LanguageId::new(id),
            (None, Some(path)) => LanguageId::from_path(path)
                .unwrap_or_else(|| LanguageId::new(&defaults.language)),
            (None, None) => LanguageId::new(&defaults.language),
        };

        let theme = ThemeId::new(self.theme.as_deref().unwrap_or(&defaults.theme));

        Ok(StartupConfig {
            mode,
            path: self.path,
            language,
            theme,
            benchmark_iterations: self.benchmark.unwrap_or(defaults.benchmark_iterations),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            path: None,
            language: None,
            theme: None,
            benchmark: None,
            list_languages: false,
            list_themes: false,
            interactive: false,
        }
    }

    #[test]
    fn test_empty_args_use_config_defaults() {
        let config = args().into_config(&ViewerConfig::default()).unwrap();
        assert_eq!(config.mode, StartupMode::Show);
        assert_eq!(config.language.as_str(), "swift");
        assert_eq!(config.theme.as_str(), "pojoaque");
        assert_eq!(config.benchmark_iterations, 100);
        assert!(config.path.is_none());
    }

    #[test]
    fn test_language_inferred_from_extension() {
        let config = CliArgs {
            path: Some(PathBuf::from("src/main.rs")),
            ..args()
        }
        .into_config(&ViewerConfig::default())
        .unwrap();
        assert_eq!(config.language.as_str(), "rust");
    }

    #[test]
    fn test_explicit_language_wins_over_extension() {
        let config = CliArgs {
            path: Some(PathBuf::from("script.py")),
            language: Some("Bash".to_string()),
            ..args()
        }
        .into_config(&ViewerConfig::default())
        .unwrap();
        assert_eq!(config.language.as_str(), "bash");
    }

    #[test]
    fn test_benchmark_mode_sets_iterations() {
        let config = CliArgs {
            benchmark: Some(25),
            ..args()
        }
        .into_config(&ViewerConfig::default())
        .unwrap();
        assert_eq!(config.mode, StartupMode::Benchmark(25));
        assert_eq!(config.benchmark_iterations, 25);
    }

    #[test]
    fn test_theme_override() {
        let config = CliArgs {
            theme: Some("GitHub".to_string()),
            ..args()
        }
        .into_config(&ViewerConfig::default())
        .unwrap();
        assert_eq!(config.theme.as_str(), "github");
    }

    #[test]
    fn test_exclusive_modes_rejected() {
        let result = CliArgs {
            list_themes: true,
            interactive: true,
            ..args()
        }
        .into_config(&ViewerConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_clap_parses_flags() {
        let args = CliArgs::try_parse_from([
            "syntaxkit",
            "--language",
            "go",
            "--theme",
            "github",
            "-b",
            "10",
            "main.go",
        ])
        .unwrap();
        assert_eq!(args.language.as_deref(), Some("go"));
        assert_eq!(args.benchmark, Some(10));
        assert_eq!(args.path, Some(PathBuf::from("main.go")));
    }
}
