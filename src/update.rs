//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

use std::fmt::Write as _;

use crate::commands::Cmd;
use crate::engine::HighlightEngine;
use crate::input::parse_command;
use crate::messages::{AppMsg, Msg, ViewerMsg};
use crate::model::ViewerModel;
use crate::samples::load_sample;
use crate::syntax::LanguageId;
use crate::theme::ThemeId;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut ViewerModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Viewer(m) => update_viewer(model, m),
        Msg::App(m) => update_app(model, m),
    };

    // Labels and chrome follow the buffer's change events
    model.apply_buffer_events();

    result
}

/// Handle viewer messages (selections and requests)
pub fn update_viewer(model: &mut ViewerModel, msg: ViewerMsg) -> Option<Cmd> {
    match msg {
        ViewerMsg::PickLanguage(language) => {
            let sample = load_sample(&language);
            let sample_loaded = sample.is_some();
            let switched = match sample {
                Some(sample) => model.buffer.set_content(sample, language.clone()),
                None => model.buffer.set_language(language.clone()),
            };
            if let Err(e) = switched {
                model.set_status(format!("Failed to switch language: {}", e));
                return Some(Cmd::Redraw);
            }
            if sample_loaded {
                model.source = None;
            }
            model.status = if model.buffer.is_language_supported() {
                None
            } else {
                Some(format!(
                    "No grammar for {}, showing plain text",
                    language.display_name()
                ))
            };
            Some(Cmd::Redraw)
        }

        ViewerMsg::PickTheme(theme) => {
            match model.buffer.set_theme(theme) {
                Ok(()) => model.status = None,
                Err(e) => model.set_status(e.to_string()),
            }
            Some(Cmd::Redraw)
        }

        ViewerMsg::SetText(text) => {
            match model.buffer.set_text(text) {
                Ok(()) => model.source = None,
                Err(e) => model.set_status(e.to_string()),
            }
            Some(Cmd::Redraw)
        }

        ViewerMsg::LoadFile(path) => {
            model.set_status(format!("Loading {}...", path.display()));
            Some(Cmd::LoadFile { path })
        }

        ViewerMsg::RunBenchmark(iterations) => {
            if model.benchmark_running {
                model.set_status("A performance test is already running");
                return Some(Cmd::Redraw);
            }
            let iterations = iterations.unwrap_or(model.benchmark_iterations);
            model.benchmark_running = true;
            model.status = None;
            tracing::debug!("Starting performance test with {} iterations", iterations);
            Some(Cmd::batch(vec![
                Cmd::Redraw,
                Cmd::MeasureLatency {
                    text: model.buffer.text().to_string(),
                    language: model.buffer.language().clone(),
                    iterations,
                },
            ]))
        }

        ViewerMsg::CancelBenchmark => {
            if model.benchmark_running {
                Some(Cmd::CancelLatency)
            } else {
                model.set_status("No performance test is running");
                Some(Cmd::Redraw)
            }
        }

        ViewerMsg::Show => Some(Cmd::Redraw),

        ViewerMsg::ListLanguages => Some(Cmd::Print(language_listing(
            model.buffer.engine().as_ref(),
            Some(model.buffer.language()),
        ))),

        ViewerMsg::ListThemes => Some(Cmd::Print(theme_listing(
            model.buffer.engine().as_ref(),
            Some(model.buffer.theme()),
        ))),
    }
}

/// Handle app messages (input lines, async results, lifecycle)
pub fn update_app(model: &mut ViewerModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::CommandLine(line) => match parse_command(&line) {
            Ok(Some(msg)) => update(model, msg),
            Ok(None) => None,
            Err(usage) => Some(Cmd::Print(usage)),
        },

        AppMsg::InputClosed => {
            tracing::debug!("Input closed");
            Some(Cmd::Quit)
        }

        AppMsg::FileLoaded { path, result } => {
            match result {
                Ok(text) => {
                    let loaded = match LanguageId::from_path(&path) {
                        Some(language) => model.buffer.set_content(text, language),
                        None => model.buffer.set_text(text),
                    };
                    match loaded {
                        Ok(()) => {
                            model.set_status(format!("Loaded: {}", path.display()));
                            model.source = Some(path);
                        }
                        Err(e) => model.set_status(e.to_string()),
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", path.display(), e);
                    model.set_status(format!("Error loading {}: {}", path.display(), e));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::BenchmarkCompleted(result) => {
            model.benchmark_running = false;
            if let Err(e) = &result {
                tracing::warn!("Performance test failed: {}", e);
            }
            model.last_benchmark = Some(result);
            Some(Cmd::Redraw)
        }

        AppMsg::Quit => Some(Cmd::Quit),
    }
}

/// Supported languages, one per line, `*` marking `current`
pub fn language_listing(engine: &dyn HighlightEngine, current: Option<&LanguageId>) -> String {
    let mut out = String::from("Languages:\n");
    for language in engine.supported_languages() {
        let marker = if Some(&language) == current { '*' } else { ' ' };
        let _ = writeln!(out, "{} {:<10} {}", marker, language, language.display_name());
    }
    out
}

/// Available themes, one per line, `*` marking `current`
pub fn theme_listing(engine: &dyn HighlightEngine, current: Option<&ThemeId>) -> String {
    let mut out = String::from("Themes:\n");
    for theme in engine.supported_themes() {
        let marker = if Some(&theme) == current { '*' } else { ' ' };
        let _ = writeln!(out, "{} {:<22} {}", marker, theme, theme.title());
    }
    out
}
