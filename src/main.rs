use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use syntaxkit::buffer::HighlightedBuffer;
use syntaxkit::cli::{CliArgs, StartupMode};
use syntaxkit::config::ViewerConfig;
use syntaxkit::engine::TreeSitterEngine;
use syntaxkit::messages::ViewerMsg;
use syntaxkit::model::ViewerModel;
use syntaxkit::samples::load_sample;
use syntaxkit::update::{language_listing, theme_listing};

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    syntaxkit::logging::init();

    let config = ViewerConfig::load();
    let startup = args.into_config(&config).map_err(anyhow::Error::msg)?;
    tracing::debug!("Startup: {:?}", startup);

    let engine = Arc::new(TreeSitterEngine::new());

    match startup.mode {
        StartupMode::ListLanguages => {
            print!("{}", language_listing(engine.as_ref(), Some(&startup.language)));
            return Ok(());
        }
        StartupMode::ListThemes => {
            print!("{}", theme_listing(engine.as_ref(), Some(&startup.theme)));
            return Ok(());
        }
        _ => {}
    }

    let mut buffer =
        HighlightedBuffer::new(engine, startup.language.clone(), startup.theme.clone())
            .with_context(|| format!("Cannot start with theme '{}'", startup.theme))?;

    let text = match &startup.path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => load_sample(&startup.language).unwrap_or_default(),
    };
    buffer.set_text(text)?;

    let mut model = ViewerModel::new(buffer, startup.benchmark_iterations);
    model.source = startup.path.clone();
    if !model.buffer.is_language_supported() {
        model.set_status(format!(
            "No grammar for {}, showing plain text",
            model.language_label
        ));
    }

    let mut app = App::new(model, io::stdout());
    app.dispatch(ViewerMsg::Show.into())?;

    match startup.mode {
        StartupMode::Benchmark(iterations) => {
            app.dispatch(ViewerMsg::RunBenchmark(Some(iterations)).into())?;
            app.quit_when_idle();
            app.run()?;
            // Surface a failed measurement through the exit status
            if let Some(Err(e)) = &app.model().last_benchmark {
                return Err(e.clone().into());
            }
        }
        StartupMode::Interactive => {
            runtime::stdin::spawn_reader(app.sender());
            app.run()?;
            save_selection(&config, app.model());
        }
        _ => {}
    }

    Ok(())
}

/// Persist the language and theme picked during an interactive session
fn save_selection(config: &ViewerConfig, model: &ViewerModel) {
    let updated = ViewerConfig {
        theme: model.buffer.theme().to_string(),
        language: model.buffer.language().to_string(),
        ..config.clone()
    };
    if &updated == config {
        return;
    }
    if let Err(e) = updated.save() {
        tracing::warn!("Failed to save config: {}", e);
    }
}
