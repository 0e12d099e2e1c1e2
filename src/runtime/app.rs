use std::io::Write;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;

use syntaxkit::benchmark::CancelToken;
use syntaxkit::commands::Cmd;
use syntaxkit::messages::{AppMsg, Msg};
use syntaxkit::model::ViewerModel;
use syntaxkit::update::update;
use syntaxkit::view::render;

/// Owns the model and executes the commands `update` returns
///
/// The main thread is the only one touching the model. Workers (file loads,
/// latency measurements, the stdin reader) report back through `msg_tx`.
pub struct App<W: Write> {
    model: ViewerModel,
    out: W,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Cancel handle of the measurement in flight
    latency: Option<CancelToken>,
    /// Leave `run` once no measurement is pending
    quit_when_idle: bool,
    should_quit: bool,
}

impl<W: Write> App<W> {
    pub fn new(model: ViewerModel, out: W) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            out,
            msg_tx,
            msg_rx,
            latency: None,
            quit_when_idle: false,
            should_quit: false,
        }
    }

    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    pub fn model(&self) -> &ViewerModel {
        &self.model
    }

    /// Make `run` return as soon as no measurement is running
    pub fn quit_when_idle(&mut self) {
        self.quit_when_idle = true;
    }

    /// Run one message through `update` and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) -> Result<()> {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd)?;
        }
        Ok(())
    }

    /// Process async messages until quit
    pub fn run(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.quit_when_idle && !self.model.benchmark_running {
                break;
            }
            // Never disconnected: `self.msg_tx` keeps the channel open
            let Ok(msg) = self.msg_rx.recv() else {
                break;
            };
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn process_cmd(&mut self, cmd: Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => render(&mut self.out, &self.model)?,
            Cmd::MeasureLatency {
                text,
                language,
                iterations,
            } => {
                let tx = self.msg_tx.clone();
                let token = self.model.buffer.measure_highlight_latency_with(
                    text,
                    language,
                    iterations,
                    move |result| {
                        let _ = tx.send(Msg::App(AppMsg::BenchmarkCompleted(result)));
                    },
                );
                self.latency = Some(token);
            }
            Cmd::CancelLatency => {
                if let Some(token) = self.latency.take() {
                    token.cancel();
                }
            }
            Cmd::LoadFile { path } => {
                let tx = self.msg_tx.clone();
                std::thread::spawn(move || {
                    let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                    let _ = tx.send(Msg::App(AppMsg::FileLoaded { path, result }));
                });
            }
            Cmd::Print(text) => {
                write!(self.out, "{}", text)?;
                if !text.ends_with('\n') {
                    writeln!(self.out)?;
                }
                self.out.flush()?;
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd)?;
                }
            }
            Cmd::Quit => {
                if let Some(token) = self.latency.take() {
                    token.cancel();
                }
                self.should_quit = true;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use syntaxkit::buffer::HighlightedBuffer;
    use syntaxkit::engine::TreeSitterEngine;
    use syntaxkit::messages::ViewerMsg;
    use syntaxkit::theme::ThemeCatalog;

    use super::*;

    fn app() -> App<Vec<u8>> {
        let engine = Arc::new(TreeSitterEngine::with_catalog(ThemeCatalog::with_user_dir(
            None,
        )));
        let mut buffer = HighlightedBuffer::new(engine, "rust", "github").unwrap();
        buffer.set_text("fn main() {}\n").unwrap();
        App::new(ViewerModel::new(buffer, 3), Vec::new())
    }

    #[test]
    fn test_benchmark_round_trip_through_worker() {
        let mut app = app();
        app.dispatch(ViewerMsg::RunBenchmark(Some(4)).into()).unwrap();
        assert!(app.model().benchmark_running);

        app.quit_when_idle();
        app.run().unwrap();

        assert!(!app.model().benchmark_running);
        let report = app.model().last_benchmark.clone().unwrap().unwrap();
        assert_eq!(report.iterations, 4);
        let out = String::from_utf8_lossy(&app.out);
        assert!(out.contains("This code was highlighted 4 times."));
    }

    #[test]
    fn test_load_file_through_worker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.py");
        std::fs::write(&path, "print('hi')\n").unwrap();

        let mut app = app();
        app.dispatch(ViewerMsg::LoadFile(path.clone()).into()).unwrap();
        app.dispatch(AppMsg::Quit.into()).unwrap();

        // The quit above only flags; the loaded message is still queued
        let msg = app.msg_rx.recv().unwrap();
        app.dispatch(msg).unwrap();
        assert_eq!(app.model().buffer.text(), "print('hi')\n");
        assert_eq!(app.model().buffer.language().as_str(), "python");
        assert_eq!(app.model().source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_print_appends_newline() {
        let mut app = app();
        app.dispatch(AppMsg::CommandLine(":langs".into()).into()).unwrap();
        let out = String::from_utf8_lossy(&app.out);
        assert!(out.starts_with("Languages:\n"));
        assert!(out.contains("* rust"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_quit_stops_run() {
        let mut app = app();
        app.sender().send(AppMsg::Quit.into()).unwrap();
        app.run().unwrap();
        assert!(app.should_quit);
    }
}
