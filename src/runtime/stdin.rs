use std::io::BufRead;
use std::sync::mpsc::Sender;

use syntaxkit::messages::{AppMsg, Msg};

/// Forward stdin lines as `AppMsg::CommandLine` until EOF or the receiver
/// goes away
pub fn spawn_reader(tx: Sender<Msg>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    break;
                }
            };
            if tx.send(Msg::App(AppMsg::CommandLine(line))).is_err() {
                return;
            }
        }
        let _ = tx.send(Msg::App(AppMsg::InputClosed));
    });
}
