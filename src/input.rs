//! Interactive command parsing
//!
//! Lines read from stdin map to messages:
//!
//! | Command          | Message                      |
//! |------------------|------------------------------|
//! | `:lang <id>`     | `ViewerMsg::PickLanguage`    |
//! | `:theme <id>`    | `ViewerMsg::PickTheme`       |
//! | `:load <path>`   | `ViewerMsg::LoadFile`        |
//! | `:bench [n]`     | `ViewerMsg::RunBenchmark`    |
//! | `:cancel`        | `ViewerMsg::CancelBenchmark` |
//! | `:show`          | `ViewerMsg::Show`            |
//! | `:langs`         | `ViewerMsg::ListLanguages`   |
//! | `:themes`        | `ViewerMsg::ListThemes`      |
//! | `:quit`, `:q`    | `AppMsg::Quit`               |
//!
//! Blank lines are ignored.

use std::path::PathBuf;

use crate::messages::{AppMsg, Msg, ViewerMsg};
use crate::syntax::LanguageId;
use crate::theme::ThemeId;

pub const HELP: &str = "\
Commands:
  :lang <id>     switch language (loads its sample)
  :theme <id>    switch theme
  :load <path>   show a file
  :bench [n]     measure highlight latency
  :cancel        stop a running measurement
  :show          render again
  :langs         list languages
  :themes        list themes
  :quit          exit";

/// Parse one input line into a message
///
/// Returns `Ok(None)` for blank lines and `Err` with a user-facing message
/// for anything unrecognized.
pub fn parse_command(line: &str) -> Result<Option<Msg>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Err(format!("Commands start with ':'\n{}", HELP));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    let msg: Msg = match name {
        "lang" | "language" => {
            ViewerMsg::PickLanguage(LanguageId::new(required(name, arg)?)).into()
        }
        "theme" => ViewerMsg::PickTheme(ThemeId::new(required(name, arg)?)).into(),
        "load" | "open" => ViewerMsg::LoadFile(PathBuf::from(required(name, arg)?)).into(),
        "bench" | "benchmark" => {
            let iterations = if arg.is_empty() {
                None
            } else {
                Some(
                    arg.parse::<u32>()
                        .map_err(|_| format!("Invalid iteration count: {}", arg))?,
                )
            };
            ViewerMsg::RunBenchmark(iterations).into()
        }
        "cancel" => ViewerMsg::CancelBenchmark.into(),
        "show" => ViewerMsg::Show.into(),
        "langs" | "languages" => ViewerMsg::ListLanguages.into(),
        "themes" => ViewerMsg::ListThemes.into(),
        "quit" | "q" => AppMsg::Quit.into(),
        "help" | "h" => return Err(HELP.to_string()),
        _ => return Err(format!("Unknown command ':{}'\n{}", name, HELP)),
    };
    Ok(Some(msg))
}

fn required<'a>(name: &str, arg: &'a str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!(":{} needs an argument", name))
    } else {
        Ok(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_ignored() {
        assert!(parse_command("   ").unwrap().is_none());
    }

    #[test]
    fn test_lang_command() {
        let msg = parse_command(":lang Python").unwrap().unwrap();
        assert!(matches!(
            msg,
            Msg::Viewer(ViewerMsg::PickLanguage(ref id)) if id.as_str() == "python"
        ));
    }

    #[test]
    fn test_theme_needs_argument() {
        assert!(parse_command(":theme").is_err());
    }

    #[test]
    fn test_bench_with_and_without_count() {
        assert!(matches!(
            parse_command(":bench").unwrap(),
            Some(Msg::Viewer(ViewerMsg::RunBenchmark(None)))
        ));
        assert!(matches!(
            parse_command(":bench 25").unwrap(),
            Some(Msg::Viewer(ViewerMsg::RunBenchmark(Some(25))))
        ));
        assert!(parse_command(":bench many").is_err());
    }

    #[test]
    fn test_load_keeps_spaces_in_path() {
        let msg = parse_command(":load my file.rs").unwrap().unwrap();
        assert!(matches!(
            msg,
            Msg::Viewer(ViewerMsg::LoadFile(ref p)) if p == &PathBuf::from("my file.rs")
        ));
    }

    #[test]
    fn test_quit_aliases() {
        for line in [":quit", ":q"] {
            assert!(matches!(
                parse_command(line).unwrap(),
                Some(Msg::App(AppMsg::Quit))
            ));
        }
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command(":frobnicate").unwrap_err();
        assert!(err.starts_with("Unknown command ':frobnicate'"));
        assert!(parse_command("lang rust").is_err());
    }
}
