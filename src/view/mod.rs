//! Terminal rendering of the viewer model
//!
//! Writes a header bar, the styled text and a footer as ANSI truecolor
//! sequences. Rendering only reads the model.

pub mod geometry;

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::model::ViewerModel;
use crate::syntax::StyledRun;
use crate::theme::{Color, RunStyle};

use geometry::{advance_col, expand_tabs_from};

const BENCHMARK_RUNNING: &str = "Running performance test...";

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Render the whole viewer: header, text, footer
pub fn render<W: Write>(out: &mut W, model: &ViewerModel) -> io::Result<()> {
    render_header(out, model)?;
    render_text(out, model.buffer.text(), model.buffer.styled_runs(), model)?;
    render_footer(out, model)?;
    out.flush()
}

fn render_header<W: Write>(out: &mut W, model: &ViewerModel) -> io::Result<()> {
    let chrome = &model.chrome;
    queue!(
        out,
        SetBackgroundColor(term_color(chrome.bar)),
        SetForegroundColor(term_color(chrome.tint)),
        SetAttribute(Attribute::Bold),
        Print(format!(" {} ", model.language_label)),
        SetAttribute(Attribute::NormalIntensity),
        SetForegroundColor(term_color(chrome.prompt_on_bar())),
        Print("| "),
        SetForegroundColor(term_color(chrome.tint)),
        Print(&model.theme_label),
    )?;
    if let Some(path) = &model.source {
        queue!(
            out,
            SetForegroundColor(term_color(chrome.prompt_on_bar())),
            Print(format!("  {}", path.display())),
        )?;
    }
    end_line(out)
}

/// Write styled runs over `text`, one terminal line per text line
fn render_text<W: Write>(
    out: &mut W,
    text: &str,
    runs: &[StyledRun],
    model: &ViewerModel,
) -> io::Result<()> {
    let metadata = model.buffer.theme_metadata();
    // Run ranges are char offsets
    let byte_at: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut col = 0;
    for run in runs {
        let (Some(&start), Some(&end)) = (byte_at.get(run.range.start), byte_at.get(run.range.end))
        else {
            break;
        };
        apply_style(out, &run.style, metadata.background)?;

        let mut lines = text[start..end].split('\n').peekable();
        while let Some(line) = lines.next() {
            queue!(out, Print(expand_tabs_from(line, col)))?;
            col = advance_col(line, col);
            if lines.peek().is_some() {
                // Fill the rest of the row with the theme background
                queue!(out, SetBackgroundColor(term_color(metadata.background)))?;
                end_line(out)?;
                apply_style(out, &run.style, metadata.background)?;
                col = 0;
            }
        }
    }

    if !text.is_empty() && !text.ends_with('\n') {
        queue!(out, SetBackgroundColor(term_color(metadata.background)))?;
        end_line(out)?;
    }
    Ok(())
}

fn render_footer<W: Write>(out: &mut W, model: &ViewerModel) -> io::Result<()> {
    let chrome = &model.chrome;
    let mut lines: Vec<(Color, String)> = Vec::new();

    if model.benchmark_running {
        lines.push((chrome.tint, BENCHMARK_RUNNING.to_string()));
    } else {
        match &model.last_benchmark {
            Some(Ok(report)) => {
                lines.extend(report.to_string().lines().map(|l| (chrome.tint, l.to_string())))
            }
            Some(Err(e)) => lines.push((chrome.tint, format!("Performance test failed: {}", e))),
            None => {}
        }
    }
    if let Some(status) = &model.status {
        lines.push((chrome.prompt_on_bar(), status.clone()));
    }

    for (color, line) in lines {
        queue!(
            out,
            SetBackgroundColor(term_color(chrome.bar)),
            SetForegroundColor(term_color(color)),
            Print(format!(" {}", line)),
        )?;
        end_line(out)?;
    }
    Ok(())
}

fn apply_style<W: Write>(out: &mut W, style: &RunStyle, background: Color) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(term_color(style.background.unwrap_or(background))),
        SetForegroundColor(term_color(style.foreground)),
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    Ok(())
}

/// Paint the current background to the end of the row, then break the line
fn end_line<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::UntilNewLine), ResetColor, Print("\n"))
}
