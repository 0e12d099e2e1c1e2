//! Colors for the bars drawn around the highlighted text
//!
//! The chrome follows the active theme: bars use the theme background, and
//! text on them uses its inverse so it stays readable on light and dark
//! themes alike.

use crate::theme::{Color, ThemeMetadata};

/// Alpha applied to the prompt tint (50%)
pub const PROMPT_ALPHA: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromePalette {
    /// Bar background (theme background)
    pub bar: Color,
    /// Labels and indicators (inverted theme background)
    pub tint: Color,
    /// Secondary text (tint at half opacity)
    pub prompt: Color,
}

impl ChromePalette {
    pub fn from_metadata(metadata: &ThemeMetadata) -> Self {
        let tint = metadata.background.inverted();
        Self {
            bar: metadata.background,
            tint,
            prompt: tint.with_alpha(PROMPT_ALPHA),
        }
    }

    /// Prompt color composited over the bar, for outputs without alpha
    pub fn prompt_on_bar(&self) -> Color {
        blend_over(self.prompt, self.bar)
    }
}

/// Composite `top` over an opaque `bottom`
pub fn blend_over(top: Color, bottom: Color) -> Color {
    let alpha = top.a as f64 / 255.0;
    let mix = |t: u8, b: u8| (t as f64 * alpha + b as f64 * (1.0 - alpha)).round() as u8;
    Color::rgb(mix(top.r, bottom.r), mix(top.g, bottom.g), mix(top.b, bottom.b))
}
