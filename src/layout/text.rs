use crate::text_metrics;

use super::{MetricsError, TextSize};

/// Measures the box a label occupies at a given font size.
///
/// Implementations must be pure from the caller's point of view: the same
/// text and size always yield the same box, otherwise layouts stop being
/// reproducible.
pub trait TextMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Result<TextSize, MetricsError>;
}

impl<F> TextMetrics for F
where
    F: Fn(&str, f32) -> Result<TextSize, MetricsError>,
{
    fn measure(&self, text: &str, font_size: f32) -> Result<TextSize, MetricsError> {
        self(text, font_size)
    }
}

/// Fixed advance per character. Independent of installed fonts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for HeuristicMetrics {
    fn default() -> Self {
        Self {
            char_width: 0.56,
            line_height: 1.2,
        }
    }
}

impl TextMetrics for HeuristicMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Result<TextSize, MetricsError> {
        check_font_size(text, font_size)?;
        let chars = text.chars().count() as f32;
        Ok(TextSize::new(
            chars * font_size * self.char_width,
            font_size * self.line_height,
        ))
    }
}

/// Measures advances from the system font database, falling back to a
/// per-character width table when no face matches the family.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    pub font_family: String,
    pub line_height: f32,
}

impl FontMetrics {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            line_height: 1.2,
        }
    }
}

impl TextMetrics for FontMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Result<TextSize, MetricsError> {
        check_font_size(text, font_size)?;
        let width = text_metrics::measure_text_width(text, font_size, &self.font_family)
            .unwrap_or_else(|| fallback_text_width(text, font_size));
        Ok(TextSize::new(width, font_size * self.line_height))
    }
}

fn check_font_size(text: &str, font_size: f32) -> Result<(), MetricsError> {
    if font_size.is_finite() && font_size > 0.0 {
        Ok(())
    } else {
        Err(MetricsError::new(text, font_size, "font size must be positive"))
    }
}

pub(crate) fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

pub(crate) fn char_width_factor(ch: char) -> f32 {
    // Em fractions for a typical sans-serif face at 16px.
    match ch {
        ' ' => 0.306,
        'i' | 'j' | 'l' | 'I' | '|' | '\'' => 0.25,
        '.' | ',' | ':' | ';' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.321,
        'f' | 'r' | 't' => 0.36,
        'm' | 'w' => 0.88,
        'M' | 'W' => 0.93,
        '@' | '#' | '%' | '&' => 0.946,
        '1' => 0.396,
        '0'..='9' => 0.605,
        'A'..='Z' => 0.67,
        'a'..='z' => 0.57,
        c if is_wide(c) => 1.0,
        _ => 0.568,
    }
}

fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60)
}
