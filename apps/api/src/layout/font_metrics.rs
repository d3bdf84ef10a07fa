//! Approximate glyph metrics for the two resume type families.
//!
//! Widths are in em units (relative to font size) and grouped by glyph class
//! rather than tabulated per character. The approximation only has to be good
//! enough to decide where lines wrap and how tall a section is; exact glyph
//! shapes are the rasterizer's business.

use serde::{Deserialize, Serialize};

use crate::layout::tree::{TextStyle, Weight};

/// Type families used by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Humanist sans-serif; every template except Elegant.
    Sans,
    /// Book serif; Elegant template.
    Serif,
}

/// Glyph-class widths for one family, in em.
pub struct FontMetrics {
    pub family: FontFamily,
    pub space: f32,
    narrow: f32,
    semi_narrow: f32,
    lowercase: f32,
    wide_lowercase: f32,
    uppercase: f32,
    wide_uppercase: f32,
    digit: f32,
    /// Everything else, including non-ASCII.
    pub fallback: f32,
    /// Height of lowercase ink relative to font size.
    pub x_height: f32,
    /// Height of capital ink relative to font size.
    pub cap_height: f32,
}

static SANS: FontMetrics = FontMetrics {
    family: FontFamily::Sans,
    space: 0.26,
    narrow: 0.24,
    semi_narrow: 0.34,
    lowercase: 0.54,
    wide_lowercase: 0.82,
    uppercase: 0.66,
    wide_uppercase: 0.88,
    digit: 0.56,
    fallback: 0.58,
    x_height: 0.53,
    cap_height: 0.72,
};

static SERIF: FontMetrics = FontMetrics {
    family: FontFamily::Serif,
    space: 0.24,
    narrow: 0.26,
    semi_narrow: 0.33,
    lowercase: 0.48,
    wide_lowercase: 0.76,
    uppercase: 0.68,
    wide_uppercase: 0.9,
    digit: 0.5,
    fallback: 0.55,
    x_height: 0.45,
    cap_height: 0.66,
};

/// Returns the metric table for a family.
pub fn get_metrics(family: FontFamily) -> &'static FontMetrics {
    match family {
        FontFamily::Sans => &SANS,
        FontFamily::Serif => &SERIF,
    }
}

impl FontMetrics {
    /// Advance width of one glyph in em.
    pub fn glyph_em(&self, c: char) -> f32 {
        match c {
            ' ' => self.space,
            'i' | 'j' | 'l' | '!' | '.' | ',' | ':' | ';' | '\'' | '|' | '•' => self.narrow,
            'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '/' | '-' | '"' => self.semi_narrow,
            'm' | 'w' => self.wide_lowercase,
            'M' | 'W' | '@' | '%' | '&' | '–' => self.wide_uppercase,
            c if c.is_ascii_lowercase() => self.lowercase,
            c if c.is_ascii_uppercase() => self.uppercase,
            c if c.is_ascii_digit() => self.digit,
            _ => self.fallback,
        }
    }

    /// Ink height of one glyph relative to font size; zero for whitespace.
    pub fn ink_height(&self, c: char) -> f32 {
        if c.is_whitespace() {
            0.0
        } else if c.is_ascii_lowercase() {
            self.x_height
        } else if c.is_ascii_punctuation() {
            self.x_height * 0.4
        } else {
            self.cap_height
        }
    }
}

/// Text as it is painted: uppercased when the style asks for it.
pub fn display_text(text: &str, style: &TextStyle) -> String {
    if style.uppercase {
        text.to_uppercase()
    } else {
        text.to_string()
    }
}

fn weight_factor(weight: Weight) -> f32 {
    match weight {
        Weight::Regular => 1.0,
        Weight::Semibold => 1.04,
        Weight::Bold => 1.08,
    }
}

/// Width of `text` in pixels when set in `style`.
pub fn measure_px(text: &str, style: &TextStyle) -> f32 {
    let metrics = get_metrics(style.family);
    let em: f32 = text.chars().map(|c| metrics.glyph_em(c)).sum();
    em * style.size_px * weight_factor(style.weight)
}

/// Slack allowed when a line is compared against its box. Widths summed word
/// by word drift from the whole-string width by float rounding; text measured
/// to fit a box must still fit it.
pub const FIT_TOLERANCE_PX: f32 = 0.01;

/// Greedy word-wrap at `max_width_px`. Blank text yields no lines; a single
/// word wider than the line gets a line of its own.
pub fn wrap_lines(text: &str, style: &TextStyle, max_width_px: f32) -> Vec<String> {
    let shown = display_text(text, style);
    let space_w = measure_px(" ", style);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in shown.split_whitespace() {
        let word_w = measure_px(word, style);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_px + FIT_TOLERANCE_PX {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tree::Rgb;

    fn style(family: FontFamily) -> TextStyle {
        TextStyle::new(family, 12.0, Rgb::GRAY_900)
    }

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(measure_px("", &style(FontFamily::Sans)), 0.0);
    }

    #[test]
    fn test_measure_scales_with_size() {
        let small = style(FontFamily::Sans);
        let large = TextStyle::new(FontFamily::Sans, 24.0, Rgb::GRAY_900);
        let a = measure_px("Operations", &small);
        let b = measure_px("Operations", &large);
        assert!((b - 2.0 * a).abs() < 1e-3, "double size should double width");
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let regular = style(FontFamily::Sans);
        let bold = regular.weight(Weight::Bold);
        assert!(measure_px("Resume", &bold) > measure_px("Resume", &regular));
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let m = get_metrics(FontFamily::Sans);
        assert!((m.glyph_em('₹') - m.fallback).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = wrap_lines("Data cleaning", &style(FontFamily::Sans), 400.0);
        assert_eq!(lines, vec!["Data cleaning".to_string()]);
    }

    #[test]
    fn test_wrap_blank_text_has_no_lines() {
        assert!(wrap_lines("   ", &style(FontFamily::Sans), 400.0).is_empty());
    }

    #[test]
    fn test_wrap_long_text_breaks_between_words() {
        let text = "Automated courier status reconciliation; reduced RTO mismatch by 31% \
                    across three marketplaces and two courier partners";
        let lines = wrap_lines(text, &style(FontFamily::Sans), 200.0);
        assert!(lines.len() >= 3, "expected several lines, got {lines:?}");
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>().join(" "));
        for line in &lines[..lines.len() - 1] {
            assert!(measure_px(line, &style(FontFamily::Sans)) <= 200.0);
        }
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let lines = wrap_lines("a Supercalifragilistic b", &style(FontFamily::Sans), 40.0);
        assert_eq!(lines, vec!["a", "Supercalifragilistic", "b"]);
    }

    #[test]
    fn test_text_wrapped_at_its_own_width_stays_on_one_line() {
        let samples = [
            "Inventory & SKU Mapping",
            "+91 90000 00000",
            "Amazon / Flipkart Ops",
            "Operations & E-commerce Manager",
            "Jan 2022 – Present • Gurugram",
        ];
        for family in [FontFamily::Sans, FontFamily::Serif] {
            for weight in [Weight::Regular, Weight::Semibold, Weight::Bold] {
                let s = TextStyle::new(family, 12.2, Rgb::GRAY_900).weight(weight);
                for text in samples {
                    let w = measure_px(text, &s);
                    assert_eq!(wrap_lines(text, &s, w), vec![text.to_string()], "{family:?} {weight:?}");
                }
            }
        }
    }

    #[test]
    fn test_uppercase_style_wraps_uppercased_text() {
        let s = style(FontFamily::Sans).uppercase();
        assert_eq!(wrap_lines("summary", &s, 400.0), vec!["SUMMARY".to_string()]);
    }

    #[test]
    fn test_serif_narrower_than_sans_for_lowercase() {
        let text = "experience education skills";
        assert!(measure_px(text, &style(FontFamily::Serif)) < measure_px(text, &style(FontFamily::Sans)));
    }
}
