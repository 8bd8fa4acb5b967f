//! Approximate font metrics and word wrapping.

/// Points per millimeter (PDF user space is 72 pt per inch).
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Trait for font metrics needed for layout.
pub trait FontMetrics {
    /// Calculate the width of text in points.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Simple font metrics using average character width.
///
/// Good enough for label layout with the Base-14 Helvetica faces; no glyph
/// tables are consulted.
#[derive(Debug, Clone, Copy)]
pub struct SimpleFontMetrics {
    /// Average character width as proportion of font size
    pub char_width_ratio: f32,
}

impl Default for SimpleFontMetrics {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.5, // Typical for proportional fonts
        }
    }
}

impl FontMetrics for SimpleFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.char_width_ratio
    }
}

/// Wrap text to fit within a given width in points.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, metrics: &dyn FontMetrics) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let test_line = if current_line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current_line, word)
        };

        let width = metrics.text_width(&test_line, font_size);

        if width <= max_width || current_line.is_empty() {
            current_line = test_line;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_scales_with_size() {
        let metrics = SimpleFontMetrics::default();
        assert_eq!(metrics.text_width("abcd", 10.0), 20.0);
        assert_eq!(metrics.text_width("abcd", 20.0), 40.0);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let metrics = SimpleFontMetrics::default();
        let lines = wrap_text("hello world", 1000.0, 10.0, &metrics);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_splits_on_words() {
        let metrics = SimpleFontMetrics::default();
        // Budget fits ~6 chars per line at size 10.
        let lines = wrap_text("alpha beta gamma", 30.0, 10.0, &metrics);
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_overlong_word_kept_whole() {
        let metrics = SimpleFontMetrics::default();
        let lines = wrap_text("incomprehensibilities", 10.0, 10.0, &metrics);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        let metrics = SimpleFontMetrics::default();
        assert_eq!(wrap_text("", 100.0, 10.0, &metrics), vec![String::new()]);
    }
}
