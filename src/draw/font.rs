//! Font styling for text shapes.

use serde::{Deserialize, Serialize};

/// Font configuration for text rendering.
///
/// Carries the family name plus the style flags the text tool exposes.
/// The style is stored on every committed text shape so that finalized
/// text keeps rendering the same way regardless of later tool changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontStyle {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    /// Reference installed system fonts by name
    pub family: String,

    /// Bold weight flag
    pub bold: bool,

    /// Italic style flag
    pub italic: bool,

    /// Underline flag. Pango does not carry this in the font description;
    /// the renderer draws the underline as a separate segment.
    pub underline: bool,
}

impl FontStyle {
    /// Creates a new font style with the specified parameters.
    pub fn new(family: impl Into<String>, bold: bool, italic: bool, underline: bool) -> Self {
        Self {
            family: family.into(),
            bold,
            italic,
            underline,
        }
    }

    /// Converts this style to a Pango font description string.
    ///
    /// Format: "Family [Italic] [Bold] Size"
    /// Example: "Sans Bold 32" or "Monospace Italic 24"
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if self.italic {
            parts.push("Italic".to_string());
        }
        if self.bold {
            parts.push("Bold".to_string());
        }

        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// Horizontal alignment of a text shape relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Anchor marks the left edge of the text (default)
    #[default]
    Left,
    /// Anchor marks the horizontal center of the text
    Center,
    /// Anchor marks the right edge of the text
    Right,
}

impl TextAlign {
    /// Horizontal offset of the draw origin for text of the given pixel width.
    pub fn offset(&self, text_width: f64) -> f64 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => -text_width / 2.0,
            TextAlign::Right => -text_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pango_string_plain() {
        let font = FontStyle::default();
        assert_eq!(font.to_pango_string(32.0), "Sans 32");
    }

    #[test]
    fn test_pango_string_bold_italic() {
        let font = FontStyle::new("Monospace", true, true, false);
        assert_eq!(font.to_pango_string(24.0), "Monospace Italic Bold 24");
    }

    #[test]
    fn test_pango_string_underline_not_in_description() {
        let font = FontStyle::new("JetBrains Mono", false, false, true);
        assert_eq!(font.to_pango_string(16.0), "JetBrains Mono 16");
    }

    #[test]
    fn test_align_offsets() {
        assert_eq!(TextAlign::Left.offset(80.0), 0.0);
        assert_eq!(TextAlign::Center.offset(80.0), -40.0);
        assert_eq!(TextAlign::Right.offset(80.0), -80.0);
    }
}
