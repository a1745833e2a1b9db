//! Color and text-transform primitives (C1).
//!
//! Pure functions only — no DOM, no browser. Conversion constants mirror
//! `util::Length`: 96 px/inch, 0.75 pt/px, 914,400 EMU/inch.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// A parsed CSS color. `None` is the distinguished "no computed color"
/// marker spec.md §4.1 describes for `transparent` / `rgba(0,0,0,0)` when
/// read as a *text* color — it triggers gradient-text recovery in C4, as
/// opposed to a background color, where the same input is just white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Hex([u8; 3]),
    None,
}

impl Color {
    pub fn to_hex_string(&self) -> String {
        match self {
            Color::Hex([r, g, b]) => format!("{r:02X}{g:02X}{b:02X}"),
            Color::None => "000000".to_string(),
        }
    }

    pub fn white() -> Self {
        Color::Hex([0xFF, 0xFF, 0xFF])
    }

    pub fn black() -> Self {
        Color::Hex([0, 0, 0])
    }
}

lazy_static! {
    static ref RGB_RE: Regex =
        Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*([\d.]+)\s*)?\)").unwrap();
}

/// Parse `rgb(r,g,b)` / `rgba(r,g,b,a)` / `transparent` / `rgba(0,0,0,0)`.
///
/// `as_background` selects which of the two transparent forms applies:
/// backgrounds resolve transparency to white, text colors resolve it to the
/// `Color::None` marker (spec.md §4.1).
pub fn parse_css_color(value: &str, as_background: bool) -> Color {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("transparent") {
        return if as_background { Color::white() } else { Color::None };
    }
    if let Some(caps) = RGB_RE.captures(trimmed) {
        let r: u8 = caps[1].parse().unwrap_or(0);
        let g: u8 = caps[2].parse().unwrap_or(0);
        let b: u8 = caps[3].parse().unwrap_or(0);
        if let Some(a) = caps.get(4) {
            let alpha: f64 = a.as_str().parse().unwrap_or(1.0);
            if alpha == 0.0 {
                return if as_background { Color::white() } else { Color::None };
            }
        }
        return Color::Hex([r, g, b]);
    }
    if let Some(hex) = trimmed.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Hex([r, g, b]);
            }
        }
    }
    if as_background { Color::white() } else { Color::black() }
}

/// `round((1-a)*100)`, only when an explicit alpha channel was present in
/// the computed color string. Returns `None` for `rgb(...)` / hex colors
/// with no alpha channel at all (as distinct from alpha == 1.0).
pub fn extract_alpha(value: &str) -> Option<u8> {
    let caps = RGB_RE.captures(value.trim())?;
    let a: f64 = caps.get(4)?.as_str().parse().ok()?;
    Some(((1.0 - a) * 100.0).round().clamp(0.0, 100.0) as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    pub fn from_css(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "uppercase" => TextTransform::Uppercase,
            "lowercase" => TextTransform::Lowercase,
            "capitalize" => TextTransform::Capitalize,
            _ => TextTransform::None,
        }
    }

    /// Compose an ambient transform with a more deeply nested one; the
    /// nested value wins when it is not `None` (spec.md §4.3: "a nested
    /// text-transform on the element composes with any ambient transform").
    pub fn compose(self, nested: TextTransform) -> TextTransform {
        if nested == TextTransform::None { self } else { nested }
    }
}

pub fn text_transform(text: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => text.to_string(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
        TextTransform::Capitalize => {
            let mut out = String::with_capacity(text.len());
            let mut at_boundary = true;
            for c in text.chars() {
                if at_boundary && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
                at_boundary = c.is_whitespace();
            }
            out
        }
    }
}

lazy_static! {
    /// Fonts PPTX would otherwise request a non-existent bold face for.
    /// Currently just `impact`, per spec.md §4.1.
    static ref SINGLE_WEIGHT_FONTS: HashSet<&'static str> = ["impact"].into_iter().collect();
}

pub fn is_single_weight_font(font_family: &str) -> bool {
    let first = font_family.split(',').next().unwrap_or(font_family);
    let normalized = first.trim().trim_matches('"').trim_matches('\'').to_ascii_lowercase();
    SINGLE_WEIGHT_FONTS.contains(normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_css_color("rgb(18, 52, 86)", false), Color::Hex([18, 52, 86]));
    }

    #[test]
    fn test_parse_rgba_opaque() {
        assert_eq!(parse_css_color("rgba(255, 0, 0, 1)", false), Color::Hex([255, 0, 0]));
    }

    #[test]
    fn test_transparent_as_background_is_white() {
        assert_eq!(parse_css_color("transparent", true), Color::white());
        assert_eq!(parse_css_color("rgba(0, 0, 0, 0)", true), Color::white());
    }

    #[test]
    fn test_transparent_as_text_is_none_marker() {
        assert_eq!(parse_css_color("transparent", false), Color::None);
        assert_eq!(parse_css_color("rgba(0, 0, 0, 0)", false), Color::None);
    }

    #[test]
    fn test_extract_alpha_present() {
        assert_eq!(extract_alpha("rgba(0,0,0,0.25)"), Some(75));
    }

    #[test]
    fn test_extract_alpha_absent() {
        assert_eq!(extract_alpha("rgb(0,0,0)"), None);
    }

    #[test]
    fn test_text_transform_uppercase() {
        assert_eq!(text_transform("Hello World", TextTransform::Uppercase), "HELLO WORLD");
    }

    #[test]
    fn test_text_transform_capitalize() {
        assert_eq!(text_transform("hello world", TextTransform::Capitalize), "Hello World");
    }

    #[test]
    fn test_compose_transform_nested_wins() {
        let composed = TextTransform::Uppercase.compose(TextTransform::Lowercase);
        assert_eq!(composed, TextTransform::Lowercase);
    }

    #[test]
    fn test_single_weight_font() {
        assert!(is_single_weight_font("Impact, sans-serif"));
        assert!(!is_single_weight_font("Arial, sans-serif"));
    }

    #[test]
    fn test_color_to_hex_string() {
        assert_eq!(Color::Hex([12, 34, 56]).to_hex_string(), "0C2238");
    }
}
