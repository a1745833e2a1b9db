//! Inline run parser (C3): flattens an element's child nodes into a flat
//! list of styled text runs, handling bold/italic/underline/color/size
//! nesting and icon substitution.
//!
//! Operates over [`InlineNode`], a minimal tree any captured DOM subtree
//! can be projected into — [`crate::browser::snapshot::CapturedNode`]
//! implements the conversion. Keeping this generic over a plain tree (not
//! `CapturedNode` directly) is what lets these tests hand-build trees
//! without a browser, per design note §9.

use crate::core::units::{is_single_weight_font, text_transform, TextTransform};
use crate::model::Run;

/// One node of the subtree C3 walks: either a text node or an inline
/// element carrying its own computed style and children.
#[derive(Debug, Clone)]
pub enum InlineNode {
    Text(String),
    /// `<br>` — emits a literal newline in the flattened run stream.
    Break,
    Element {
        tag: String,
        class: String,
        font_weight: u32,
        font_style: String,
        text_decoration: String,
        text_transform: String,
        color: Option<String>,
        size_pt: Option<f64>,
        font_family: Option<String>,
        /// Computed width in CSS px; used by the icon heuristic for
        /// elements with empty textual content.
        width_px: f64,
        children: Vec<InlineNode>,
    },
}

#[derive(Debug, Clone, Copy, Default)]
struct InheritedStyle {
    bold: bool,
    italic: bool,
    underline: bool,
    transform: TextTransform,
}

fn is_icon_class(class: &str) -> bool {
    class.split_whitespace().any(|c| {
        c.starts_with("fa") || c == "icon" || c.starts_with("icon-") || c == "material-icons"
    })
}

/// True when `node` should be pulled out as a raster icon instead of
/// flattened into the run stream (spec.md §4.3): an `<i>`/`<span>` with an
/// icon-family class, or empty textual content with positive width.
fn is_icon(tag: &str, class: &str, children: &[InlineNode], width_px: f64) -> bool {
    if tag != "i" && tag != "span" {
        return false;
    }
    if is_icon_class(class) {
        return true;
    }
    let has_text = children.iter().any(|c| matches!(c, InlineNode::Text(t) if !t.trim().is_empty()));
    !has_text && width_px > 0.0
}

/// One detected icon, recorded by the caller into `rasterRequests` — the
/// run parser itself never writes to `SlideData`; it only reports where
/// icons were found so the walker (C4) can do so with full element context.
#[derive(Debug, Clone)]
pub struct DetectedIcon {
    pub tag: String,
    pub class: String,
}

/// Parse an element's children into a flat run list plus any icons found
/// along the way (spec.md §4.3). Trims leading whitespace off the first
/// run and trailing whitespace off the last; drops empty runs.
pub fn parse_runs(children: &[InlineNode]) -> (Vec<Run>, Vec<DetectedIcon>) {
    let mut runs = Vec::new();
    let mut icons = Vec::new();
    let base = InheritedStyle::default();
    for child in children {
        walk(child, base, &mut runs, &mut icons);
    }
    trim_ends(&mut runs);
    runs.retain(|r| !r.text.is_empty());
    (runs, icons)
}

fn walk(node: &InlineNode, inherited: InheritedStyle, runs: &mut Vec<Run>, icons: &mut Vec<DetectedIcon>) {
    match node {
        InlineNode::Text(text) => {
            let transformed = text_transform(text, inherited.transform);
            push_or_merge(runs, transformed, inherited);
        }
        InlineNode::Break => {
            push_or_merge(runs, "\n".to_string(), inherited);
        }
        InlineNode::Element { tag, class, font_weight, font_style, text_decoration, text_transform: tt, color, size_pt, font_family, width_px, children } => {
            if is_icon(tag, class, children, *width_px) {
                icons.push(DetectedIcon { tag: tag.clone(), class: class.clone() });
                return;
            }
            if !is_recognised_inline_tag(tag) {
                for child in children {
                    walk(child, inherited, runs, icons);
                }
                return;
            }
            let single_weight = font_family.as_deref().map(is_single_weight_font).unwrap_or(false);
            let bold = inherited.bold || (*font_weight >= 600 && !single_weight);
            let italic = inherited.italic || font_style.eq_ignore_ascii_case("italic");
            let underline = inherited.underline || text_decoration.contains("underline");
            let nested_transform = TextTransform::from_css(tt);
            let transform = inherited.transform.compose(nested_transform);
            let next = InheritedStyle { bold, italic, underline, transform };

            if children.is_empty() {
                return;
            }
            // Explicit color/size apply to this element's own text runs;
            // children still recurse with the (possibly overridden) toggle
            // state but their own explicit color/size, if any, wins locally.
            for child in children {
                match child {
                    InlineNode::Text(text) => {
                        let transformed = text_transform(text, transform);
                        let mut run = Run::plain(transformed);
                        run.bold = bold;
                        run.italic = italic;
                        run.underline = underline;
                        run.color = color.clone();
                        run.size_pt = *size_pt;
                        run.font = font_family.clone();
                        append_run(runs, run);
                    }
                    other => walk(other, next, runs, icons),
                }
            }
        }
    }
}

fn is_recognised_inline_tag(tag: &str) -> bool {
    matches!(tag, "span" | "b" | "strong" | "i" | "em" | "u" | "div" | "a")
}

fn push_or_merge(runs: &mut Vec<Run>, text: String, style: InheritedStyle) {
    if text.is_empty() {
        return;
    }
    let mut run = Run::plain(text);
    run.bold = style.bold;
    run.italic = style.italic;
    run.underline = style.underline;
    append_run(runs, run);
}

/// Concatenate with the previous run when style is identical (spec.md
/// §4.3: "adjacent text-runs at the same depth are concatenated").
fn append_run(runs: &mut Vec<Run>, run: Run) {
    if let Some(last) = runs.last_mut() {
        if same_style(last, &run) {
            last.text.push_str(&run.text);
            return;
        }
    }
    runs.push(run);
}

fn same_style(a: &Run, b: &Run) -> bool {
    a.bold == b.bold
        && a.italic == b.italic
        && a.underline == b.underline
        && a.color == b.color
        && a.size_pt == b.size_pt
        && a.font == b.font
}

fn trim_ends(runs: &mut [Run]) {
    if let Some(first) = runs.first_mut() {
        first.text = first.text.trim_start().to_string();
    }
    if let Some(last) = runs.last_mut() {
        last.text = last.text.trim_end().to_string();
    }
}

/// Strip a leading manual bullet glyph (`• - * ▪ ▸`, spec.md §4.4) from the
/// first run's text, returning whether one was found.
pub fn strip_manual_bullet(runs: &mut [Run]) -> bool {
    const GLYPHS: &[char] = &['•', '-', '*', '▪', '▸'];
    if let Some(first) = runs.first_mut() {
        let trimmed = first.text.trim_start();
        if let Some(c) = trimmed.chars().next() {
            if GLYPHS.contains(&c) {
                let rest = trimmed[c.len_utf8()..].trim_start();
                first.text = rest.to_string();
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineNode {
        InlineNode::Text(s.to_string())
    }

    fn bold_el(children: Vec<InlineNode>) -> InlineNode {
        InlineNode::Element {
            tag: "b".into(),
            class: String::new(),
            font_weight: 700,
            font_style: String::new(),
            text_decoration: String::new(),
            text_transform: String::new(),
            color: None,
            size_pt: None,
            font_family: None,
            width_px: 0.0,
            children,
        }
    }

    #[test]
    fn test_plain_text_run() {
        let (runs, icons) = parse_runs(&[text("hello")]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "hello");
        assert!(icons.is_empty());
    }

    #[test]
    fn test_bold_nesting() {
        let (runs, _) = parse_runs(&[text("a "), bold_el(vec![text("b")]), text(" c")]);
        assert_eq!(runs.len(), 3);
        assert!(!runs[0].bold);
        assert!(runs[1].bold);
        assert!(!runs[2].bold);
    }

    #[test]
    fn test_trims_leading_and_trailing_whitespace() {
        let (runs, _) = parse_runs(&[text("  hello world  ")]);
        assert_eq!(runs[0].text, "hello world");
    }

    #[test]
    fn test_icon_detected_by_class() {
        let icon = InlineNode::Element {
            tag: "i".into(),
            class: "fa fa-check".into(),
            font_weight: 400,
            font_style: String::new(),
            text_decoration: String::new(),
            text_transform: String::new(),
            color: None,
            size_pt: None,
            font_family: None,
            width_px: 16.0,
            children: vec![],
        };
        let (runs, icons) = parse_runs(&[icon, text(" done")]);
        assert_eq!(icons.len(), 1);
        assert_eq!(runs[0].text.trim(), "done");
    }

    #[test]
    fn test_single_weight_font_suppresses_bold() {
        let impact_bold = InlineNode::Element {
            tag: "b".into(),
            class: String::new(),
            font_weight: 700,
            font_style: String::new(),
            text_decoration: String::new(),
            text_transform: String::new(),
            color: None,
            size_pt: None,
            font_family: Some("Impact".into()),
            width_px: 0.0,
            children: vec![text("x")],
        };
        let (runs, _) = parse_runs(&[impact_bold]);
        assert!(!runs[0].bold);
    }

    #[test]
    fn test_adjacent_same_style_runs_merge() {
        let (runs, _) = parse_runs(&[text("a"), text("b")]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "ab");
    }

    #[test]
    fn test_strip_manual_bullet() {
        let mut runs = vec![Run::plain("• first item")];
        assert!(strip_manual_bullet(&mut runs));
        assert_eq!(runs[0].text, "first item");
    }

    #[test]
    fn test_no_manual_bullet_present() {
        let mut runs = vec![Run::plain("just text")];
        assert!(!strip_manual_bullet(&mut runs));
    }
}
