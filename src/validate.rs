//! Validator (C7): dimensional sanity checks against the declared slide
//! layout, plus the final refuse-or-emit gate spec.md §4.7/§7 describe.
//!
//! The walker (C4) already accumulates the *fatal* diagnostics directly
//! into `SlideData::errors` as it walks (structural prohibitions, body
//! gradients, zero-area placeholders) — this module adds the two
//! dimensional *warnings* that need measurements the walker itself never
//! takes (declared layout size, scroll overflow), plus the post-walk
//! near-bottom-text warning, and decides whether the accumulated errors
//! are fatal enough to refuse emitting the slide.

use crate::exc::{PptxError, Result};
use crate::model::{Element, SlideData};
use tracing::warn;

const OVERFLOW_TOLERANCE_PT: f64 = 1.0;
const DIMENSION_TOLERANCE_IN: f64 = 0.1;
const NEAR_BOTTOM_TOLERANCE_IN: f64 = 0.5;
const NEAR_BOTTOM_FONT_PT: f64 = 12.0;

/// Pre-walk checks (spec.md §4.7): warn if body scroll size overflows its
/// computed size by more than 1pt, and warn if the body's measured
/// dimensions disagree with the declared presentation layout by more than
/// 0.1in. Neither is fatal.
pub fn validate_pre_walk(
    html_path: &str,
    body_w_px: f64,
    body_h_px: f64,
    scroll_w_px: f64,
    scroll_h_px: f64,
    declared_w_in: f64,
    declared_h_in: f64,
) {
    let overflow_w_pt = crate::util::px((scroll_w_px - body_w_px).abs()).pt();
    let overflow_h_pt = crate::util::px((scroll_h_px - body_h_px).abs()).pt();
    if overflow_w_pt > OVERFLOW_TOLERANCE_PT || overflow_h_pt > OVERFLOW_TOLERANCE_PT {
        warn!(html_path, overflow_w_pt, overflow_h_pt, "body scroll size overflows its computed size by more than 1pt");
    }

    let body_w_in = crate::util::px(body_w_px).inches();
    let body_h_in = crate::util::px(body_h_px).inches();
    if (body_w_in - declared_w_in).abs() > DIMENSION_TOLERANCE_IN
        || (body_h_in - declared_h_in).abs() > DIMENSION_TOLERANCE_IN
    {
        warn!(
            html_path,
            body_w_in, body_h_in, declared_w_in, declared_h_in,
            "body dimensions disagree with the declared presentation layout by more than 0.1in"
        );
    }
}

/// Post-walk check (spec.md §4.7, §4.4): warn on text whose font size
/// exceeds 12pt and whose bottom edge sits within 0.5in of the slide
/// bottom — a likely overflow, never fatal.
pub fn validate_post_walk(html_path: &str, slide: &SlideData, slide_h_in: f64) {
    for element in &slide.elements {
        if let Element::Text { position, style, .. } = element {
            if style.size_pt > NEAR_BOTTOM_FONT_PT && (slide_h_in - position.bottom()) < NEAR_BOTTOM_TOLERANCE_IN {
                warn!(
                    html_path,
                    size_pt = style.size_pt,
                    bottom_in = position.bottom(),
                    "large text near the slide bottom, likely overflow"
                );
            }
        }
    }
}

/// Refuse to emit the slide if any fatal error was accumulated during the
/// walk (spec.md §7: "the slide is not emitted unless the accumulator is
/// empty"). The combined message prepends `html_path` exactly once,
/// per spec.md §6's failure-exit contract.
pub fn check_fatal(html_path: &str, slide: &SlideData) -> Result<()> {
    if slide.errors.is_empty() {
        return Ok(());
    }
    Err(PptxError::Validation(format!("{html_path}: {}", slide.errors.join("; "))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Align, Position, TextStyle};

    #[test]
    fn test_check_fatal_passes_when_no_errors() {
        let slide = SlideData::new();
        assert!(check_fatal("a.html", &slide).is_ok());
    }

    #[test]
    fn test_check_fatal_prepends_path_once() {
        let mut slide = SlideData::new();
        slide.errors.push("body background-image is a CSS gradient".to_string());
        let err = check_fatal("a.html", &slide).unwrap_err();
        let msg = err.to_string();
        assert_eq!(msg.matches("a.html").count(), 1);
        assert!(msg.contains("gradient"));
    }

    #[test]
    fn test_check_fatal_combines_multiple_errors() {
        let mut slide = SlideData::new();
        slide.errors.push("first".to_string());
        slide.errors.push("second".to_string());
        let err = check_fatal("x.html", &slide).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("first"));
        assert!(msg.contains("second"));
    }

    #[test]
    fn test_validate_post_walk_does_not_panic_on_near_bottom_text() {
        let mut slide = SlideData::new();
        let style = TextStyle { size_pt: 20.0, align: Align::Left, ..TextStyle::default() };
        slide.elements.push(Element::Text {
            tag: "p".into(),
            content: crate::model::TextContent::Plain("x".into()),
            position: Position::new(0.0, 7.2, 2.0, 0.2),
            style,
        });
        validate_post_walk("a.html", &slide, 7.5);
    }
}
