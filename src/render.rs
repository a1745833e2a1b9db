//! Slide renderer (C6): dispatches the finished [`Element`] list against
//! the PPTX builder ([`crate::generator::Slide`]), applying the text-box
//! width correction spec.md §4.6 describes before anything is emitted.
//!
//! This is the only module that translates [`crate::model`] types into
//! [`crate::generator::slide`] types — the walker (C4) never imports
//! `generator`, and `generator` never imports `model`, keeping the
//! "pure data transformation vs. PPTX wire format" boundary design note §9
//! recommends.

use crate::generator::{
    Align as GAlign, Background as GBackground, BoxGeometry, Fill as GFill, ImageOptions, LineStyle as GLineStyle,
    ListOptions, ShadowStyle as GShadowStyle, ShapeKind, ShapeOptions, Slide, TextBoxOptions, TextRunSpec, VAlign,
};
use crate::model::{Align, Background, Element, Fill, Run, SlideData, TextContent, TextStyle};

/// Single-line threshold (spec.md §4.6): a text element's own height must
/// be both `<= 1.5x` its line height and `<= 0.35in` to receive width
/// correction.
const SINGLE_LINE_MAX_IN: f64 = 0.35;
const SINGLE_LINE_HEIGHT_FACTOR: f64 = 1.5;
const MIN_WIDTH_FACTOR: f64 = 1.15;
const MIN_BUFFER_IN: f64 = 0.05;

/// Render a finished, raster-substituted `SlideData` onto `slide`
/// (spec.md §4.6). `slide_w_in`/`slide_h_in` are the deck's dimensions,
/// needed both for the width-correction "slide edge" bound and to place a
/// full-bleed background image.
pub fn render_slide(slide_data: &SlideData, slide: &mut Slide, slide_w_in: f64, slide_h_in: f64) {
    render_background(slide_data, slide, slide_w_in, slide_h_in);

    let mut elements = slide_data.elements.clone();
    apply_text_width_correction(&mut elements, slide_w_in);

    for element in &elements {
        render_element(element, slide);
    }
}

/// Background is set before any element is added (spec.md §4.6). A color
/// background uses the slide's own `background` field; an image background
/// cannot, since PPTX's background-picture fill needs an `r:embed`
/// relationship id that only `Slide::add_image` can hand out — so it is
/// emitted as an ordinary full-bleed image instead, added first so it
/// renders behind everything else.
fn render_background(slide_data: &SlideData, slide: &mut Slide, slide_w_in: f64, slide_h_in: f64) {
    match &slide_data.background {
        Some(Background::Color(hex)) => slide.set_background(GBackground::Color(hex.clone())),
        Some(Background::Image(path)) => {
            slide.add_image(
                path,
                &ImageOptions { geometry: BoxGeometry { x_in: 0.0, y_in: 0.0, w_in: slide_w_in, h_in: slide_h_in, rotation_deg: None } },
            );
        }
        None => {}
    }
}

fn render_element(element: &Element, slide: &mut Slide) {
    match element {
        Element::Text { content, position, style, .. } => {
            let runs = content_to_runs(content, style);
            let geometry = BoxGeometry { x_in: position.x, y_in: position.y, w_in: position.w, h_in: position.h, rotation_deg: style.rotation_deg };
            let opts = TextBoxOptions {
                geometry,
                align: map_align(style.align),
                anchor: VAlign::Top,
                line_spacing_pt: style.line_spacing_pt,
                space_before_pt: style.space_before_pt,
                space_after_pt: style.space_after_pt,
                margins_pt: style.margins_pt,
                fill: style.fill.as_ref().map(map_fill),
            };
            slide.add_text(&runs, &opts);
        }
        Element::List { items, position, bullet_indent_in, margin_left_in } => {
            let geometry = BoxGeometry { x_in: position.x, y_in: position.y, w_in: position.w, h_in: position.h, rotation_deg: None };
            let spec_items: Vec<Vec<TextRunSpec>> = items.iter().map(|runs| runs_to_specs(runs, "000000")).collect();
            slide.add_list(&spec_items, &ListOptions { geometry, bullet_indent_in: *bullet_indent_in, margin_left_in: *margin_left_in });
        }
        // Shape elements exist purely to place a filled rect behind text
        // elements (spec.md §4.6); the shape's own text is always empty.
        Element::Shape { position, style } => {
            let geometry = BoxGeometry { x_in: position.x, y_in: position.y, w_in: position.w, h_in: position.h, rotation_deg: None };
            let kind = if style.rect_radius_in > 0.0 {
                ShapeKind::RoundRect { radius_in: style.rect_radius_in }
            } else {
                ShapeKind::Rect
            };
            let opts = ShapeOptions {
                geometry,
                fill: style.fill.as_ref().map(map_fill),
                transparency: style.transparency,
                line: style.line.as_ref().map(|l| GLineStyle { color: l.color.clone(), width_pt: l.width_pt, dashed: l.dashed }),
                shadow: style.shadow.as_ref().map(|s| GShadowStyle {
                    angle_deg: s.angle_deg,
                    distance_pt: s.distance_pt,
                    blur_pt: s.blur_pt,
                    opacity: s.opacity,
                    color: s.color.clone(),
                }),
            };
            slide.add_shape(kind, &opts);
        }
        Element::Line { x1, y1, x2, y2, width_pt, color } => {
            slide.add_line(*x1, *y1, *x2, *y2, *width_pt, color);
        }
        Element::Image { src, position } => {
            slide.add_image(src, &ImageOptions { geometry: BoxGeometry { x_in: position.x, y_in: position.y, w_in: position.w, h_in: position.h, rotation_deg: None } });
        }
        // Any placeholder still present at render time failed to resolve
        // in C5 and should already have been dropped by
        // `SlideData::substitute_rasters`; skip defensively rather than
        // emit a dangling reference.
        Element::ImagePlaceholder { .. } => {}
    }
}

fn map_align(align: Align) -> GAlign {
    match align {
        Align::Left => GAlign::Left,
        Align::Center => GAlign::Center,
        Align::Right => GAlign::Right,
    }
}

fn map_fill(fill: &Fill) -> GFill {
    match fill {
        Fill::Color(hex) => GFill::Solid(hex.clone()),
        // No gradient/picture-fill support on the shape builder; a solid
        // fallback keeps the shape visible rather than silently invisible.
        Fill::Image(_) => GFill::None,
    }
}

fn content_to_runs(content: &TextContent, style: &TextStyle) -> Vec<TextRunSpec> {
    match content {
        TextContent::Plain(text) => {
            let spec = TextRunSpec {
                text: text.clone(),
                bold: style.bold,
                italic: style.italic,
                underline: style.underline,
                size_pt: style.size_pt,
                color: style.color.clone(),
                transparency: style.transparency,
                font: style.font.clone(),
                bullet_indent_in: None,
                break_line: false,
            };
            split_on_newlines(&[spec])
        }
        TextContent::Runs(runs) => split_on_newlines(&runs_to_specs(runs, &style.color)),
    }
}

fn runs_to_specs(runs: &[Run], default_color: &str) -> Vec<TextRunSpec> {
    let specs: Vec<TextRunSpec> = runs
        .iter()
        .map(|r| TextRunSpec {
            text: r.text.clone(),
            bold: r.bold,
            italic: r.italic,
            underline: r.underline,
            size_pt: r.size_pt.unwrap_or(12.0),
            color: r.color.clone().unwrap_or_else(|| default_color.to_string()),
            transparency: 0,
            font: r.font.clone(),
            bullet_indent_in: r.bullet_indent_in,
            break_line: r.break_line,
        })
        .collect();
    split_on_newlines(&specs)
}

/// `<br>` survives C3 (`crate::runs`) as a literal `"\n"` text run (spec.md
/// §4.3); turning that into an actual PPTX line break is this renderer's
/// job, since `generator::Slide` only understands `break_line` markers, not
/// embedded newline characters.
fn split_on_newlines(specs: &[TextRunSpec]) -> Vec<TextRunSpec> {
    let mut out = Vec::with_capacity(specs.len());
    for spec in specs {
        if !spec.text.contains('\n') {
            out.push(spec.clone());
            continue;
        }
        let parts: Vec<&str> = spec.text.split('\n').collect();
        let last = parts.len() - 1;
        for (i, part) in parts.iter().enumerate() {
            let mut piece = spec.clone();
            piece.text = part.to_string();
            piece.break_line = i < last || spec.break_line;
            out.push(piece);
        }
    }
    out
}

/// Text-box width correction (spec.md §4.6). Mutates `elements` in place;
/// only `Element::Text` variants are touched.
fn apply_text_width_correction(elements: &mut [Element], slide_w_in: f64) {
    let boxes: Vec<crate::model::Position> = elements.iter().map(Element::bounding_box).collect();

    for i in 0..elements.len() {
        let own = boxes[i];
        let (text, align, size_pt, line_spacing_pt) = match &elements[i] {
            Element::Text { content, style, .. } => {
                let text = flatten_text(content);
                (text, style.align, style.size_pt, style.line_spacing_pt)
            }
            _ => continue,
        };
        if text.trim().is_empty() {
            continue;
        }

        let line_height_in = crate::util::pt(line_spacing_pt.unwrap_or(size_pt * 1.2)).inches();
        let is_single_line = own.h <= SINGLE_LINE_HEIGHT_FACTOR * line_height_in && own.h <= SINGLE_LINE_MAX_IN;
        if !is_single_line {
            continue;
        }

        let estimated_in = estimate_text_width_in(&text, size_pt);
        let min_width_in = estimated_in * MIN_WIDTH_FACTOR;
        let expanded_w = own.w.max(min_width_in);
        let expanded_right = own.x + expanded_w;

        let mut gap = slide_w_in - expanded_right;
        for (j, other) in boxes.iter().enumerate() {
            if i == j {
                continue;
            }
            if own.rows_overlap(other) && other.x > own.x {
                gap = gap.min(other.x - expanded_right);
            }
        }
        gap = gap.max(0.0);

        let len = text.chars().count();
        let p = if len <= 10 { 0.25 } else if len <= 20 { 0.20 } else { 0.15 };
        let desired_buffer = estimated_in * p;
        let actual_buffer = desired_buffer.min(0.8 * gap).max(0.0);
        let final_w = if actual_buffer > MIN_BUFFER_IN { expanded_w + actual_buffer } else { expanded_w };

        if let Element::Text { position, .. } = &mut elements[i] {
            match align {
                Align::Center => {
                    let delta = final_w - position.w;
                    position.x -= delta / 2.0;
                    position.w = final_w;
                }
                Align::Right => {
                    let delta = final_w - position.w;
                    position.x -= delta;
                    position.w = final_w;
                }
                Align::Left => {
                    position.w = final_w;
                }
            }
        }
    }
}

fn flatten_text(content: &TextContent) -> String {
    match content {
        TextContent::Plain(s) => s.clone(),
        TextContent::Runs(runs) => runs.iter().map(|r| r.text.as_str()).collect(),
    }
}

/// `((k_ko*fs*0.75) + (k_other*fs*0.45)) / 72`, `k_ko` counting code points
/// in `U+AC00..U+D7AF` (spec.md §4.6).
fn estimate_text_width_in(text: &str, font_size_pt: f64) -> f64 {
    let mut k_ko = 0u32;
    let mut k_other = 0u32;
    for c in text.chars() {
        if ('\u{AC00}'..='\u{D7AF}').contains(&c) {
            k_ko += 1;
        } else {
            k_other += 1;
        }
    }
    ((k_ko as f64 * font_size_pt * 0.75) + (k_other as f64 * font_size_pt * 0.45)) / 72.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Position, TextStyle};

    fn text_el(text: &str, x: f64, y: f64, w: f64, h: f64, align: Align) -> Element {
        let style = TextStyle { align, size_pt: 18.0, ..TextStyle::default() };
        Element::Text { tag: "p".into(), content: TextContent::Plain(text.into()), position: Position::new(x, y, w, h), style }
    }

    #[test]
    fn test_estimate_text_width_korean_vs_latin() {
        let ko = estimate_text_width_in("가나다", 18.0);
        let en = estimate_text_width_in("abc", 18.0);
        assert!(ko > en);
    }

    #[test]
    fn test_single_line_width_expands_to_minimum() {
        let mut elements = vec![text_el("hello world this is long", 1.0, 1.0, 0.2, 0.25, Align::Left)];
        apply_text_width_correction(&mut elements, 13.333);
        if let Element::Text { position, .. } = &elements[0] {
            assert!(position.w > 0.2);
        } else {
            panic!("expected text element");
        }
    }

    #[test]
    fn test_multiline_text_not_corrected() {
        let mut elements = vec![text_el("tall text box", 1.0, 1.0, 0.3, 2.0, Align::Left)];
        apply_text_width_correction(&mut elements, 13.333);
        if let Element::Text { position, .. } = &elements[0] {
            assert_eq!(position.w, 0.3);
        } else {
            panic!("expected text element");
        }
    }

    #[test]
    fn test_center_align_expands_both_sides() {
        let mut elements = vec![text_el("centered", 5.0, 1.0, 0.3, 0.25, Align::Center)];
        apply_text_width_correction(&mut elements, 13.333);
        if let Element::Text { position, .. } = &elements[0] {
            assert!(position.x < 5.0);
            assert!(position.w > 0.3);
        } else {
            panic!("expected text element");
        }
    }

    #[test]
    fn test_width_correction_buffer_is_capped_by_neighbour_gap() {
        // "Price" at its natural minimum width, 0.15in short of a neighbour:
        // the buffer should shrink to fit the gap rather than push into it.
        let neighbour = Position::new(0.8, 1.0, 1.0, 0.3);
        let mut elements = vec![
            text_el("Price", 0.0, 1.0, 0.65, 0.25, Align::Left),
            Element::Image { src: "x.png".into(), position: neighbour },
        ];
        apply_text_width_correction(&mut elements, 13.333);
        if let Element::Text { position, .. } = &elements[0] {
            assert!(position.right() <= neighbour.x + 1e-6);
            assert!(position.w > 0.65, "buffer should still expand within the available gap");
        } else {
            panic!("expected text element");
        }
    }
}
