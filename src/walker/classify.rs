//! Per-node predicates feeding the decision cascade in
//! [`crate::walker::walk_slide`] (spec.md §4.4). Kept separate from the
//! traversal itself so each rule's condition reads as one named predicate
//! rather than an inline boolean tangle.

use crate::browser::snapshot::CapturedNode;

pub const TEXT_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "th", "td"];

pub fn is_text_tag(tag: &str) -> bool {
    TEXT_TAGS.contains(&tag)
}

pub fn is_table_cell(tag: &str) -> bool {
    tag == "th" || tag == "td"
}

pub fn has_non_zero_area(node: &CapturedNode) -> bool {
    node.w > 0.0 && node.h > 0.0
}

pub fn has_background(node: &CapturedNode) -> bool {
    !node.background_color.is_empty()
        && !node.background_color.eq_ignore_ascii_case("transparent")
        && !node.background_color.eq_ignore_ascii_case("rgba(0, 0, 0, 0)")
}

pub fn has_background_image(node: &CapturedNode) -> bool {
    !node.background_image.is_empty() && !node.background_image.eq_ignore_ascii_case("none")
}

pub fn has_border(node: &CapturedNode) -> bool {
    [&node.border_top_width, &node.border_right_width, &node.border_bottom_width, &node.border_left_width]
        .iter()
        .any(|w| parse_px(w) > 0.0)
}

pub fn has_shadow(node: &CapturedNode) -> bool {
    crate::geometry::parse_box_shadow(&node.box_shadow).is_some()
}

/// True if all four border widths/colors/styles match (spec.md §4.4 rule
/// 8: "if the four borders are non-uniform, no uniform border is set").
pub fn borders_uniform(node: &CapturedNode) -> bool {
    let widths = [
        parse_px(&node.border_top_width),
        parse_px(&node.border_right_width),
        parse_px(&node.border_bottom_width),
        parse_px(&node.border_left_width),
    ];
    widths.iter().all(|w| (w - widths[0]).abs() < 0.01)
}

pub fn parse_px(value: &str) -> f64 {
    value.trim().trim_end_matches("px").parse().unwrap_or(0.0)
}

fn is_icon_class(class: &str) -> bool {
    class
        .split_whitespace()
        .any(|c| c.starts_with("fa") || c == "icon" || c.starts_with("icon-") || c == "material-icons")
}

pub fn is_standalone_icon(node: &CapturedNode) -> bool {
    if node.tag != "i" && node.tag != "span" {
        return false;
    }
    if is_icon_class(&node.class) {
        return true;
    }
    node.text_content.trim().is_empty() && node.children.is_empty() && node.w > 0.0
}

/// The styled-SPAN rule (spec.md §4.4 rule 6): a SPAN with a real
/// background and non-zero area.
pub fn is_styled_span(node: &CapturedNode) -> bool {
    node.tag == "span" && has_background(node) && has_non_zero_area(node)
}

pub fn has_meaningful_text(node: &CapturedNode) -> bool {
    if !node.text_content.trim().is_empty() {
        return true;
    }
    node.children.iter().any(|c| !c.text_content.trim().is_empty() || has_meaningful_text(c))
}

/// spec.md §4.4 rule 9 says "flex-laid-out"; computed `display:flex` is the
/// authoritative signal, but a literal `flex` class name (the common Tailwind-
/// style convention spec.md's own scenario 3 uses) is honored too in case the
/// class was applied after the snapshot's style read or the stylesheet
/// hasn't loaded yet.
pub fn is_flex_li(node: &CapturedNode) -> bool {
    node.is_flex || node.class.split_whitespace().any(|c| c == "flex")
}

pub fn is_leaf_div(node: &CapturedNode, processed_descendant: bool) -> bool {
    node.tag == "div"
        && !node.children.iter().any(|c| c.is_block)
        && !processed_descendant
        && has_meaningful_text(node)
}
