//! Element classifier & walker (C4): the single DOM traversal that decides,
//! per element, whether it becomes a placeholder, image, raster, styled
//! span, shape, bullet list, text leaf, standalone span, or nothing
//! (spec.md §4.4). Operates purely over [`CapturedNode`] — design note §9's
//! "pre-materialised style tree", not a live DOM — so it needs no browser
//! to test.

pub mod classify;

use crate::browser::snapshot::CapturedNode;
use crate::core::units::{is_single_weight_font, parse_css_color, text_transform, TextTransform};
use crate::geometry::{self, RawRect};
use crate::model::{
    Align, Background, Element, Fill, LineStyle, Placeholder, Position, RasterRequest, Run, ShadowStyle,
    ShapeStyle, SlideData, TextContent, TextStyle,
};
use crate::runs::{self, InlineNode};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default)]
struct Ancestry {
    under_text_tag: bool,
    under_svg: bool,
    under_li: bool,
    under_leaf_div: bool,
}

struct WalkCtx {
    processed: HashSet<String>,
    styled_span_parents: HashSet<String>,
}

/// Run the full traversal over a captured body tree and return the
/// finished `SlideData` (deferred icons already appended, rasters not yet
/// resolved — that is C5's job).
pub fn walk_slide(root: &CapturedNode) -> SlideData {
    let mut slide = SlideData::new();
    let mut ctx = WalkCtx { processed: HashSet::new(), styled_span_parents: first_pass_styled_span_parents(root) };

    if classify::has_background_image(root) {
        if root.background_image.to_lowercase().contains("gradient") {
            slide.errors.push("body background-image is a CSS gradient; pre-rasterize to an image".to_string());
        } else {
            slide.background = Some(Background::Image(root.background_image.clone()));
        }
    } else if classify::has_background(root) {
        let hex = parse_css_color(&root.background_color, true).to_hex_string();
        slide.background = Some(Background::Color(hex));
    }

    for child in &root.children {
        walk_node(child, &mut slide, &mut ctx, Ancestry::default(), true);
    }
    slide.finalize_traversal();
    slide
}

/// First-pass scan (spec.md §4.4): mark every DIV that directly contains a
/// styled SPAN, so rule 10 (leaf DIV) never shadows it.
fn first_pass_styled_span_parents(node: &CapturedNode) -> HashSet<String> {
    let mut parents = HashSet::new();
    scan_styled_span_parents(node, &mut parents);
    parents
}

fn scan_styled_span_parents(node: &CapturedNode, parents: &mut HashSet<String>) {
    if node.tag == "div" && node.children.iter().any(classify::is_styled_span) {
        parents.insert(node.id.clone());
    }
    for child in &node.children {
        scan_styled_span_parents(child, parents);
    }
}

fn position_of(node: &CapturedNode) -> (Position, Option<f64>) {
    let rotation = geometry::resolve_rotation(&node.writing_mode, &node.transform);
    let rect = RawRect { x: node.x, y: node.y, w: node.w, h: node.h };
    let pre = geometry::pre_rotation_box(rect, node.offset_w.max(node.w), node.offset_h.max(node.h), rotation);
    (
        Position::new(
            crate::util::px(pre.x).inches(),
            crate::util::px(pre.y).inches(),
            crate::util::px(pre.w).inches(),
            crate::util::px(pre.h).inches(),
        ),
        rotation,
    )
}

fn mark_subtree_processed(node: &CapturedNode, processed: &mut HashSet<String>) {
    processed.insert(node.id.clone());
    for child in &node.children {
        mark_subtree_processed(child, processed);
    }
}

fn has_processed_descendant(node: &CapturedNode, processed: &HashSet<String>) -> bool {
    node.children.iter().any(|c| processed.contains(&c.id) || has_processed_descendant(c, processed))
}

fn collect_icons_deferred(node: &CapturedNode, slide: &mut SlideData, processed: &mut HashSet<String>) {
    if classify::is_standalone_icon(node) {
        let (position, _) = position_of(node);
        slide.raster_requests.push(RasterRequest { id: node.id.clone(), position, hide_children: false });
        slide.deferred_icons.push(Element::ImagePlaceholder { id: node.id.clone(), position });
        mark_subtree_processed(node, processed);
        return;
    }
    for child in &node.children {
        collect_icons_deferred(child, slide, processed);
    }
}

fn walk_node(node: &CapturedNode, slide: &mut SlideData, ctx: &mut WalkCtx, ancestry: Ancestry, is_root_child: bool) {
    if ctx.processed.contains(&node.id) {
        return;
    }
    let (position, rotation) = position_of(node);

    // Rule 1: text-tag sanity.
    if classify::is_text_tag(&node.tag) && !classify::is_table_cell(&node.tag) {
        if classify::has_background(node) || classify::has_border(node) || classify::has_shadow(node) {
            slide.errors.push(format!(
                "text tag <{}> (id={}) carries a prohibited background/border/shadow",
                node.tag, node.id
            ));
            ctx.processed.insert(node.id.clone());
            return;
        }
    }

    // Rule 2: placeholder.
    if node.class.split_whitespace().any(|c| c == "placeholder") {
        if !classify::has_non_zero_area(node) {
            slide.errors.push(format!("placeholder id={} has zero area", node.id));
        } else {
            slide.placeholders.push(Placeholder { id: node.id.clone(), position });
        }
        ctx.processed.insert(node.id.clone());
        return;
    }

    // Rule 3: IMG.
    if node.tag == "img" {
        if node.object_fit == "cover" || node.object_fit == "contain" {
            slide.raster_requests.push(RasterRequest { id: node.id.clone(), position, hide_children: false });
            slide.elements.push(Element::ImagePlaceholder { id: node.id.clone(), position });
        } else {
            slide.elements.push(Element::Image { src: node.src.clone(), position });
        }
        ctx.processed.insert(node.id.clone());
        return;
    }

    // Rule 4: SVG.
    if node.is_svg {
        slide.raster_requests.push(RasterRequest { id: node.id.clone(), position, hide_children: false });
        slide.elements.push(Element::ImagePlaceholder { id: node.id.clone(), position });
        mark_subtree_processed(node, &mut ctx.processed);
        return;
    }

    // Rule 5: standalone icon.
    if classify::is_standalone_icon(node) {
        slide.raster_requests.push(RasterRequest { id: node.id.clone(), position, hide_children: false });
        slide.elements.push(Element::ImagePlaceholder { id: node.id.clone(), position });
        mark_subtree_processed(node, &mut ctx.processed);
        return;
    }

    // Rule 6: styled SPAN with background.
    if classify::is_styled_span(node) {
        slide.raster_requests.push(RasterRequest { id: node.id.clone(), position, hide_children: true });
        slide.elements.push(Element::ImagePlaceholder { id: node.id.clone(), position });
        // Icons nested inside a styled span's own inline runs have no
        // surviving position once flattened through InlineNode, so they
        // cannot be raster-requested here; only top-level standalone icons
        // (rule 5) and icons inside background-image DIVs (rule 7) carry
        // enough geometry to be captured (best-effort, per design note §9).
        let (content, style, _icons) = build_text_content(node);
        slide.elements.push(Element::Text { tag: node.tag.clone(), content, position, style });
        ctx.processed.insert(node.id.clone());
        return;
    }

    // Rule 7: DIV with background-image.
    if node.tag == "div" && classify::has_background_image(node) {
        slide.raster_requests.push(RasterRequest { id: node.id.clone(), position, hide_children: true });
        slide.elements.push(Element::ImagePlaceholder { id: node.id.clone(), position });
        for child in &node.children {
            collect_icons_deferred(child, slide, &mut ctx.processed);
        }
        if is_root_child {
            for child in &node.children {
                walk_node(child, slide, ctx, ancestry, false);
            }
        } else {
            mark_subtree_processed(node, &mut ctx.processed);
        }
        return;
    }

    // Rule 8: DIV with solid background or border, no background-image.
    if node.tag == "div" && (classify::has_background(node) || classify::has_border(node)) {
        if !classify::has_meaningful_text(node) {
            slide.raster_requests.push(RasterRequest { id: node.id.clone(), position, hide_children: false });
            slide.elements.push(Element::ImagePlaceholder { id: node.id.clone(), position });
            mark_subtree_processed(node, &mut ctx.processed);
            return;
        }
        let radius_in = geometry::border_radius_to_inches(&node.border_radius, position.w, position.h);
        let fill = if classify::has_background(node) {
            Some(Fill::Color(parse_css_color(&node.background_color, true).to_hex_string()))
        } else {
            None
        };
        let shadow = geometry::parse_box_shadow(&node.box_shadow).map(|s| ShadowStyle {
            angle_deg: s.angle_deg,
            distance_pt: s.distance_pt,
            blur_pt: s.blur_pt,
            opacity: s.opacity,
            color: s.color,
        });
        let mut line = None;
        let mut side_lines = Vec::new();
        if classify::has_border(node) {
            if classify::borders_uniform(node) {
                let width_px = classify::parse_px(&node.border_top_width);
                line = Some(LineStyle {
                    color: parse_css_color(&node.border_top_color, false).to_hex_string(),
                    width_pt: crate::util::px(width_px).pt(),
                    dashed: node.border_top_style == "dashed",
                });
            } else {
                side_lines = border_side_lines(node, position);
            }
        }
        slide.elements.push(Element::Shape {
            position,
            style: ShapeStyle { fill, transparency: None, line, rect_radius_in: radius_in, shadow },
        });
        for l in side_lines {
            slide.elements.push(l);
        }
        ctx.processed.insert(node.id.clone());
        for child in &node.children {
            walk_node(child, slide, ctx, ancestry, false);
        }
        return;
    }

    // Rule 9: UL/OL.
    if node.tag == "ul" || node.tag == "ol" {
        handle_list(node, slide, ctx, position);
        return;
    }

    // Rule 10: leaf DIV.
    if node.tag == "div" && !ctx.styled_span_parents.contains(&node.id) {
        let processed_descendant = has_processed_descendant(node, &ctx.processed);
        if classify::is_leaf_div(node, processed_descendant) {
            emit_text_leaf(node, position, rotation, slide);
            mark_subtree_processed(node, &mut ctx.processed);
            return;
        }
    }

    // Rule 11: standalone SPAN.
    if node.tag == "span"
        && !node.text_content.trim().is_empty()
        && !ancestry.under_text_tag
        && !ancestry.under_svg
        && !ancestry.under_li
        && !ancestry.under_leaf_div
    {
        emit_text_leaf(node, position, rotation, slide);
        ctx.processed.insert(node.id.clone());
        return;
    }

    // Rule 12: otherwise, a text tag.
    if classify::is_text_tag(&node.tag) {
        emit_text_leaf(node, position, rotation, slide);
        ctx.processed.insert(node.id.clone());
        return;
    }

    // No rule matched: recurse, updating ancestry flags for rule 11.
    let mut next = ancestry;
    if classify::is_text_tag(&node.tag) {
        next.under_text_tag = true;
    }
    if node.is_svg {
        next.under_svg = true;
    }
    if node.tag == "li" {
        next.under_li = true;
    }
    for child in &node.children {
        walk_node(child, slide, ctx, next, false);
    }
}

/// Up to four inset `line` elements for a DIV with non-uniform borders
/// (spec.md §4.4 rule 8), each centred on its edge.
fn border_side_lines(node: &CapturedNode, position: Position) -> Vec<Element> {
    let mut lines = Vec::new();
    let sides = [
        (&node.border_top_width, &node.border_top_color, node.border_top_style.as_str()),
        (&node.border_right_width, &node.border_right_color, node.border_right_style.as_str()),
        (&node.border_bottom_width, &node.border_bottom_color, node.border_bottom_style.as_str()),
        (&node.border_left_width, &node.border_left_color, node.border_left_style.as_str()),
    ];
    let names = ["top", "right", "bottom", "left"];
    for (i, (width, color, style)) in sides.iter().enumerate() {
        let width_px = classify::parse_px(width);
        if width_px <= 0.0 {
            continue;
        }
        let width_pt = crate::util::px(width_px).pt();
        let inset_in = crate::util::px(width_px / 2.0).inches();
        let color_hex = parse_css_color(color, false).to_hex_string();
        let (x1, y1, x2, y2) = match names[i] {
            "top" => (position.x, position.y + inset_in, position.right(), position.y + inset_in),
            "bottom" => (position.x, position.bottom() - inset_in, position.right(), position.bottom() - inset_in),
            "left" => (position.x + inset_in, position.y, position.x + inset_in, position.bottom()),
            _ => (position.right() - inset_in, position.y, position.right() - inset_in, position.bottom()),
        };
        lines.push(Element::Line { x1, y1, x2, y2, width_pt, color: color_hex });
        let _ = style;
    }
    lines
}

fn captured_to_inline(node: &CapturedNode) -> InlineNode {
    if node.tag == "br" {
        return InlineNode::Break;
    }
    if node.children.is_empty() {
        return InlineNode::Text(node.text_content.clone());
    }
    InlineNode::Element {
        tag: node.tag.clone(),
        class: node.class.clone(),
        font_weight: node.font_weight,
        font_style: node.font_style.clone(),
        text_decoration: node.text_decoration.clone(),
        text_transform: node.text_transform.clone(),
        color: if node.color.is_empty() { None } else { Some(node.color.clone()) },
        size_pt: if node.font_size_px > 0.0 { Some(crate::util::px(node.font_size_px).pt()) } else { None },
        font_family: if node.font_family.is_empty() { None } else { Some(node.font_family.clone()) },
        width_px: node.w,
        children: node.children.iter().map(captured_to_inline).collect(),
    }
}

fn resolve_text_color(node: &CapturedNode) -> String {
    let parsed = parse_css_color(&node.color, false);
    match parsed {
        crate::core::units::Color::None => {
            if node.background_image.to_lowercase().contains("gradient") {
                if let Some(first_color) = extract_first_color_literal(&node.background_image) {
                    return first_color;
                }
            }
            "000000".to_string()
        }
        _ => parsed.to_hex_string(),
    }
}

fn extract_first_color_literal(value: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref COLOR_RE: regex::Regex = regex::Regex::new(r"rgba?\([^)]*\)").unwrap();
    }
    let caps = COLOR_RE.find(value)?;
    match parse_css_color(caps.as_str(), false) {
        crate::core::units::Color::Hex(_) => Some(parse_css_color(caps.as_str(), false).to_hex_string()),
        crate::core::units::Color::None => None,
    }
}

fn build_text_content(node: &CapturedNode) -> (TextContent, TextStyle, Vec<runs::DetectedIcon>) {
    let has_inline_tags = node.children.iter().any(|c| {
        matches!(c.tag.as_str(), "span" | "b" | "strong" | "i" | "em" | "u" | "a" | "br")
    });
    let size_pt = crate::util::px(node.font_size_px.max(12.0 / 0.75)).pt();
    let align = match node.text_align.as_str() {
        "center" => Align::Center,
        "right" => Align::Right,
        _ => Align::Left,
    };
    let bold = node.font_weight >= 600 && !is_single_weight_font(&node.font_family);
    let italic = node.font_style.eq_ignore_ascii_case("italic");
    let underline = node.text_decoration.contains("underline");
    let color = resolve_text_color(node);

    let style = TextStyle {
        font: if node.font_family.is_empty() { None } else { Some(node.font_family.clone()) },
        size_pt,
        color,
        transparency: 0,
        bold,
        italic,
        underline,
        align,
        line_spacing_pt: None,
        space_before_pt: 0.0,
        space_after_pt: 0.0,
        margins_pt: [0.0, 0.0, 0.0, 0.0],
        rotation_deg: geometry::resolve_rotation(&node.writing_mode, &node.transform),
        fill: None,
        manual_bullet: false,
    };

    if has_inline_tags {
        let inline_children: Vec<InlineNode> = node.children.iter().map(captured_to_inline).collect();
        let (mut parsed_runs, icons) = runs::parse_runs(&inline_children);
        runs::strip_manual_bullet(&mut parsed_runs);
        // `node.text_content` only ever aggregates *direct* text-node
        // children (see SNAPSHOT_SCRIPT), so it carries exactly the bare
        // sibling text an inline icon leaves behind (spec.md §8 scenario 6:
        // `<div><i class="fa fa-check"></i> 완료</div>`) without
        // double-counting text that already lives inside an element child.
        let sibling_text = text_transform(&node.text_content, TextTransform::from_css(&node.text_transform));
        if !sibling_text.trim().is_empty() {
            parsed_runs.push(Run::plain(sibling_text));
        }
        (TextContent::Runs(parsed_runs), style, icons)
    } else {
        let transform = TextTransform::from_css(&node.text_transform);
        let text = text_transform(&node.text_content, transform);
        (TextContent::Plain(text), style, Vec::new())
    }
}

fn emit_text_leaf(node: &CapturedNode, position: Position, rotation: Option<f64>, slide: &mut SlideData) {
    // Icons are found and raster-requested separately below, via a direct
    // child search that has access to the icon's own CapturedNode geometry
    // (build_text_content's `_icons` loses position once flattened).
    let (mut content, mut style, _icons) = build_text_content(node);
    style.rotation_deg = rotation;

    let mut final_position = position;
    if let Some(icon_id) = node.children.iter().find(|c| classify::is_standalone_icon(c)).map(|c| c.id.clone()) {
        if let Some(icon_node) = node.children.iter().find(|c| c.id == icon_id) {
            let (icon_pos, _) = position_of(icon_node);
            let margin_in = crate::util::px(4.0).inches();
            let shift = (icon_pos.right() + margin_in) - final_position.x;
            if shift > 0.0 {
                final_position.w -= shift;
                final_position.x += shift;
            }
            slide.raster_requests.push(RasterRequest { id: icon_id.clone(), position: icon_pos, hide_children: false });
            slide.deferred_icons.push(Element::ImagePlaceholder { id: icon_id, position: icon_pos });
        }
    }

    if node.tag != "li" {
        if let TextContent::Plain(text) = &content {
            if let Some(c) = text.trim_start().chars().next() {
                if ['•', '-', '*', '▪', '▸'].contains(&c) {
                    style.manual_bullet = true;
                    let rest = text.trim_start()[c.len_utf8()..].trim_start().to_string();
                    content = TextContent::Plain(rest);
                }
            }
        } else if let TextContent::Runs(r) = &mut content {
            if runs::strip_manual_bullet(r) {
                style.manual_bullet = true;
            }
        }
    }

    slide.elements.push(Element::Text { tag: node.tag.clone(), content, position: final_position, style });
}

fn is_paragraph_tag(tag: &str) -> bool {
    matches!(tag, "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Direct children of a flex-laid-out `LI` become individual text/image
/// elements (spec.md §4.4 rule 9), bypassing the generic standalone-span
/// ancestry restriction (rule 11) since rule 9 is itself the override.
fn handle_flex_li_children(li: &CapturedNode, slide: &mut SlideData, ctx: &mut WalkCtx) {
    for child in &li.children {
        if ctx.processed.contains(&child.id) {
            continue;
        }
        let (position, rotation) = position_of(child);
        if child.tag == "img" {
            if child.object_fit == "cover" || child.object_fit == "contain" {
                slide.raster_requests.push(RasterRequest { id: child.id.clone(), position, hide_children: false });
                slide.elements.push(Element::ImagePlaceholder { id: child.id.clone(), position });
            } else {
                slide.elements.push(Element::Image { src: child.src.clone(), position });
            }
            ctx.processed.insert(child.id.clone());
            continue;
        }
        if classify::is_standalone_icon(child) {
            slide.raster_requests.push(RasterRequest { id: child.id.clone(), position, hide_children: false });
            slide.elements.push(Element::ImagePlaceholder { id: child.id.clone(), position });
            mark_subtree_processed(child, &mut ctx.processed);
            continue;
        }
        let paragraphs: Vec<&CapturedNode> = child.children.iter().filter(|c| is_paragraph_tag(&c.tag)).collect();
        if child.tag == "div" && paragraphs.len() > 1 {
            for para in paragraphs {
                let (para_position, para_rotation) = position_of(para);
                emit_text_leaf(para, para_position, para_rotation, slide);
                ctx.processed.insert(para.id.clone());
            }
            ctx.processed.insert(child.id.clone());
            continue;
        }
        emit_text_leaf(child, position, rotation, slide);
        ctx.processed.insert(child.id.clone());
    }
}

fn handle_list(node: &CapturedNode, slide: &mut SlideData, ctx: &mut WalkCtx, position: Position) {
    let items: Vec<&CapturedNode> = node.children.iter().filter(|c| c.tag == "li").collect();
    if items.is_empty() {
        ctx.processed.insert(node.id.clone());
        return;
    }
    let all_flex = items.iter().all(|li| classify::is_flex_li(li));
    if all_flex {
        for li in &items {
            handle_flex_li_children(li, slide, ctx);
        }
        mark_subtree_processed(node, &mut ctx.processed);
        return;
    }

    let some_flex = items.iter().any(|li| classify::is_flex_li(li));
    if some_flex {
        for li in &items {
            if classify::is_flex_li(li) {
                handle_flex_li_children(li, slide, ctx);
                ctx.processed.insert(li.id.clone());
            }
        }
    }

    let remaining: Vec<&&CapturedNode> = items.iter().filter(|li| !classify::is_flex_li(li)).collect();
    if remaining.is_empty() {
        mark_subtree_processed(node, &mut ctx.processed);
        return;
    }

    let padding_in = crate::util::px(node.padding_left_px).inches();
    let bullet_indent_in = padding_in / 2.0;
    let margin_left_in = padding_in / 2.0;

    let mut list_items = Vec::new();
    for (i, li) in remaining.iter().enumerate() {
        let inline_children: Vec<InlineNode> = li.children.iter().map(captured_to_inline).collect();
        let (mut item_runs, _icons) = if inline_children.is_empty() {
            (vec![Run::plain(li.text_content.clone())], Vec::new())
        } else {
            runs::parse_runs(&inline_children)
        };
        runs::strip_manual_bullet(&mut item_runs);
        if let Some(first) = item_runs.first_mut() {
            first.bullet_indent_in = Some(bullet_indent_in);
        }
        if i + 1 < remaining.len() {
            if let Some(last) = item_runs.last_mut() {
                last.break_line = true;
            }
        }
        list_items.push(item_runs);
    }

    slide.elements.push(Element::List { items: list_items, position, bullet_indent_in, margin_left_in });
    mark_subtree_processed(node, &mut ctx.processed);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, tag: &str) -> CapturedNode {
        CapturedNode {
            id: id.to_string(),
            tag: tag.to_string(),
            class: String::new(),
            text_content: String::new(),
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 50.0,
            offset_w: 100.0,
            offset_h: 50.0,
            background_color: String::new(),
            background_image: String::new(),
            border_radius: String::new(),
            box_shadow: String::new(),
            border_top_width: String::new(),
            border_right_width: String::new(),
            border_bottom_width: String::new(),
            border_left_width: String::new(),
            border_top_color: String::new(),
            border_right_color: String::new(),
            border_bottom_color: String::new(),
            border_left_color: String::new(),
            border_top_style: String::new(),
            border_right_style: String::new(),
            border_bottom_style: String::new(),
            border_left_style: String::new(),
            color: String::new(),
            font_size_px: 16.0,
            font_weight: 400,
            font_style: String::new(),
            font_family: String::new(),
            text_decoration: String::new(),
            text_transform: String::new(),
            text_align: String::new(),
            writing_mode: String::new(),
            transform: String::new(),
            object_fit: String::new(),
            src: String::new(),
            padding_left_px: 0.0,
            is_block: true,
            is_flex: false,
            is_svg: false,
            is_visible: true,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_solid_rounded_card_with_text() {
        let mut card = node("card", "div");
        card.background_color = "rgb(18, 52, 86)".to_string();
        card.border_radius = "12px".to_string();
        card.w = 200.0;
        card.h = 120.0;
        let mut heading = node("h", "h2");
        heading.text_content = "Hi".to_string();
        card.children.push(heading);

        let mut body = node("body", "body");
        body.children.push(card);

        let slide = walk_slide(&body);
        let shapes: Vec<_> = slide.elements.iter().filter(|e| matches!(e, Element::Shape { .. })).collect();
        assert_eq!(shapes.len(), 1);
        if let Element::Shape { style, .. } = shapes[0] {
            assert!(matches!(&style.fill, Some(Fill::Color(c)) if c == "123456"));
            assert!((style.rect_radius_in - 0.125).abs() < 0.01);
        }
        let texts: Vec<_> = slide.elements.iter().filter(|e| matches!(e, Element::Text { .. })).collect();
        assert_eq!(texts.len(), 1);
    }

    #[test]
    fn test_styled_price_tag_span_not_leaf_div() {
        let mut span = node("span1", "span");
        span.background_color = "rgb(255, 0, 0)".to_string();
        span.border_radius = "8px".to_string();
        span.text_content = "5,400엔".to_string();
        span.w = 80.0;
        span.h = 30.0;

        let mut div = node("div1", "div");
        div.children.push(span);

        let mut body = node("body", "body");
        body.children.push(div);

        let slide = walk_slide(&body);
        let placeholders: Vec<_> = slide.elements.iter().filter(|e| matches!(e, Element::ImagePlaceholder { .. })).collect();
        assert_eq!(placeholders.len(), 1);
        let texts: Vec<_> = slide.elements.iter().filter(|e| matches!(e, Element::Text { .. })).collect();
        assert_eq!(texts.len(), 1);
    }

    #[test]
    fn test_flex_list_emits_no_list_element() {
        let mut span_a = node("a", "span");
        span_a.text_content = "취득세".to_string();
        let mut span_b = node("b", "span");
        span_b.text_content = "약 280만원".to_string();

        let mut li = node("li1", "li");
        li.class = "flex".to_string();
        li.children = vec![span_a, span_b];

        let mut ul = node("ul1", "ul");
        ul.children.push(li);

        let mut body = node("body", "body");
        body.children.push(ul);

        let slide = walk_slide(&body);
        let lists: Vec<_> = slide.elements.iter().filter(|e| matches!(e, Element::List { .. })).collect();
        assert!(lists.is_empty());
        let texts: Vec<_> = slide.elements.iter().filter(|e| matches!(e, Element::Text { .. })).collect();
        assert_eq!(texts.len(), 2);
    }

    #[test]
    fn test_partial_borders_emit_two_lines() {
        let mut div = node("div1", "div");
        div.background_color = "rgb(255,255,255)".to_string();
        div.border_top_width = "2px".to_string();
        div.border_top_color = "rgb(0,0,0)".to_string();
        div.border_top_style = "solid".to_string();
        div.border_bottom_width = "4px".to_string();
        div.border_bottom_color = "rgb(255,0,0)".to_string();
        div.border_bottom_style = "dashed".to_string();
        let mut text = node("t", "p");
        text.text_content = "x".to_string();
        div.children.push(text);

        let mut body = node("body", "body");
        body.children.push(div);

        let slide = walk_slide(&body);
        let lines: Vec<_> = slide.elements.iter().filter_map(|e| match e {
            Element::Line { color, .. } => Some(color.as_str()),
            _ => None,
        }).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.contains(&"000000"), "top border should keep its own color: {lines:?}");
        assert!(lines.contains(&"FF0000"), "bottom border should keep its own color, not top's: {lines:?}");
    }

    #[test]
    fn test_vertical_text_rotation() {
        let mut p = node("p1", "p");
        p.writing_mode = "vertical-rl".to_string();
        p.text_content = "세로".to_string();
        p.w = 100.0;
        p.h = 300.0;
        p.offset_w = 300.0;
        p.offset_h = 100.0;

        let mut body = node("body", "body");
        body.children.push(p);

        let slide = walk_slide(&body);
        match &slide.elements[0] {
            Element::Text { style, .. } => assert_eq!(style.rotation_deg, Some(90.0)),
            _ => panic!("expected a text element"),
        }
    }

    #[test]
    fn test_icon_inside_leaf_div_keeps_sibling_text() {
        // <div><i class="fa fa-check" style="width:16px"></i> 완료</div>
        // (spec.md §8 scenario 6): the bare text sibling must survive even
        // though the icon is pulled out into its own raster request.
        let mut icon = node("icon1", "i");
        icon.class = "fa fa-check".to_string();
        icon.w = 16.0;
        icon.h = 16.0;
        icon.is_block = false;

        let mut div = node("div1", "div");
        div.text_content = "완료".to_string();
        div.children.push(icon);

        let mut body = node("body", "body");
        body.children.push(div);

        let slide = walk_slide(&body);
        let placeholders = slide.elements.iter().filter(|e| matches!(e, Element::ImagePlaceholder { .. })).count();
        assert_eq!(placeholders, 1, "expected exactly one raster placeholder for the icon");

        let text = slide.elements.iter().find_map(|e| match e {
            Element::Text { content, .. } => Some(content),
            _ => None,
        });
        let text = text.expect("expected a text element for the sibling text");
        match text {
            TextContent::Plain(s) => assert_eq!(s.trim(), "완료"),
            TextContent::Runs(runs) => {
                let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
                assert_eq!(joined.trim(), "완료");
            }
        }
    }

    #[test]
    fn test_br_produces_a_line_break_run() {
        let br = node("br1", "br");

        let mut p = node("p1", "p");
        let mut first = node("t1", "span");
        first.text_content = "first".to_string();
        let mut second = node("t2", "span");
        second.text_content = "second".to_string();
        p.children = vec![first, br, second];

        let mut body = node("body", "body");
        body.children.push(p);

        let slide = walk_slide(&body);
        match &slide.elements[0] {
            Element::Text { content: TextContent::Runs(runs), .. } => {
                let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
                assert!(joined.contains('\n'), "expected a literal newline run from <br>: {joined:?}");
            }
            other => panic!("expected runs text element, got {other:?}"),
        }
    }
}
