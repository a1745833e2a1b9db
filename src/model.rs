//! The intermediate representation the walker (C4) builds and the renderer
//! (C6) consumes — `SlideData` and `Element`, exactly as spec.md §3 states
//! them. Lengths are `f64` inches at this boundary; EMU conversion happens
//! only at the `generator` boundary via `util::inches`.

use crate::core::units::Color;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Position { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True if this box's y-range overlaps `other`'s y-range at all — used
    /// by the width-correction "available gap" search (spec.md §4.6).
    pub fn rows_overlap(&self, other: &Position) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A background-derived fill, reused for shapes and the slide background
/// (spec.md §3: `background: {kind: color, value} | {kind: image, path}`).
#[derive(Debug, Clone)]
pub enum Fill {
    Color(String),
    Image(String),
}

#[derive(Debug, Clone)]
pub struct LineStyle {
    pub color: String,
    pub width_pt: f64,
    pub dashed: bool,
}

#[derive(Debug, Clone)]
pub struct ShadowStyle {
    pub angle_deg: f64,
    pub distance_pt: f64,
    pub blur_pt: f64,
    pub opacity: f64,
    pub color: String,
}

/// Per-run style toggles (spec.md §4.3: "a bag of style toggles inherited
/// additively"). Carries the `bullet`/`breakLine` markers `list` elements
/// attach to individual runs.
#[derive(Debug, Clone)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<String>,
    pub size_pt: Option<f64>,
    pub font: Option<String>,
    /// Set on the first run of a bulleted list item; carries the bullet
    /// indent in inches.
    pub bullet_indent_in: Option<f64>,
    /// Set on the last run of every non-terminal list item.
    pub break_line: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
            color: None,
            size_pt: None,
            font: None,
            bullet_indent_in: None,
            break_line: false,
        }
    }
}

/// The element-level style bag a `text` element carries (spec.md §3).
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font: Option<String>,
    pub size_pt: f64,
    pub color: String,
    pub transparency: u8,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: Align,
    pub line_spacing_pt: Option<f64>,
    pub space_before_pt: f64,
    pub space_after_pt: f64,
    /// `[left, right, bottom, top]` in points, matching spec.md §3's order.
    pub margins_pt: [f64; 4],
    pub rotation_deg: Option<f64>,
    pub fill: Option<Fill>,
    pub manual_bullet: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font: None,
            size_pt: 12.0,
            color: "000000".to_string(),
            transparency: 0,
            bold: false,
            italic: false,
            underline: false,
            align: Align::Left,
            line_spacing_pt: None,
            space_before_pt: 0.0,
            space_after_pt: 0.0,
            margins_pt: [0.0, 0.0, 0.0, 0.0],
            rotation_deg: None,
            fill: None,
            manual_bullet: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TextContent {
    Plain(String),
    Runs(Vec<Run>),
}

#[derive(Debug, Clone)]
pub struct ShapeStyle {
    pub fill: Option<Fill>,
    pub transparency: Option<u8>,
    pub line: Option<LineStyle>,
    pub rect_radius_in: f64,
    pub shadow: Option<ShadowStyle>,
}

/// The per-slide tagged union the walker (C4) emits, matching spec.md §3's
/// `Element` variants one-to-one.
#[derive(Debug, Clone)]
pub enum Element {
    Text { tag: String, content: TextContent, position: Position, style: TextStyle },
    List { items: Vec<Vec<Run>>, position: Position, bullet_indent_in: f64, margin_left_in: f64 },
    Shape { position: Position, style: ShapeStyle },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, width_pt: f64, color: String },
    Image { src: String, position: Position },
    ImagePlaceholder { id: String, position: Position },
}

impl Element {
    /// A bounding box for any element, computed on demand for `Line` since
    /// it has no stored `Position` field. Used by the width-correction
    /// neighbour search (spec.md §4.6).
    pub fn bounding_box(&self) -> Position {
        match self {
            Element::Text { position, .. }
            | Element::List { position, .. }
            | Element::Shape { position, .. }
            | Element::Image { position, .. }
            | Element::ImagePlaceholder { position, .. } => *position,
            Element::Line { x1, y1, x2, y2, .. } => Position::new(
                x1.min(*x2),
                y1.min(*y2),
                (x2 - x1).abs(),
                (y2 - y1).abs(),
            ),
        }
    }
}

/// `{id, x, y, w, h}` recorded for downstream chart injection (spec.md §3).
#[derive(Debug, Clone)]
pub struct Placeholder {
    pub id: String,
    pub position: Position,
}

/// One pending raster job keyed by DOM element id (spec.md §3).
#[derive(Debug, Clone)]
pub struct RasterRequest {
    pub id: String,
    pub position: Position,
    pub hide_children: bool,
}

#[derive(Debug, Clone)]
pub enum Background {
    Color(String),
    Image(String),
}

/// The walker's complete output for one slide (spec.md §3).
#[derive(Debug, Clone, Default)]
pub struct SlideData {
    pub background: Option<Background>,
    pub elements: Vec<Element>,
    pub placeholders: Vec<Placeholder>,
    pub raster_requests: Vec<RasterRequest>,
    pub errors: Vec<String>,
    /// Deferred icon elements awaiting append to the tail of `elements`
    /// once the traversal completes (spec.md §4.4, invariant 2).
    pub deferred_icons: Vec<Element>,
    /// Resolved raster PNG paths by element id, filled in by C5 before C6
    /// runs (spec.md §4.5: "associate the PNG path with the element's id").
    pub raster_results: HashMap<String, String>,
}

impl SlideData {
    pub fn new() -> Self {
        SlideData::default()
    }

    /// Append deferred icons to the tail, per invariant 2. Must be called
    /// exactly once, after the DOM traversal completes and before C5 runs.
    pub fn finalize_traversal(&mut self) {
        self.elements.append(&mut self.deferred_icons);
    }

    /// Replace every `ImagePlaceholder` with a resolved `Image` using
    /// `raster_results`; drop placeholders that never resolved (spec.md
    /// §4.5: "placeholders that failed to capture are dropped").
    pub fn substitute_rasters(&mut self) {
        let resolved = std::mem::take(&mut self.raster_results);
        self.elements.retain_mut(|el| {
            if let Element::ImagePlaceholder { id, position } = el {
                match resolved.get(id) {
                    Some(path) => {
                        *el = Element::Image { src: path.clone(), position: *position };
                        true
                    }
                    None => false,
                }
            } else {
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_traversal_appends_deferred_icons_to_tail() {
        let mut data = SlideData::new();
        data.elements.push(Element::Image { src: "bg.png".into(), position: Position::new(0.0, 0.0, 1.0, 1.0) });
        data.deferred_icons.push(Element::Image { src: "icon.png".into(), position: Position::new(0.1, 0.1, 0.2, 0.2) });
        data.finalize_traversal();
        assert_eq!(data.elements.len(), 2);
        assert!(data.deferred_icons.is_empty());
        match &data.elements[1] {
            Element::Image { src, .. } => assert_eq!(src, "icon.png"),
            _ => panic!("expected the deferred icon last"),
        }
    }

    #[test]
    fn test_substitute_rasters_drops_unresolved_placeholders() {
        let mut data = SlideData::new();
        data.elements.push(Element::ImagePlaceholder { id: "a".into(), position: Position::new(0.0, 0.0, 1.0, 1.0) });
        data.elements.push(Element::ImagePlaceholder { id: "b".into(), position: Position::new(0.0, 0.0, 1.0, 1.0) });
        data.raster_results.insert("a".to_string(), "/tmp/a.png".to_string());
        data.substitute_rasters();
        assert_eq!(data.elements.len(), 1);
        match &data.elements[0] {
            Element::Image { src, .. } => assert_eq!(src, "/tmp/a.png"),
            _ => panic!("expected resolved image"),
        }
    }

    #[test]
    fn test_rows_overlap() {
        let a = Position::new(0.0, 0.0, 1.0, 1.0);
        let b = Position::new(2.0, 0.5, 1.0, 1.0);
        let c = Position::new(2.0, 5.0, 1.0, 1.0);
        assert!(a.rows_overlap(&b));
        assert!(!a.rows_overlap(&c));
    }

    #[test]
    fn test_color_none_marker_round_trips_through_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.color, "000000");
        let _ = Color::None;
    }
}
