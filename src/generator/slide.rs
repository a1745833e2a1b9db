//! The PPTX builder's per-slide surface (spec.md §6 "PPTX builder contract"):
//! `background`, `add_text`, `add_shape`, `add_image`. Everything here is
//! absolute-positioned — no fixed template layouts, unlike the teacher's
//! original `create_title_and_content_slide`-style functions, which this
//! generalizes.
//!
//! `Slide` knows nothing about the DOM or the walker; [`crate::render`]
//! (C6) is the only caller, translating a finished [`crate::model::Element`]
//! list into these calls after width correction.

use crate::core::xml_utils::normalize_color;
use crate::generator::slide_xml::{paragraph_props_xml, run_xml};
use crate::util::inches;

#[derive(Debug, Clone)]
pub enum Background {
    Color(String),
    Image(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn xml_value(self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ShapeKind {
    Rect,
    RoundRect { radius_in: f64 },
    Line,
}

#[derive(Debug, Clone)]
pub enum Fill {
    Solid(String),
    None,
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

/// A positioned, unrotated-or-rotated bounding box in inches (spec.md §3:
/// "Positions are inches from slide top-left").
#[derive(Debug, Clone, Copy)]
pub struct BoxGeometry {
    pub x_in: f64,
    pub y_in: f64,
    pub w_in: f64,
    pub h_in: f64,
    pub rotation_deg: Option<f64>,
}

impl BoxGeometry {
    fn xfrm_xml(&self) -> String {
        let off_x = inches(self.x_in).emu();
        let off_y = inches(self.y_in).emu();
        let cx = inches(self.w_in).emu();
        let cy = inches(self.h_in).emu();
        match self.rotation_deg {
            Some(deg) => {
                // PPTX rotation units are 60,000ths of a degree.
                let rot = (deg * 60_000.0).round() as i64;
                format!(
                    r#"<a:xfrm rot="{rot}"><a:off x="{off_x}" y="{off_y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#
                )
            }
            None => format!(
                r#"<a:xfrm><a:off x="{off_x}" y="{off_y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextRunSpec {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size_pt: f64,
    pub color: String,
    pub transparency: u8,
    pub font: Option<String>,
    /// Set on the first run of a bulleted paragraph; carries the bullet
    /// indent in inches (spec.md §4.4 rule 9).
    pub bullet_indent_in: Option<f64>,
    /// Set on the last run of a non-terminal list item, forcing a line
    /// break rather than a new `<a:p>` (spec.md §4.4 rule 9).
    pub break_line: bool,
}

impl TextRunSpec {
    pub fn plain(text: impl Into<String>, size_pt: f64, color: impl Into<String>) -> Self {
        TextRunSpec {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
            size_pt,
            color: color.into(),
            transparency: 0,
            font: None,
            bullet_indent_in: None,
            break_line: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VAlign {
    Top,
    Middle,
}

impl VAlign {
    fn xml_value(self) -> &'static str {
        match self {
            VAlign::Top => "t",
            VAlign::Middle => "ctr",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextBoxOptions {
    pub geometry: BoxGeometry,
    pub align: Align,
    pub anchor: VAlign,
    pub line_spacing_pt: Option<f64>,
    pub space_before_pt: f64,
    pub space_after_pt: f64,
    /// [left, right, bottom, top] in points, matching spec.md §3's margin
    /// tuple order.
    pub margins_pt: [f64; 4],
    pub fill: Option<Fill>,
}

impl Default for TextBoxOptions {
    fn default() -> Self {
        TextBoxOptions {
            geometry: BoxGeometry { x_in: 0.0, y_in: 0.0, w_in: 1.0, h_in: 1.0, rotation_deg: None },
            align: Align::Left,
            anchor: VAlign::Top,
            line_spacing_pt: None,
            space_before_pt: 0.0,
            space_after_pt: 0.0,
            margins_pt: [0.0, 0.0, 0.0, 0.0],
            fill: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShapeOptions {
    pub geometry: BoxGeometry,
    pub fill: Option<Fill>,
    pub transparency: Option<u8>,
    pub line: Option<LineStyle>,
    pub shadow: Option<ShadowStyle>,
}

#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub geometry: BoxGeometry,
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub geometry: BoxGeometry,
    pub bullet_indent_in: f64,
    pub margin_left_in: f64,
}

struct PendingImage {
    rel_id: String,
    path: String,
}

/// A single slide under construction. Shapes are appended in z-order —
/// whatever order the caller invokes `add_*` in becomes the PPTX draw
/// order, matching spec.md §3 invariant 2 ("earlier items render first").
pub struct Slide {
    background: Option<Background>,
    body: String,
    next_shape_id: u32,
    next_rel_id: u32,
    images: Vec<PendingImage>,
}

impl Slide {
    pub fn new() -> Self {
        Slide {
            background: None,
            body: String::new(),
            next_shape_id: 2,
            next_rel_id: 2, // rId1 is reserved for the slideLayout relationship
            images: Vec::new(),
        }
    }

    pub fn set_background(&mut self, bg: Background) {
        self.background = Some(bg);
    }

    fn take_shape_id(&mut self) -> u32 {
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        id
    }

    fn take_rel_id(&mut self) -> String {
        let id = format!("rId{}", self.next_rel_id);
        self.next_rel_id += 1;
        id
    }

    pub fn pending_images(&self) -> impl Iterator<Item = (&str, &str)> {
        self.images.iter().map(|p| (p.rel_id.as_str(), p.path.as_str()))
    }

    pub fn add_text(&mut self, runs: &[TextRunSpec], opts: &TextBoxOptions) {
        let id = self.take_shape_id();
        let fill_xml = fill_xml(opts.fill.as_ref());
        let anchor = opts.anchor.xml_value();
        let [margin_l, margin_r, margin_b, margin_t] = opts.margins_pt.map(pt_to_emu);
        let pr = paragraph_props_xml(opts.align, opts.line_spacing_pt, opts.space_before_pt, opts.space_after_pt, runs.first());
        let mut runs_xml = String::new();
        for run in runs {
            runs_xml.push_str(&run_xml(run));
            if run.break_line {
                runs_xml.push_str("<a:br/>");
            }
        }
        self.body.push_str(&format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>{fill_xml}</p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0" anchor="{anchor}" lIns="{margin_l}" rIns="{margin_r}" tIns="{margin_t}" bIns="{margin_b}"/><a:lstStyle/><a:p>{pr}{runs_xml}</a:p></p:txBody></p:sp>"#,
            xfrm = opts.geometry.xfrm_xml(),
        ));
    }

    pub fn add_list(&mut self, items: &[Vec<TextRunSpec>], opts: &ListOptions) {
        let id = self.take_shape_id();
        let mut paragraphs = String::new();
        for item in items {
            let pr = paragraph_props_xml(Align::Left, None, 0.0, 0.0, item.first());
            paragraphs.push('<');
            paragraphs.push_str("a:p>");
            paragraphs.push_str(&pr);
            for run in item {
                paragraphs.push_str(&run_xml(run));
                if run.break_line {
                    paragraphs.push_str("<a:br/>");
                }
            }
            paragraphs.push_str("</a:p>");
        }
        let margin_l = inches(opts.margin_left_in).emu();
        self.body.push_str(&format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="List {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0" lIns="{margin_l}"/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#,
            xfrm = opts.geometry.xfrm_xml(),
        ));
    }

    pub fn add_shape(&mut self, kind: ShapeKind, opts: &ShapeOptions) {
        let id = self.take_shape_id();
        let (prst, av_lst) = match kind {
            ShapeKind::Rect | ShapeKind::Line => ("rect", String::from("<a:avLst/>")),
            ShapeKind::RoundRect { radius_in } => {
                let pct = round_rect_adjust(radius_in, opts.geometry.w_in, opts.geometry.h_in);
                ("roundRect", format!(r#"<a:avLst><a:gd name="adj" fmla="val {pct}"/></a:avLst>"#))
            }
        };
        let fill_xml = fill_xml(opts.fill.as_ref());
        let line_xml = match &opts.line {
            Some(line) => {
                let w = pt_to_emu(line.width_pt);
                let dash = if line.dashed { r#"<a:prstDash val="dash"/>"# } else { "" };
                format!(
                    r#"<a:ln w="{w}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill>{dash}</a:ln>"#,
                    normalize_color(&line.color)
                )
            }
            None => String::new(),
        };
        let shadow_xml = match &opts.shadow {
            Some(shadow) => {
                let dist = pt_to_emu(shadow.distance_pt);
                let blur = pt_to_emu(shadow.blur_pt);
                let dir = ((shadow.angle_deg.rem_euclid(360.0)) * 60_000.0).round() as i64;
                let alpha = ((1.0 - shadow.opacity) * 100_000.0).round() as i64;
                format!(
                    r#"<a:effectLst><a:outerShdw blurRad="{blur}" dist="{dist}" dir="{dir}" rotWithShape="0"><a:srgbClr val="{}"><a:alpha val="{alpha}"/></a:srgbClr></a:outerShdw></a:effectLst>"#,
                    normalize_color(&shadow.color)
                )
            }
            None => String::new(),
        };
        self.body.push_str(&format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Shape {id}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>{xfrm}<a:prstGeom prst="{prst}">{av_lst}</a:prstGeom>{fill_xml}{line_xml}{shadow_xml}</p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>"#,
            xfrm = opts.geometry.xfrm_xml(),
        ));
    }

    /// `x1,y1,x2,y2` in inches; emitted as a line shape with the asymmetric
    /// bounding box spec.md §4.6 describes (width = x2-x1, height = y2-y1).
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width_pt: f64, color: &str) {
        let id = self.take_shape_id();
        let x = x1.min(x2);
        let y = y1.min(y2);
        let cx = inches((x2 - x1).abs().max(0.001)).emu();
        let cy = inches((y2 - y1).abs().max(0.001)).emu();
        let off_x = inches(x).emu();
        let off_y = inches(y).emu();
        let flip_h = if x2 < x1 { r#" flipH="1""# } else { "" };
        let flip_v = if y2 < y1 { r#" flipV="1""# } else { "" };
        let w = pt_to_emu(width_pt);
        self.body.push_str(&format!(
            r#"<p:cxnSp><p:nvCxnSpPr><p:cNvPr id="{id}" name="Line {id}"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr><p:spPr><a:xfrm{flip_h}{flip_v}><a:off x="{off_x}" y="{off_y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="line"><a:avLst/></a:prstGeom><a:ln w="{w}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:ln></p:spPr></p:cxnSp>"#,
            normalize_color(color)
        ));
    }

    /// Returns the relationship id assigned to this image so the caller
    /// (the orchestrator, assembling the package) can wire up media parts.
    pub fn add_image(&mut self, path: &str, opts: &ImageOptions) -> String {
        let id = self.take_shape_id();
        let rel_id = self.take_rel_id();
        self.images.push(PendingImage { rel_id: rel_id.clone(), path: path.to_string() });
        self.body.push_str(&format!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
            xfrm = opts.geometry.xfrm_xml(),
        ));
        rel_id
    }

    pub fn to_xml(&self) -> String {
        let bg_xml = match &self.background {
            Some(Background::Color(hex)) => format!(
                r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
                normalize_color(hex)
            ),
            Some(Background::Image(_)) => {
                // Background images are embedded as a full-bleed picture
                // behind everything else; the orchestrator pushes an
                // add_image() call at position (0,0,slideW,slideH) before
                // any other element instead of using this branch, since a
                // background fill cannot carry a `r:embed` relationship
                // without also being a pictureFill, which needs its own
                // rel id that only the Slide can hand out. See render.rs.
                String::new()
            }
            None => String::new(),
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld>{bg_xml}<p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
{body}
</p:spTree>
</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            body = self.body,
        )
    }

}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_xml(fill: Option<&Fill>) -> String {
    match fill {
        Some(Fill::Solid(hex)) => format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, normalize_color(hex)),
        Some(Fill::None) | None => "<a:noFill/>".to_string(),
    }
}

fn pt_to_emu(pt: f64) -> i64 {
    (pt * 12700.0).round() as i64
}

/// Convert a corner radius in inches to the `adj` percentage (0..=50000)
/// PPTX's `roundRect` preset geometry expects, relative to the shorter side
/// (spec.md §4.4 rule 8: "%... of min dimension").
fn round_rect_adjust(radius_in: f64, w_in: f64, h_in: f64) -> i64 {
    let min_dim = w_in.min(h_in).max(0.0001);
    ((radius_in / min_dim) * 100_000.0).round().clamp(0.0, 50_000.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom() -> BoxGeometry {
        BoxGeometry { x_in: 1.0, y_in: 1.0, w_in: 2.0, h_in: 1.0, rotation_deg: None }
    }

    #[test]
    fn test_add_text_emits_run() {
        let mut slide = Slide::new();
        let runs = vec![TextRunSpec::plain("Hi", 18.0, "000000")];
        slide.add_text(&runs, &TextBoxOptions { geometry: geom(), ..Default::default() });
        let xml = slide.to_xml();
        assert!(xml.contains("<a:t>Hi</a:t>"));
    }

    #[test]
    fn test_add_shape_rect() {
        let mut slide = Slide::new();
        slide.add_shape(
            ShapeKind::Rect,
            &ShapeOptions { geometry: geom(), fill: Some(Fill::Solid("FF0000".into())), transparency: None, line: None, shadow: None },
        );
        let xml = slide.to_xml();
        assert!(xml.contains(r#"prst="rect""#));
        assert!(xml.contains("FF0000"));
    }

    #[test]
    fn test_round_rect_full_circle_on_square() {
        // border-radius: 50% on a square DIV -> adj 50000 (spec.md §8 boundary test)
        assert_eq!(round_rect_adjust(1.0, 2.0, 2.0), 50_000);
    }

    #[test]
    fn test_add_image_returns_unique_rel_ids() {
        let mut slide = Slide::new();
        let r1 = slide.add_image("a.png", &ImageOptions { geometry: geom() });
        let r2 = slide.add_image("b.png", &ImageOptions { geometry: geom() });
        assert_ne!(r1, r2);
        assert_eq!(slide.pending_images().count(), 2);
    }

    #[test]
    fn test_add_line_bounding_box() {
        let mut slide = Slide::new();
        slide.add_line(1.0, 1.0, 3.0, 1.0, 1.0, "000000");
        let xml = slide.to_xml();
        assert!(xml.contains("p:cxnSp"));
    }

    #[test]
    fn test_background_color() {
        let mut slide = Slide::new();
        slide.set_background(Background::Color("123456".into()));
        let xml = slide.to_xml();
        assert!(xml.contains("123456"));
    }
}
