//! Rotation recovery, pre-rotation bounding box, and box-shadow parsing
//! (C2). Pure functions over the values [`crate::browser::snapshot`]
//! captures — no DOM access here, per design note §9's testability
//! recommendation.

use lazy_static::lazy_static;
use regex::Regex;

/// A post-rotation rect as the browser reports it, with the transform
/// information needed to recover the pre-rotation box (spec.md §4.2).
#[derive(Debug, Clone, Copy)]
pub struct RawRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RawRect {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Sum of `writing-mode` base angle and any `transform: rotate(...)`,
/// reduced to `[0, 360)`. Returns `None` for "no rotation" (spec.md §4.2).
pub fn resolve_rotation(writing_mode: &str, transform: &str) -> Option<f64> {
    let base = match writing_mode.trim() {
        "vertical-rl" => 90.0,
        "vertical-lr" => 270.0,
        _ => 0.0,
    };
    let transform_deg = rotation_from_transform(transform);
    let total = (base + transform_deg).rem_euclid(360.0);
    if total == 0.0 { None } else { Some(total) }
}

lazy_static! {
    static ref ROTATE_RE: Regex = Regex::new(r"rotate\(\s*(-?[\d.]+)deg\s*\)").unwrap();
    static ref MATRIX_RE: Regex =
        Regex::new(r"matrix\(\s*(-?[\d.eE+-]+)\s*,\s*(-?[\d.eE+-]+)\s*,").unwrap();
}

/// Extract a rotation angle in degrees from a computed `transform` string,
/// either an explicit `rotate(Ndeg)` or a collapsed `matrix(a,b,c,d,e,f)`
/// recovered via `atan2(b, a)` (spec.md §4.2).
fn rotation_from_transform(transform: &str) -> f64 {
    if let Some(caps) = ROTATE_RE.captures(transform) {
        return caps[1].parse().unwrap_or(0.0);
    }
    if let Some(caps) = MATRIX_RE.captures(transform) {
        let a: f64 = caps[1].parse().unwrap_or(1.0);
        let b: f64 = caps[2].parse().unwrap_or(0.0);
        return b.atan2(a).to_degrees();
    }
    0.0
}

/// Recover the unrotated bounding box PPTX needs (spec.md §4.2):
/// at 90/270 the browser reports the post-rotation (swapped) rect, so width
/// and height are swapped back around the same centre. For any other
/// non-null rotation, the element's own offset box is recentred on the
/// rect's centre (the browser's reported box is trusted as the unrotated
/// size in that case).
pub fn pre_rotation_box(rect: RawRect, offset_w: f64, offset_h: f64, rotation_deg: Option<f64>) -> RawRect {
    let (cx, cy) = rect.center();
    match rotation_deg {
        Some(deg) if is_close(deg, 90.0) || is_close(deg, 270.0) => {
            let (w, h) = (rect.h, rect.w);
            RawRect { x: cx - w / 2.0, y: cy - h / 2.0, w, h }
        }
        Some(_) => RawRect { x: cx - offset_w / 2.0, y: cy - offset_h / 2.0, w: offset_w, h: offset_h },
        None => rect,
    }
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.01
}

/// A parsed outer box-shadow (spec.md §4.2). `inset` shadows are discarded
/// by the caller before this is invoked — this function only ever sees
/// outer shadows.
#[derive(Debug, Clone)]
pub struct BoxShadow {
    pub angle_deg: f64,
    pub distance_pt: f64,
    pub blur_pt: f64,
    pub opacity: f64,
    pub color: String,
}

lazy_static! {
    static ref SHADOW_RE: Regex = Regex::new(
        r"(rgba?\([^)]*\))\s+(-?[\d.]+)px\s+(-?[\d.]+)px\s+([\d.]+)px(?:\s+([\d.]+)px)?"
    )
    .unwrap();
}

/// Parse a single computed `box-shadow` value of the form
/// `"rgba(...) X Y B S"` (offset-x, offset-y, blur, optional spread).
/// Returns `None` if the string is `"none"`, empty, or contains `inset`
/// (spec.md §4.2: "only outer shadows are emitted").
pub fn parse_box_shadow(value: &str) -> Option<BoxShadow> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") || trimmed.contains("inset") {
        return None;
    }
    let caps = SHADOW_RE.captures(trimmed)?;
    let color_str = &caps[1];
    let offset_x: f64 = caps[2].parse().ok()?;
    let offset_y: f64 = caps[3].parse().ok()?;
    let blur_px: f64 = caps[4].parse().ok()?;

    let angle_deg = offset_y.atan2(offset_x).to_degrees();
    let distance_pt = offset_x.hypot(offset_y) * 0.75;
    let blur_pt = blur_px * 0.75;
    let opacity = crate::core::units::extract_alpha(color_str)
        .map(|inv| (100 - inv) as f64 / 100.0)
        .unwrap_or(0.5);
    let color = match crate::core::units::parse_css_color(color_str, false) {
        crate::core::units::Color::Hex(_) => {
            crate::core::units::parse_css_color(color_str, false).to_hex_string()
        }
        crate::core::units::Color::None => "000000".to_string(),
    };

    Some(BoxShadow { angle_deg, distance_pt, blur_pt, opacity, color })
}

/// Convert a computed `border-radius` value to inches, per spec.md §4.4
/// rule 8: `px/72` if declared in `pt`, `px/96` if declared in `px`, `%` of
/// the min dimension, with `>= 50%` treated as a full-circle radius of 1″.
pub fn border_radius_to_inches(value: &str, width_in: f64, height_in: f64) -> f64 {
    let trimmed = value.trim();
    if let Some(pct) = trimmed.strip_suffix('%') {
        let pct: f64 = pct.trim().parse().unwrap_or(0.0);
        if pct >= 50.0 {
            return 1.0;
        }
        return (pct / 100.0) * width_in.min(height_in);
    }
    if let Some(pt) = trimmed.strip_suffix("pt") {
        let pt: f64 = pt.trim().parse().unwrap_or(0.0);
        return pt / 72.0;
    }
    if let Some(px) = trimmed.strip_suffix("px") {
        let px: f64 = px.trim().parse().unwrap_or(0.0);
        return px / 96.0;
    }
    0.0
}
