//! Low-level `<a:r>`/`<a:pPr>` XML fragments shared by every shape that
//! carries text in [`crate::generator::slide`]. Split out of `slide.rs` the
//! way the teacher kept run/paragraph emission separate from shape
//! assembly, but rebuilt around [`TextRunSpec`] instead of markdown
//! segments — C3 (`crate::runs`) has already resolved bold/italic/color
//! per run by the time anything reaches here, so there is no inline syntax
//! left to parse.

use crate::core::xml_utils::escape_xml;
use crate::generator::slide::{Align, TextRunSpec};

/// `<a:rPr>` plus the run's text, wrapped in `<a:r>`.
pub fn run_xml(run: &TextRunSpec) -> String {
    let bold = if run.bold { r#" b="1""# } else { "" };
    let italic = if run.italic { r#" i="1""# } else { "" };
    let underline = if run.underline { r#" u="sng""# } else { "" };
    let size = (run.size_pt * 100.0).round() as i64;
    let font_xml = match &run.font {
        Some(f) => format!(r#"<a:latin typeface="{}"/>"#, escape_xml(f)),
        None => String::new(),
    };
    let alpha_xml = if run.transparency > 0 {
        format!(r#"<a:alpha val="{}"/>"#, (100 - run.transparency) as i64 * 1000)
    } else {
        String::new()
    };
    format!(
        r#"<a:r><a:rPr lang="en-US" sz="{size}"{bold}{italic}{underline} dirty="0"><a:solidFill><a:srgbClr val="{color}">{alpha_xml}</a:srgbClr></a:solidFill>{font_xml}</a:rPr><a:t>{text}</a:t></a:r>"#,
        color = run.color.trim_start_matches('#').to_uppercase(),
        text = escape_xml(&run.text),
    )
}

/// `<a:pPr>` for a paragraph, including the bullet/indent setup for list
/// items (spec.md §4.4 rule 9: bullets carry their own indent, not a
/// margin on the shape).
pub fn paragraph_props_xml(
    align: Align,
    line_spacing_pt: Option<f64>,
    space_before_pt: f64,
    space_after_pt: f64,
    first_run: Option<&TextRunSpec>,
) -> String {
    let align_attr = format!(r#" algn="{}""#, align.xml_value());
    let line_spacing_xml = match line_spacing_pt {
        Some(pt) => format!(
            r#"<a:lnSpc><a:spcPts val="{}"/></a:lnSpc>"#,
            (pt * 100.0).round() as i64
        ),
        None => String::new(),
    };
    let before_xml = if space_before_pt > 0.0 {
        format!(r#"<a:spcBef><a:spcPts val="{}"/></a:spcBef>"#, (space_before_pt * 100.0).round() as i64)
    } else {
        String::new()
    };
    let after_xml = if space_after_pt > 0.0 {
        format!(r#"<a:spcAft><a:spcPts val="{}"/></a:spcAft>"#, (space_after_pt * 100.0).round() as i64)
    } else {
        String::new()
    };
    let (indent_attrs, bullet_xml) = match first_run.and_then(|r| r.bullet_indent_in) {
        Some(indent_in) => {
            let mar_l = (indent_in * 914_400.0).round() as i64;
            (
                format!(r#" marL="{mar_l}" indent="-228600""#),
                r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#.to_string(),
            )
        }
        None => (String::new(), "<a:buNone/>".to_string()),
    };
    format!(
        r#"<a:pPr{align_attr}{indent_attrs}>{line_spacing_xml}{before_xml}{after_xml}{bullet_xml}</a:pPr>"#
    )
}
