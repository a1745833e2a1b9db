//! Package-level XML: the root `_rels/.rels`, `ppt/presentation.xml`, and
//! `ppt/_rels/presentation.xml.rels`. `[Content_Types].xml` itself moved to
//! [`crate::parts::content_types`] once images entered the picture — it
//! needs to know about every image extension across every slide, which
//! this module has no visibility into.

use crate::parts::{PartType, Relationship, Relationships};

/// `_rels/.rels` — the package's single fixed entry point, pointing at the
/// presentation part and the two docProps parts.
pub fn create_rels_xml() -> String {
    let mut rels = Relationships::new();
    rels.push(Relationship::new("rId1", PartType::Presentation, "ppt/presentation.xml"));
    rels.push(Relationship::new("rId2", PartType::CoreProperties, "docProps/core.xml"));
    rels.push(Relationship::new("rId3", PartType::ExtendedProperties, "docProps/app.xml"));
    rels.to_xml()
}

/// `ppt/_rels/presentation.xml.rels` — master, theme, then one relationship
/// per slide in order.
pub fn create_presentation_rels_xml(slide_count: usize) -> String {
    let mut rels = Relationships::new();
    rels.push(Relationship::new("rId1", PartType::SlideMaster, "slideMasters/slideMaster1.xml"));
    rels.push(Relationship::new("rId2", PartType::Theme, "theme/theme1.xml"));
    for i in 1..=slide_count {
        let rid = format!("rId{}", i + 2);
        rels.push(Relationship::new(rid, PartType::Slide, format!("slides/slide{i}.xml")));
    }
    rels.to_xml()
}

/// `ppt/presentation.xml`. `width_in`/`height_in` come from
/// [`crate::generator::constants::DEFAULT_SLIDE_WIDTH_IN`]/`_HEIGHT_IN` by
/// default, but the orchestrator is free to size the deck to whatever the
/// captured HTML page measured (spec.md §4.8: viewport is resized to the
/// body's natural size before capture).
pub fn create_presentation_xml(width_in: f64, height_in: f64, slide_count: usize) -> String {
    let cx = crate::util::inches(width_in).emu();
    let cy = crate::util::inches(height_in).emu();
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
<p:sldMasterIdLst>
<p:sldMasterId id="2147483648" r:id="rId1"/>
</p:sldMasterIdLst>
<p:sldIdLst>"#
    );

    for i in 1..=slide_count {
        let id = 256 + i;
        let rid = i + 2;
        xml.push_str(&format!("\n<p:sldId id=\"{id}\" r:id=\"rId{rid}\"/>"));
    }

    xml.push_str(&format!(
        r#"
</p:sldIdLst>
<p:sldSz cx="{cx}" cy="{cy}" type="custom"/>
<p:notesSz cx="{cy}" cy="{cx}"/>
</p:presentation>"#
    ));
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_rels_orders_slides_after_master_and_theme() {
        let xml = create_presentation_rels_xml(2);
        assert!(xml.contains("slideMaster1.xml"));
        assert!(xml.contains("rId3"));
        assert!(xml.contains("slides/slide1.xml"));
        assert!(xml.contains("slides/slide2.xml"));
    }

    #[test]
    fn test_presentation_xml_sizes_to_widescreen_default() {
        let xml = create_presentation_xml(13.333, 7.5, 1);
        assert!(xml.contains("cx=\"1219"));
    }

    #[test]
    fn test_presentation_xml_lists_every_slide() {
        let xml = create_presentation_xml(10.0, 7.5, 3);
        assert_eq!(xml.matches("p:sldId").count(), 3);
    }
}
