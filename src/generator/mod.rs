//! The PPTX builder (spec.md §6 "PPTX builder contract (consumed)"):
//! a `Presentation` that owns zero or more [`Slide`]s, plus the fixed
//! layout/master/theme parts every deck needs, assembled into a `.pptx`
//! zip via [`crate::opc::Package`] — the same assembly path the teacher's
//! own integration tests exercised, generalized from a single hardcoded
//! 4:3 deck to an arbitrarily sized one.

pub mod constants;
pub mod package_xml;
pub mod slide;
pub mod slide_xml;
pub mod theme_xml;

pub use slide::{
    Align, Background, BoxGeometry, Fill, ImageOptions, LineStyle, ListOptions, Slide, ShadowStyle,
    ShapeKind, ShapeOptions, TextBoxOptions, TextRunSpec, VAlign,
};

use crate::exc::Result;
use crate::opc::Package;
use crate::parts::{create_content_types_xml, AppProperties, CoreProperties, ImagePartRef};
use std::collections::HashMap;
use std::path::Path;

/// A deck under construction. Slides are appended in order with
/// [`Presentation::add_slide`]; [`Presentation::build`] renders the whole
/// thing into a zip byte buffer.
pub struct Presentation {
    title: String,
    width_in: f64,
    height_in: f64,
    slides: Vec<Slide>,
    /// media path (on disk) -> assigned media filename, deduped so the same
    /// source image embedded on several slides only gets one media part.
    media: HashMap<String, String>,
}

impl Presentation {
    pub fn new(title: impl Into<String>) -> Self {
        Presentation {
            title: title.into(),
            width_in: constants::DEFAULT_SLIDE_WIDTH_IN,
            height_in: constants::DEFAULT_SLIDE_HEIGHT_IN,
            slides: Vec::new(),
            media: HashMap::new(),
        }
    }

    /// Override the default 16:9 slide size, e.g. to match an HTML page's
    /// measured body dimensions (spec.md §4.8).
    pub fn set_slide_size(&mut self, width_in: f64, height_in: f64) {
        self.width_in = width_in;
        self.height_in = height_in;
    }

    pub fn add_slide(&mut self) -> &mut Slide {
        self.slides.push(Slide::new());
        self.slides.last_mut().expect("just pushed")
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Look up an already-appended slide by index, e.g. one the caller
    /// pre-created via `add_slide` to hand back to `convertSlide` as
    /// `options.slide` (spec.md §6).
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    fn media_filename_for(&mut self, source_path: &str, index: usize) -> String {
        if let Some(existing) = self.media.get(source_path) {
            return existing.clone();
        }
        let ext = Path::new(source_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png")
            .to_lowercase();
        let name = format!("image{}.{ext}", index + 1);
        self.media.insert(source_path.to_string(), name.clone());
        name
    }

    /// Render every part and zip them into a `.pptx` byte buffer.
    pub fn build(&mut self) -> Result<Vec<u8>> {
        let mut package = Package::new();

        // Resolve media filenames before emitting content types / slide
        // rels, since both need the final extension list.
        let source_paths: Vec<String> = self
            .slides
            .iter()
            .flat_map(|s| s.pending_images().map(|(_, p)| p.to_string()).collect::<Vec<_>>())
            .collect();
        for source in &source_paths {
            if !self.media.contains_key(source) {
                let index = self.media.len();
                self.media_filename_for(source, index);
            }
        }
        let mut media_bytes: Vec<(String, Vec<u8>)> = Vec::new();
        for (source, name) in self.media.clone() {
            let bytes = std::fs::read(&source)?;
            media_bytes.push((name, bytes));
        }

        let image_refs: Vec<ImagePartRef> = self
            .media
            .values()
            .map(|name| {
                let ext = Path::new(name).extension().and_then(|e| e.to_str()).unwrap_or("png").to_string();
                ImagePartRef { name: name.clone(), extension: ext }
            })
            .collect();

        package.add_part(
            "[Content_Types].xml".to_string(),
            create_content_types_xml(self.slides.len(), &image_refs).into_bytes(),
        );
        package.add_part("_rels/.rels".to_string(), package_xml::create_rels_xml().into_bytes());
        package.add_part(
            "docProps/core.xml".to_string(),
            CoreProperties::new(&self.title).to_xml().into_bytes(),
        );
        package.add_part(
            "docProps/app.xml".to_string(),
            AppProperties::new(self.slides.len() as u32).to_xml().into_bytes(),
        );
        package.add_part(
            "ppt/presentation.xml".to_string(),
            package_xml::create_presentation_xml(self.width_in, self.height_in, self.slides.len()).into_bytes(),
        );
        package.add_part(
            "ppt/_rels/presentation.xml.rels".to_string(),
            package_xml::create_presentation_rels_xml(self.slides.len()).into_bytes(),
        );
        package.add_part(
            "ppt/slideMasters/slideMaster1.xml".to_string(),
            theme_xml::create_slide_master_xml().into_bytes(),
        );
        package.add_part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            theme_xml::create_master_rels_xml().into_bytes(),
        );
        package.add_part(
            "ppt/slideLayouts/slideLayout1.xml".to_string(),
            theme_xml::create_slide_layout_xml().into_bytes(),
        );
        package.add_part(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
            theme_xml::create_layout_rels_xml().into_bytes(),
        );
        package.add_part("ppt/theme/theme1.xml".to_string(), theme_xml::create_theme_xml().into_bytes());

        for (i, slide) in self.slides.iter().enumerate() {
            let n = i + 1;
            package.add_part(format!("ppt/slides/slide{n}.xml"), slide.to_xml().into_bytes());
            package.add_part(format!("ppt/slides/_rels/slide{n}.xml.rels"), self.slide_rels_xml(slide).into_bytes());
        }

        for (name, bytes) in media_bytes {
            package.add_part(format!("ppt/media/{name}"), bytes);
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        package.save_writer(&mut buf)?;
        Ok(buf.into_inner())
    }

    fn slide_rels_xml(&self, slide: &Slide) -> String {
        use crate::parts::{Relationship, Relationships, PartType};
        let mut rels = Relationships::new();
        rels.push(Relationship::new("rId1", PartType::SlideLayout, "../slideLayouts/slideLayout1.xml"));
        for (rel_id, source_path) in slide.pending_images() {
            let name = self.media.get(source_path).cloned().unwrap_or_else(|| "image1.png".to_string());
            rels.push(Relationship::new(rel_id, PartType::Image, format!("../media/{name}")));
        }
        rels.to_xml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_presentation_builds_valid_zip() {
        let mut pres = Presentation::new("Untitled");
        let bytes = pres.build().expect("build should succeed with zero slides");
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_presentation_with_one_text_slide() {
        let mut pres = Presentation::new("Deck");
        let slide = pres.add_slide();
        slide.add_text(
            &[TextRunSpec::plain("Hello", 24.0, "000000")],
            &TextBoxOptions {
                geometry: BoxGeometry { x_in: 1.0, y_in: 1.0, w_in: 4.0, h_in: 1.0, rotation_deg: None },
                ..Default::default()
            },
        );
        let bytes = pres.build().expect("build should succeed");
        assert!(bytes.len() > 100);
    }

    #[test]
    fn test_media_filenames_dedup_same_source() {
        let mut pres = Presentation::new("Deck");
        {
            let slide = pres.add_slide();
            slide.add_image(
                "/tmp/does-not-exist.png",
                &ImageOptions { geometry: BoxGeometry { x_in: 0.0, y_in: 0.0, w_in: 1.0, h_in: 1.0, rotation_deg: None } },
            );
        }
        // build() will fail trying to read the nonexistent file, which is
        // expected here — this test only exercises filename assignment via
        // media_filename_for, not a full successful build.
        let name1 = pres.media_filename_for("/tmp/a.png", 0);
        let name2 = pres.media_filename_for("/tmp/a.png", 1);
        assert_eq!(name1, name2);
    }
}
