//! Black-box integration tests for `html2pptx`.
//!
//! These exercise the parts of the pipeline that don't require a real
//! browser: package assembly end-to-end (`generator::Presentation::build`),
//! and the walker -> render path against a hand-built `CapturedNode` tree
//! (standing in for a DOM snapshot the browser would otherwise supply).

use html2pptx::browser::CapturedNode;
use html2pptx::generator::{BoxGeometry, ImageOptions, Presentation, TextBoxOptions, TextRunSpec};
use html2pptx::render::render_slide;
use html2pptx::walker::walk_slide;
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn open_zip(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
    ZipArchive::new(Cursor::new(bytes)).expect("output should be a valid zip archive")
}

#[test]
fn test_empty_deck_has_required_opc_parts() {
    let mut presentation = Presentation::new("Empty Deck");
    let bytes = presentation.build().expect("build should succeed with zero slides");
    let mut zip = open_zip(bytes);

    for required in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "docProps/app.xml",
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
    ] {
        assert!(zip.by_name(required).is_ok(), "missing required part: {required}");
    }
}

#[test]
fn test_deck_with_text_and_image_slide_has_slide_and_media_parts() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("pixel.png");
    let img = image::RgbImage::new(2, 2);
    image::DynamicImage::ImageRgb8(img)
        .save_with_format(&image_path, image::ImageFormat::Png)
        .expect("writing a tiny PNG fixture should not fail");

    let mut presentation = Presentation::new("Deck");
    presentation.set_slide_size(13.333, 7.5);
    let slide = presentation.add_slide();
    slide.add_text(
        &[TextRunSpec::plain("Hello deck", 24.0, "000000")],
        &TextBoxOptions {
            geometry: BoxGeometry { x_in: 1.0, y_in: 1.0, w_in: 4.0, h_in: 1.0, rotation_deg: None },
            ..Default::default()
        },
    );
    slide.add_image(
        image_path.to_str().unwrap(),
        &ImageOptions { geometry: BoxGeometry { x_in: 0.5, y_in: 0.5, w_in: 1.0, h_in: 1.0, rotation_deg: None } },
    );

    let bytes = presentation.build().expect("build should succeed");
    let mut zip = open_zip(bytes);

    assert!(zip.by_name("ppt/slides/slide1.xml").is_ok());
    assert!(zip.by_name("ppt/slides/_rels/slide1.xml.rels").is_ok());

    let media_names: Vec<String> = zip
        .file_names()
        .filter(|n| n.starts_with("ppt/media/"))
        .map(|s| s.to_string())
        .collect();
    assert_eq!(media_names.len(), 1, "expected exactly one embedded media part, found {media_names:?}");

    let mut slide_xml = String::new();
    zip.by_name("ppt/slides/slide1.xml")
        .unwrap()
        .read_to_string(&mut slide_xml)
        .unwrap();
    assert!(slide_xml.contains("Hello deck"));
    assert!(slide_xml.contains("p:pic"));
}

/// A minimal snapshot standing in for what the browser would capture for a
/// page with one heading and one bordered card, chosen to exercise the
/// walker's leaf-div-with-border path (spec.md §4.4 rule 8) plus a plain
/// text tag.
fn sample_snapshot() -> CapturedNode {
    let heading = CapturedNode {
        id: "h2p-1".into(),
        tag: "h1".into(),
        text_content: "Quarterly Report".into(),
        x: 0.5,
        y: 0.3,
        w: 5.0,
        h: 0.6,
        font_size_px: 32.0,
        is_block: true,
        is_visible: true,
        ..blank_node("h2p-0")
    };
    let card = CapturedNode {
        id: "h2p-2".into(),
        tag: "div".into(),
        x: 0.5,
        y: 1.2,
        w: 3.0,
        h: 2.0,
        background_color: "rgb(240, 240, 240)".into(),
        border_radius: "8px".into(),
        is_block: true,
        is_visible: true,
        ..blank_node("h2p-0")
    };
    CapturedNode {
        id: "h2p-0".into(),
        tag: "body".into(),
        x: 0.0,
        y: 0.0,
        w: 1280.0,
        h: 720.0,
        is_block: true,
        is_visible: true,
        children: vec![heading, card],
        ..blank_node("h2p-0")
    }
}

fn blank_node(id: &str) -> CapturedNode {
    CapturedNode {
        id: id.to_string(),
        tag: "div".into(),
        class: String::new(),
        text_content: String::new(),
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
        offset_w: 0.0,
        offset_h: 0.0,
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
        font_style: "normal".into(),
        font_family: String::new(),
        text_decoration: "none".into(),
        text_transform: "none".into(),
        text_align: "left".into(),
        writing_mode: "horizontal-tb".into(),
        transform: "none".into(),
        object_fit: String::new(),
        src: String::new(),
        padding_left_px: 0.0,
        is_block: false,
        is_flex: false,
        is_svg: false,
        is_visible: true,
        children: Vec::new(),
    }
}

#[test]
fn test_walk_then_render_produces_a_non_empty_slide() {
    let root = sample_snapshot();
    let mut slide_data = walk_slide(&root);
    slide_data.substitute_rasters();

    assert!(slide_data.errors.is_empty(), "unexpected fatal errors: {:?}", slide_data.errors);
    assert!(!slide_data.elements.is_empty());

    let mut presentation = Presentation::new("Walked Deck");
    let slide = presentation.add_slide();
    render_slide(&slide_data, slide, 13.333, 7.5);

    let xml = slide.to_xml();
    assert!(xml.contains("Quarterly Report"));
}
