//! Orchestrator (C8): the per-HTML-file pipeline spec.md §4.8 describes,
//! tying the browser (C2/C4 input), the walker (C4), raster capture (C5),
//! the validator (C7), and the renderer (C6) together into the single
//! callable surface spec.md §6 names: `convertSlide(htmlPath, presentation,
//! options) -> {slide, placeholders}`.

use crate::browser::{BrowserEngine, BrowserPage, CapturedNode, SNAPSHOT_SCRIPT};
use crate::exc::{PptxError, Result};
use crate::generator::{constants, Presentation, Slide};
use crate::model::Placeholder;
use crate::raster;
use crate::render;
use crate::validate;
use crate::walker::walk_slide;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Process-wide knobs spec.md §4.8 calls out by name; always threaded
/// explicitly rather than read from globals (design note §9).
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Where captured rasters are written. Defaults to the OS temp dir.
    pub tmp_dir: PathBuf,
    pub device_scale: f64,
    pub viewport: (u32, u32),
    /// Extra settle time after network-idle, for dynamic charts/JIT CSS
    /// (spec.md §4.8).
    pub network_idle_timeout: Duration,
    /// Index of an already-appended slide to populate instead of creating a
    /// new one (spec.md §6: "`slide` (optional pre-created slide to
    /// populate; otherwise a new slide is appended)"). The caller obtains
    /// this by calling `Presentation::add_slide` themselves beforehand and
    /// recording its index.
    pub target_slide: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            tmp_dir: std::env::temp_dir(),
            device_scale: constants::DEFAULT_DEVICE_SCALE,
            viewport: constants::PROVISIONAL_VIEWPORT,
            network_idle_timeout: Duration::from_millis(500),
            target_slide: None,
        }
    }
}

/// The per-file result `convertSlide` hands back (spec.md §6): the chart
/// placeholders recorded during the walk, for the caller to inject charts
/// into after the fact.
#[derive(Debug, Clone)]
pub struct ConvertedSlide {
    pub placeholders: Vec<Placeholder>,
}

/// Run the full C2-through-C7 pipeline for one HTML file against a
/// pre-created slide, then render the result into it (C6). `presentation`
/// supplies the slide's declared dimensions (spec.md §4.8: "resize viewport
/// to the body's integer pixel size" is relative to this canvas).
pub fn convert_slide(html_path: &Path, presentation: &mut Presentation, options: &ConvertOptions) -> Result<ConvertedSlide> {
    let engine = crate::browser::ChromeEngine::launch()?;
    convert_slide_with_engine(&engine, html_path, presentation, options)
}

/// Same pipeline, but against an already-launched engine — lets the caller
/// reuse one browser context across many slides (spec.md §4.8: "launch or
/// reuse").
pub fn convert_slide_with_engine<E: BrowserEngine>(
    engine: &E,
    html_path: &Path,
    presentation: &mut Presentation,
    options: &ConvertOptions,
) -> Result<ConvertedSlide> {
    let page = engine.new_page()?;
    let html_path_str = html_path.to_string_lossy().into_owned();

    page.set_viewport(options.viewport.0, options.viewport.1, options.device_scale)?;
    page.navigate_file(html_path)?;
    page.wait_network_idle(options.network_idle_timeout)?;

    let (scroll_w, scroll_h) = page.body_dimensions()?;
    let body_w = scroll_w.round().max(1.0) as u32;
    let body_h = scroll_h.round().max(1.0) as u32;
    page.set_viewport(body_w, body_h, options.device_scale)?;

    // The deck's declared layout size, prior to this file's own measurement
    // resizing it (spec.md §4.7: compared only for the mismatch warning).
    let declared_w_in = constants::DEFAULT_SLIDE_WIDTH_IN;
    let declared_h_in = constants::DEFAULT_SLIDE_HEIGHT_IN;
    let slide_w_in = crate::util::px(body_w as f64).inches();
    let slide_h_in = crate::util::px(body_h as f64).inches();

    validate::validate_pre_walk(&html_path_str, body_w as f64, body_h as f64, scroll_w, scroll_h, declared_w_in, declared_h_in);

    let snapshot_json = page.evaluate_json(SNAPSHOT_SCRIPT)?;
    let root: CapturedNode = serde_json::from_str(&snapshot_json)
        .map_err(|e| PptxError::BrowserFailure(format!("failed to parse DOM snapshot: {e}")))?;

    let mut slide_data = walk_slide(&root);

    raster::capture_rasters(&page, &mut slide_data, &options.tmp_dir, &html_path_str);
    slide_data.substitute_rasters();

    validate::validate_post_walk(&html_path_str, &slide_data, slide_h_in);
    validate::check_fatal(&html_path_str, &slide_data)?;

    let placeholders = slide_data.placeholders.clone();

    presentation.set_slide_size(slide_w_in, slide_h_in);
    let slide: &mut Slide = match options.target_slide {
        Some(index) => presentation
            .slide_mut(index)
            .ok_or_else(|| PptxError::Validation(format!("{html_path_str}: target_slide index {index} out of range")))?,
        None => presentation.add_slide(),
    };
    render::render_slide(&slide_data, slide, slide_w_in, slide_h_in);

    Ok(ConvertedSlide { placeholders })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakePage {
        navigated: RefCell<bool>,
    }

    impl BrowserPage for FakePage {
        fn navigate_file(&self, _path: &Path) -> Result<()> {
            *self.navigated.borrow_mut() = true;
            Ok(())
        }
        fn wait_network_idle(&self, _extra_settle: Duration) -> Result<()> {
            Ok(())
        }
        fn set_viewport(&self, _w: u32, _h: u32, _scale: f64) -> Result<()> {
            Ok(())
        }
        fn evaluate_json(&self, _script: &str) -> Result<String> {
            Ok(r#"{"id":"h2p-0","tag":"body","x":0.0,"y":0.0,"w":1280.0,"h":720.0,"isBlock":true,"isVisible":true,"children":[]}"#.to_string())
        }
        fn body_dimensions(&self) -> Result<(f64, f64)> {
            Ok((1280.0, 720.0))
        }
        fn execute_script(&self, _script: &str) -> Result<()> {
            Ok(())
        }
        fn screenshot_element(&self, _element_id: &str, _timeout: Duration) -> Result<Vec<u8>> {
            Ok(vec![])
        }
    }

    struct FakeEngine;

    impl BrowserEngine for FakeEngine {
        type Page = FakePage;
        fn new_page(&self) -> Result<Self::Page> {
            Ok(FakePage { navigated: RefCell::new(false) })
        }
    }

    #[test]
    fn test_convert_slide_with_engine_adds_one_slide() {
        let engine = FakeEngine;
        let mut presentation = Presentation::new("Test Deck");
        let options = ConvertOptions { tmp_dir: std::env::temp_dir(), ..ConvertOptions::default() };

        let result = convert_slide_with_engine(&engine, Path::new("slide.html"), &mut presentation, &options);

        assert!(result.is_ok());
        assert_eq!(presentation.slide_count(), 1);
    }

    #[test]
    fn test_convert_options_default_uses_spec_constants() {
        let options = ConvertOptions::default();
        assert_eq!(options.device_scale, constants::DEFAULT_DEVICE_SCALE);
        assert_eq!(options.viewport, constants::PROVISIONAL_VIEWPORT);
    }
}
