//! Raster capture (C5): turns each `RasterRequest` the walker recorded into
//! a PNG on disk via the browser, mutating the live page just long enough to
//! isolate the element, then restoring it (spec.md §4.5).
//!
//! This is the one module that drives the browser past the initial DOM
//! snapshot C4 works from — everything upstream of here only ever reads the
//! static `CapturedNode` tree.

use crate::browser::BrowserPage;
use crate::model::{RasterRequest, SlideData};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

const SCREENSHOT_TIMEOUT: Duration = Duration::from_secs(1);

/// Capture every pending raster request against `page`, writing PNGs under
/// `tmp_dir` and filling in `slide.raster_results`. A capture failure is
/// never fatal (spec.md §4.5, §7): it is logged and the placeholder is left
/// unresolved, to be dropped later by [`crate::model::SlideData::substitute_rasters`].
pub fn capture_rasters(page: &dyn BrowserPage, slide: &mut SlideData, tmp_dir: &Path, html_path: &str) {
    let requests = slide.raster_requests.clone();
    for request in &requests {
        match capture_one(page, request, tmp_dir) {
            Ok(png_path) => {
                slide.raster_results.insert(request.id.clone(), png_path);
            }
            Err(err) => {
                warn!(html_path, element_id = %request.id, error = %err, "raster capture failed, dropping placeholder");
            }
        }
    }
}

fn capture_one(page: &dyn BrowserPage, request: &RasterRequest, tmp_dir: &Path) -> crate::exc::Result<String> {
    isolate_element(page, &request.id, request.hide_children)?;
    let result = page.screenshot_element(&request.id, SCREENSHOT_TIMEOUT);
    // Always attempt to restore the page, even if the screenshot itself
    // failed, so a single bad element doesn't corrupt the ones after it.
    let restore_result = restore_element(page, &request.id, request.hide_children);
    let bytes = result?;
    restore_result?;

    // `screenshot_element` handing back garbage (a truncated buffer, an
    // error page CDP serialized as bytes) should be treated the same as a
    // raster-failure warning rather than silently embedding a broken image
    // part (spec.md §7: raster-failure is a warning, placeholder dropped).
    image::load_from_memory(&bytes).map_err(|e| crate::exc::PptxError::BrowserFailure(format!("captured screenshot is not a decodable image: {e}")))?;

    // Element ids are only unique within one HTML file's snapshot; a deck
    // built from several files sharing one `tmp_dir` would otherwise risk
    // one file's raster silently overwriting another's with the same id.
    let filename = format!("{}-{}.png", request.id, uuid::Uuid::new_v4());
    let path = tmp_dir.join(&filename);
    std::fs::write(&path, &bytes)?;
    Ok(path.to_string_lossy().into_owned())
}

/// Steps 1-4 of spec.md §4.5, issued as one `execute_script` call so the
/// mutation and its later restoration bracket the screenshot atomically
/// from the orchestrator's point of view.
fn isolate_element(page: &dyn BrowserPage, element_id: &str, hide_children: bool) -> crate::exc::Result<()> {
    let script = format!(
        r#"
(function() {{
    var target = document.querySelector('[data-h2p-id="{id}"]');
    if (!target) return;
    var style = getComputedStyle(target);
    var radius = style.borderRadius || '0';
    target.setAttribute('data-h2p-prev-clip', target.style.clipPath || '');
    target.style.clipPath = 'inset(0 round ' + radius + ')';

    if ({hide_children}) {{
        var descendants = target.querySelectorAll('*');
        for (var i = 0; i < descendants.length; i++) {{
            var d = descendants[i];
            d.setAttribute('data-h2p-prev-opacity', d.style.opacity || '');
            d.style.opacity = '0';
        }}
        target.setAttribute('data-h2p-prev-color', target.style.color || '');
        target.style.color = 'transparent';
    }}

    var ancestor = target.parentElement;
    while (ancestor) {{
        ancestor.setAttribute('data-h2p-prev-bg', ancestor.style.background || '');
        ancestor.style.background = 'none';
        ancestor = ancestor.parentElement;
    }}

    var rect = target.getBoundingClientRect();
    var all = document.querySelectorAll('body *');
    for (var j = 0; j < all.length; j++) {{
        var el = all[j];
        if (el === target || target.contains(el) || el.contains(target)) continue;
        var r = el.getBoundingClientRect();
        var overlaps = !(r.right <= rect.left || r.left >= rect.right || r.bottom <= rect.top || r.top >= rect.bottom);
        if (overlaps) {{
            el.setAttribute('data-h2p-hidden', '1');
            el.setAttribute('data-h2p-prev-visibility', el.style.visibility || '');
            el.style.visibility = 'hidden';
        }}
    }}
}})();
"#,
        id = escape_js(element_id),
        hide_children = hide_children,
    );
    page.execute_script(&script)
}

/// Undo every mutation `isolate_element` made, step 6 of spec.md §4.5.
fn restore_element(page: &dyn BrowserPage, element_id: &str, hide_children: bool) -> crate::exc::Result<()> {
    let script = format!(
        r#"
(function() {{
    var target = document.querySelector('[data-h2p-id="{id}"]');
    if (target) {{
        target.style.clipPath = target.getAttribute('data-h2p-prev-clip') || '';
        target.removeAttribute('data-h2p-prev-clip');
        if ({hide_children}) {{
            var descendants = target.querySelectorAll('*');
            for (var i = 0; i < descendants.length; i++) {{
                var d = descendants[i];
                d.style.opacity = d.getAttribute('data-h2p-prev-opacity') || '';
                d.removeAttribute('data-h2p-prev-opacity');
            }}
            target.style.color = target.getAttribute('data-h2p-prev-color') || '';
            target.removeAttribute('data-h2p-prev-color');
        }}
        var ancestor = target.parentElement;
        while (ancestor) {{
            ancestor.style.background = ancestor.getAttribute('data-h2p-prev-bg') || '';
            ancestor.removeAttribute('data-h2p-prev-bg');
            ancestor = ancestor.parentElement;
        }}
    }}
    var hidden = document.querySelectorAll('[data-h2p-hidden]');
    for (var j = 0; j < hidden.length; j++) {{
        var el = hidden[j];
        el.style.visibility = el.getAttribute('data-h2p-prev-visibility') || '';
        el.removeAttribute('data-h2p-prev-visibility');
        el.removeAttribute('data-h2p-hidden');
    }}
}})();
"#,
        id = escape_js(element_id),
        hide_children = hide_children,
    );
    page.execute_script(&script)
}

fn escape_js(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exc::{PptxError, Result};
    use crate::model::Position;
    use std::cell::RefCell;

    struct FakePage {
        executed: RefCell<Vec<String>>,
        screenshot_result: Result<Vec<u8>>,
    }

    impl FakePage {
        fn ok(bytes: Vec<u8>) -> Self {
            FakePage { executed: RefCell::new(Vec::new()), screenshot_result: Ok(bytes) }
        }
        fn failing() -> Self {
            FakePage { executed: RefCell::new(Vec::new()), screenshot_result: Err(PptxError::BrowserFailure("no such element".into())) }
        }
    }

    impl BrowserPage for FakePage {
        fn navigate_file(&self, _path: &std::path::Path) -> Result<()> {
            Ok(())
        }
        fn wait_network_idle(&self, _extra_settle: Duration) -> Result<()> {
            Ok(())
        }
        fn set_viewport(&self, _w: u32, _h: u32, _scale: f64) -> Result<()> {
            Ok(())
        }
        fn evaluate_json(&self, _script: &str) -> Result<String> {
            Ok("{}".to_string())
        }
        fn body_dimensions(&self) -> Result<(f64, f64)> {
            Ok((1280.0, 720.0))
        }
        fn execute_script(&self, script: &str) -> Result<()> {
            self.executed.borrow_mut().push(script.to_string());
            Ok(())
        }
        fn screenshot_element(&self, _element_id: &str, _timeout: Duration) -> Result<Vec<u8>> {
            match &self.screenshot_result {
                Ok(bytes) => Ok(bytes.clone()),
                Err(_) => Err(PptxError::BrowserFailure("no such element".into())),
            }
        }
    }

    fn tiny_png_bytes() -> Vec<u8> {
        let img = image::RgbImage::new(1, 1);
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("encoding a 1x1 PNG should never fail");
        buf.into_inner()
    }

    #[test]
    fn test_capture_rasters_writes_png_and_fills_results() {
        let dir = tempfile::tempdir().unwrap();
        let page = FakePage::ok(tiny_png_bytes());
        let mut slide = SlideData::new();
        slide.raster_requests.push(RasterRequest { id: "el1".into(), position: Position::new(0.0, 0.0, 1.0, 1.0), hide_children: true });

        capture_rasters(&page, &mut slide, dir.path(), "a.html");

        assert_eq!(slide.raster_results.len(), 1);
        let path = slide.raster_results.get("el1").unwrap();
        assert!(Path::new(path).exists());
        assert_eq!(page.executed.borrow().len(), 2); // isolate + restore
    }

    #[test]
    fn test_capture_rasters_drops_undecodable_screenshot_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let page = FakePage::ok(vec![0x89, b'P', b'N', b'G']); // magic bytes only, not a real image
        let mut slide = SlideData::new();
        slide.raster_requests.push(RasterRequest { id: "bad".into(), position: Position::new(0.0, 0.0, 1.0, 1.0), hide_children: false });

        capture_rasters(&page, &mut slide, dir.path(), "a.html");

        assert!(slide.raster_results.is_empty());
    }

    #[test]
    fn test_capture_rasters_failure_is_non_fatal_and_leaves_placeholder_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let page = FakePage::failing();
        let mut slide = SlideData::new();
        slide.raster_requests.push(RasterRequest { id: "el2".into(), position: Position::new(0.0, 0.0, 1.0, 1.0), hide_children: false });

        capture_rasters(&page, &mut slide, dir.path(), "a.html");

        assert!(slide.raster_results.is_empty());
    }

    #[test]
    fn test_restore_runs_even_when_screenshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let page = FakePage::failing();
        let mut slide = SlideData::new();
        slide.raster_requests.push(RasterRequest { id: "el3".into(), position: Position::new(0.0, 0.0, 1.0, 1.0), hide_children: false });

        capture_rasters(&page, &mut slide, dir.path(), "a.html");

        assert_eq!(page.executed.borrow().len(), 2);
    }
}
