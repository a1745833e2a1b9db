//! The browser engine contract spec.md §6 requires the core to consume:
//! navigate, wait-for-idle, set viewport, evaluate script, locate by id,
//! element-bounded screenshot. Defined as a trait so the walker/raster
//! modules' tests can run against a fake without a real browser, and so a
//! different CDP client could be swapped in without touching C2–C7.

use crate::exc::Result;
use std::time::Duration;

/// One page/tab under the orchestrator's control for the lifetime of a
/// single HTML file (spec.md §5: "single-threaded cooperative around the
/// browser").
pub trait BrowserPage {
    fn navigate_file(&self, path: &std::path::Path) -> Result<()>;

    /// Wait for the network-idle condition, then the fixed settle delay
    /// spec.md §4.8 calls for ("plus 500 ms for dynamic charts/JIT CSS").
    fn wait_network_idle(&self, extra_settle: Duration) -> Result<()>;

    fn set_viewport(&self, width: u32, height: u32, device_scale: f64) -> Result<()>;

    /// Evaluate `script` against the live DOM and return its JSON-stringified
    /// result. Used exactly once per page, to run
    /// [`crate::browser::snapshot::SNAPSHOT_SCRIPT`].
    fn evaluate_json(&self, script: &str) -> Result<String>;

    /// Body's natural (scroll) width/height in CSS px, used to resize the
    /// viewport to the slide canvas before capture (spec.md §4.8).
    fn body_dimensions(&self) -> Result<(f64, f64)>;

    /// Run arbitrary mutating JS against the page (raster capture's
    /// opacity/clip-path/background mutations, spec.md §4.5) and return
    /// whether it succeeded.
    fn execute_script(&self, script: &str) -> Result<()>;

    /// Screenshot the element with the given DOM id, background omitted,
    /// within a short bounded timeout (spec.md §4.5, §5: "screenshot 1s").
    fn screenshot_element(&self, element_id: &str, timeout: Duration) -> Result<Vec<u8>>;
}

/// A browser context capable of opening pages; the orchestrator launches
/// or reuses one of these per run (spec.md §4.8).
pub trait BrowserEngine {
    type Page: BrowserPage;

    fn new_page(&self) -> Result<Self::Page>;
}
