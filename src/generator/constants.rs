//! Process-wide, never-mutated generation constants (design note §9: keep
//! these as immutable configuration, not globals with interior mutability).

/// EMU per inch — the PPTX geometry unit (GLOSSARY).
pub const EMU_PER_INCH: i64 = 914_400;

/// Default slide width in inches: 16:9 at 1280x720 / 96 dpi, per spec.md §6
/// ("13.333in x 7.5in recommended to match 1280x720 at 96 dpi").
pub const DEFAULT_SLIDE_WIDTH_IN: f64 = 13.333;
pub const DEFAULT_SLIDE_HEIGHT_IN: f64 = 7.5;

/// Device scale factor the orchestrator launches the browser context at
/// (spec.md §4.8: "3x device scale").
pub const DEFAULT_DEVICE_SCALE: f64 = 3.0;

/// Provisional viewport before the body is measured and the viewport is
/// resized to match it exactly (spec.md §4.8).
pub const PROVISIONAL_VIEWPORT: (u32, u32) = (1280, 720);
