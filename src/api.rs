//! Public API surface: re-exports the PPTX builder's `Presentation` (C6's
//! consumer-facing type) and the orchestrator's (C8) `ConvertOptions`/
//! `ConvertedSlide`, plus a couple of convenience entry points the CLI
//! (`crate::cli`) and library consumers call directly rather than reaching
//! into `crate::orchestrator` themselves.

use crate::exc::Result;
use crate::opc::Package;
use crate::orchestrator;
use std::io::{Read, Seek};
use std::path::Path;

pub use crate::generator::Presentation;
pub use crate::orchestrator::{ConvertOptions, ConvertedSlide};

/// Convert a single HTML slide file into `presentation`, appending one
/// slide (spec.md §6: `convertSlide(htmlPath, presentation, options)`).
pub fn convert_html_file(html_path: &Path, presentation: &mut Presentation, options: &ConvertOptions) -> Result<ConvertedSlide> {
    orchestrator::convert_slide(html_path, presentation, options)
}

/// Convert a whole deck of HTML slide files into one PPTX byte buffer,
/// reusing a single browser context across all of them (spec.md §4.8:
/// "launch or reuse a headless browser context").
pub fn build_presentation(title: &str, html_paths: &[impl AsRef<Path>], options: &ConvertOptions) -> Result<Vec<u8>> {
    let engine = crate::browser::ChromeEngine::launch()?;
    let mut presentation = Presentation::new(title);
    for path in html_paths {
        orchestrator::convert_slide_with_engine(&engine, path.as_ref(), &mut presentation, options)?;
    }
    presentation.build()
}

/// Open an existing PPTX file as a raw OPC package, e.g. to inspect parts
/// before re-writing them.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Package> {
    Package::open(path)
}

/// Open an existing PPTX from any reader (e.g. an in-memory buffer) as a
/// raw OPC package.
pub fn open_reader<R: Read + Seek>(reader: R) -> Result<Package> {
    Package::open_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_starts_empty() {
        let pres = Presentation::new("Untitled");
        assert_eq!(pres.slide_count(), 0);
    }

    #[test]
    fn test_convert_options_default_tmp_dir_is_os_temp() {
        let options = ConvertOptions::default();
        assert_eq!(options.tmp_dir, std::env::temp_dir());
    }
}
