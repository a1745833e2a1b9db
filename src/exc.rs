//! Crate-wide error type.
//!
//! Mirrors the failure taxonomy in SPEC_FULL.md §7: most variants here are
//! *fatal* (abort the conversion), while raster failures and style/geometry
//! warnings never construct a `PptxError` at all — they are accumulated as
//! strings in `model::SlideData::errors` and logged via `tracing::warn!`
//! instead (see `validate`).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PptxError>;

#[derive(Error, Debug)]
pub enum PptxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("unsupported CSS: {0}")]
    UnsupportedCss(String),

    #[error("structural prohibition: {0}")]
    StructuralProhibition(String),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("browser failure: {0}")]
    BrowserFailure(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Generic(String),
}
