//! Core primitives shared across the pipeline: XML helpers, unit and color
//! conversion (C1).

pub mod units;
pub mod xml_utils;

pub use units::{Color, TextTransform, extract_alpha, is_single_weight_font, parse_css_color, text_transform};
