//! Package parts module
//!
//! Provides the content-type/relationship-type vocabulary and the small
//! metadata parts (docProps) that every PPTX package carries regardless of
//! what is on its slides. The slide/layout/master/theme XML bodies
//! themselves live in [`crate::generator`], which is the path the teacher's
//! own integration tests actually exercised — this module stays focused on
//! the package-level bookkeeping around them.
//!
//! # Part types
//!
//! - **ContentType / PartType** — MIME and relationship-type vocabulary
//! - **Relationships** — `.rels` part generation
//! - **ContentTypesPart** — `[Content_Types].xml`
//! - **CoreProperties / AppProperties** — `docProps/core.xml`, `docProps/app.xml`

pub mod app_props;
pub mod base;
pub mod content_types;
pub mod coreprops;
pub mod relationships;

pub use app_props::AppProperties;
pub use base::{ContentType, PartType};
pub use content_types::{ImagePartRef, create_content_types_xml};
pub use coreprops::CoreProperties;
pub use relationships::{Relationship, Relationships};
