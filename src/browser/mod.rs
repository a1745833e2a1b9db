//! The browser engine contract (spec.md §6, "consumed") and its
//! `headless_chrome` implementation, plus the pre-materialised style tree
//! ([`snapshot::CapturedNode`]) that is the only thing C2/C3/C4 ever see.

pub mod chrome;
pub mod engine;
pub mod snapshot;

pub use chrome::{ChromeEngine, ChromePage};
pub use engine::{BrowserEngine, BrowserPage};
pub use snapshot::{CapturedNode, SNAPSHOT_SCRIPT};
