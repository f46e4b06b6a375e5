// src/engine/mod.rs
//! Shared section + label traversal. Record specs describe *which* labels to
//! read from *which* section; this module does the reading.
mod engine;
mod types;

pub use engine::{extract, extract_page, extract_section};
pub use types::{FieldMap, SectionSpec};
