// src/core/mod.rs

pub mod html;
pub mod label;
pub mod net;
pub mod sanitize;

pub use html::{Document, Scope};
pub use label::{LabelIndex, LabelMatcher, PrefixMatcher, SubstringMatcher};
pub use net::{Fetch, HttpFetch, StaticFetch};
