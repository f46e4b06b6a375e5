// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! One module per source page. Each spec encodes *where the ground truth lives
//! in the markup* (section titles, label sets, a few fixed CSS hooks) and how
//! to shape it into a record.
//!
//! ## What lives here
//! - Label tables and `SectionSpec`s per record kind, fed to `engine`.
//! - Derivations the generic extractor cannot do: insurance lapse state,
//!   validity range splitting, positional vehicle facts, challan cards.
//! - A thin `fetch` per spec: resolve the URL, get text, `parse`.
//!
//! ## What does **not** live here
//! - Label matching and section lookup (`core::label`, `core::html`).
//! - Identifier validation and multi-source merging (`params`, `scrape`).
//! - The JSON challan API; its shapes are handled in `reconcile`.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::lookup_* → specs::<page>::fetch → parse → assemble
//!                                                   ↘ engine::extract_*
//! ```
//!
//! ## Conventions & invariants
//! - `assemble` never fails: absent sections/fields come back empty, keys intact.
//! - Only `Document::parse` rejects input, before any field is read.
//! - Every spec is testable offline against saved pages.
pub mod challans;
pub mod dl;
pub mod rc;
