// src/engine/engine.rs
use tracing::debug;

use crate::core::html::{Document, Scope};
use crate::core::label::LabelIndex;
use crate::core::sanitize::canonical_key;
use crate::engine::types::*;

/// Resolve each label inside `scope` independently. A `None` scope (absent
/// section) still yields every key, all empty.
pub fn extract(index: &LabelIndex<'_>, scope: Option<Scope<'_>>, labels: &[&str]) -> FieldMap {
    let Some(scope) = scope else {
        return FieldMap::empty(labels);
    };
    labels
        .iter()
        .map(|label| {
            let value = index.find(scope, label).unwrap_or_default();
            (canonical_key(label), value)
        })
        .collect()
}

/// Section lookup + extraction in one go.
pub fn extract_section(index: &LabelIndex<'_>, doc: &Document, spec: &SectionSpec) -> FieldMap {
    let scope = doc.section(spec.header);
    let fields = extract(index, scope, spec.labels);
    if fields.is_blank() {
        debug!(section = spec.header, "section yielded no values");
    }
    fields
}

/// Labels read from the whole page rather than a titled section.
pub fn extract_page(index: &LabelIndex<'_>, doc: &Document, labels: &[&str]) -> FieldMap {
    extract(index, Some(doc.root()), labels)
}
