// src/core/label.rs
//! Label → value lookup inside a scope.
//!
//! Pages print a field as a *marker* element holding the label text followed,
//! at some nesting depth, by a *value* element:
//!
//! ```text
//! <div><span>Owner Name</span><p>RAM KUMAR</p></div>
//! <tr><th>Fuel Type</th><td>PETROL</td></tr>
//! <dl><dt>RTO</dt><dd>LUCKNOW</dd></dl>
//! ```
//!
//! Which marker a label refers to is decided by a [`LabelMatcher`]; the value
//! is then the nearest value element after that marker in document order, as
//! long as no other marker comes first.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::trace;

use super::html::{Scope, raw_text, selector, text_of};
use super::sanitize::{fold, normalize_ws};
use crate::config::consts::{MARKER_SELECTOR, VALUE_SELECTOR};

static MARKERS: LazyLock<Selector> = LazyLock::new(|| selector(MARKER_SELECTOR));
static VALUES: LazyLock<Selector> = LazyLock::new(|| selector(VALUE_SELECTOR));

/// Strategy for picking the marker element a label refers to.
pub trait LabelMatcher: Send + Sync {
    fn locate<'a>(&self, scope: Scope<'a>, label: &str) -> Option<ElementRef<'a>>;
}

/// First marker whose text *contains* the label, case-insensitive.
/// Tolerates trailing colons and casing drift between pages.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubstringMatcher;

impl LabelMatcher for SubstringMatcher {
    fn locate<'a>(&self, scope: Scope<'a>, label: &str) -> Option<ElementRef<'a>> {
        first_marker(scope, label, |text, needle| text.contains(needle))
    }
}

/// First marker whose text *starts with* the label, case-insensitive.
/// For label sets where one label is a substring of another
/// ("Transport" inside "Non-Transport").
#[derive(Clone, Copy, Debug, Default)]
pub struct PrefixMatcher;

impl LabelMatcher for PrefixMatcher {
    fn locate<'a>(&self, scope: Scope<'a>, label: &str) -> Option<ElementRef<'a>> {
        first_marker(scope, label, |text, needle| text.starts_with(needle))
    }
}

fn first_marker<'a>(
    scope: Scope<'a>,
    label: &str,
    hit: impl Fn(&str, &str) -> bool,
) -> Option<ElementRef<'a>> {
    let needle = fold(label);
    if needle.is_empty() {
        return None;
    }
    scope.select(&MARKERS).find(|m| hit(&fold(&raw_text(*m)), &needle))
}

pub struct LabelIndex<'m> {
    matcher: &'m dyn LabelMatcher,
}

impl Default for LabelIndex<'static> {
    fn default() -> Self {
        Self { matcher: &SubstringMatcher }
    }
}

impl<'m> LabelIndex<'m> {
    pub fn new(matcher: &'m dyn LabelMatcher) -> Self {
        Self { matcher }
    }

    /// Value text for `label` inside `scope`, or `None` when either the
    /// marker or its value is missing.
    pub fn find(&self, scope: Scope<'_>, label: &str) -> Option<String> {
        let marker = self.matcher.locate(scope, label)?;
        let value = value_for(scope, marker);
        if value.is_none() {
            trace!(label, "marker found without a value");
        }
        value
    }
}

/// First marker of a single label/value row and the value that follows it.
/// A row without a marker is `None`; a marker without a value gives `""`.
pub fn row_pair(row: ElementRef<'_>) -> Option<(String, String)> {
    let marker = row.select(&MARKERS).next()?;
    let value = value_for(row, marker).unwrap_or_default();
    Some((text_of(marker), value))
}

/// A marker wrapped by its own value element (`<p><span>City</span> X</p>`)
/// takes the loose text after it; otherwise the nearest value element.
fn value_for(scope: Scope<'_>, marker: ElementRef<'_>) -> Option<String> {
    if inside_value(scope, marker) {
        let trailing = trailing_text(marker);
        if !trailing.is_empty() {
            return Some(trailing);
        }
    }
    value_after(scope, marker).map(text_of)
}

fn inside_value(scope: Scope<'_>, marker: ElementRef<'_>) -> bool {
    for el in marker.ancestors().filter_map(ElementRef::wrap) {
        if VALUES.matches(&el) {
            return true;
        }
        if el == scope {
            break;
        }
    }
    false
}

/// Sibling text after `marker` up to the next marker, leading `:` dropped.
fn trailing_text(marker: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in marker.next_siblings() {
        if let Some(el) = ElementRef::wrap(node) {
            if MARKERS.matches(&el) {
                break;
            }
            out.extend(el.text());
        } else if let Some(text) = node.value().as_text() {
            out.push_str(text);
        }
    }
    normalize_ws(out.trim_start().trim_start_matches(':'))
}

/// Nearest value element after `marker` (its own descendants included),
/// stopping at the next unrelated marker. A value element that itself
/// holds an unrelated marker belongs to another row and also stops the walk.
fn value_after<'a>(scope: Scope<'a>, marker: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut armed = false;
    for el in scope.descendants().filter_map(ElementRef::wrap) {
        if !armed {
            armed = el == marker;
            continue;
        }
        if VALUES.matches(&el) {
            if el.select(&MARKERS).any(|m| m != marker && !m.ancestors().any(|a| a == *marker)) {
                return None;
            }
            return Some(el);
        }
        if MARKERS.matches(&el) && !el.ancestors().any(|a| a == *marker) {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::Document;

    fn find(html: &str, label: &str) -> Option<String> {
        let doc = Document::parse(html).unwrap();
        LabelIndex::default().find(doc.root(), label)
    }

    #[test]
    fn substring_match_ignores_case_and_punctuation() {
        let html = r#"<div><span>OWNER NAME:</span><p>RAM</p></div>"#;
        assert_eq!(find(html, "Owner Name").as_deref(), Some("RAM"));
        let html = r#"<div><span>Owner-Name</span><p>RAM</p></div>"#;
        assert_eq!(find(html, "Owner Name").as_deref(), Some("RAM"));
        let html = r#"<div><span>Owner Name</span><p>RAM</p></div>"#;
        assert_eq!(find(html, "owner_name").as_deref(), Some("RAM"));
    }

    #[test]
    fn loose_value_inside_wrapping_paragraph() {
        let html = r#"<p><span>Owner Name</span> RAM</p><p><span>City</span>: MIRZAPUR</p>"#;
        assert_eq!(find(html, "Owner Name").as_deref(), Some("RAM"));
        assert_eq!(find(html, "City").as_deref(), Some("MIRZAPUR"));
    }

    #[test]
    fn next_rows_paragraph_is_not_a_value() {
        let html = r#"<div><span>Financer</span></div><p><span>NOC</span> NA</p>"#;
        assert_eq!(find(html, "Financer"), None);
        assert_eq!(find(html, "NOC").as_deref(), Some("NA"));
    }

    #[test]
    fn empty_wrapping_cell_falls_through_to_next_cell() {
        let html = r#"<table><tr><td><span>Fuel Type</span></td><td>DIESEL</td></tr></table>"#;
        assert_eq!(find(html, "Fuel Type").as_deref(), Some("DIESEL"));
    }

    #[test]
    fn first_marker_in_document_order_wins() {
        let html = r#"
            <div><span>Fuel Type</span><p>PETROL</p></div>
            <div><span>Fuel Type (secondary)</span><p>CNG</p></div>
        "#;
        assert_eq!(find(html, "fuel type").as_deref(), Some("PETROL"));
    }

    #[test]
    fn value_found_across_nesting_depths() {
        let html = r#"
            <div class="row">
              <div class="l"><div><span>Maker</span></div></div>
              <div class="r"><div><div><p> MARUTI   SUZUKI </p></div></div></div>
            </div>
        "#;
        assert_eq!(find(html, "Maker").as_deref(), Some("MARUTI SUZUKI"));
    }

    #[test]
    fn table_and_definition_list_markup() {
        let html = r#"
            <table><tr><th>Fuel Norms</th><td>BS VI</td></tr></table>
            <dl><dt>RTO</dt><dd>LUCKNOW</dd></dl>
        "#;
        assert_eq!(find(html, "Fuel Norms").as_deref(), Some("BS VI"));
        assert_eq!(find(html, "RTO").as_deref(), Some("LUCKNOW"));
    }

    #[test]
    fn missing_value_does_not_steal_the_next_one() {
        let html = r#"
            <div><span>Financer</span></div>
            <div><span>NOC</span><p>NA</p></div>
        "#;
        assert_eq!(find(html, "Financer"), None);
        assert_eq!(find(html, "NOC").as_deref(), Some("NA"));
    }

    #[test]
    fn missing_label_is_none() {
        assert_eq!(find("<div><span>A</span><p>1</p></div>", "B"), None);
        assert_eq!(find("<div><span>A</span><p>1</p></div>", "  "), None);
    }

    #[test]
    fn row_pairs() {
        let doc = Document::parse(
            r#"<ul><li class="r"><span>Date:</span><p>01 Jan 2024</p></li>
                   <li class="r"><span>Place</span></li>
                   <li class="r">no marker</li></ul>"#,
        )
        .unwrap();
        let rows = crate::core::html::selector("li.r");
        let pairs: Vec<_> = doc.select_all(&rows).map(row_pair).collect();
        assert_eq!(pairs[0], Some((s!("Date:"), s!("01 Jan 2024"))));
        assert_eq!(pairs[1], Some((s!("Place"), s!())));
        assert_eq!(pairs[2], None);
    }

    #[test]
    fn prefix_matcher_separates_overlapping_labels() {
        let html = r#"
            <div><span>Non-Transport</span><p>01-01-2020 to 01-01-2040</p></div>
            <div><span>Transport</span><p>02-02-2021 to 02-02-2024</p></div>
        "#;
        let doc = Document::parse(html).unwrap();
        let sub = LabelIndex::default();
        let pre = LabelIndex::new(&PrefixMatcher);
        assert_eq!(sub.find(doc.root(), "Transport").as_deref(), Some("01-01-2020 to 01-01-2040"));
        assert_eq!(pre.find(doc.root(), "Transport").as_deref(), Some("02-02-2021 to 02-02-2024"));
        assert_eq!(pre.find(doc.root(), "Non-Transport").as_deref(), Some("01-01-2020 to 01-01-2040"));
    }
}
