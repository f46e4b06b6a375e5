// src/specs/dl.rs
//! Scraping *spec* for the driving-license (DL) page.
//!
//! Identity fields are read page-wide. The validity card prints two ranges,
//! "Non-Transport" and "Transport", as `"<from> to <to>"`; since one label
//! contains the other they are prefix-matched. Vehicle classes are a plain
//! `<ul class="cov-list">`.

use std::sync::LazyLock;

use scraper::Selector;
use serde::Serialize;
use tracing::info;

use crate::config::consts::COV_ITEM_SELECTOR;
use crate::config::{SourceKind, SourceOptions};
use crate::core::html::{Document, selector, text_of};
use crate::core::label::{LabelIndex, PrefixMatcher};
use crate::core::net::Fetch;
use crate::engine::{self, FieldMap, SectionSpec};
use crate::error::Result;

const IDENTITY: &[&str] = &[
    "Holder Name",
    "Father Name",
    "DOB",
    "Holder Age",
    "Citizen",
    "Gender",
    "Status",
    "Date Of Issue",
    "Last Transaction At",
];

const VALIDITY: SectionSpec = section!("Validity" => ["Non-Transport", "Transport"]);

static COV_ITEMS: LazyLock<Selector> = LazyLock::new(|| selector(COV_ITEM_SELECTOR));

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidityRange {
    pub from: String,
    pub to: String,
}

impl ValidityRange {
    /// Split once on `" to "`. An empty source gives two empty strings; a
    /// source without the separator keeps everything in `from`.
    pub fn split(raw: &str) -> Self {
        let mut parts = raw.splitn(2, " to ");
        let from = parts.next().unwrap_or("").trim();
        let to = parts.next().unwrap_or("").trim();
        Self { from: s!(from), to: s!(to) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DlValidity {
    pub non_transport: ValidityRange,
    pub transport: ValidityRange,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DlRecord {
    pub license_number: String,
    #[serde(flatten)]
    pub identity: FieldMap,
    pub validity: DlValidity,
    pub class_of_vehicle: Vec<String>,
}

pub fn fetch(fetcher: &dyn Fetch, opts: &SourceOptions, dl: &str) -> Result<DlRecord> {
    let url = opts.url_for(&SourceKind::DlPage, dl)?;
    let text = fetcher.get_text(&url)?;
    parse(&text, dl)
}

pub fn parse(text: &str, dl: &str) -> Result<DlRecord> {
    let doc = Document::parse(text)?;
    let record = assemble(&doc, dl);
    info!(dl, classes = record.class_of_vehicle.len(), "dl record assembled");
    Ok(record)
}

pub fn assemble(doc: &Document, dl: &str) -> DlRecord {
    let index = LabelIndex::default();
    let prefix = LabelIndex::new(&PrefixMatcher);
    let ranges = engine::extract_section(&prefix, doc, &VALIDITY);

    DlRecord {
        license_number: doc.primary_heading().unwrap_or_else(|| s!(dl)),
        identity: engine::extract_page(&index, doc, IDENTITY),
        validity: DlValidity {
            non_transport: ValidityRange::split(ranges.value("non-transport")),
            transport: ValidityRange::split(ranges.value("transport")),
        },
        class_of_vehicle: doc
            .select_all(&COV_ITEMS)
            .map(text_of)
            .filter(|t| !t.is_empty())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_range() {
        assert_eq!(
            ValidityRange::split("01-01-2020 to 01-01-2040"),
            ValidityRange { from: s!("01-01-2020"), to: s!("01-01-2040") }
        );
    }

    #[test]
    fn split_empty_gives_two_empty_strings() {
        assert_eq!(ValidityRange::split(""), ValidityRange { from: s!(), to: s!() });
    }

    #[test]
    fn split_without_separator_keeps_from() {
        assert_eq!(ValidityRange::split("NA"), ValidityRange { from: s!("NA"), to: s!() });
    }

    #[test]
    fn split_only_once() {
        let r = ValidityRange::split("a to b to c");
        assert_eq!((r.from.as_str(), r.to.as_str()), ("a", "b to c"));
    }

    #[test]
    fn missing_validity_card_serializes_empty_strings() {
        let doc = Document::parse("<h1>UP1420110012345</h1>").unwrap();
        let v = serde_json::to_value(assemble(&doc, "x")).unwrap();
        assert_eq!(v["license_number"], "UP1420110012345");
        assert_eq!(v["validity"]["transport"]["from"], "");
        assert_eq!(v["validity"]["non_transport"]["to"], "");
        assert_eq!(v["class_of_vehicle"], serde_json::json!([]));
        assert_eq!(v["dob"], "");
    }

    #[test]
    fn validity_labels_without_hyphen() {
        let html = r#"<h1>UP1420110012345</h1>
            <div class="details-card"><h3>Validity</h3>
              <div class="row"><span>Transport</span><p>01-01-2015 to 01-01-2025</p></div>
              <div class="row"><span>Non Transport</span><p>15-02-2011 to 03-07-2038</p></div>
            </div>"#;
        let doc = Document::parse(html).unwrap();
        let validity = assemble(&doc, "x").validity;
        assert_eq!(validity.non_transport, ValidityRange::split("15-02-2011 to 03-07-2038"));
        assert_eq!(validity.transport, ValidityRange::split("01-01-2015 to 01-01-2025"));
    }
}
