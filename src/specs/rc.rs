// src/specs/rc.rs
//! Scraping *spec* for the vehicle registration (RC) page.
//!
//! Page layout (as served):
//! - `<h1>` carries the registration number.
//! - A summary block with model/owner/RTO contact labels, read page-wide.
//! - Titled `.details-card`s: Ownership, Vehicle, Insurance, Validity, Other.
//! - An `.insurance-expired` banner only when the policy has lapsed,
//!   e.g. "Expired 45 days ago".

use std::sync::LazyLock;

use scraper::Selector;
use serde::Serialize;
use tracing::info;

use crate::config::consts::INSURANCE_EXPIRED_SELECTOR;
use crate::config::{SourceKind, SourceOptions};
use crate::core::html::{Document, selector, text_of};
use crate::core::label::LabelIndex;
use crate::core::net::Fetch;
use crate::core::sanitize::first_digit_run;
use crate::engine::{self, FieldMap, SectionSpec};
use crate::error::Result;

const SUMMARY: &[&str] = &["Modal Name", "Owner Name", "Code", "City", "Phone", "Website", "Address"];

const OWNERSHIP: SectionSpec = section!("Ownership" => ["Owner Name", "Serial No", "RTO"]);
const VEHICLE: SectionSpec =
    section!("Vehicle Details" => ["Maker", "Model", "Vehicle Class", "Fuel Type", "Fuel Norms"]);
const INSURANCE: SectionSpec = section!("Insurance" => ["Expiry"]);
const VALIDITY: SectionSpec = section!("Validity" => [
    "Registration Date",
    "Vehicle Age",
    "Fitness Upto",
    "Insurance Upto",
    "Insurance Status",
]);
const OTHER: SectionSpec = section!("Other" => [
    "Financer",
    "Cubic Capacity",
    "Seating Capacity",
    "Permit Type",
    "Blacklist Status",
    "NOC",
]);

static EXPIRED: LazyLock<Selector> = LazyLock::new(|| selector(INSURANCE_EXPIRED_SELECTOR));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum InsuranceStatus {
    Active,
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Insurance {
    pub status: InsuranceStatus,
    pub expiry_date: String,
    /// `None` when the lapse banner has no number; `Some(0)` is a real zero.
    pub expired_days_ago: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RcRecord {
    pub registration_number: String,
    #[serde(flatten)]
    pub summary: FieldMap,
    pub ownership_details: FieldMap,
    pub vehicle_details: FieldMap,
    pub insurance: Insurance,
    pub validity: FieldMap,
    pub other_info: FieldMap,
}

pub fn fetch(fetcher: &dyn Fetch, opts: &SourceOptions, reg: &str) -> Result<RcRecord> {
    let url = opts.url_for(&SourceKind::RcPage, reg)?;
    let text = fetcher.get_text(&url)?;
    parse(&text, reg)
}

pub fn parse(text: &str, reg: &str) -> Result<RcRecord> {
    let doc = Document::parse(text)?;
    let record = assemble(&doc, reg);
    info!(reg, status = ?record.insurance.status, "rc record assembled");
    Ok(record)
}

pub fn assemble(doc: &Document, reg: &str) -> RcRecord {
    let index = LabelIndex::default();
    let insurance_fields = engine::extract_section(&index, doc, &INSURANCE);

    RcRecord {
        registration_number: doc.primary_heading().unwrap_or_else(|| s!(reg)),
        summary: engine::extract_page(&index, doc, SUMMARY),
        ownership_details: engine::extract_section(&index, doc, &OWNERSHIP),
        vehicle_details: engine::extract_section(&index, doc, &VEHICLE),
        insurance: insurance_state(doc, insurance_fields.value("expiry")),
        validity: engine::extract_section(&index, doc, &VALIDITY),
        other_info: engine::extract_section(&index, doc, &OTHER),
    }
}

fn insurance_state(doc: &Document, expiry_date: &str) -> Insurance {
    match doc.select_first(&EXPIRED) {
        Some(banner) => Insurance {
            status: InsuranceStatus::Expired,
            expiry_date: s!(expiry_date),
            expired_days_ago: first_digit_run(&text_of(banner)),
        },
        None => Insurance {
            status: InsuranceStatus::Active,
            expiry_date: s!(expiry_date),
            expired_days_ago: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insurance(html: &str) -> Insurance {
        let doc = Document::parse(html).unwrap();
        insurance_state(&doc, "")
    }

    #[test]
    fn expired_banner_with_days() {
        let i = insurance(r#"<div class="insurance-expired">Expired 45 days ago</div>"#);
        assert_eq!(i.status, InsuranceStatus::Expired);
        assert_eq!(i.expired_days_ago, Some(45));
    }

    #[test]
    fn expired_banner_without_digits_is_null_not_zero() {
        let i = insurance(r#"<div class="insurance-expired">Policy expired</div>"#);
        assert_eq!(i.status, InsuranceStatus::Expired);
        assert_eq!(i.expired_days_ago, None);

        let z = insurance(r#"<div class="insurance-expired">Expired 0 days ago</div>"#);
        assert_eq!(z.expired_days_ago, Some(0));
    }

    #[test]
    fn no_banner_is_active() {
        let i = insurance("<div>Insurance valid</div>");
        assert_eq!(i.status, InsuranceStatus::Active);
        assert_eq!(i.expired_days_ago, None);
    }

    #[test]
    fn heading_falls_back_to_input_identifier() {
        let doc = Document::parse("<div><span>Maker</span><p>X</p></div>").unwrap();
        let rc = assemble(&doc, "UP63BJ8585");
        assert_eq!(rc.registration_number, "UP63BJ8585");
    }

    #[test]
    fn all_keys_present_on_bare_page() {
        let doc = Document::parse("<html><body><p>nothing here</p></body></html>").unwrap();
        let v = serde_json::to_value(assemble(&doc, "DL1CAB1234")).unwrap();
        for key in [
            "registration_number", "modal_name", "owner_name", "code", "city", "phone",
            "website", "address", "ownership_details", "vehicle_details", "insurance",
            "validity", "other_info",
        ] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert_eq!(v["insurance"]["status"], "Active");
        assert!(v["insurance"]["expired_days_ago"].is_null());
        assert_eq!(v["other_info"]["noc"], "");
        assert_eq!(v["validity"]["insurance_status"], "");
    }
}
