// src/reconcile.rs
//! Challan totals from the upstream JSON API.
//!
//! The API is inconsistent about where the list lives and how an amount is
//! written, so both are resolved by trying small shape readers in order:
//!
//! ```text
//! list:   payload.data.data  →  payload.data  →  (empty)
//! amount: amount.total       →  amount        →  violations.amount  →  0
//! ```
//!
//! A malformed item contributes 0; nothing here fails.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, trace};

use crate::config::{SourceKind, SourceOptions};
use crate::core::net::Fetch;
use crate::core::sanitize::{non_negative, parse_decorated_amount, parse_plain_amount};
use crate::error::Result;

type ListLocator = fn(&Value) -> Option<&Vec<Value>>;
type AmountReader = fn(&Value) -> Option<f64>;

const LIST_LOCATORS: &[(&str, ListLocator)] = &[("data.data", nested_data), ("data", flat_data)];

const AMOUNT_READERS: &[(&str, AmountReader)] = &[
    ("amount.total", amount_total),
    ("amount", amount_direct),
    ("violations.amount", violations_amount),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStatus {
    Success,
    Empty,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReconciledSummary {
    pub total_challans: usize,
    pub total_amount: f64,
    pub challans: Vec<Value>,
    pub status: SummaryStatus,
}

pub fn fetch(fetcher: &dyn Fetch, opts: &SourceOptions, reg: &str) -> Result<ReconciledSummary> {
    let url = opts.url_for(&SourceKind::ChallanApi, reg)?;
    let text = fetcher.get_text(&url)?;
    reconcile_str(&text)
}

/// Parse JSON text first; text that is not JSON is the one hard failure.
pub fn reconcile_str(text: &str) -> Result<ReconciledSummary> {
    let payload: Value = serde_json::from_str(text)?;
    Ok(reconcile(&payload))
}

pub fn reconcile(payload: &Value) -> ReconciledSummary {
    let items = locate_items(payload);
    let total_amount = items.iter().map(item_amount).fold(0.0, |acc, a| acc + a);
    let summary = ReconciledSummary {
        total_challans: items.len(),
        total_amount,
        challans: items.to_vec(),
        status: if items.is_empty() { SummaryStatus::Empty } else { SummaryStatus::Success },
    };
    info!(count = summary.total_challans, total = summary.total_amount, "challans reconciled");
    summary
}

/// The violation list wherever this payload keeps it; empty if nowhere.
pub fn locate_items(payload: &Value) -> &[Value] {
    for (path, locate) in LIST_LOCATORS {
        if let Some(items) = locate(payload) {
            debug!(path, count = items.len(), "violation list located");
            return items;
        }
    }
    debug!("no violation list in payload");
    &[]
}

/// One item's amount: first reader that yields a number, else 0.
pub fn item_amount(item: &Value) -> f64 {
    AMOUNT_READERS
        .iter()
        .find_map(|(path, read)| {
            let amount = read(item)?;
            trace!(path, amount, "item amount");
            Some(amount)
        })
        .unwrap_or(0.0)
}

fn nested_data(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("data")?.as_object()?.get("data")?.as_array()
}

fn flat_data(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("data")?.as_array()
}

fn amount_total(item: &Value) -> Option<f64> {
    plain_number(item.get("amount")?.get("total")?)
}

fn amount_direct(item: &Value) -> Option<f64> {
    decorated_number(item.get("amount")?)
}

fn violations_amount(item: &Value) -> Option<f64> {
    decorated_number(item.get("violations")?.get("amount")?)
}

fn plain_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => non_negative(n.as_f64()?),
        Value::String(s) => parse_plain_amount(s),
        _ => None,
    }
}

fn decorated_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => non_negative(n.as_f64()?),
        Value::String(s) => parse_decorated_amount(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_locators_in_order() {
        let nested = json!({"data": {"data": [{"amount": 1}]}});
        let flat = json!({"data": [{"amount": 1}, {"amount": 2}]});
        let odd = json!({"data": {"items": [1]}});
        assert_eq!(locate_items(&nested).len(), 1);
        assert_eq!(locate_items(&flat).len(), 2);
        assert!(locate_items(&odd).is_empty());
        assert!(locate_items(&json!("nope")).is_empty());
    }

    #[test]
    fn each_amount_reader_alone() {
        assert_eq!(amount_total(&json!({"amount": {"total": "2,000"}})), Some(2000.0));
        assert_eq!(amount_total(&json!({"amount": 5})), None);
        assert_eq!(amount_direct(&json!({"amount": "₹ 1,250"})), Some(1250.0));
        assert_eq!(amount_direct(&json!({"amount": 300})), Some(300.0));
        assert_eq!(amount_direct(&json!({"amount": {"total": 1}})), None);
        assert_eq!(violations_amount(&json!({"violations": {"amount": "Rs. 500"}})), Some(500.0));
    }

    #[test]
    fn fallthrough_and_zero() {
        // unparseable nested total falls through to violations.amount
        let item = json!({"amount": {"total": "N/A"}, "violations": {"amount": "700"}});
        assert_eq!(item_amount(&item), 700.0);
        assert_eq!(item_amount(&json!({"amount": "N/A"})), 0.0);
        assert_eq!(item_amount(&json!({"amount": -50})), 0.0);
        assert_eq!(item_amount(&json!(null)), 0.0);
    }

    #[test]
    fn currency_after_the_number() {
        assert_eq!(item_amount(&json!({"amount": "1,250 INR"})), 1250.0);
        assert_eq!(item_amount(&json!({"amount": {"total": "2,000 ₹"}})), 2000.0);
    }

    #[test]
    fn status_tracks_presence() {
        assert_eq!(reconcile(&json!({"data": []})).status, SummaryStatus::Empty);
        assert_eq!(reconcile(&json!({"data": [{}]})).status, SummaryStatus::Success);
    }

    #[test]
    fn non_json_text_is_an_error() {
        assert!(reconcile_str("<html>").is_err());
        assert!(reconcile_str("[]").is_ok());
    }
}
