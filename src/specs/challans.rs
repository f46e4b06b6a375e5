// src/specs/challans.rs
//! Scraping *spec* for the challan (traffic violation) list page.
//!
//! Purpose:
//! - Read the seven vehicle facts printed as a fixed run of `.detail-block`s
//!   (position, not label, decides the field).
//! - Read every `.challan-card` in page order into a numbered `Challan`.
//!
//! Cards are loose: the id (`.challan-id`, often `#`-prefixed) and the status
//! badge may be missing, and the label/value rows vary in wording, so rows are
//! bucketed by keyword and the first hit per bucket wins.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::consts::{
    CHALLAN_CARD_SELECTOR, CHALLAN_ID_SELECTOR, CHALLAN_ROW_SELECTOR, CHALLAN_STATUS_SELECTOR,
    DETAIL_BLOCK_SELECTOR, OFFENCE_DEFAULT, VALUE_SELECTOR,
};
use crate::config::{SourceKind, SourceOptions};
use crate::core::html::{Document, first_text, selector, text_of};
use crate::core::label::row_pair;
use crate::core::net::Fetch;
use crate::core::sanitize::{first_money, fold, normalize_ws, strip_hash};
use crate::error::Result;

static DETAIL_BLOCKS: LazyLock<Selector> = LazyLock::new(|| selector(DETAIL_BLOCK_SELECTOR));
static DETAIL_VALUE: LazyLock<Selector> = LazyLock::new(|| selector(VALUE_SELECTOR));
static CARDS: LazyLock<Selector> = LazyLock::new(|| selector(CHALLAN_CARD_SELECTOR));
static CARD_ID: LazyLock<Selector> = LazyLock::new(|| selector(CHALLAN_ID_SELECTOR));
static CARD_STATUS: LazyLock<Selector> = LazyLock::new(|| selector(CHALLAN_STATUS_SELECTOR));
static CARD_ROWS: LazyLock<Selector> = LazyLock::new(|| selector(CHALLAN_ROW_SELECTOR));

const DATE_WORDS: &[&str] = &["date"];
const OFFENCE_WORDS: &[&str] = &["offence", "offense", "violation"];
const LOCATION_WORDS: &[&str] = &["location", "place"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VehicleInfo {
    pub owner_name: Option<String>,
    pub vehicle_class: Option<String>,
    pub maker_model: Option<String>,
    pub fuel_type: Option<String>,
    pub registration_date: Option<String>,
    pub insurance_upto: Option<String>,
    pub rto: Option<String>,
}

impl VehicleInfo {
    /// Fields by block position; short runs leave the tail `None`.
    fn from_blocks(blocks: &[Option<String>]) -> Self {
        let at = |i: usize| blocks.get(i).cloned().flatten();
        Self {
            owner_name: at(0),
            vehicle_class: at(1),
            maker_model: at(2),
            fuel_type: at(3),
            registration_date: at(4),
            insurance_upto: at(5),
            rto: at(6),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Challan {
    pub challan_no: Option<String>,
    /// 1-based position on the page; unrelated to `challan_no`.
    pub number: usize,
    pub datetime: Option<String>,
    pub amount: Option<String>,
    pub offence: String,
    pub location: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChallanList {
    pub vehicle: String,
    pub vehicle_info: VehicleInfo,
    pub total_challans: usize,
    pub challans: Vec<Challan>,
}

pub fn fetch(fetcher: &dyn Fetch, opts: &SourceOptions, reg: &str) -> Result<ChallanList> {
    let url = opts.url_for(&SourceKind::ChallanPage, reg)?;
    let text = fetcher.get_text(&url)?;
    parse(&text, reg)
}

pub fn parse(text: &str, reg: &str) -> Result<ChallanList> {
    let doc = Document::parse(text)?;
    let list = assemble(&doc, reg);
    info!(reg, total = list.total_challans, "challan list assembled");
    Ok(list)
}

pub fn assemble(doc: &Document, reg: &str) -> ChallanList {
    let blocks: Vec<Option<String>> = doc.select_all(&DETAIL_BLOCKS).map(block_value).collect();
    if blocks.len() < 7 {
        debug!(found = blocks.len(), "short vehicle detail run");
    }

    let challans: Vec<Challan> = doc
        .select_all(&CARDS)
        .enumerate()
        .map(|(i, card)| read_card(card, i + 1))
        .collect();

    ChallanList {
        vehicle: doc.primary_heading().unwrap_or_else(|| s!(reg)),
        vehicle_info: VehicleInfo::from_blocks(&blocks),
        total_challans: challans.len(),
        challans,
    }
}

/// Value of one detail block: its value element if it has one, otherwise the
/// block text after the leading label. Blank is `None`.
fn block_value(block: ElementRef<'_>) -> Option<String> {
    let text = match first_text(block, &DETAIL_VALUE) {
        Some(v) => v,
        None => match row_pair(block) {
            Some((label, _)) => normalize_ws(text_of(block).trim_start_matches(label.as_str())),
            None => text_of(block),
        },
    };
    (!text.is_empty()).then_some(text)
}

fn read_card(card: ElementRef<'_>, number: usize) -> Challan {
    // Outer None: no row of that kind seen yet. An empty first row still
    // claims the slot.
    let mut datetime: Option<Option<String>> = None;
    let mut offence: Option<Option<String>> = None;
    let mut location: Option<Option<String>> = None;

    for (label, value) in card.select(&CARD_ROWS).filter_map(row_pair) {
        let label = fold(&label);
        let slot = if has_any(&label, DATE_WORDS) {
            &mut datetime
        } else if has_any(&label, OFFENCE_WORDS) {
            &mut offence
        } else if has_any(&label, LOCATION_WORDS) {
            &mut location
        } else {
            continue;
        };
        if slot.is_none() {
            *slot = Some((!value.is_empty()).then_some(value));
        }
    }

    Challan {
        challan_no: first_text(card, &CARD_ID).map(|t| strip_hash(&t)).filter(|t| !t.is_empty()),
        number,
        datetime: datetime.flatten(),
        amount: first_money(&text_of(card)),
        offence: offence.flatten().unwrap_or_else(|| s!(OFFENCE_DEFAULT)),
        location: location.flatten(),
        status: first_text(card, &CARD_STATUS)
            .map(|t| t.to_uppercase())
            .filter(|t| !t.is_empty()),
    }
}

fn has_any(label: &str, words: &[&str]) -> bool {
    words.iter().any(|w| label.contains(w))
}
