// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("static regex"));

/// `₹ 1,500`, `Rs. 500`, `INR 2,000.50` (currency first, as the pages print it).
static MONEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:₹|\bRs\.?|\bINR)\s*\d[\d,]*(?:\.\d+)?").expect("static regex")
});

const CURRENCY_MARKS: &[&str] = &["₹", "INR", "Rs.", "Rs", "$"];

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Comparison form for label matching: punctuation turned into spaces,
/// whitespace-collapsed, lower-cased. `"Owner-Name:"` → `owner name`.
pub fn fold(s: &str) -> String {
    let spaced: String = s.chars().map(|c| if c.is_alphanumeric() { c } else { ' ' }).collect();
    normalize_ws(&spaced).to_lowercase()
}

/// Canonical output key for a display label.
///
/// Lower-case, then each space becomes `_`:
/// `"Owner Name"` → `owner_name`, `"RTO"` → `rto`, `"Fuel Norms"` → `fuel_norms`.
/// Downstream consumers key off these names; keep the rule stable.
pub fn canonical_key(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// First run of ASCII digits, parsed. `"Expired 45 days ago"` → `Some(45)`,
/// `"Expired"` → `None`, `"0 days"` → `Some(0)`.
pub fn first_digit_run(s: &str) -> Option<u32> {
    DIGIT_RUN.find(s).and_then(|m| m.as_str().parse().ok())
}

/// First currency-prefixed amount as printed, e.g. `"₹1,500"`.
pub fn first_money(s: &str) -> Option<String> {
    MONEY.find(s).map(|m| normalize_ws(m.as_str()))
}

pub fn strip_hash(s: &str) -> String {
    s.trim().trim_start_matches('#').trim().to_string()
}

/// `"1,250"` → 1250. Thousands separators only; anything else fails.
pub fn parse_plain_amount(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|&c| c != ',').collect();
    non_negative(cleaned.parse::<f64>().ok()?)
}

/// `"₹ 1,250"`, `"Rs. 500/-"`, `"1,250 INR"` → number. A currency mark on
/// either side, separators and the trailing `/-` are dropped before parsing.
pub fn parse_decorated_amount(s: &str) -> Option<f64> {
    let mut t = s.trim();
    if let Some(rest) = CURRENCY_MARKS.iter().find_map(|mark| strip_prefix_ci(t, mark)) {
        t = rest.trim_start();
    }
    t = t.trim_end_matches("/-").trim_end();
    if let Some(rest) = CURRENCY_MARKS.iter().find_map(|mark| strip_suffix_ci(t, mark)) {
        t = rest.trim_end().trim_end_matches("/-").trim_end();
    }
    parse_plain_amount(t)
}

pub fn non_negative(v: f64) -> Option<f64> {
    (v.is_finite() && v >= 0.0).then_some(v)
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let start = s.len().checked_sub(suffix.len())?;
    let tail = s.get(start..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..start])
}
