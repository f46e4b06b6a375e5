// src/params.rs
// Lookup identifiers: cleaned up and checked before anything is fetched.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ScrapeError};

/// Two letters, 1–2 digits, 1–2 letters, 4 digits: `UP63BJ8585`, `DL1C1234`.
static RC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{1,2}[A-Z]{1,2}[0-9]{4}$").expect("static regex"));

static DL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,20}$").expect("static regex"));

fn compact_upper(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// `"up 63 bj-8585"` → `"UP63BJ8585"`.
pub fn normalize_rc(raw: &str) -> Result<String> {
    let reg = compact_upper(raw);
    if reg.is_empty() {
        return Err(ScrapeError::InvalidIdentifier { input: s!(raw), reason: "missing registration number" });
    }
    if !RC_PATTERN.is_match(&reg) {
        return Err(ScrapeError::InvalidIdentifier { input: s!(raw), reason: "not a registration number" });
    }
    Ok(reg)
}

pub fn normalize_dl(raw: &str) -> Result<String> {
    let dl = compact_upper(raw);
    if !DL_PATTERN.is_match(&dl) {
        return Err(ScrapeError::InvalidIdentifier { input: s!(raw), reason: "not a license number" });
    }
    Ok(dl)
}
