// src/scrape.rs
//! Lookups: validate the identifier, fetch, hand the text to a spec.
//!
//! `merge_vehicle` is the only place two sources are read at once. Each part
//! runs on its own scoped thread; a failed part is reported in the envelope
//! and never cancels the other.

use std::thread;

use serde::Serialize;
use tracing::{error, info};

use crate::{
    config::SourceOptions,
    core::net::Fetch,
    error::Result,
    params::{normalize_dl, normalize_rc},
    progress::Progress,
    reconcile::{self, ReconciledSummary},
    specs::{
        challans::{self, ChallanList},
        dl::{self, DlRecord},
        rc::{self, RcRecord},
    },
};

const PART_RC: &str = "rc";
const PART_CHALLANS: &str = "challans";

pub fn lookup_rc(fetcher: &dyn Fetch, opts: &SourceOptions, raw: &str) -> Result<RcRecord> {
    let reg = normalize_rc(raw)?;
    info!(reg = %reg, "rc lookup");
    rc::fetch(fetcher, opts, &reg)
}

pub fn lookup_dl(fetcher: &dyn Fetch, opts: &SourceOptions, raw: &str) -> Result<DlRecord> {
    let dl = normalize_dl(raw)?;
    info!(dl = %dl, "dl lookup");
    dl::fetch(fetcher, opts, &dl)
}

pub fn lookup_challans(fetcher: &dyn Fetch, opts: &SourceOptions, raw: &str) -> Result<ChallanList> {
    let reg = normalize_rc(raw)?;
    info!(reg = %reg, "challan page lookup");
    challans::fetch(fetcher, opts, &reg)
}

pub fn lookup_summary(fetcher: &dyn Fetch, opts: &SourceOptions, raw: &str) -> Result<ReconciledSummary> {
    let reg = normalize_rc(raw)?;
    info!(reg = %reg, "challan summary lookup");
    reconcile::fetch(fetcher, opts, &reg)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VehicleData {
    pub rc: Option<RcRecord>,
    pub challans: Option<ReconciledSummary>,
}

/// RC record and challan summary for one vehicle, side by side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleReport {
    pub owner: Option<String>,
    pub success: bool,
    pub vehicle: String,
    pub data: VehicleData,
    pub errors: Vec<String>,
}

/// Fetch the RC page and the challan API concurrently and merge the parts.
///
/// Only an invalid identifier fails the whole call. Source failures land in
/// `errors` as `"<part>: <message>"` with the part left `null`.
pub fn merge_vehicle(
    fetcher: &dyn Fetch,
    opts: &SourceOptions,
    raw: &str,
    progress: &mut dyn Progress,
) -> Result<VehicleReport> {
    let reg = normalize_rc(raw)?;
    info!(reg = %reg, "merged vehicle lookup");

    progress.begin(2);
    progress.log(&format!("Fetching {reg}…"));

    let (rc_part, summary_part) = thread::scope(|s| {
        let rc_job = s.spawn(|| rc::fetch(fetcher, opts, &reg));
        let summary_job = s.spawn(|| reconcile::fetch(fetcher, opts, &reg));
        (join_part(rc_job.join()), join_part(summary_job.join()))
    });

    let mut errors = Vec::new();
    let rc = settle(PART_RC, rc_part, &mut errors, progress);
    let challans = settle(PART_CHALLANS, summary_part, &mut errors, progress);
    progress.finish();

    Ok(VehicleReport {
        owner: opts.owner.clone(),
        success: errors.is_empty(),
        vehicle: reg,
        data: VehicleData { rc, challans },
        errors,
    })
}

type PartResult<T> = std::result::Result<T, String>;

/// A panicking worker is reported like any other failed part.
fn join_part<T>(joined: thread::Result<Result<T>>) -> PartResult<T> {
    match joined {
        Ok(res) => res.map_err(|e| e.to_string()),
        Err(_) => Err(s!("worker panicked")),
    }
}

fn settle<T>(
    part: &str,
    res: PartResult<T>,
    errors: &mut Vec<String>,
    progress: &mut dyn Progress,
) -> Option<T> {
    match res {
        Ok(value) => {
            progress.item_done(part);
            Some(value)
        }
        Err(msg) => {
            error!(part, %msg, "lookup part failed");
            progress.item_failed(part, &msg);
            errors.push(format!("{part}: {msg}"));
            None
        }
    }
}
