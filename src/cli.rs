// src/cli.rs
use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use crate::{
    config::{
        consts::{
            ENV_CHALLAN_API_URL, ENV_CHALLAN_PAGE_URL, ENV_DL_SOURCE_URL, ENV_OWNER, ENV_RC_SOURCE_URL,
        },
        SourceOptions,
    },
    core::net::HttpFetch,
    file::write_json,
    params::{normalize_dl, normalize_rc},
    progress::Progress,
    reconcile, scrape,
    specs::{challans, dl, rc},
};

#[derive(Debug, Parser)]
#[command(name = "vehicle_scrape", version, about = "Vehicle RC, driving-license and challan lookups as JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write JSON here instead of stdout
    #[arg(short, long, global = true, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// One-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// More log output (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Append logs to a file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub sources: SourceArgs,
}

/// Source URL templates. `{id}` is replaced by the identifier; without it
/// `?rc=<id>` is appended.
#[derive(Debug, Args)]
pub struct SourceArgs {
    #[arg(long, global = true, env = ENV_RC_SOURCE_URL, value_name = "URL")]
    pub rc_url: Option<String>,

    #[arg(long, global = true, env = ENV_DL_SOURCE_URL, value_name = "URL")]
    pub dl_url: Option<String>,

    #[arg(long, global = true, env = ENV_CHALLAN_PAGE_URL, value_name = "URL")]
    pub challan_page_url: Option<String>,

    #[arg(long, global = true, env = ENV_CHALLAN_API_URL, value_name = "URL")]
    pub challan_api_url: Option<String>,

    /// Operator label echoed in merged reports
    #[arg(long, global = true, env = ENV_OWNER)]
    pub owner: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Registration certificate record
    Rc {
        reg: String,
        /// Parse a saved page instead of fetching
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Driving-license record
    Dl {
        dl: String,
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Challan list from the HTML page
    Challans {
        reg: String,
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Challan totals from the JSON API
    Summary {
        reg: String,
        /// Reconcile a saved payload instead of fetching
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },
    /// RC record and challan totals in one report
    Merge { reg: String },
}

impl SourceArgs {
    /// Environment defaults (timeouts, retries) with flag overrides on top.
    fn resolve(&self) -> SourceOptions {
        let mut opts = SourceOptions::from_env();
        let pick = |flag: &Option<String>, current: Option<String>| flag.clone().or(current);
        opts.rc_page = pick(&self.rc_url, opts.rc_page.take());
        opts.dl_page = pick(&self.dl_url, opts.dl_page.take());
        opts.challan_page = pick(&self.challan_page_url, opts.challan_page.take());
        opts.challan_api = pick(&self.challan_api_url, opts.challan_api.take());
        opts.owner = pick(&self.owner, opts.owner.take());
        opts
    }
}

/// Progress lines on stderr, kept off stdout so JSON stays clean.
struct StderrProgress;

impl Progress for StderrProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, source: &str) {
        eprintln!("  ✓ {source}");
    }
    fn item_failed(&mut self, source: &str, reason: &str) {
        eprintln!("  ✗ {source}: {reason}");
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.log_file.as_deref()).wrap_err("could not set up logging")?;
    execute(&cli)
}

pub fn execute(cli: &Cli) -> Result<()> {
    let opts = cli.sources.resolve();

    match &cli.command {
        Command::Rc { reg, file: Some(path) } => {
            let record = rc::parse(&read(path)?, &normalize_rc(reg)?)?;
            emit(cli, &record)
        }
        Command::Dl { dl, file: Some(path) } => {
            let record = dl::parse(&read(path)?, &normalize_dl(dl)?)?;
            emit(cli, &record)
        }
        Command::Challans { reg, file: Some(path) } => {
            let list = challans::parse(&read(path)?, &normalize_rc(reg)?)?;
            emit(cli, &list)
        }
        Command::Summary { reg, json: Some(path) } => {
            normalize_rc(reg)?;
            let summary = reconcile::reconcile_str(&read(path)?)?;
            emit(cli, &summary)
        }
        online => {
            let fetcher = HttpFetch::new(&opts.fetch)?;
            match online {
                Command::Rc { reg, .. } => emit(cli, &scrape::lookup_rc(&fetcher, &opts, reg)?),
                Command::Dl { dl, .. } => emit(cli, &scrape::lookup_dl(&fetcher, &opts, dl)?),
                Command::Challans { reg, .. } => emit(cli, &scrape::lookup_challans(&fetcher, &opts, reg)?),
                Command::Summary { reg, .. } => emit(cli, &scrape::lookup_summary(&fetcher, &opts, reg)?),
                Command::Merge { reg } => {
                    let report = scrape::merge_vehicle(&fetcher, &opts, reg, &mut StderrProgress)?;
                    emit(cli, &report)
                }
            }
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("could not read {}", path.display()))
}

fn emit<T: Serialize>(cli: &Cli, value: &T) -> Result<()> {
    write_json(value, cli.out.as_deref(), !cli.compact).wrap_err("could not write output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn offline_flags_and_globals() {
        let cli = Cli::try_parse_from([
            "vehicle_scrape", "rc", "UP63BJ8585", "--file", "page.html", "--compact", "-vv",
        ])
        .unwrap();
        assert!(cli.compact);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Rc { file: Some(_), .. }));

        let cli = Cli::try_parse_from(["vehicle_scrape", "summary", "UP63BJ8585", "--json", "p.json"]).unwrap();
        assert!(matches!(cli.command, Command::Summary { json: Some(_), .. }));
    }

    #[test]
    fn flag_beats_environment_default() {
        let cli = Cli::try_parse_from([
            "vehicle_scrape", "merge", "UP63BJ8585", "--rc-url", "https://rc.test/{id}",
        ])
        .unwrap();
        let opts = cli.sources.resolve();
        assert_eq!(opts.rc_page.as_deref(), Some("https://rc.test/{id}"));
    }
}
