// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod specs;

pub mod file;
pub mod log;
pub mod params;
pub mod progress;
pub mod reconcile;
pub mod scrape;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{FetchError, Result, ScrapeError};
