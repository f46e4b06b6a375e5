// src/log.rs
//! Subscriber setup. Library code only emits `tracing` events; the binary
//! (or a test) decides where they go by calling [`init`] once.

use std::{
    fs::OpenOptions,
    io,
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::{EnvFilter, fmt};

use crate::file::ensure_directory;

/// `-v` count → default filter directive. `RUST_LOG` overrides it.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber, writing to stderr or appending to
/// `log_file`. Calling it again is a no-op.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vehicle_scrape={}", level_for(verbosity))));

    let builder = fmt().with_env_filter(filter).with_target(false);

    // Err from try_init only means a subscriber is already installed.
    let _ = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_directory(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        assert!(init(0, None).is_ok());
        assert!(init(2, None).is_ok());
    }
}
