// src/core/net.rs
// Fetch boundary: text in, nothing parsed here.

use std::{collections::HashMap, thread, time::Duration};

use reqwest::{StatusCode, blocking::Client};
use tracing::{debug, warn};

use crate::config::FetchOptions;
use crate::config::consts::RETRY_PAUSE_MS;
use crate::error::FetchError;

/// Anything that can hand back the body behind a URL.
/// `Sync` so one fetcher can serve both sides of a merged lookup.
pub trait Fetch: Sync {
    fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP GET with a per-request timeout and a bounded retry on
/// transient failures (timeout, connect, 5xx). 404 is final.
pub struct HttpFetch {
    client: Client,
    retries: u32,
}

impl HttpFetch {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(opts.timeout)
            .build()
            .map_err(|e| FetchError::Body(e.to_string()))?;
        Ok(Self { client, retries: opts.retries })
    }

    fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().map_err(classify)?;
        match resp.status() {
            s if s.is_success() => resp.text().map_err(|e| FetchError::Body(e.to_string())),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound),
            s => Err(FetchError::Status(s.as_u16())),
        }
    }
}

impl Fetch for HttpFetch {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0u32;
        loop {
            match self.attempt(url) {
                Ok(body) => {
                    debug!(bytes = body.len(), attempt, "fetched");
                    return Ok(body);
                }
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(error = %e, attempt, "transient fetch failure, retrying");
                    thread::sleep(Duration::from_millis(RETRY_PAUSE_MS));
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect
    } else if let Some(status) = e.status() {
        FetchError::Status(status.as_u16())
    } else {
        FetchError::Body(e.to_string())
    }
}

/// Offline fetcher: canned bodies keyed by exact URL; unknown URLs are
/// `NotFound`. Used for saved pages and tests.
#[derive(Default, Clone, Debug)]
pub struct StaticFetch {
    pages: HashMap<String, Result<String, FetchError>>,
}

impl StaticFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(body.into()));
        self
    }

    pub fn failing(mut self, url: impl Into<String>, err: FetchError) -> Self {
        self.pages.insert(url.into(), Err(err));
        self
    }
}

impl Fetch for StaticFetch {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.pages.get(url).cloned().unwrap_or(Err(FetchError::NotFound))
    }
}
