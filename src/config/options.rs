// src/config/options.rs
use std::env;
use std::time::Duration;

use super::consts::*;
use crate::error::{Result, ScrapeError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    RcPage,
    DlPage,
    ChallanPage,
    ChallanApi,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::RcPage => "rc page",
            SourceKind::DlPage => "dl page",
            SourceKind::ChallanPage => "challan page",
            SourceKind::ChallanApi => "challan api",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub retries: u32,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            retries: FETCH_RETRIES,
            user_agent: s!(USER_AGENT),
        }
    }
}

/// Where each record kind is fetched from. Templates carry `{id}`; a template
/// without it gets `?rc=<id>` appended (the upstream API convention).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceOptions {
    pub owner: Option<String>,
    pub rc_page: Option<String>,
    pub dl_page: Option<String>,
    pub challan_page: Option<String>,
    pub challan_api: Option<String>,
    pub fetch: FetchOptions,
}

impl SourceOptions {
    pub fn from_env() -> Self {
        let var = |k: &str| env::var(k).ok().filter(|v| !v.trim().is_empty());

        let mut fetch = FetchOptions::default();
        if let Some(secs) = var(ENV_FETCH_TIMEOUT_SECS).and_then(|v| v.parse::<u64>().ok()) {
            fetch.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = var(ENV_FETCH_RETRIES).and_then(|v| v.parse::<u32>().ok()) {
            fetch.retries = n.min(FETCH_RETRIES);
        }

        Self {
            owner: var(ENV_OWNER),
            rc_page: var(ENV_RC_SOURCE_URL),
            dl_page: var(ENV_DL_SOURCE_URL),
            challan_page: var(ENV_CHALLAN_PAGE_URL),
            challan_api: var(ENV_CHALLAN_API_URL),
            fetch,
        }
    }

    pub fn template(&self, kind: &SourceKind) -> Option<&str> {
        match kind {
            SourceKind::RcPage => self.rc_page.as_deref(),
            SourceKind::DlPage => self.dl_page.as_deref(),
            SourceKind::ChallanPage => self.challan_page.as_deref(),
            SourceKind::ChallanApi => self.challan_api.as_deref(),
        }
    }

    pub fn url_for(&self, kind: &SourceKind, id: &str) -> Result<String> {
        let tmpl = self
            .template(kind)
            .ok_or(ScrapeError::NotConfigured(kind.label()))?;
        Ok(build_url(tmpl, id))
    }
}

pub fn build_url(tmpl: &str, id: &str) -> String {
    if tmpl.contains("{id}") {
        tmpl.replace("{id}", id)
    } else if tmpl.contains('?') {
        format!("{tmpl}&rc={id}")
    } else {
        format!("{tmpl}?rc={id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_variants() {
        assert_eq!(build_url("https://h/rc/{id}", "UP63BJ8585"), "https://h/rc/UP63BJ8585");
        assert_eq!(build_url("https://h/api", "UP63BJ8585"), "https://h/api?rc=UP63BJ8585");
        assert_eq!(build_url("https://h/api?k=1", "X"), "https://h/api?k=1&rc=X");
    }

    #[test]
    fn missing_template_is_not_configured() {
        let opts = SourceOptions::default();
        let err = opts.url_for(&SourceKind::ChallanApi, "X").unwrap_err();
        assert!(matches!(err, ScrapeError::NotConfigured("challan api")));
    }

    #[test]
    fn default_fetch_options() {
        let f = FetchOptions::default();
        assert_eq!(f.timeout, Duration::from_secs(8));
        assert_eq!(f.retries, 1);
    }
}
