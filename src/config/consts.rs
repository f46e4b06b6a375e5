// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = concat!("vehicle_scrape/", env!("CARGO_PKG_VERSION"));
pub const FETCH_TIMEOUT_SECS: u64 = 8;
pub const FETCH_RETRIES: u32 = 1; // one retry, transient failures only
pub const RETRY_PAUSE_MS: u64 = 250;

// Env keys
pub const ENV_OWNER: &str = "OWNER";
pub const ENV_RC_SOURCE_URL: &str = "RC_SOURCE_URL";
pub const ENV_DL_SOURCE_URL: &str = "DL_SOURCE_URL";
pub const ENV_CHALLAN_PAGE_URL: &str = "CHALLAN_PAGE_URL";
pub const ENV_CHALLAN_API_URL: &str = "CHALLAN_API_URL";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_RETRIES: &str = "FETCH_RETRIES";

// Markup: labels and their values
pub const MARKER_SELECTOR: &str = "span, label, dt, th";
pub const VALUE_SELECTOR: &str = "p, dd, td";

// Markup: titled sections
pub const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";
pub const PRIMARY_HEADING_SELECTOR: &str = "h1";
pub const CARD_SELECTOR: &str = ".details-card, .card, section";

// Markup: per-kind hooks
pub const INSURANCE_EXPIRED_SELECTOR: &str = ".insurance-expired";
pub const COV_ITEM_SELECTOR: &str = ".cov-list li";
pub const DETAIL_BLOCK_SELECTOR: &str = ".detail-block";
pub const CHALLAN_CARD_SELECTOR: &str = ".challan-card";
pub const CHALLAN_ID_SELECTOR: &str = ".challan-id";
pub const CHALLAN_STATUS_SELECTOR: &str = ".challan-status";
pub const CHALLAN_ROW_SELECTOR: &str = ".challan-row";

// Output
pub const OFFENCE_DEFAULT: &str = "Unknown";
