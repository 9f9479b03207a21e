pub mod limits;

use once_cell::sync::Lazy;
use reqwest::Url;

/// Generation backend. Hardcoded, the page has no runtime configuration.
pub static REEL_API_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost:8001").unwrap());

pub const TRENDS_PATH: &str = "trends";
pub const GENERATE_REEL_PATH: &str = "generate-reel";

pub const GENERATE_REEL_FALLBACK_ERROR: &str = "Failed to generate reel";
