//! Application configuration
//!
//! Values are resolved once at startup. The backend base URL comes from the
//! `API_URL` environment variable at build time; without it the frontend
//! talks to port 3000 on the host it was served from.

use once_cell::sync::Lazy;
use std::time::Duration;

/// Request timeout for every backend call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Shop front used for "open on marketplace" links
pub const DEFAULT_SHOP_URL: &str = "https://kaspi.kz/shop";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend origin without trailing slash, e.g. "http://localhost:3000"
    pub api_base: String,
    pub request_timeout: Duration,
    pub shop_url: String,
}

impl AppConfig {
    /// Build the config from optional overrides.
    ///
    /// `location_base` is only called when no explicit API URL is given.
    pub fn resolve(
        api_url: Option<&str>,
        shop_url: Option<&str>,
        location_base: impl FnOnce() -> String,
    ) -> Self {
        let api_base = match api_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => location_base(),
        };
        let shop_url = shop_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SHOP_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base,
            request_timeout: REQUEST_TIMEOUT,
            shop_url,
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(option_env!("API_URL"), option_env!("SHOP_URL"), location_base)
    }

    pub fn request_timeout_ms(&self) -> u32 {
        u32::try_from(self.request_timeout.as_millis()).unwrap_or(u32::MAX)
    }
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

/// Global application config
pub fn app_config() -> &'static AppConfig {
    &CONFIG
}

/// Get the base URL for API requests from the current window location,
/// using port 3000 for the backend server.
///
/// Returns an empty string if window is not available (relative URLs).
fn location_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}
