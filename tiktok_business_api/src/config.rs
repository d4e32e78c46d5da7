//! Client configuration: credentials, endpoint, timeouts, and debug toggle.

use std::fmt;
use std::time::Duration;

/// Production endpoint for the TikTok Business API.
pub const DEFAULT_API_BASE_URL: &str = "https://business-api.tiktok.com/open_api/";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_OPEN_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: usize = 3;

/// Settings for one [`Client`](crate::Client).
///
/// Each client owns its own copy. The access token can be replaced on the
/// client after an auth exchange with
/// [`Client::set_access_token`](crate::Client::set_access_token).
#[derive(Clone)]
pub struct Config {
    /// TikTok developer app ID.
    pub app_id: Option<String>,
    /// TikTok developer app secret.
    pub secret: Option<String>,
    /// Token sent as the `Access-Token` header when present.
    pub access_token: Option<String>,
    /// Base URL every request path is joined onto.
    pub api_base_url: String,
    /// Emit request/response details as `tracing` debug events.
    pub debug: bool,
    /// Total request timeout.
    pub timeout: Duration,
    /// Connection establishment timeout.
    pub open_timeout: Duration,
    /// Transport-level retries for idempotent requests.
    pub max_retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            secret: None,
            access_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            debug: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            open_timeout: Duration::from_secs(DEFAULT_OPEN_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("api_base_url", &self.api_base_url)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("open_timeout", &self.open_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Config {
    /// Builds a config from `TIKTOK_*` environment variables.
    ///
    /// Unset variables keep their defaults; numeric values that fail to
    /// parse fall back to the default as well.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            app_id: env_string("TIKTOK_APP_ID"),
            secret: env_string("TIKTOK_SECRET"),
            access_token: env_string("TIKTOK_ACCESS_TOKEN"),
            api_base_url: env_string("TIKTOK_API_BASE_URL").unwrap_or(defaults.api_base_url),
            debug: env_bool("TIKTOK_DEBUG", defaults.debug),
            timeout: Duration::from_secs(env_u64("TIKTOK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            open_timeout: Duration::from_secs(env_u64(
                "TIKTOK_OPEN_TIMEOUT_SECS",
                DEFAULT_OPEN_TIMEOUT_SECS,
            )),
            max_retries: env_usize("TIKTOK_MAX_RETRIES", DEFAULT_MAX_RETRIES),
        }
    }

    pub fn with_app_id(mut self, app_id: &str) -> Self {
        self.app_id = Some(app_id.to_string());
        self
    }

    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = Some(secret.to_string());
        self
    }

    pub fn with_access_token(mut self, access_token: &str) -> Self {
        self.access_token = Some(access_token.to_string());
        self
    }

    pub fn with_api_base_url(mut self, api_base_url: &str) -> Self {
        self.api_base_url = api_base_url.to_string();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_open_timeout(mut self, open_timeout: Duration) -> Self {
        self.open_timeout = open_timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_string(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env_string(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match env_string(key).map(|v| v.to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
