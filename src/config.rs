use std::time::Duration;

use crate::sign::SigningKeys;

pub const DEFAULT_API_BASE_URL: &str = "https://api.bilibili.com/";
pub const DEFAULT_PASSPORT_BASE_URL: &str = "https://passport.bilibili.com/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_REFERER: &str = "https://www.bilibili.com/";
pub const DEFAULT_ORIGIN: &str = "https://www.bilibili.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the platform client.
///
/// Base URLs are validated when the client is built, not here.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub passport_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub referer: String,
    pub origin: String,
    pub signing_keys: SigningKeys,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            passport_base_url: DEFAULT_PASSPORT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            signing_keys: SigningKeys::fallback(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables, defaulting anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Keys only make sense as a pair.
        let signing_keys = match (non_empty("BILI_WBI_IMG_KEY"), non_empty("BILI_WBI_SUB_KEY")) {
            (Some(img_key), Some(sub_key)) => SigningKeys::new(img_key, sub_key),
            _ => defaults.signing_keys,
        };

        Self {
            api_base_url: non_empty("BILI_API_BASE_URL").unwrap_or(defaults.api_base_url),
            passport_base_url: non_empty("BILI_PASSPORT_BASE_URL")
                .unwrap_or(defaults.passport_base_url),
            timeout: non_empty("BILI_HTTP_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            user_agent: non_empty("BILI_USER_AGENT").unwrap_or(defaults.user_agent),
            referer: defaults.referer,
            origin: defaults.origin,
            signing_keys,
        }
    }

    /// Point both hosts at one base URL. Used to run against a stand-in upstream.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.api_base_url = base_url.clone();
        self.passport_base_url = base_url;
        self
    }
}

/// Settings read by the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origin: String,
    /// Fetch session signing keys at startup.
    pub refresh_signing_keys: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origin: "*".to_string(),
            refresh_signing_keys: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.port),
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").unwrap_or(defaults.cors_allowed_origin),
            refresh_signing_keys: lookup("BILI_REFRESH_WBI_KEYS")
                .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(defaults.refresh_signing_keys),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
