//! Runtime configuration, built once from CLI/env in `main` and handed to
//! `AppState::new`.

use std::fmt;

use crate::news::NewsSource;
use crate::theme::Theme;

pub const DEFAULT_CITY: &str = "London";
pub const DEFAULT_API_BASE: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_IMAGE_HOSTS: [&str; 2] = ["cdn.weatherapi.com", "ui-avatars.com"];

/// Secret credential; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Blank strings count as "not configured".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedConfig {
    /// City fetched on startup and seeded into the input
    pub default_city: String,
    pub api_key: Option<ApiKey>,
    pub api_base: String,
    pub news: NewsSource,
    /// Hosts remote images may be shown from
    pub image_hosts: Vec<String>,
    pub theme: Theme,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            news: NewsSource::Disabled,
            image_hosts: DEFAULT_IMAGE_HOSTS.iter().map(|h| h.to_string()).collect(),
            theme: Theme::default(),
        }
    }
}

impl FeedConfig {
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = ApiKey::new(key);
        self
    }

    /// Whether `url` points at an allow-listed image host
    pub fn image_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            return false;
        };
        parsed
            .host_str()
            .is_some_and(|host| self.image_hosts.iter().any(|allowed| allowed == host))
    }
}
