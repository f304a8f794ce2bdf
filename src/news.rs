//! News articles and where they come from

use std::path::PathBuf;

use chrono::DateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiKey;
use crate::error::NewsError;

const NEWSAPI_BASE: &str = "https://newsapi.org/v2";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArticleSource {
    pub name: String,
}

/// One article in the NewsAPI shape
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
}

impl Article {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn source_name(&self) -> &str {
        self.source.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Calendar date of publication. RFC 3339 timestamps are shortened,
    /// anything else is shown as given.
    pub fn published_date(&self) -> String {
        match self.published_at.as_deref() {
            None => String::new(),
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(ts) => ts.format("%Y-%m-%d").to_string(),
                Err(_) => raw.to_string(),
            },
        }
    }
}

/// Configured origin of the news feed
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NewsSource {
    #[default]
    Disabled,
    File(PathBuf),
    NewsApi { key: ApiKey, country: String },
}

/// Accepts either a bare array of articles or a NewsAPI response object.
/// NewsAPI sometimes returns `null` titles or urls for removed articles;
/// those entries are dropped.
pub fn decode_articles(body: &str) -> Result<Vec<Article>, NewsError> {
    let entries = match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("articles") {
            Some(Value::Array(items)) => items,
            _ => return Err(NewsError::Shape("missing `articles` array")),
        },
        _ => return Err(NewsError::Shape("expected an array or an object")),
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Article>(entry).ok())
        .collect())
}

pub fn headlines_url(key: &ApiKey, country: &str) -> String {
    format!(
        "{NEWSAPI_BASE}/top-headlines?country={}&apiKey={}",
        urlencoding::encode(country),
        urlencoding::encode(key.expose())
    )
}

/// Load articles from the configured source
pub async fn load_articles(source: NewsSource) -> Result<Vec<Article>, NewsError> {
    match source {
        NewsSource::Disabled => Ok(Vec::new()),
        NewsSource::File(path) => {
            let body = tokio::fs::read_to_string(&path).await?;
            decode_articles(&body)
        }
        NewsSource::NewsApi { key, country } => {
            let response = reqwest::Client::new()
                .get(headlines_url(&key, &country))
                .header(reqwest::header::USER_AGENT, "weather-news")
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(NewsError::Status(status));
            }
            let body = response.text().await?;
            decode_articles(&body)
        }
    }
}
