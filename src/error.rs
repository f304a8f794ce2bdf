//! Failure taxonomy for the weather and news fetches
//!
//! Both APIs take their key as a query parameter, so transport errors are
//! stored without their URL. The display text ends up in state snapshots
//! and recorded actions.

#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    /// Any non-success status; unknown cities and server errors look alike
    #[error("City not found")]
    NotFound,
    #[error("{0}")]
    Request(reqwest::Error),
    #[error("Something went wrong")]
    Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Request(e.without_url())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum NewsError {
    #[error("failed to read news file: {0}")]
    Io(#[from] std::io::Error),
    #[error("news request failed: {0}")]
    Request(reqwest::Error),
    #[error("news service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected news document: {0}")]
    Shape(&'static str),
    #[error("news response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for NewsError {
    fn from(e: reqwest::Error) -> Self {
        NewsError::Request(e.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Refused connection to a URL carrying `secret` as its key
    async fn refused(secret: &str) -> reqwest::Error {
        reqwest::get(format!("http://127.0.0.1:1/v2/top-headlines?apiKey={secret}"))
            .await
            .unwrap_err()
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(WeatherError::NotFound.to_string(), "City not found");

        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(WeatherError::from(bad).to_string(), "Something went wrong");
    }

    #[tokio::test]
    async fn test_transport_errors_drop_the_url() {
        let weather = WeatherError::from(refused("SECRET-KEY-123").await);
        assert!(matches!(weather, WeatherError::Request(_)));
        assert!(!weather.to_string().contains("SECRET-KEY-123"), "{weather}");
        assert!(!format!("{weather:?}").contains("SECRET-KEY-123"));

        let news = NewsError::from(refused("SECRET-KEY-123").await);
        assert!(matches!(news, NewsError::Request(_)));
        assert!(news.to_string().starts_with("news request failed"));
        assert!(!news.to_string().contains("SECRET-KEY-123"), "{news}");
        assert!(!format!("{news:?}").contains("SECRET-KEY-123"));
    }
}
