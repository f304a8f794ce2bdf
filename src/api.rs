//! WeatherAPI.com client

use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ApiKey;
use crate::error::WeatherError;
use crate::state::WeatherResult;

// ============================================================================
// Wire format
// ============================================================================

/// `current.json` response body
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: WireLocation,
    current: WireCurrent,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WireCurrent {
    temp_c: f32,
    feelslike_c: f32,
    condition: WireCondition,
}

#[derive(Debug, Deserialize)]
struct WireCondition {
    text: String,
    icon: String,
}

impl From<CurrentResponse> for WeatherResult {
    fn from(body: CurrentResponse) -> Self {
        WeatherResult {
            name: body.location.name,
            country: body.location.country,
            temp_c: body.current.temp_c,
            feelslike_c: body.current.feelslike_c,
            condition: body.current.condition.text,
            icon: body.current.condition.icon,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Build the current-conditions URL. The city is sent as typed, including
/// an empty string.
pub fn current_url(base: &str, key: &ApiKey, city: &str) -> String {
    format!(
        "{}/current.json?key={}&q={}",
        base.trim_end_matches('/'),
        urlencoding::encode(key.expose()),
        urlencoding::encode(city)
    )
}

/// Map a raw response to a result. Every non-success status reads as an
/// unknown city.
pub fn decode_current(status: StatusCode, body: &str) -> Result<WeatherResult, WeatherError> {
    if !status.is_success() {
        return Err(WeatherError::NotFound);
    }
    let data: CurrentResponse = serde_json::from_str(body)?;
    Ok(data.into())
}

/// Fetch current conditions for `city`
pub async fn fetch_current(
    base: &str,
    key: &ApiKey,
    city: &str,
) -> Result<WeatherResult, WeatherError> {
    let url = current_url(base, key, city);

    let response = reqwest::get(&url).await?;
    let status = response.status();
    let body = response.text().await?;

    decode_current(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LONDON: &str = r#"{
        "location": {"name": "London", "country": "UK"},
        "current": {
            "temp_c": 15,
            "feelslike_c": 14,
            "condition": {"text": "Cloudy", "icon": "//cdn/64.png"}
        }
    }"#;

    #[test]
    fn test_decode_success() {
        let result = decode_current(StatusCode::OK, LONDON).unwrap();
        assert_eq!(
            result,
            WeatherResult {
                name: "London".into(),
                country: "UK".into(),
                temp_c: 15.0,
                feelslike_c: 14.0,
                condition: "Cloudy".into(),
                icon: "//cdn/64.png".into(),
            }
        );
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = r#"{
            "location": {"name": "Paris", "country": "France", "lat": 48.87},
            "current": {
                "temp_c": 21.5, "temp_f": 70.7, "feelslike_c": 21.0,
                "condition": {"text": "Sunny", "icon": "//x/1.png", "code": 1000}
            }
        }"#;
        let result = decode_current(StatusCode::OK, body).unwrap();
        assert_eq!(result.name, "Paris");
        assert_eq!(result.temp_c, 21.5);
    }

    #[test]
    fn test_non_success_is_not_found() {
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::BAD_REQUEST,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = decode_current(status, LONDON).unwrap_err();
            assert!(matches!(err, WeatherError::NotFound));
            assert_eq!(err.to_string(), "City not found");
        }
    }

    #[test]
    fn test_malformed_body_fails_explicitly() {
        let err = decode_current(StatusCode::OK, r#"{"location": {"name": "X"}}"#).unwrap_err();
        assert!(matches!(err, WeatherError::Malformed(_)));
    }

    #[test]
    fn test_current_url_encodes_query() {
        let key = ApiKey::new("k 1").unwrap();
        assert_eq!(
            current_url("https://api.weatherapi.com/v1/", &key, "New York"),
            "https://api.weatherapi.com/v1/current.json?key=k%201&q=New%20York"
        );
        assert_eq!(
            current_url("http://localhost", &key, ""),
            "http://localhost/current.json?key=k%201&q="
        );
    }

    #[tokio::test]
    async fn test_refused_connection_hides_key() {
        let key = ApiKey::new("SECRET-KEY-123").unwrap();

        let err = fetch_current("http://127.0.0.1:1", &key, "London")
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Request(_)));
        let message = err.to_string();
        assert!(!message.is_empty());
        assert!(!message.contains("SECRET-KEY-123"), "{message}");
    }
}
