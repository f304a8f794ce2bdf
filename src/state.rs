//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::config::FeedConfig;
use crate::news::Article;

/// Current conditions for one location, as shown by the weather card
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherResult {
    pub name: String,
    pub country: String,
    pub temp_c: f32,
    pub feelslike_c: f32,
    pub condition: String,
    /// Icon reference as delivered by the API (usually protocol-relative)
    pub icon: String,
}

impl WeatherResult {
    /// "Name, Country" heading
    pub fn place(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    /// Absolute image source for the condition icon
    pub fn icon_url(&self) -> String {
        if self.icon.starts_with("//") {
            format!("https:{}", self.icon)
        } else {
            self.icon.clone()
        }
    }
}

/// Observable lifecycle of the weather request
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RequestState<'a> {
    Idle,
    Loading,
    Success(&'a WeatherResult),
    Failed(&'a str),
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    /// Whole values print without a fractional part ("15°C", "15.5°C").
    pub fn format(&self, celsius: f32) -> String {
        match self {
            TempUnit::Celsius => format!("{}°C", round_tenth(celsius)),
            TempUnit::Fahrenheit => format!("{}°F", round_tenth(celsius * 9.0 / 5.0 + 32.0)),
        }
    }
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Which widget receives keyboard input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    #[default]
    CityInput,
    SearchButton,
    News,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::CityInput => Focus::SearchButton,
            Focus::SearchButton => Focus::News,
            Focus::News => Focus::CityInput,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::CityInput => Focus::News,
            Focus::SearchButton => Focus::CityInput,
            Focus::News => Focus::SearchButton,
        }
    }
}

pub const MISSING_API_KEY: &str = "Missing API key. Please check environment variables.";
pub const NO_NEWS_SOURCE: &str = "No news source configured";

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Weather widget ---
    /// Controlled city input value
    #[debug(section = "Weather", label = "City")]
    pub city: String,

    /// Weather lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Data", debug_fmt)]
    pub weather: DataResource<WeatherResult>,

    /// A fetch is in flight while a previous result stays on screen
    #[debug(section = "Weather", label = "Refreshing")]
    pub is_refreshing: bool,

    /// Id of the latest submitted request; older responses are dropped
    #[debug(section = "Weather", label = "Request")]
    pub request_id: u64,

    #[debug(section = "Weather", label = "Unit", debug_fmt)]
    pub unit: TempUnit,

    // --- News ---
    #[debug(section = "News", label = "Articles", debug_fmt)]
    pub news: DataResource<Vec<Article>>,

    #[debug(section = "News", label = "Selected")]
    pub news_selected: usize,

    // --- UI ---
    #[debug(section = "UI", label = "Focus", debug_fmt)]
    pub focus: Focus,

    /// Runtime configuration; never serialized so snapshots carry no keys
    #[serde(skip)]
    #[debug(skip)]
    pub config: FeedConfig,
}

impl AppState {
    /// Create state seeded from configuration
    pub fn new(config: FeedConfig) -> Self {
        Self {
            city: config.default_city.clone(),
            weather: DataResource::Empty,
            is_refreshing: false,
            request_id: 0,
            unit: TempUnit::default(),
            news: DataResource::Empty,
            news_selected: 0,
            focus: Focus::default(),
            config,
        }
    }

    /// Four-valued view over `weather` + `is_refreshing`
    pub fn request_state(&self) -> RequestState<'_> {
        if self.is_refreshing {
            return RequestState::Loading;
        }
        match &self.weather {
            DataResource::Empty => RequestState::Idle,
            DataResource::Loading => RequestState::Loading,
            DataResource::Loaded(result) => RequestState::Success(result),
            DataResource::Failed(message) => RequestState::Failed(message),
        }
    }

    /// Result to display; kept visible while a refresh is in flight
    pub fn visible_result(&self) -> Option<&WeatherResult> {
        self.weather.data()
    }

    pub fn articles(&self) -> &[Article] {
        self.news.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles().get(self.news_selected)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FeedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloudy() -> WeatherResult {
        WeatherResult {
            name: "London".into(),
            country: "UK".into(),
            temp_c: 15.0,
            feelslike_c: 14.0,
            condition: "Cloudy".into(),
            icon: "//cdn/64.png".into(),
        }
    }

    #[test]
    fn test_icon_url_gets_https_scheme() {
        assert_eq!(cloudy().icon_url(), "https://cdn/64.png");

        let absolute = WeatherResult {
            icon: "https://cdn.weatherapi.com/a.png".into(),
            ..cloudy()
        };
        assert_eq!(absolute.icon_url(), "https://cdn.weatherapi.com/a.png");
    }

    #[test]
    fn test_temperature_formatting() {
        assert_eq!(TempUnit::Celsius.format(15.0), "15°C");
        assert_eq!(TempUnit::Celsius.format(15.5), "15.5°C");
        assert_eq!(TempUnit::Celsius.format(-3.0), "-3°C");
        assert_eq!(TempUnit::Fahrenheit.format(0.0), "32°F");
        assert_eq!(TempUnit::Fahrenheit.format(15.0), "59°F");
    }

    #[test]
    fn test_request_state_view() {
        let mut state = AppState::default();
        assert_eq!(state.request_state(), RequestState::Idle);

        state.weather = DataResource::Loading;
        assert_eq!(state.request_state(), RequestState::Loading);

        let result = cloudy();
        state.weather = DataResource::Loaded(result.clone());
        assert_eq!(state.request_state(), RequestState::Success(&result));

        state.is_refreshing = true;
        assert_eq!(state.request_state(), RequestState::Loading);
        assert_eq!(state.visible_result(), Some(&result));

        state.is_refreshing = false;
        state.weather = DataResource::Failed("City not found".into());
        assert_eq!(state.request_state(), RequestState::Failed("City not found"));
        assert_eq!(state.visible_result(), None);
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::CityInput.next(), Focus::SearchButton);
        assert_eq!(Focus::News.next(), Focus::CityInput);
        assert_eq!(Focus::CityInput.prev(), Focus::News);
        assert_eq!(Focus::CityInput.next().prev(), Focus::CityInput);
    }

    #[test]
    fn test_new_seeds_city_from_config() {
        let state = AppState::default();
        assert_eq!(state.city, "London");
        assert!(state.weather.is_empty());
    }
}
