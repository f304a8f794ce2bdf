//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::news::Article;
use crate::state::WeatherResult;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: fetch weather for the default city and load the news feed
    Init,

    // ===== Weather category =====
    /// Submit the current city (Enter in the input or the Search button)
    WeatherSubmit,

    /// Result: response for request `request_id` decoded successfully
    WeatherDidLoad {
        request_id: u64,
        result: WeatherResult,
    },

    /// Result: request `request_id` failed
    WeatherDidError { request_id: u64, message: String },

    // ===== City category =====
    /// Input text changed
    CityChange(String),

    // ===== News category =====
    /// Reload the news feed
    NewsFetch,

    NewsDidLoad(Vec<Article>),

    NewsDidError(String),

    /// Select an article by index
    NewsSelect(usize),

    // ===== Focus category =====
    FocusNext,

    FocusPrev,

    // ===== UI category =====
    /// Toggle between Celsius and Fahrenheit
    UiToggleUnits,

    /// Force a re-render (cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    Quit,
}
