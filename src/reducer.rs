//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::news::NewsSource;
use crate::state::{AppState, MISSING_API_KEY};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let mut effects = Vec::new();
            effects.extend(submit_weather(state));
            effects.extend(load_news(state));
            DispatchResult::changed_with_many(effects)
        }

        // ===== Weather actions =====
        Action::WeatherSubmit => match submit_weather(state) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::changed(),
        },

        Action::WeatherDidLoad { request_id, result } => {
            if request_id != state.request_id {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loaded(result);
            state.is_refreshing = false;
            DispatchResult::changed()
        }

        Action::WeatherDidError {
            request_id,
            message,
        } => {
            if request_id != state.request_id {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(message);
            state.is_refreshing = false;
            DispatchResult::changed()
        }

        // ===== City input =====
        Action::CityChange(city) => {
            if city == state.city {
                return DispatchResult::unchanged();
            }
            state.city = city;
            DispatchResult::changed()
        }

        // ===== News actions =====
        Action::NewsFetch => match load_news(state) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::unchanged(),
        },

        Action::NewsDidLoad(articles) => {
            state.news_selected = state
                .news_selected
                .min(articles.len().saturating_sub(1));
            state.news = DataResource::Loaded(articles);
            DispatchResult::changed()
        }

        Action::NewsDidError(msg) => {
            state.news = DataResource::Failed(msg);
            state.news_selected = 0;
            DispatchResult::changed()
        }

        Action::NewsSelect(index) => {
            if index < state.articles().len() && index != state.news_selected {
                state.news_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Focus =====
        Action::FocusNext => {
            state.focus = state.focus.next();
            DispatchResult::changed()
        }

        Action::FocusPrev => {
            state.focus = state.focus.prev();
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Enter Loading for the current city, or fail straight away when no key is
/// configured. A previous result stays on screen until the response lands.
fn submit_weather(state: &mut AppState) -> Option<Effect> {
    state.request_id += 1;

    let Some(api_key) = state.config.api_key.clone() else {
        state.weather = DataResource::Failed(MISSING_API_KEY.to_string());
        state.is_refreshing = false;
        return None;
    };

    if state.weather.is_loaded() {
        state.is_refreshing = true;
    } else {
        state.weather = DataResource::Loading;
    }

    Some(Effect::FetchWeather {
        request_id: state.request_id,
        api_base: state.config.api_base.clone(),
        api_key,
        city: state.city.clone(),
    })
}

fn load_news(state: &mut AppState) -> Option<Effect> {
    if state.config.news == NewsSource::Disabled {
        return None;
    }
    state.news = DataResource::Loading;
    Some(Effect::LoadNews {
        source: state.config.news.clone(),
    })
}
