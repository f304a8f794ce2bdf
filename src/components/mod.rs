pub mod dashboard;
pub mod news_card;
pub mod news_feed;
pub mod weather_card;
pub mod weather_feature;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use dashboard::{Dashboard, DashboardAreas, DashboardProps};
pub use news_card::{NEWS_CARD_HEIGHT, NewsCard, NewsCardProps};
pub use news_feed::{NewsFeed, NewsFeedProps};
pub use weather_card::{WEATHER_CARD_HEIGHT, WeatherCard, WeatherCardProps};
pub use weather_feature::{WeatherFeature, WeatherFeatureProps};
