//! Effects - side effects declared by the reducer

use crate::config::ApiKey;
use crate::news::NewsSource;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch current conditions for `city`; the response is tagged with `request_id`
    FetchWeather {
        request_id: u64,
        api_base: String,
        api_key: ApiKey,
        city: String,
    },
    /// Load articles from the configured source
    LoadNews { source: NewsSource },
}
