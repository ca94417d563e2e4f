use std::{env, time::Duration};

pub const VEHICLES_URL: &str = "https://services1.arcgis.com/YZCmUqbcsUpOKfj7/arcgis/rest/services/TEST_TEST/FeatureServer/0/query";
pub const HISTORY_URL: &str = "https://pghbridgis.pittsburghpa.gov/hosting/rest/services/Hosted/samsara_history/FeatureServer/0/query";
pub const USER_AGENT: &str = concat!("snowplow-tracker/", env!("CARGO_PKG_VERSION"));

const FEED_TIMEOUT_SECS: u64 = 30;
const GEOCODE_TIMEOUT_SECS: u64 = 10;

/// Endpoints and timeouts, overridable through the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub vehicles_url: String,
    pub history_url: String,
    pub geocoder_url: String,
    pub user_agent: String,
    pub feed_timeout: Duration,
    pub geocode_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vehicles_url: VEHICLES_URL.to_owned(),
            history_url: HISTORY_URL.to_owned(),
            geocoder_url: nominatim::NOMINATIM_URL.to_owned(),
            user_agent: USER_AGENT.to_owned(),
            feed_timeout: Duration::from_secs(FEED_TIMEOUT_SECS),
            geocode_timeout: Duration::from_secs(GEOCODE_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };
        let seconds = |key: &str, default: Duration| match lookup(key) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!("Ignoring {key}='{value}', expected a positive number of seconds.");
                    default
                }
            },
            None => default,
        };

        Self {
            vehicles_url: text("SNOWPLOW_VEHICLES_URL", defaults.vehicles_url),
            history_url: text("SNOWPLOW_HISTORY_URL", defaults.history_url),
            geocoder_url: text("SNOWPLOW_GEOCODER_URL", defaults.geocoder_url),
            user_agent: defaults.user_agent,
            feed_timeout: seconds("SNOWPLOW_FEED_TIMEOUT_SECS", defaults.feed_timeout),
            geocode_timeout: seconds("SNOWPLOW_GEOCODE_TIMEOUT_SECS", defaults.geocode_timeout),
        }
    }
}
