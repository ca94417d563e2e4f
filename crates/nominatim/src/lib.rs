use std::{error, fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use model::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use tracker::source::Geocoder;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Appended to free text that does not name a region.
const REGION_SUFFIX: &str = "Pittsburgh, PA";
const STATE_SUFFIX: &str = "PA";
const REGION_WORDS: [&str; 3] = ["pa", "pennsylvania", "pittsburgh"];

#[derive(Debug, Clone)]
pub enum GeocodeError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
    },
}

impl error::Error for GeocodeError {}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeocodeError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            GeocodeError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            GeocodeError::InvalidResponse { status_code, url } => {
                write!(f, "Invalid Response ({}) {}", status_code, url)
            }
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        GeocodeError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for GeocodeError {
    fn from(e: serde_json::Error) -> Self {
        GeocodeError::JsonError(Arc::new(e))
    }
}

#[derive(Debug, Clone, Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    format: &'static str,
    limit: u32,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    #[serde_as(as = "DisplayFromStr")]
    pub lat: f64,
    #[serde_as(as = "DisplayFromStr")]
    pub lon: f64,
    pub display_name: Option<String>,
}

impl From<Place> for GeoPoint {
    fn from(place: Place) -> Self {
        GeoPoint::new(place.lat, place.lon)
    }
}

/// Qualify free text so that the search stays in the service area.
///
/// A bare five digit postal code gets the state appended; any other text
/// without a comma or a region word gets the city and state appended.
pub fn normalize_query(location: &str) -> String {
    let location = location.trim();

    if location.len() == 5 && location.chars().all(|c| c.is_ascii_digit()) {
        return format!("{location}, {STATE_SUFFIX}");
    }

    let lowercase = location.to_lowercase();
    let has_region = lowercase.contains(',')
        || lowercase
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| REGION_WORDS.contains(&word));
    if has_region {
        location.to_owned()
    } else {
        format!("{location}, {REGION_SUFFIX}")
    }
}

pub struct NominatimClient {
    http: reqwest::Client,
    url: String,
}

impl NominatimClient {
    pub fn new<S: Into<String>>(
        url: S,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Best match for `location`, `Ok(None)` if nothing matched.
    pub async fn search(&self, location: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        let query = normalize_query(location);
        log::debug!("Geocoding '{query}' via '{}'.", self.url);

        let response = self
            .http
            .get(&self.url)
            .query(&SearchQuery {
                q: &query,
                format: "json",
                limit: 1,
            })
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let body = response.text().await?;
                Ok(best_match(&body)?)
            }
            other => Err(GeocodeError::InvalidResponse {
                status_code: other,
                url: self.url.clone(),
            }),
        }
    }
}

fn best_match(body: &str) -> Result<Option<GeoPoint>, serde_json::Error> {
    let places: Vec<Place> = serde_json::from_str(body)?;
    Ok(places.into_iter().next().map(GeoPoint::from))
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, location: &str) -> Option<GeoPoint> {
        self.search(location).await.unwrap_or_else(|why| {
            log::error!("Geocoding failed: {}", why);
            None
        })
    }
}
