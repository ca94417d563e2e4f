use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use model::{track::TrackPoint, vehicle::VehicleReading};
use tracker::source::{TrackSource, VehicleSource};

use crate::{
    client::FeatureServiceClient,
    feature::{Feature, FeatureQuery, TrackAttributes, VehicleAttributes},
    ApiError,
};

pub const VEHICLE_RECORD_LIMIT: u32 = 500;
pub const HISTORY_RECORD_LIMIT: u32 = 2000;

const VEHICLE_FIELDS: [&str; 6] = [
    "name",
    "gps_time",
    "gps_latitude",
    "gps_longitude",
    "gps_speedMilesPerHour",
    "gps_headingDegrees",
];
const TRACK_FIELDS: [&str; 4] = ["name", "gps_time", "gps_latitude", "gps_longitude"];

/// Live vehicle positions and their track history, served by two feature
/// layers.
pub struct PlowFeed {
    client: FeatureServiceClient,
    vehicles_url: String,
    history_url: String,
}

impl PlowFeed {
    pub fn new<S: Into<String>>(
        client: FeatureServiceClient,
        vehicles_url: S,
        history_url: S,
    ) -> Self {
        Self {
            client,
            vehicles_url: vehicles_url.into(),
            history_url: history_url.into(),
        }
    }

    pub async fn fetch_vehicles(&self) -> Result<Vec<VehicleReading>, ApiError> {
        let features = self
            .client
            .query::<VehicleAttributes>(&self.vehicles_url, &vehicles_query())
            .await?;
        Ok(features.into_iter().map(vehicle_reading).collect())
    }

    pub async fn fetch_track(
        &self,
        since: DateTime<Utc>,
        vehicle: Option<&str>,
    ) -> Result<Vec<TrackPoint>, ApiError> {
        let features = self
            .client
            .query::<TrackAttributes>(&self.history_url, &track_query(since, vehicle))
            .await?;
        Ok(features.into_iter().filter_map(track_point).collect())
    }
}

#[async_trait]
impl VehicleSource for PlowFeed {
    async fn current_vehicles(&self) -> Vec<VehicleReading> {
        self.fetch_vehicles().await.unwrap_or_else(|why| {
            log::error!("Error fetching vehicles from '{}': {}", self.vehicles_url, why);
            vec![]
        })
    }
}

#[async_trait]
impl TrackSource for PlowFeed {
    async fn track_since(
        &self,
        since: DateTime<Utc>,
        vehicle: Option<&str>,
    ) -> Vec<TrackPoint> {
        self.fetch_track(since, vehicle).await.unwrap_or_else(|why| {
            log::error!("Error fetching route history from '{}': {}", self.history_url, why);
            vec![]
        })
    }
}

pub fn vehicles_query() -> FeatureQuery {
    FeatureQuery::new("1=1", &VEHICLE_FIELDS).limit(VEHICLE_RECORD_LIMIT)
}

pub fn track_query(since: DateTime<Utc>, vehicle: Option<&str>) -> FeatureQuery {
    let mut conditions = vec![format!(
        "gps_time >= {}",
        quote_literal(&since.to_rfc3339_opts(SecondsFormat::Secs, false))
    )];
    if let Some(vehicle) = vehicle {
        conditions.push(format!("name = {}", quote_literal(vehicle)));
    }

    FeatureQuery::new(conditions.join(" AND "), &TRACK_FIELDS)
        .limit(HISTORY_RECORD_LIMIT)
        .order_by("gps_time DESC")
}

/// SQL string literal with embedded quotes doubled.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn vehicle_reading(mut feature: Feature<VehicleAttributes>) -> VehicleReading {
    let attributes = feature.attributes.take().unwrap_or_default();
    let (latitude, longitude) =
        feature.coordinates(attributes.gps_latitude, attributes.gps_longitude);

    VehicleReading {
        name: attributes.name.unwrap_or_default(),
        observed_at: attributes.gps_time,
        latitude,
        longitude,
        speed_mph: attributes
            .gps_speed_miles_per_hour
            .filter(|speed| speed.is_finite())
            .unwrap_or(0.0)
            .max(0.0),
        heading_degrees: attributes.gps_heading_degrees,
    }
}

/// Track samples without any coordinates are unusable and dropped here.
fn track_point(mut feature: Feature<TrackAttributes>) -> Option<TrackPoint> {
    let attributes = feature.attributes.take().unwrap_or_default();
    let (latitude, longitude) =
        feature.coordinates(attributes.gps_latitude, attributes.gps_longitude);

    Some(TrackPoint {
        name: attributes.name.unwrap_or_default(),
        observed_at: attributes.gps_time,
        latitude: Some(latitude?),
        longitude: Some(longitude?),
    })
}
