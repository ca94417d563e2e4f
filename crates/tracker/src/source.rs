use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::{track::TrackPoint, vehicle::VehicleReading, GeoPoint};

/// Current position of every vehicle in the fleet.
///
/// Transport failures are handled by the implementation: they are logged
/// and an empty snapshot is returned.
#[async_trait]
pub trait VehicleSource {
    async fn current_vehicles(&self) -> Vec<VehicleReading>;
}

/// Historical GPS samples, most recent first.
#[async_trait]
pub trait TrackSource {
    /// Samples observed at or after `since`, optionally for one vehicle only.
    async fn track_since(
        &self,
        since: DateTime<Utc>,
        vehicle: Option<&str>,
    ) -> Vec<TrackPoint>;
}

/// Free text to coordinates. `None` when nothing matches or the lookup failed.
#[async_trait]
pub trait Geocoder {
    async fn geocode(&self, location: &str) -> Option<GeoPoint>;
}
