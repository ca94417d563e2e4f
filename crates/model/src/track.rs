use chrono::{DateTime, Utc};

use crate::{location_of, GeoPoint, Located};

/// One historical GPS sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub name: String,
    pub observed_at: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Located for TrackPoint {
    fn location(&self) -> Option<GeoPoint> {
        location_of(self.latitude, self.longitude)
    }
}
