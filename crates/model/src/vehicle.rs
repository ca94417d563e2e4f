use chrono::{DateTime, Utc};

use crate::{location_of, GeoPoint, Located};

/// Vehicles faster than this are considered moving.
pub const MOVING_SPEED_MPH: f64 = 0.5;

/// Most recent known state of one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleReading {
    pub name: String,
    pub observed_at: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed_mph: f64,
    pub heading_degrees: Option<f64>,
}

impl VehicleReading {
    pub fn is_moving(&self) -> bool {
        self.speed_mph > MOVING_SPEED_MPH
    }
}

impl Located for VehicleReading {
    fn location(&self) -> Option<GeoPoint> {
        location_of(self.latitude, self.longitude)
    }
}
