use std::fmt;

use utility::geo::haversine_distance_miles;

pub mod track;
pub mod vehicle;

/// A resolved reference location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_miles_to(&self, other: &GeoPoint) -> f64 {
        haversine_distance_miles(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Anything that may carry a usable position.
pub trait Located {
    fn location(&self) -> Option<GeoPoint>;

    fn with_distance_to(self, reference: &GeoPoint) -> Option<WithDistance<Self>>
    where
        Self: Sized,
    {
        let distance = reference.distance_miles_to(&self.location()?);
        Some(WithDistance::new(distance, self))
    }
}

#[derive(Debug, Clone)]
pub struct WithDistance<T> {
    pub distance_miles: f64,
    pub content: T,
}

impl<T> WithDistance<T> {
    pub fn new(distance_miles: f64, content: T) -> Self {
        Self {
            distance_miles,
            content,
        }
    }

    pub fn distance_feet(&self) -> f64 {
        utility::geo::miles_to_feet(self.distance_miles)
    }
}

pub(crate) fn location_of(latitude: Option<f64>, longitude: Option<f64>) -> Option<GeoPoint> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
            Some(GeoPoint::new(latitude, longitude))
        }
        _ => None,
    }
}
