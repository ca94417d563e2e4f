//! Request parameters and response shapes of a feature service `query`
//! endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use utility::serde::date_time::deserialize_loose_option;

use crate::ApiError;

/// Spatial reference of plain WGS84 longitude/latitude.
pub const WGS84: u32 = 4326;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureQuery {
    #[serde(rename = "where")]
    pub where_clause: String,
    pub out_fields: String,
    pub f: String,
    pub result_record_count: u32,
    pub order_by_fields: Option<String>,
    #[serde(rename = "outSR")]
    pub out_sr: Option<u32>,
}

impl FeatureQuery {
    pub fn new<S: Into<String>>(where_clause: S, out_fields: &[&str]) -> Self {
        Self {
            where_clause: where_clause.into(),
            out_fields: out_fields.join(","),
            f: "json".to_owned(),
            result_record_count: 1000,
            order_by_fields: None,
            out_sr: Some(WGS84),
        }
    }

    pub fn limit(mut self, result_record_count: u32) -> Self {
        self.result_record_count = result_record_count;
        self
    }

    pub fn order_by<S: Into<String>>(mut self, order_by_fields: S) -> Self {
        self.order_by_fields = Some(order_by_fields.into());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceFault {
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct QueryResponse<A> {
    pub error: Option<ServiceFault>,
    #[serde(default)]
    pub features: Vec<Feature<A>>,
}

impl<A> QueryResponse<A> {
    pub fn into_features(self) -> Result<Vec<Feature<A>>, ApiError> {
        match self.error {
            Some(fault) => {
                let mut message = fault.message;
                if !fault.details.is_empty() {
                    message = format!("{} ({})", message, fault.details.join("; "));
                }
                Err(ApiError::ServiceError {
                    code: fault.code,
                    message,
                })
            }
            None => Ok(self.features),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct Feature<A> {
    pub attributes: Option<A>,
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
}

impl<A> Feature<A> {
    /// Coordinates from the attribute fields, falling back to the point
    /// geometry for whichever one is missing.
    pub fn coordinates(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> (Option<f64>, Option<f64>) {
        let geometry = self.geometry.as_ref();
        (
            latitude.or_else(|| geometry.and_then(|point| point.y)),
            longitude.or_else(|| geometry.and_then(|point| point.x)),
        )
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointGeometry {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub x: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub y: Option<f64>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleAttributes {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_option")]
    pub gps_time: Option<DateTime<Utc>>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub gps_latitude: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub gps_longitude: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, rename = "gps_speedMilesPerHour")]
    pub gps_speed_miles_per_hour: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, rename = "gps_headingDegrees")]
    pub gps_heading_degrees: Option<f64>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackAttributes {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_option")]
    pub gps_time: Option<DateTime<Utc>>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub gps_latitude: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub gps_longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_is_reported() {
        let response: QueryResponse<TrackAttributes> = serde_json::from_str(
            r#"{"error": {"code": 400, "message": "Unable to complete operation.",
                "details": ["Invalid query parameters."]}}"#,
        )
        .unwrap();

        match response.into_features() {
            Err(ApiError::ServiceError { code, message }) => {
                assert_eq!(code, Some(400));
                assert_eq!(
                    message,
                    "Unable to complete operation. (Invalid query parameters.)"
                );
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_features_is_empty() {
        let response: QueryResponse<TrackAttributes> =
            serde_json::from_str(r#"{"objectIdFieldName": "objectid"}"#).unwrap();
        assert!(response.into_features().unwrap().is_empty());
    }

    #[test]
    fn test_bad_fields_do_not_fail_the_record() {
        let response: QueryResponse<VehicleAttributes> = serde_json::from_str(
            r#"{"features": [
                {"attributes": {"name": "PW-7", "gps_latitude": "north",
                    "gps_longitude": -79.99, "gps_speedMilesPerHour": null,
                    "gps_time": "later"}},
                {"geometry": {"x": -79.9, "y": 40.4}}
            ]}"#,
        )
        .unwrap();

        let features = response.into_features().unwrap();
        assert_eq!(features.len(), 2);

        let attributes = features[0].attributes.as_ref().unwrap();
        assert_eq!(attributes.name.as_deref(), Some("PW-7"));
        assert_eq!(attributes.gps_latitude, None);
        assert_eq!(attributes.gps_longitude, Some(-79.99));
        assert_eq!(attributes.gps_speed_miles_per_hour, None);
        assert_eq!(attributes.gps_time, None);

        assert!(features[1].attributes.is_none());
        assert_eq!(features[1].coordinates(None, None), (Some(40.4), Some(-79.9)));
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    fn decode<A: serde::de::DeserializeOwned>(json: &str) -> Vec<Feature<A>> {
        serde_json::from_str::<QueryResponse<A>>(json)
            .unwrap()
            .into_features()
            .unwrap()
    }

    #[test]
    fn test_attributes_need_no_default() {
        let features = decode::<Named>(
            r#"{"features": [{"attributes": {"name": "PW-1"}}, {"geometry": {"x": 1.0, "y": 2.0}}]}"#,
        );
        assert_eq!(features[0].attributes.as_ref().unwrap().name, "PW-1");
        assert!(features[1].attributes.is_none());
        assert!(decode::<Named>("{}").is_empty());
    }

    #[test]
    fn test_attribute_coordinates_win_over_geometry() {
        let feature: Feature<TrackAttributes> = serde_json::from_str(
            r#"{"attributes": {"gps_latitude": 40.44},
                "geometry": {"x": -79.99, "y": 12.0}}"#,
        )
        .unwrap();
        let attributes = feature.attributes.clone().unwrap();
        assert_eq!(
            feature.coordinates(attributes.gps_latitude, attributes.gps_longitude),
            (Some(40.44), Some(-79.99))
        );
    }
}
