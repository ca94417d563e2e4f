use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{
    feature::{Feature, FeatureQuery, QueryResponse},
    ApiError,
};

/// Read-only client for feature service `query` endpoints.
#[derive(Debug, Clone)]
pub struct FeatureServiceClient {
    http: reqwest::Client,
}

impl FeatureServiceClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Run a query against `url` and return its features.
    pub async fn query<A: DeserializeOwned>(
        &self,
        url: &str,
        query: &FeatureQuery,
    ) -> Result<Vec<Feature<A>>, ApiError> {
        log::debug!("Requesting feature service '{url}' where {}.", query.where_clause);

        /* perform get-request */
        let response = self.http.get(url).query(query).send().await?;

        /* parse response */
        match response.status() {
            reqwest::StatusCode::OK => {
                let body = response.text().await?;
                let parsed: QueryResponse<A> = serde_json::from_str(&body)?;
                let features = parsed.into_features()?;
                log::debug!("Received {} features from '{url}'.", features.len());
                Ok(features)
            }
            other => match response.text().await {
                Ok(val) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url: url.to_owned(),
                    response: Some(val),
                }),
                Err(_) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url: url.to_owned(),
                    response: None,
                }),
            },
        }
    }
}
