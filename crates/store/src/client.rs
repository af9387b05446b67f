//! Authenticated HTTP client for the data-store query surface.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use suivi_shared::config::StoreConfig;
use tracing::debug;

use crate::error::StoreError;

/// Longest response-body prefix kept in error messages.
const ERROR_BODY_LIMIT: usize = 512;

/// Client for the hosted data store.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Builds a client from configuration.
    ///
    /// The API key is sent both as `apikey` and as a bearer token, the
    /// convention of the hosted store. Every request carries the
    /// configured timeout; the store applies none of its own.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| StoreError::Config(format!("api_key is not a valid header: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| StoreError::Config(format!("api_key is not a valid header: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches all rows of `table` matching the query-string filters.
    pub(crate) async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        debug!(table, ?query, "fetching rows");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
