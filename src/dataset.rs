use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{config::AppConfig, error::DatasetError};

/// ProviderRecord
///
/// One row of the public provider dataset. Only `provider_name` is read, and
/// whatever JSON it holds is accepted; every other column is kept untouched
/// in the order the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ProviderRecord {
    /// Provider name as printed: strings unquoted, other values as JSON,
    /// `-` when absent or null.
    pub fn name(&self) -> String {
        match &self.provider_name {
            None | Some(Value::Null) => "-".to_string(),
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Record as one JSON line followed by its provider name.
    pub fn render(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        format!("{json}\n{}", self.name())
    }
}

/// Decodes a JSON array of records.
pub fn parse_records(body: &str) -> Result<Vec<ProviderRecord>, DatasetError> {
    Ok(serde_json::from_str(body)?)
}

/// DatasetClient
///
/// Fetches provider records from the configured endpoint.
#[derive(Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    url: String,
    limit: u32,
}

impl DatasetClient {
    pub fn new(url: &str, limit: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
            limit,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.dataset_url, config.dataset_limit)
    }

    /// `GET {url}?$limit={limit}`.
    pub fn build_request(&self) -> Result<reqwest::Request, DatasetError> {
        Ok(self
            .http
            .get(&self.url)
            .query(&[("$limit", self.limit)])
            .build()?)
    }

    pub async fn fetch_records(&self) -> Result<Vec<ProviderRecord>, DatasetError> {
        let request = self.build_request()?;
        tracing::info!(url = %request.url(), "fetching provider dataset");

        let body = self
            .http
            .execute(request)
            .await?
            .error_for_status()?
            .text()
            .await?;

        let records = parse_records(&body)?;
        tracing::info!(count = records.len(), "provider dataset fetched");
        Ok(records)
    }
}
