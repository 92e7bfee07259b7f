//! Remote JSON provider.

use std::time::Duration;

use async_trait::async_trait;

use crate::normalize::normalize_dataset;
use crate::{IncidentDataset, IncidentProvider, SourceError, retry};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches an [`IncidentDataset`] published as JSON at a URL.
#[derive(Debug, Clone)]
pub struct JsonUrlProvider {
    id: String,
    url: String,
    client: reqwest::Client,
}

impl JsonUrlProvider {
    /// Creates a provider for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            id: format!("url:{url}"),
            url,
            client,
        })
    }
}

#[async_trait]
impl IncidentProvider for JsonUrlProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self) -> Result<IncidentDataset, SourceError> {
        log::info!("Fetching incident data from {}", self.url);
        let body = retry::send_json(|| self.client.get(&self.url)).await?;
        let dataset: IncidentDataset = serde_json::from_value(body)?;
        Ok(normalize_dataset(&self.id, dataset))
    }
}
