//! Local JSON file provider.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::normalize::normalize_dataset;
use crate::{IncidentDataset, IncidentProvider, SourceError};

/// Reads an [`IncidentDataset`] from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    id: String,
    path: PathBuf,
}

impl JsonFileProvider {
    /// Creates a provider for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: format!("file:{}", path.display()),
            path,
        }
    }
}

#[async_trait]
impl IncidentProvider for JsonFileProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self) -> Result<IncidentDataset, SourceError> {
        log::info!("Reading incident data from {}", self.path.display());
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let dataset: IncidentDataset = serde_json::from_str(&contents)?;
        Ok(normalize_dataset(&self.id, dataset))
    }
}
