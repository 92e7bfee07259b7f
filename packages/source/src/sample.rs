//! Embedded sample dataset used when no live provider is reachable.

use async_trait::async_trait;

use crate::normalize::normalize_dataset;
use crate::{IncidentDataset, IncidentProvider, SourceError};

/// Sample data embedded at compile time.
const SAMPLE_JSON: &str = include_str!("../data/sample.json");

/// Serves the embedded sample dataset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleProvider;

impl SampleProvider {
    /// Parses the embedded dataset.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] if the embedded JSON is malformed,
    /// which the tests below guard against.
    pub fn dataset() -> Result<IncidentDataset, SourceError> {
        let dataset: IncidentDataset = serde_json::from_str(SAMPLE_JSON)?;
        Ok(normalize_dataset("sample", dataset))
    }
}

#[async_trait]
impl IncidentProvider for SampleProvider {
    fn id(&self) -> &'static str {
        "sample"
    }

    async fn fetch(&self) -> Result<IncidentDataset, SourceError> {
        log::info!("Using embedded sample dataset");
        Self::dataset()
    }
}
