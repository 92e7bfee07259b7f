#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident data providers.
//!
//! Every provider implements [`IncidentProvider`] and returns the same
//! [`IncidentDataset`] shape, so they are interchangeable. A
//! [`ProviderChain`] tries a prioritized list of providers in order and
//! returns the first dataset that loads; the embedded [`SampleProvider`]
//! is the usual last resort.

pub mod chain;
pub mod file;
pub mod http;
pub mod normalize;
pub mod retry;
pub mod sample;

use async_trait::async_trait;
use gun_violence_aggregate_models::{MonthlyRecord, StateRecord};
use serde::{Deserialize, Serialize};

pub use chain::{FetchedDataset, ProviderChain};
pub use file::JsonFileProvider;
pub use http::JsonUrlProvider;
pub use sample::SampleProvider;

/// Errors that can occur while loading incident data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status code returned by the server.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Every provider in a [`ProviderChain`] failed.
    #[error("All {} providers failed: {}", .failures.len(), .failures.join("; "))]
    AllProvidersFailed {
        /// One `"<provider id>: <error>"` entry per attempted provider.
        failures: Vec<String>,
    },
}

/// Raw incident data as delivered by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDataset {
    /// Incident counts per state.
    #[serde(default)]
    pub states: Vec<StateRecord>,
    /// Incident counts per month, in chronological order.
    #[serde(default)]
    pub monthly: Vec<MonthlyRecord>,
}

/// Trait that all incident data providers must implement.
#[async_trait]
pub trait IncidentProvider: Send + Sync {
    /// Returns a unique identifier for this provider (e.g., `"sample"`).
    fn id(&self) -> &str;

    /// Loads the provider's dataset.
    ///
    /// Implementations should pass their result through
    /// [`normalize::normalize_dataset`] so state codes are canonical.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the data cannot be fetched or parsed.
    async fn fetch(&self) -> Result<IncidentDataset, SourceError>;
}
