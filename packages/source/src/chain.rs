//! Ordered provider fallback.
//!
//! Providers are tried in priority order. The first one that returns a
//! dataset wins; each failure is logged and recorded so that, if every
//! provider fails, the caller sees why.

use crate::{IncidentDataset, IncidentProvider, SourceError};

/// A dataset together with the id of the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDataset {
    /// Id of the provider that succeeded.
    pub provider_id: String,
    /// The loaded data.
    pub dataset: IncidentDataset,
}

/// Prioritized list of capability-equivalent providers.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn IncidentProvider>>,
}

impl ProviderChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider with lower priority than those already added.
    #[must_use]
    pub fn with(mut self, provider: impl IncidentProvider + 'static) -> Self {
        self.push(Box::new(provider));
        self
    }

    /// Appends an already boxed provider.
    pub fn push(&mut self, provider: Box<dyn IncidentProvider>) {
        self.providers.push(provider);
    }

    /// Ids of the providers in priority order.
    #[must_use]
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Tries each provider in order and returns the first success.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::AllProvidersFailed`] if the chain is empty or
    /// every provider fails.
    pub async fn fetch(&self) -> Result<FetchedDataset, SourceError> {
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.fetch().await {
                Ok(dataset) => {
                    log::info!(
                        "Loaded {} state and {} monthly records from '{}'",
                        dataset.states.len(),
                        dataset.monthly.len(),
                        provider.id()
                    );
                    return Ok(FetchedDataset {
                        provider_id: provider.id().to_string(),
                        dataset,
                    });
                }
                Err(e) => {
                    log::warn!("Provider '{}' failed: {e}", provider.id());
                    failures.push(format!("{}: {e}", provider.id()));
                }
            }
        }

        Err(SourceError::AllProvidersFailed { failures })
    }
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.provider_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use gun_violence_aggregate_models::StateRecord;

    use super::*;
    use crate::SampleProvider;

    struct FailingProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl IncidentProvider for FailingProvider {
        fn id(&self) -> &'static str {
            "failing"
        }

        async fn fetch(&self) -> Result<IncidentDataset, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::Status {
                status: 503,
                url: "https://example.invalid/data.json".to_string(),
            })
        }
    }

    struct FixedProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl IncidentProvider for FixedProvider {
        fn id(&self) -> &'static str {
            "fixed"
        }

        async fn fetch(&self) -> Result<IncidentDataset, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(IncidentDataset {
                states: vec![StateRecord::new("TX", 1)],
                monthly: vec![],
            })
        }
    }

    #[tokio::test]
    async fn falls_through_to_first_success() {
        let failing_calls = Arc::new(AtomicUsize::new(0));
        let fixed_calls = Arc::new(AtomicUsize::new(0));

        let chain = ProviderChain::new()
            .with(FailingProvider {
                calls: Arc::clone(&failing_calls),
            })
            .with(FixedProvider {
                calls: Arc::clone(&fixed_calls),
            })
            .with(SampleProvider);

        let fetched = chain.fetch().await.unwrap();

        assert_eq!(fetched.provider_id, "fixed");
        assert_eq!(fetched.dataset.states, vec![StateRecord::new("TX", 1)]);
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fixed_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stops_at_first_provider_when_it_succeeds() {
        let fixed_calls = Arc::new(AtomicUsize::new(0));
        let failing_calls = Arc::new(AtomicUsize::new(0));

        let chain = ProviderChain::new()
            .with(FixedProvider {
                calls: Arc::clone(&fixed_calls),
            })
            .with(FailingProvider {
                calls: Arc::clone(&failing_calls),
            });

        chain.fetch().await.unwrap();

        assert_eq!(fixed_calls.load(Ordering::SeqCst), 1);
        assert_eq!(failing_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reports_every_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = ProviderChain::new()
            .with(FailingProvider {
                calls: Arc::clone(&calls),
            })
            .with(FailingProvider {
                calls: Arc::clone(&calls),
            });

        let err = chain.fetch().await.unwrap_err();

        match err {
            SourceError::AllProvidersFailed { failures } => {
                assert_eq!(failures.len(), 2);
                assert!(failures[0].starts_with("failing: HTTP 503"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_chain_fails() {
        let err = ProviderChain::new().fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::AllProvidersFailed { failures } if failures.is_empty()));
    }

    #[test]
    fn lists_ids_in_priority_order() {
        let chain = ProviderChain::new()
            .with(crate::JsonFileProvider::new("data.json"))
            .with(SampleProvider);
        assert_eq!(chain.provider_ids(), vec!["file:data.json", "sample"]);
    }
}
