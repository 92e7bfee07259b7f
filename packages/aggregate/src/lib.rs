#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistical aggregation over per-state and per-month incident counts.
//!
//! The [`Aggregator`] borrows a set of [`ReferenceTables`] and turns raw
//! provider data into everything the dashboard shows:
//!
//! * per political category totals and per-capita rates ([`category`]),
//! * the correlation between gun-law score and violence rate
//!   ([`correlation`]),
//! * month-over-month growth, moving averages and the overall trend
//!   ([`trend`]).
//!
//! Every operation is a pure function of its inputs. Missing lookups and
//! degenerate denominators are resolved by substituting a defined value,
//! so nothing here returns an error.

pub mod category;
pub mod correlation;
pub mod trend;

use gun_violence_aggregate_models::{
    CategoryBreakdown, CorrelationResult, DashboardSnapshot, MonthlyRecord, StateRecord,
    TrendReport,
};
use gun_violence_reference::ReferenceTables;

/// Tunables for an [`Aggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Window size for the centered moving average, in months.
    pub moving_average_window: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            moving_average_window: trend::DEFAULT_WINDOW,
        }
    }
}

/// Computes dashboard statistics against a fixed set of reference tables.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    tables: &'a ReferenceTables,
    config: AggregatorConfig,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator with the default configuration.
    #[must_use]
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self::with_config(tables, AggregatorConfig::default())
    }

    /// Creates an aggregator with an explicit configuration.
    #[must_use]
    pub const fn with_config(tables: &'a ReferenceTables, config: AggregatorConfig) -> Self {
        Self { tables, config }
    }

    /// Groups state incident counts by political category.
    #[must_use]
    pub fn aggregate_by_category(&self, records: &[StateRecord]) -> CategoryBreakdown {
        category::aggregate_by_category(self.tables, records)
    }

    /// Correlates gun-law score with per-capita violence rate.
    #[must_use]
    pub fn correlate(&self, records: &[StateRecord]) -> CorrelationResult {
        correlation::correlate(self.tables, records)
    }

    /// Computes growth, moving average and trend for a monthly series.
    #[must_use]
    pub fn monthly_trend(&self, months: &[MonthlyRecord]) -> TrendReport {
        trend::monthly_trend(months, self.config.moving_average_window)
    }

    /// Runs every computation and stamps the result with the current time.
    #[must_use]
    pub fn snapshot(&self, states: &[StateRecord], months: &[MonthlyRecord]) -> DashboardSnapshot {
        log::info!(
            "Aggregating {} state records and {} monthly records",
            states.len(),
            months.len()
        );

        let snapshot = DashboardSnapshot {
            generated_at: chrono::Utc::now(),
            categories: self.aggregate_by_category(states),
            correlation: self.correlate(states),
            trend: self.monthly_trend(months),
        };

        if !snapshot.categories.unclassified.is_empty() {
            log::warn!(
                "{} state(s) had no political category and were left out of category totals",
                snapshot.categories.unclassified.len()
            );
        }

        snapshot
    }
}
