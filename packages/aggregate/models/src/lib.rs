#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input records and result types for the state statistics aggregator.
//!
//! Inputs ([`StateRecord`], [`MonthlyRecord`]) arrive already parsed from
//! the data providers. Outputs are plain serializable structures that the
//! reporting layer writes out as a single JSON snapshot for the dashboard.

use chrono::{DateTime, Utc};
use gun_violence_state_models::PoliticalCategory;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Incident count reported for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    /// Two-letter postal code (e.g. "TX").
    pub state_code: String,
    /// Number of incidents reported for the state.
    pub incidents: u64,
}

impl StateRecord {
    /// Convenience constructor.
    #[must_use]
    pub fn new(state_code: impl Into<String>, incidents: u64) -> Self {
        Self {
            state_code: state_code.into(),
            incidents,
        }
    }
}

/// Incident count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    /// Month label (e.g. "2024-01" or "Jan").
    pub month: String,
    /// Number of incidents in the month.
    pub incidents: u64,
}

impl MonthlyRecord {
    /// Convenience constructor.
    #[must_use]
    pub fn new(month: impl Into<String>, incidents: u64) -> Self {
        Self {
            month: month.into(),
            incidents,
        }
    }
}

/// Summed incidents and population for one political category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAggregate {
    /// Total incidents across the category's states.
    pub incidents: u64,
    /// Total resident population across the category's states.
    pub population: u64,
    /// Incidents per 100,000 residents; `0.0` when population is zero.
    pub rate: f64,
}

/// One [`CategoryAggregate`] per [`PoliticalCategory`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// Republican-leaning states.
    pub red: CategoryAggregate,
    /// Democratic-leaning states.
    pub blue: CategoryAggregate,
    /// Competitive states.
    pub swing: CategoryAggregate,
    /// Input records (merged per state) with no political category; these
    /// contribute to no bucket.
    #[serde(default)]
    pub unclassified: Vec<StateRecord>,
    /// Classified states counted without a population entry. Their
    /// incidents are included but they add nothing to the population sum.
    #[serde(default)]
    pub missing_population: Vec<String>,
}

impl CategoryBreakdown {
    /// Returns the aggregate for `category`.
    #[must_use]
    pub const fn get(&self, category: PoliticalCategory) -> &CategoryAggregate {
        match category {
            PoliticalCategory::Red => &self.red,
            PoliticalCategory::Blue => &self.blue,
            PoliticalCategory::Swing => &self.swing,
        }
    }

    /// Returns a mutable reference to the aggregate for `category`.
    pub const fn get_mut(&mut self, category: PoliticalCategory) -> &mut CategoryAggregate {
        match category {
            PoliticalCategory::Red => &mut self.red,
            PoliticalCategory::Blue => &mut self.blue,
            PoliticalCategory::Swing => &mut self.swing,
        }
    }

    /// Iterates over every category with its aggregate, in
    /// [`PoliticalCategory::all`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PoliticalCategory, &CategoryAggregate)> {
        PoliticalCategory::all()
            .iter()
            .map(move |category| (*category, self.get(*category)))
    }

    /// Sum of incidents over all three buckets, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_incidents(&self) -> u64 {
        self.iter()
            .map(|(_, agg)| agg.incidents)
            .fold(0, u64::saturating_add)
    }
}

/// One state's contribution to the law-score correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPoint {
    /// Two-letter postal code.
    pub state_code: String,
    /// Gun-law strength score (0-100).
    pub law_score: f64,
    /// Incidents per 100,000 residents.
    pub violence_rate: f64,
}

/// Qualitative bucket for the magnitude of a correlation coefficient.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CorrelationStrength {
    /// `|r| < 0.2`
    VeryWeak,
    /// `0.2 <= |r| < 0.4`
    Weak,
    /// `0.4 <= |r| < 0.7`
    Moderate,
    /// `|r| >= 0.7`
    Strong,
}

impl CorrelationStrength {
    /// Classifies the magnitude of `coefficient`.
    #[must_use]
    pub fn from_coefficient(coefficient: f64) -> Self {
        let magnitude = coefficient.abs();
        if magnitude >= 0.7 {
            Self::Strong
        } else if magnitude >= 0.4 {
            Self::Moderate
        } else if magnitude >= 0.2 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }
}

/// Sign of a correlation coefficient.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CorrelationDirection {
    /// `r >= 0`
    Positive,
    /// `r < 0`
    Negative,
}

impl CorrelationDirection {
    /// Returns [`Self::Negative`] for `r < 0`, otherwise [`Self::Positive`].
    #[must_use]
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

/// Pearson correlation between gun-law score and per-capita violence rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    /// Every state that took part, in state-code order.
    pub points: Vec<CorrelationPoint>,
    /// Pearson's r in `[-1, 1]`.
    pub coefficient: f64,
    /// Magnitude bucket of the coefficient.
    pub strength: CorrelationStrength,
    /// Sign of the coefficient.
    pub direction: CorrelationDirection,
}

/// A [`MonthlyRecord`] annotated with growth and smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRecord {
    /// Month label.
    pub month: String,
    /// Number of incidents in the month.
    pub incidents: u64,
    /// Percent change from the previous month, one decimal place.
    pub growth_rate: f64,
    /// Centered moving average, rounded to the nearest integer.
    pub moving_average: u64,
}

/// Overall direction of a monthly series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TrendDirection {
    /// Second-half mean is more than 5% above the first-half mean.
    Increasing,
    /// Second-half mean is more than 5% below the first-half mean.
    Decreasing,
    /// Halves are within 5% of each other.
    Stable,
    /// Fewer than two months of data.
    InsufficientData,
}

/// Monthly series with per-month statistics and an overall trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    /// Per-month records in input order.
    pub months: Vec<TrendRecord>,
    /// Overall direction.
    pub trend: TrendDirection,
    /// Percent change between the half means, one decimal place. `None`
    /// when there is insufficient data or the first half is all zeros.
    pub change_percent: Option<f64>,
    /// Sum of incidents across all months.
    pub total_incidents: u64,
    /// Month with the most incidents (earliest on ties).
    pub peak_month: Option<MonthlyRecord>,
}

/// Everything the dashboard renders, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// When the snapshot was computed.
    pub generated_at: DateTime<Utc>,
    /// Per-category totals and rates.
    pub categories: CategoryBreakdown,
    /// Law-score vs violence-rate correlation.
    pub correlation: CorrelationResult,
    /// Monthly trend statistics.
    pub trend: TrendReport,
}
