//! Loading and lookup for [`ReferenceTables`].
//!
//! The on-disk format is one TOML table per state:
//!
//! ```toml
//! [states.TX]
//! population = 30503301
//! category = "red"
//! law_score = 15.0
//! ```
//!
//! Every field is optional so that partial tables can be expressed; a
//! state missing from a table is simply absent from lookups.

use std::collections::BTreeMap;
use std::path::Path;

use gun_violence_state_models::{PoliticalCategory, normalize_state_code};
use serde::Deserialize;

use crate::ReferenceError;

/// Built-in reference dataset, embedded at compile time.
const BUILTIN_TOML: &str = include_str!("../data/reference.toml");

/// Lowest valid gun-law score.
const MIN_LAW_SCORE: f64 = 0.0;

/// Highest valid gun-law score.
const MAX_LAW_SCORE: f64 = 100.0;

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    #[serde(default)]
    states: BTreeMap<String, StateEntry>,
}

#[derive(Debug, Deserialize)]
struct StateEntry {
    population: Option<u64>,
    category: Option<PoliticalCategory>,
    law_score: Option<f64>,
}

/// Read-only per-state reference data keyed by canonical postal code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTables {
    population: BTreeMap<String, u64>,
    classification: BTreeMap<String, PoliticalCategory>,
    law_scores: BTreeMap<String, f64>,
}

impl ReferenceTables {
    /// Returns the built-in tables for the 50 states + DC.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML fails to parse or validate. Since it is
    /// a compile-time constant, a failure indicates a development error and
    /// is caught by the tests in this module.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_TOML)
            .unwrap_or_else(|e| panic!("Failed to load built-in reference tables: {e}"))
    }

    /// Parses reference tables from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if the TOML is malformed or any entry
    /// fails validation.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ReferenceError> {
        let file: ReferenceFile = toml::de::from_str(toml_str)?;
        let mut builder = ReferenceTablesBuilder::default();

        for (code, entry) in file.states {
            if let Some(population) = entry.population {
                builder = builder.population(&code, population);
            }
            if let Some(category) = entry.category {
                builder = builder.category(&code, category);
            }
            if let Some(score) = entry.law_score {
                builder = builder.law_score(&code, score);
            }
        }

        let tables = builder.build()?;
        log::debug!(
            "Loaded reference tables: {} populations, {} classifications, {} law scores",
            tables.population.len(),
            tables.classification.len(),
            tables.law_scores.len(),
        );
        Ok(tables)
    }

    /// Reads and parses reference tables from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if the file cannot be read or its
    /// contents fail to parse or validate.
    pub fn from_path(path: &Path) -> Result<Self, ReferenceError> {
        log::info!("Loading reference tables from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Starts building a table set by hand.
    #[must_use]
    pub fn builder() -> ReferenceTablesBuilder {
        ReferenceTablesBuilder::default()
    }

    /// Resident population for `code`, if known.
    #[must_use]
    pub fn population(&self, code: &str) -> Option<u64> {
        self.population.get(code).copied()
    }

    /// Political category for `code`, if classified.
    #[must_use]
    pub fn category(&self, code: &str) -> Option<PoliticalCategory> {
        self.classification.get(code).copied()
    }

    /// Gun-law score for `code`, if scored.
    #[must_use]
    pub fn law_score(&self, code: &str) -> Option<f64> {
        self.law_scores.get(code).copied()
    }

    /// The full population table.
    #[must_use]
    pub const fn population_table(&self) -> &BTreeMap<String, u64> {
        &self.population
    }

    /// The full gun-law score table.
    #[must_use]
    pub const fn law_score_table(&self) -> &BTreeMap<String, f64> {
        &self.law_scores
    }
}

/// Incrementally assembles a validated [`ReferenceTables`].
///
/// State keys are normalized with [`normalize_state_code`] when
/// [`build`](Self::build) runs, so `"tx"` and `"Texas"` both land on `TX`.
#[derive(Debug, Default)]
pub struct ReferenceTablesBuilder {
    population: Vec<(String, u64)>,
    classification: Vec<(String, PoliticalCategory)>,
    law_scores: Vec<(String, f64)>,
}

impl ReferenceTablesBuilder {
    /// Sets the population for a state.
    #[must_use]
    pub fn population(mut self, code: &str, population: u64) -> Self {
        self.population.push((code.to_string(), population));
        self
    }

    /// Sets the political category for a state.
    #[must_use]
    pub fn category(mut self, code: &str, category: PoliticalCategory) -> Self {
        self.classification.push((code.to_string(), category));
        self
    }

    /// Sets the gun-law score for a state.
    #[must_use]
    pub fn law_score(mut self, code: &str, score: f64) -> Self {
        self.law_scores.push((code.to_string(), score));
        self
    }

    /// Validates every entry and produces the finished tables.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if a key is not a known state, a
    /// population is zero, or a law score is outside `[0, 100]`.
    pub fn build(self) -> Result<ReferenceTables, ReferenceError> {
        let mut tables = ReferenceTables::default();

        for (code, population) in self.population {
            let code = canonical_code(&code)?;
            if population == 0 {
                return Err(ReferenceError::InvalidPopulation {
                    code: code.to_string(),
                });
            }
            tables.population.insert(code.to_string(), population);
        }

        for (code, category) in self.classification {
            let code = canonical_code(&code)?;
            tables.classification.insert(code.to_string(), category);
        }

        for (code, score) in self.law_scores {
            let code = canonical_code(&code)?;
            if !score.is_finite() || !(MIN_LAW_SCORE..=MAX_LAW_SCORE).contains(&score) {
                return Err(ReferenceError::InvalidLawScore {
                    code: code.to_string(),
                    score,
                });
            }
            tables.law_scores.insert(code.to_string(), score);
        }

        Ok(tables)
    }
}

fn canonical_code(code: &str) -> Result<&'static str, ReferenceError> {
    normalize_state_code(code).ok_or_else(|| ReferenceError::UnknownState {
        code: code.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_state() {
        let tables = ReferenceTables::builtin();
        for (code, _) in gun_violence_state_models::codes::STATES {
            assert!(tables.population(code).is_some(), "{code} has no population");
            assert!(tables.category(code).is_some(), "{code} is unclassified");
            assert!(tables.law_score(code).is_some(), "{code} has no law score");
        }
    }

    #[test]
    fn builtin_matches_census_figures() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.population("TX"), Some(30_503_301));
        assert_eq!(tables.population("CA"), Some(38_965_193));
        assert_eq!(tables.category("TX"), Some(PoliticalCategory::Red));
        assert_eq!(tables.category("CA"), Some(PoliticalCategory::Blue));
        assert_eq!(tables.category("PA"), Some(PoliticalCategory::Swing));
    }

    #[test]
    fn parses_partial_entries() {
        let tables = ReferenceTables::from_toml_str(
            r#"
            [states.tx]
            population = 100

            [states.Ohio]
            category = "swing"
            "#,
        )
        .unwrap();

        assert_eq!(tables.population("TX"), Some(100));
        assert_eq!(tables.category("TX"), None);
        assert_eq!(tables.category("OH"), Some(PoliticalCategory::Swing));
        assert_eq!(tables.population("OH"), None);
    }

    #[test]
    fn rejects_zero_population() {
        let err = ReferenceTables::builder()
            .population("TX", 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidPopulation { code } if code == "TX"));
    }

    #[test]
    fn rejects_out_of_range_law_score() {
        let err = ReferenceTables::builder()
            .law_score("CA", 101.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidLawScore { .. }));

        let err = ReferenceTables::builder()
            .law_score("CA", f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidLawScore { .. }));
    }

    #[test]
    fn rejects_unknown_state() {
        let err = ReferenceTables::builder()
            .category("PR", PoliticalCategory::Blue)
            .build()
            .unwrap_err();
        assert!(matches!(err, ReferenceError::UnknownState { code } if code == "PR"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = ReferenceTables::from_toml_str("[states.TX]\ncategory = \"purple\"").unwrap_err();
        assert!(matches!(err, ReferenceError::Toml(_)));
    }
}
