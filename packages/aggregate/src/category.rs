//! Per-category incident totals and per-capita rates.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use gun_violence_aggregate_models::{CategoryBreakdown, StateRecord};
use gun_violence_reference::ReferenceTables;
use gun_violence_state_models::normalize_state_code;

/// Population base for per-capita rates.
pub const PER_CAPITA_BASE: f64 = 100_000.0;

/// Incidents per 100,000 residents.
///
/// Returns `0.0` when `population` is zero so that an empty bucket never
/// produces `NaN` or infinity.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn per_capita_rate(incidents: u64, population: u64) -> f64 {
    if population == 0 {
        return 0.0;
    }
    incidents as f64 / population as f64 * PER_CAPITA_BASE
}

/// Canonical key for a state identifier.
///
/// Known states map to their postal code; anything else is kept as its
/// trimmed, upper-cased self so it still shows up in exclusion lists.
pub(crate) fn state_key(code: &str) -> String {
    normalize_state_code(code).map_or_else(|| code.trim().to_ascii_uppercase(), str::to_string)
}

/// Merges records that refer to the same state by summing their incidents.
///
/// The result is keyed by [`state_key`], so `"tx"` and `"TX"` collapse
/// into one entry.
#[must_use]
pub fn merge_state_records(records: &[StateRecord]) -> BTreeMap<String, u64> {
    let mut merged: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        match merged.entry(state_key(&record.state_code)) {
            Entry::Vacant(entry) => {
                entry.insert(record.incidents);
            }
            Entry::Occupied(mut entry) => {
                log::warn!(
                    "Duplicate record for state '{}', merging incident counts",
                    record.state_code
                );
                let total = entry.get_mut();
                *total = total.saturating_add(record.incidents);
            }
        }
    }

    merged
}

/// Groups state incident counts by political category.
///
/// Duplicate states are merged first so each state's population is added
/// exactly once. States with no category are skipped and reported in
/// [`CategoryBreakdown::unclassified`]; classified states with no
/// population entry still count their incidents and are reported in
/// [`CategoryBreakdown::missing_population`].
#[must_use]
pub fn aggregate_by_category(
    tables: &ReferenceTables,
    records: &[StateRecord],
) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();

    for (code, incidents) in merge_state_records(records) {
        let Some(category) = tables.category(&code) else {
            log::debug!("Skipping unclassified state '{code}' ({incidents} incidents)");
            breakdown.unclassified.push(StateRecord::new(code, incidents));
            continue;
        };

        let population = tables.population(&code).unwrap_or_else(|| {
            log::warn!("No population for {code}; counting incidents without population");
            breakdown.missing_population.push(code.clone());
            0
        });

        let agg = breakdown.get_mut(category);
        agg.incidents = agg.incidents.saturating_add(incidents);
        agg.population = agg.population.saturating_add(population);
    }

    for category in gun_violence_state_models::PoliticalCategory::all() {
        let agg = breakdown.get_mut(*category);
        agg.rate = per_capita_rate(agg.incidents, agg.population);
    }

    breakdown
}
