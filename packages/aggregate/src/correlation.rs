//! Pearson correlation between gun-law strength and per-capita violence.

use std::collections::BTreeMap;

use gun_violence_aggregate_models::{
    CorrelationDirection, CorrelationPoint, CorrelationResult, CorrelationStrength, StateRecord,
};
use gun_violence_reference::ReferenceTables;

use crate::category::{merge_state_records, per_capita_rate};

/// Pearson's r for two equal-length series.
///
/// Computed with the closed form
/// `(nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))`.
/// Returns `0.0` when the denominator is zero (either series is constant
/// or has fewer than two values). Extra values in the longer series are
/// ignored. The result is clamped to `[-1, 1]` to absorb rounding error.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys.iter()) {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let n = n as f64;
    let numerator = n * sum_xy - sum_x * sum_y;
    let var_x = n * sum_x2 - sum_x * sum_x;
    let var_y = n * sum_y2 - sum_y * sum_y;
    let denominator = (var_x * var_y).sqrt();

    if denominator <= 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (numerator / denominator).clamp(-1.0, 1.0)
}

/// Correlates per-state violence rates with gun-law scores.
///
/// Only states present in both maps take part (inner join). Points are
/// emitted in state-code order.
#[must_use]
pub fn correlate_rates(
    violence_rates: &BTreeMap<String, f64>,
    law_scores: &BTreeMap<String, f64>,
) -> CorrelationResult {
    let points: Vec<CorrelationPoint> = violence_rates
        .iter()
        .filter_map(|(code, rate)| {
            law_scores.get(code).map(|score| CorrelationPoint {
                state_code: code.clone(),
                law_score: *score,
                violence_rate: *rate,
            })
        })
        .collect();

    let xs: Vec<f64> = points.iter().map(|p| p.law_score).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.violence_rate).collect();
    let coefficient = pearson(&xs, &ys);

    log::debug!(
        "Correlated {} states: r = {coefficient:.3}",
        points.len()
    );

    CorrelationResult {
        points,
        coefficient,
        strength: CorrelationStrength::from_coefficient(coefficient),
        direction: CorrelationDirection::from_coefficient(coefficient),
    }
}

/// Per-state incidents per 100,000 residents.
///
/// Duplicate records are merged first. States without a positive
/// population are dropped.
#[must_use]
pub fn violence_rates(tables: &ReferenceTables, records: &[StateRecord]) -> BTreeMap<String, f64> {
    merge_state_records(records)
        .into_iter()
        .filter_map(|(code, incidents)| match tables.population(&code) {
            Some(population) if population > 0 => {
                Some((code, per_capita_rate(incidents, population)))
            }
            _ => {
                log::debug!("Dropping {code} from correlation: no population");
                None
            }
        })
        .collect()
}

/// Correlates gun-law score with violence rate for the states in
/// `records`, using the population and score tables in `tables`.
#[must_use]
pub fn correlate(tables: &ReferenceTables, records: &[StateRecord]) -> CorrelationResult {
    correlate_rates(&violence_rates(tables, records), tables.law_score_table())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn self_correlation_is_one() {
        let xs = [1.0, 4.0, 2.5, 9.0, 7.25];
        assert!((pearson(&xs, &xs) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn symmetric_in_arguments() {
        let xs = [95.0, 10.0, 55.0, 30.0, 72.0];
        let ys = [4.1, 13.9, 6.2, 11.0, 5.5];
        assert!((pearson(&xs, &ys) - pearson(&ys, &xs)).abs() < TOLERANCE);
    }

    #[test]
    fn constant_series_yields_zero() {
        let constant = [5.0, 5.0, 5.0, 5.0];
        let ys = [1.0, 2.0, 3.0, 4.0];
        assert!(pearson(&constant, &ys).abs() < TOLERANCE);
        assert!(pearson(&ys, &constant).abs() < TOLERANCE);
    }

    #[test]
    fn short_series_yields_zero() {
        assert!(pearson(&[], &[]).abs() < TOLERANCE);
        assert!(pearson(&[3.0], &[8.0]).abs() < TOLERANCE);
    }

    #[test]
    fn perfect_negative_line() {
        let xs = [0.0, 25.0, 50.0, 75.0, 100.0];
        let ys = [20.0, 15.0, 10.0, 5.0, 0.0];
        let r = pearson(&xs, &ys);
        assert!((r + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn inner_join_drops_unscored_and_unpopulated_states() {
        let tables = ReferenceTables::builder()
            .population("TX", 1_000_000)
            .population("CA", 2_000_000)
            .population("NY", 1_000_000)
            .law_score("TX", 15.0)
            .law_score("CA", 95.0)
            .law_score("FL", 35.0)
            .build()
            .unwrap();

        let result = correlate(
            &tables,
            &[
                StateRecord::new("TX", 200),
                StateRecord::new("CA", 100),
                StateRecord::new("NY", 50),
                StateRecord::new("FL", 300),
            ],
        );

        let codes: Vec<&str> = result.points.iter().map(|p| p.state_code.as_str()).collect();
        assert_eq!(codes, vec!["CA", "TX"]);
        assert!((result.points[1].violence_rate - 20.0).abs() < TOLERANCE);
        assert!((result.points[0].violence_rate - 5.0).abs() < TOLERANCE);

        // Two points always lie on a line.
        assert!((result.coefficient + 1.0).abs() < TOLERANCE);
        assert_eq!(result.strength, CorrelationStrength::Strong);
        assert_eq!(result.direction, CorrelationDirection::Negative);
    }

    #[test]
    fn no_overlap_is_very_weak_positive() {
        let result = correlate_rates(
            &BTreeMap::from([("TX".to_string(), 10.0)]),
            &BTreeMap::from([("CA".to_string(), 90.0)]),
        );
        assert!(result.points.is_empty());
        assert!(result.coefficient.abs() < TOLERANCE);
        assert_eq!(result.strength, CorrelationStrength::VeryWeak);
        assert_eq!(result.direction, CorrelationDirection::Positive);
    }

    #[test]
    fn builtin_tables_produce_bounded_coefficient() {
        let tables = ReferenceTables::builtin();
        let records: Vec<StateRecord> = tables
            .population_table()
            .keys()
            .enumerate()
            .map(|(i, code)| StateRecord::new(code.clone(), 100 + (i as u64 * 13) % 97))
            .collect();

        let result = correlate(&tables, &records);
        assert_eq!(result.points.len(), 51);
        assert!((-1.0..=1.0).contains(&result.coefficient));
    }
}
