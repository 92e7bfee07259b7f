//! Month-over-month growth, moving averages and overall trend direction.

use gun_violence_aggregate_models::{MonthlyRecord, TrendDirection, TrendRecord, TrendReport};

/// Default moving average window, in months.
pub const DEFAULT_WINDOW: usize = 3;

/// Half-over-half change (percent) beyond which a series counts as
/// increasing or decreasing.
pub const TREND_THRESHOLD_PERCENT: f64 = 5.0;

/// Rounds to one decimal place, halves away from zero (`-2.25` becomes `-2.3`).
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[allow(clippy::cast_precision_loss)]
fn mean(records: &[MonthlyRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: u128 = records.iter().map(|r| u128::from(r.incidents)).sum();
    total as f64 / records.len() as f64
}

/// Percent change from each month to the next, one decimal place.
///
/// The first month has no predecessor and gets `0.0`, as does any month
/// whose predecessor had zero incidents.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn growth_rates(months: &[MonthlyRecord]) -> Vec<f64> {
    let mut rates = Vec::with_capacity(months.len());
    let mut previous: Option<u64> = None;

    for record in months {
        let rate = match previous {
            Some(prev) if prev > 0 => round_to_tenth(
                (record.incidents as f64 - prev as f64) / prev as f64 * 100.0,
            ),
            _ => 0.0,
        };
        rates.push(rate);
        previous = Some(record.incidents);
    }

    rates
}

/// Centered moving average of incidents, rounded to the nearest integer.
///
/// The window for index `i` covers `[max(0, i - window / 2), min(len,
/// start + window))`, so it shrinks at the end of the series rather than
/// shifting. A `window` of zero is treated as one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn moving_averages(months: &[MonthlyRecord], window: usize) -> Vec<u64> {
    let window = window.max(1);
    let half = window / 2;

    (0..months.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = months.len().min(start + window);
            mean(&months[start..end]).round() as u64
        })
        .collect()
}

/// Compares the mean of the first half of the series to the mean of the
/// second half.
///
/// Returns the direction and the percent change (one decimal place).
/// Fewer than two months yields [`TrendDirection::InsufficientData`].
#[must_use]
pub fn classify_trend(months: &[MonthlyRecord]) -> (TrendDirection, Option<f64>) {
    if months.len() < 2 {
        return (TrendDirection::InsufficientData, None);
    }

    let (first, second) = months.split_at(months.len() / 2);
    let first_mean = mean(first);
    let second_mean = mean(second);

    if first_mean <= 0.0 {
        let direction = if second_mean > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Stable
        };
        return (direction, None);
    }

    let change = (second_mean - first_mean) / first_mean * 100.0;
    let direction = if change > TREND_THRESHOLD_PERCENT {
        TrendDirection::Increasing
    } else if change < -TREND_THRESHOLD_PERCENT {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    (direction, Some(round_to_tenth(change)))
}

/// Builds the full [`TrendReport`] for a chronological monthly series.
#[must_use]
pub fn monthly_trend(months: &[MonthlyRecord], window: usize) -> TrendReport {
    let growth = growth_rates(months);
    let averages = moving_averages(months, window);

    let records = months
        .iter()
        .zip(growth)
        .zip(averages)
        .map(|((record, growth_rate), moving_average)| TrendRecord {
            month: record.month.clone(),
            incidents: record.incidents,
            growth_rate,
            moving_average,
        })
        .collect();

    let (trend, change_percent) = classify_trend(months);
    log::debug!(
        "Monthly trend over {} months: {trend} ({change_percent:?}%)",
        months.len()
    );

    TrendReport {
        months: records,
        trend,
        change_percent,
        total_incidents: months
            .iter()
            .map(|r| r.incidents)
            .fold(0, u64::saturating_add),
        peak_month: months.iter().rev().max_by_key(|r| r.incidents).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(counts: &[u64]) -> Vec<MonthlyRecord> {
        counts
            .iter()
            .enumerate()
            .map(|(i, count)| MonthlyRecord::new(format!("2024-{:02}", i + 1), *count))
            .collect()
    }

    #[test]
    fn growth_rate_example() {
        assert_eq!(growth_rates(&series(&[100, 150, 120])), vec![0.0, 50.0, -20.0]);
    }

    #[test]
    fn growth_rate_rounds_to_one_decimal() {
        // 10 -> 13 is +30%, 13 -> 14 is +7.6923...%
        assert_eq!(growth_rates(&series(&[10, 13, 14])), vec![0.0, 30.0, 7.7]);
    }

    #[test]
    fn growth_rate_after_zero_month_is_zero() {
        assert_eq!(growth_rates(&series(&[0, 40, 20])), vec![0.0, 0.0, -50.0]);
    }

    #[test]
    fn moving_average_of_constant_series() {
        assert_eq!(
            moving_averages(&series(&[5, 5, 5, 5, 5]), 3),
            vec![5, 5, 5, 5, 5]
        );
    }

    #[test]
    fn moving_average_window_bounds() {
        // i=0: [0,3) -> 20; i=1: [0,3) -> 20; i=2: [1,4) -> 30; i=3: [2,4) -> 35
        assert_eq!(
            moving_averages(&series(&[10, 20, 30, 40]), 3),
            vec![20, 20, 30, 35]
        );
    }

    #[test]
    fn moving_average_rounds_to_nearest() {
        // [1,2] -> 1.5 -> 2
        assert_eq!(moving_averages(&series(&[1, 2]), 3), vec![2, 2]);
    }

    #[test]
    fn zero_window_behaves_like_one() {
        assert_eq!(moving_averages(&series(&[3, 9, 4]), 0), vec![3, 9, 4]);
    }

    #[test]
    fn trend_increasing() {
        let (trend, change) = classify_trend(&series(&[100, 100, 100, 200, 200, 200]));
        assert_eq!(trend, TrendDirection::Increasing);
        assert_eq!(change, Some(100.0));
    }

    #[test]
    fn trend_decreasing() {
        let (trend, change) = classify_trend(&series(&[200, 200, 200, 100, 100, 100]));
        assert_eq!(trend, TrendDirection::Decreasing);
        assert_eq!(change, Some(-50.0));
    }

    #[test]
    fn trend_stable() {
        let (trend, _) = classify_trend(&series(&[100, 105, 98, 102]));
        assert_eq!(trend, TrendDirection::Stable);
    }

    #[test]
    fn odd_length_puts_middle_in_second_half() {
        // first = [100], second = [100, 200] -> mean 150 -> +50%
        let (trend, change) = classify_trend(&series(&[100, 100, 200]));
        assert_eq!(trend, TrendDirection::Increasing);
        assert_eq!(change, Some(50.0));
    }

    #[test]
    fn too_few_months_is_insufficient_data() {
        assert_eq!(
            classify_trend(&series(&[42])),
            (TrendDirection::InsufficientData, None)
        );
        assert_eq!(
            classify_trend(&[]),
            (TrendDirection::InsufficientData, None)
        );
    }

    #[test]
    fn zero_first_half() {
        assert_eq!(
            classify_trend(&series(&[0, 0, 5, 5])),
            (TrendDirection::Increasing, None)
        );
        assert_eq!(
            classify_trend(&series(&[0, 0])),
            (TrendDirection::Stable, None)
        );
    }

    #[test]
    fn report_summarizes_series() {
        let report = monthly_trend(&series(&[100, 150, 120, 150]), DEFAULT_WINDOW);

        assert_eq!(report.months.len(), 4);
        assert_eq!(report.months[1].month, "2024-02");
        assert!((report.months[1].growth_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(report.total_incidents, 520);
        assert_eq!(report.peak_month, Some(MonthlyRecord::new("2024-02", 150)));
    }

    #[test]
    fn single_month_report() {
        let report = monthly_trend(&series(&[7]), DEFAULT_WINDOW);
        assert_eq!(report.trend, TrendDirection::InsufficientData);
        assert_eq!(report.months[0].moving_average, 7);
        assert!(report.months[0].growth_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert!((round_to_tenth(-2.25) + 2.3).abs() < 1e-9);
        assert!((round_to_tenth(2.25) - 2.3).abs() < 1e-9);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let half = u64::MAX / 2 + 1;
        let report = monthly_trend(&series(&[half, half]), DEFAULT_WINDOW);

        assert_eq!(report.total_incidents, u64::MAX);
        assert_eq!(report.months[0].moving_average, half);
        assert_eq!(report.trend, TrendDirection::Stable);
        assert_eq!(report.change_percent, Some(0.0));
    }

    #[test]
    fn empty_report() {
        let report = monthly_trend(&[], DEFAULT_WINDOW);
        assert!(report.months.is_empty());
        assert_eq!(report.total_incidents, 0);
        assert_eq!(report.peak_month, None);
    }
}
