// ==========================================
// SteelWorks Operations - defect trend classification
// ==========================================
// Each row is compared with the previous row of the result sequence.
// Dates missing from the data are simply absent and do not reset the chain.
// ==========================================

use crate::domain::report::TrendPoint;
use crate::domain::types::TrendIndicator;
use crate::repository::rows::DailyDefectCount;
use std::cmp::Ordering;

/// Indicator for `current` given the previous row's total
///
/// # Returns
/// - Baseline: no previous row
/// - Increasing / Decreasing / Stable: strict comparison with previous
pub fn trend_indicator(previous: Option<i64>, current: i64) -> TrendIndicator {
    match previous {
        None => TrendIndicator::Baseline,
        Some(prev) => match current.cmp(&prev) {
            Ordering::Greater => TrendIndicator::Increasing,
            Ordering::Less => TrendIndicator::Decreasing,
            Ordering::Equal => TrendIndicator::Stable,
        },
    }
}

/// Classify a chronologically ordered daily series
pub fn classify_trend(days: &[DailyDefectCount]) -> Vec<TrendPoint> {
    let mut previous: Option<i64> = None;

    days.iter()
        .map(|day| {
            let point = TrendPoint {
                date: day.inspection_date,
                total_defects: day.total_defects,
                trend_indicator: trend_indicator(previous, day.total_defects),
            };
            previous = Some(day.total_defects);
            point
        })
        .collect()
}
