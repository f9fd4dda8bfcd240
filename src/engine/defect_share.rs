// ==========================================
// SteelWorks Operations - defect type shares
// ==========================================
// percentage = qty / total * 100, 2 decimals, rounded half-up.
// Rounding is done on integer hundredths of a percent so that
// 2.5-style midpoints are not at the mercy of binary floats.
// Each row is rounded on its own; the sum may differ from 100.
// The period total is accumulated in i128: per-type sums are i64 each,
// but their total need not fit in one.
// ==========================================

use crate::domain::report::DefectTypeShare;
use crate::repository::rows::DefectTypeCount;

/// Share of `qty` in `total` in hundredths of a percent, rounded half-up
///
/// `total` must be positive and `qty` in `0..=total`.
pub fn share_hundredths(qty: i64, total: i128) -> i64 {
    debug_assert!(total > 0 && qty >= 0);
    let qty = i128::from(qty);
    // round(qty * 10000 / total) with halves going up; at most 10000
    ((qty * 20_000 + total) / (2 * total)) as i64
}

/// Percentage of `qty` in `total`, 2 decimal places, half-up
pub fn percentage(qty: i64, total: i128) -> f64 {
    share_hundredths(qty, total) as f64 / 100.0
}

/// Attach percentages to per-type counts, keeping their order
///
/// # Returns
/// Empty when the period total is zero (no inspections, or only clean ones)
pub fn defect_shares(counts: &[DefectTypeCount]) -> Vec<DefectTypeShare> {
    let total: i128 = counts.iter().map(|c| i128::from(c.total_qty)).sum();
    if total <= 0 {
        return Vec::new();
    }

    counts
        .iter()
        .map(|c| DefectTypeShare {
            defect_code: c.defect_code.clone(),
            total_qty: c.total_qty,
            percentage: percentage(c.total_qty, total),
        })
        .collect()
}
