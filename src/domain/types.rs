// ==========================================
// SteelWorks Operations - domain types
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Trend indicator
// ==========================================
// Compared against the previous row of the aggregated sequence,
// not against the previous calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendIndicator {
    Baseline,   // first row
    Increasing, // strictly greater than previous
    Decreasing, // strictly less than previous
    Stable,     // equal to previous
}

impl fmt::Display for TrendIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendIndicator::Baseline => write!(f, "baseline"),
            TrendIndicator::Increasing => write!(f, "increasing"),
            TrendIndicator::Decreasing => write!(f, "decreasing"),
            TrendIndicator::Stable => write!(f, "stable"),
        }
    }
}

// ==========================================
// Inclusive reporting period
// ==========================================
// Built only through `new`, so start <= end always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Returns None when start > end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        assert!(DateRange::new(d(2024, 2, 1), d(2024, 1, 1)).is_none());
    }

    #[test]
    fn test_date_range_single_day_is_inclusive() {
        let range = DateRange::new(d(2024, 1, 5), d(2024, 1, 5)).unwrap();
        assert!(range.contains(d(2024, 1, 5)));
        assert!(!range.contains(d(2024, 1, 6)));
    }

    #[test]
    fn test_trend_indicator_serializes_lowercase() {
        let json = serde_json::to_string(&TrendIndicator::Increasing).unwrap();
        assert_eq!(json, "\"increasing\"");
        assert_eq!(TrendIndicator::Baseline.to_string(), "baseline");
    }
}
