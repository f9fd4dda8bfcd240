// ==========================================
// SteelWorks Operations - report payloads
// ==========================================
// Output shapes of the reporting service, consumed as display-ready data
// by the presentation boundary (JSON / CSV / dashboard).
// ==========================================

use crate::domain::types::TrendIndicator;
use crate::repository::rows::LineDefectCount;
use chrono::NaiveDate;
use serde::Serialize;

/// One day of the defect trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_defects: i64,
    pub trend_indicator: TrendIndicator,
}

/// Share of one defect type in the period total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefectTypeShare {
    pub defect_code: String,
    pub total_qty: i64,
    /// Percent of the period total, 2 decimals, rounded half-up
    pub percentage: f64,
}

/// Shipment status of one lot with its defect total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotShipmentSummary {
    pub lot_code: String,
    pub is_shipped: bool,
    pub ship_date: Option<NaiveDate>,
    pub total_defects: i64,
}

/// Production event reshaped for the production summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionSummaryRow {
    pub date: NaiveDate,
    pub line_code: String,
    pub lot_code: String,
}

// ==========================================
// Lot drill-down
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotReport {
    pub lot_code: String,
    pub production_info: Vec<ProductionInfo>,
    pub quality_info: QualityInfo,
    pub shipment_info: ShipmentInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionInfo {
    pub line: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityInfo {
    pub total_defects: i64,
    pub defects: Vec<DefectEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefectEntry {
    pub defect_code: String,
    pub qty: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipmentInfo {
    pub is_shipped: bool,
    pub ship_date: Option<NaiveDate>,
    /// ship_date minus the first production date; None unless shipped and produced
    pub days_to_ship: Option<i64>,
}

impl ShipmentInfo {
    /// Lot without a shipment record
    pub fn not_shipped() -> Self {
        Self {
            is_shipped: false,
            ship_date: None,
            days_to_ship: None,
        }
    }
}

// ==========================================
// Dashboard landing view
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub lines_with_most_defects: Vec<LineDefectCount>,
    pub defect_trend: Vec<TrendPoint>,
    pub shipped_count: usize,
    pub pending_count: usize,
}
