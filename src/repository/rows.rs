// ==========================================
// SteelWorks Operations - query result rows
// ==========================================
// One named, typed record per aggregation shape.
// ==========================================

use crate::domain::entities::ShipmentRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Production event joined to its lot and line codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionEvent {
    pub lot_code: String,
    pub line_code: String,
    pub record_date: NaiveDate,
}

/// SUM(qty_defects) per defect type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefectTypeCount {
    pub defect_code: String,
    pub total_qty: i64,
}

/// SUM(qty_defects) attributed to a production line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDefectCount {
    pub line_code: String,
    pub total_defects: i64,
}

/// SUM(qty_defects) per inspection date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyDefectCount {
    pub inspection_date: NaiveDate,
    pub total_defects: i64,
}

/// Shipped lot with its ship date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippedLot {
    pub lot_code: String,
    pub ship_date: NaiveDate,
}

/// One production entry in a lot drill-down
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotProductionEntry {
    pub line_code: String,
    pub record_date: NaiveDate,
}

/// One inspection entry in a lot drill-down
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotDefectEntry {
    pub defect_code: String,
    pub qty: i64,
    pub inspection_date: NaiveDate,
}

/// Production, inspection and shipment facts for one lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotSummary {
    pub lot_id: i64,
    pub lot_code: String,
    pub production_info: Vec<LotProductionEntry>,
    pub defects: Vec<LotDefectEntry>,
    pub total_defects: i64,
    pub shipment: Option<ShipmentRecord>,
}

impl LotSummary {
    /// Earliest production date, None for a lot with no production history
    pub fn first_production_date(&self) -> Option<NaiveDate> {
        self.production_info.iter().map(|p| p.record_date).min()
    }
}
