// ==========================================
// SteelWorks Operations - entities
// ==========================================
// One struct per table in scripts/schema.sql.
// Constraints (unique, FK cascade/restrict, CHECK) live in the store.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Lot - production batch, aggregation root
// ==========================================
// Children (production, inspection, shipment) cascade-delete with the lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    pub id: i64,
    pub lot_code: String, // e.g. LOT-2024-01-001, unique
}

// ==========================================
// ProductionLine - dimension
// ==========================================
// Deletion restricted while production history references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionLine {
    pub id: i64,
    pub line_code: String, // e.g. LINE-A, unique
}

// ==========================================
// DefectType - dimension
// ==========================================
// Deletion restricted while inspections reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectType {
    pub id: i64,
    pub defect_code: String, // e.g. SURFACE-SCRATCH, unique
}

// ==========================================
// ProductionRecord - a lot produced on a line on a date
// ==========================================
// (lot_id, production_line_id, record_date) is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub id: i64,
    pub lot_id: i64,
    pub production_line_id: i64,
    pub record_date: NaiveDate,
}

// ==========================================
// InspectionRecord - defects found in a lot on a date
// ==========================================
// qty_defects >= 0; zero is a clean inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub id: i64,
    pub lot_id: i64,
    pub defect_type_id: i64,
    pub inspection_date: NaiveDate,
    pub qty_defects: i64,
}

// ==========================================
// ShipmentRecord - at most one per lot
// ==========================================
// is_shipped <=> ship_date is Some (CHECK in the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: i64,
    pub lot_id: i64,
    pub is_shipped: bool,
    pub ship_date: Option<NaiveDate>,
}

impl ShipmentRecord {
    /// Ship date, only when the record says the lot has shipped
    pub fn shipped_on(&self) -> Option<NaiveDate> {
        if self.is_shipped {
            self.ship_date
        } else {
            None
        }
    }
}
