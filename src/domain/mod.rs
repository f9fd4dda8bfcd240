// ==========================================
// SteelWorks Operations - domain layer
// ==========================================
// Entities, value types and report payloads.
// No data access here.
// ==========================================

pub mod entities;
pub mod report;
pub mod types;

pub use entities::{
    DefectType, InspectionRecord, Lot, ProductionLine, ProductionRecord, ShipmentRecord,
};
pub use report::{
    DashboardOverview, DefectEntry, DefectTypeShare, LotReport, LotShipmentSummary,
    ProductionInfo, ProductionSummaryRow, QualityInfo, ShipmentInfo, TrendPoint,
};
pub use types::{DateRange, TrendIndicator};
