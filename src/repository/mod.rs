// ==========================================
// SteelWorks Operations - query layer
// ==========================================
// Rule: repositories hold no business logic
// ==========================================
// Translates reporting questions into parameterised SQL
// (filter, join, group, aggregate, order) and maps rows into typed records.
// Date ranges are inclusive and are NOT validated here.
// Repositories borrow the caller's connection; they never own one.
// ==========================================

pub mod error;
pub mod inspection_repo;
pub mod intake_repo;
pub mod lot_repo;
pub mod production_repo;
pub mod rows;
pub mod shipment_repo;
pub mod sql_builder;

pub use error::{RepositoryError, RepositoryResult};
pub use inspection_repo::InspectionRepository;
pub use intake_repo::IntakeRepository;
pub use lot_repo::LotRepository;
pub use production_repo::ProductionRepository;
pub use rows::{
    DailyDefectCount, DefectTypeCount, LineDefectCount, LotDefectEntry, LotProductionEntry,
    LotSummary, ProductionEvent, ShippedLot,
};
pub use shipment_repo::ShipmentRepository;
