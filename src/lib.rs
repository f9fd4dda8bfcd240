// ==========================================
// SteelWorks Operations - core library
// ==========================================
// Read-only reporting over lots, production, inspection and shipment
// records held in an embedded SQLite store.
// Layers: domain -> repository -> engine -> service -> app
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain - entities, value types, report payloads
pub mod domain;

// Query layer - data access
pub mod repository;

// Derived metrics - trend, shares, lead time
pub mod engine;

// Reporting service - session owner
pub mod service;

// Configuration - environment / .env
pub mod config;

// Database infrastructure (connection setup, schema)
pub mod db;

// Logging
pub mod logging;

// SQL statement tracing
pub mod perf;

// Presentation - commands and rendering
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use config::{ConfigError, DatabaseSettings, PerfSettings};

pub use domain::{
    DashboardOverview, DateRange, DefectTypeShare, Lot, LotReport, LotShipmentSummary,
    ProductionSummaryRow, ShipmentRecord, TrendIndicator, TrendPoint,
};

pub use repository::{RepositoryError, RepositoryResult};

pub use service::{ReportingError, ReportingResult, ReportingService};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "SteelWorks Operations Reporting";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_schema_version_matches_bundled_schema() {
        let conn = db::open_in_memory_connection().unwrap();
        db::apply_schema(&conn).unwrap();
        assert_eq!(
            db::read_schema_version(&conn).unwrap(),
            Some(db::CURRENT_SCHEMA_VERSION)
        );
    }
}
