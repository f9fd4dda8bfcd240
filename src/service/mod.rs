// ==========================================
// SteelWorks Operations - reporting service
// ==========================================
// Composes query-layer results into report payloads.
// Validates date ranges and owns the store session.
// ==========================================

pub mod error;
pub mod reporting_service;

pub use error::{ReportingError, ReportingResult};
pub use reporting_service::ReportingService;
