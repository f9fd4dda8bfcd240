// ==========================================
// SteelWorks Operations - derived metrics
// ==========================================
// Pure functions over already-aggregated query results.
// No data access, no logging of business context.
// ==========================================

pub mod defect_share;
pub mod lead_time;
pub mod trend;

pub use defect_share::{defect_shares, percentage};
pub use lead_time::{days_to_ship, is_lead_time_anomaly};
pub use trend::{classify_trend, trend_indicator};
