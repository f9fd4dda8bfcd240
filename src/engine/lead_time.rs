// ==========================================
// SteelWorks Operations - production-to-shipment lead time
// ==========================================

use crate::domain::entities::ShipmentRecord;
use chrono::NaiveDate;

/// Whole days from the first production date to the ship date
///
/// # Returns
/// - Some(days): the lot is shipped and has production history
/// - None: not shipped, no shipment record, or never produced
///
/// A negative value means the ship date precedes production. It is
/// returned unchanged; see `is_lead_time_anomaly`.
pub fn days_to_ship(
    first_production_date: Option<NaiveDate>,
    shipment: Option<&ShipmentRecord>,
) -> Option<i64> {
    let ship_date = shipment?.shipped_on()?;
    let first = first_production_date?;
    Some((ship_date - first).num_days())
}

/// Ship date before the first production date
pub fn is_lead_time_anomaly(days: Option<i64>) -> bool {
    matches!(days, Some(d) if d < 0)
}
