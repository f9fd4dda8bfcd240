// ==========================================
// SteelWorks Operations - ReportingService
// ==========================================
// One service instance = one store session.
// Lifecycle: open / from_connection -> operations -> close (or Drop).
// Every date-ranged operation rejects start > end before touching the store.
// Sub-queries of lot_report / shipped_lots_summary are not isolated from
// concurrent writers.
// ==========================================

use crate::config::{DatabaseSettings, PerfSettings, StoreLocation};
use crate::db;
use crate::domain::report::{
    DashboardOverview, DefectEntry, DefectTypeShare, LotReport, LotShipmentSummary,
    ProductionInfo, ProductionSummaryRow, QualityInfo, ShipmentInfo, TrendPoint,
};
use crate::domain::types::DateRange;
use crate::engine::{classify_trend, days_to_ship, defect_shares, is_lead_time_anomaly};
use crate::perf::{self, PerfGuard};
use crate::repository::error::RepositoryError;
use crate::repository::rows::{LineDefectCount, ShippedLot};
use crate::repository::{
    InspectionRepository, LotRepository, ProductionRepository, ShipmentRepository,
};
use crate::service::error::{ReportingError, ReportingResult};
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct ReportingService {
    conn: Option<Connection>,
    target: String,
}

impl ReportingService {
    /// Open a session against the configured store
    ///
    /// Creates the parent directory of a file store when missing. A store
    /// without the expected schema version is logged, not rejected.
    pub fn open(settings: &DatabaseSettings) -> ReportingResult<Self> {
        Self::open_with(settings, &PerfSettings::from_env())
    }

    /// Open with explicit SQL tracing switches
    pub fn open_with(settings: &DatabaseSettings, perf_settings: &PerfSettings) -> ReportingResult<Self> {
        let mut conn = match &settings.location {
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        RepositoryError::DatabaseConnectionError(format!(
                            "cannot create {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
                db::open_sqlite_connection(path, settings.busy_timeout_ms)?
            }
            StoreLocation::Memory => {
                let conn = Connection::open_in_memory()?;
                db::configure_sqlite_connection(&conn, settings.busy_timeout_ms)?;
                conn
            }
        };

        db::warn_on_schema_mismatch(&conn)?;
        perf::install_sqlite_tracing(&mut conn, perf_settings);

        let target = settings.describe();
        tracing::info!(store = %target, "reporting session opened");
        Ok(Self {
            conn: Some(conn),
            target,
        })
    }

    /// Wrap an already configured connection
    pub fn from_connection(conn: Connection) -> Self {
        let target = conn
            .path()
            .filter(|p| !p.is_empty())
            .map(|p| format!("sqlite://{}", p))
            .unwrap_or_else(|| "sqlite::memory:".to_string());
        tracing::debug!(store = %target, "reporting session attached");
        Self {
            conn: Some(conn),
            target,
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the session; later calls are no-ops
    pub fn close(&mut self) -> ReportingResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                tracing::info!(store = %self.target, "reporting session closed");
                Ok(())
            }
            // the handle is dropped here; SQLite finishes the close on drop
            Err((_conn, e)) => Err(ReportingError::from(e)),
        }
    }

    fn session(&self) -> ReportingResult<&Connection> {
        self.conn.as_ref().ok_or(ReportingError::SessionClosed)
    }

    fn validate_range(start: NaiveDate, end: NaiveDate) -> ReportingResult<DateRange> {
        DateRange::new(start, end).ok_or(ReportingError::InvalidDateRange { start, end })
    }

    // ==========================================
    // Quality
    // ==========================================

    /// Production lines ranked by defect quantity in the period
    ///
    /// Defects reach a line through the lot (see
    /// `InspectionRepository::get_defect_count_by_line`).
    pub fn lines_with_most_defects(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ReportingResult<Vec<LineDefectCount>> {
        let range = Self::validate_range(start, end)?;
        let conn = self.session()?;
        let mut perf = PerfGuard::for_range("lines_with_most_defects", &range);

        let lines = InspectionRepository::new(conn).get_defect_count_by_line(range.start(), range.end())?;
        perf.rows(lines.len());
        Ok(lines)
    }

    /// Daily defect totals with a trend indicator against the previous row
    pub fn defect_trend_over_time(&self, start: NaiveDate, end: NaiveDate) -> ReportingResult<Vec<TrendPoint>> {
        let range = Self::validate_range(start, end)?;
        let conn = self.session()?;
        let mut perf = PerfGuard::for_range("defect_trend_over_time", &range);

        let days = InspectionRepository::new(conn).get_defect_trend(range.start(), range.end())?;
        perf.rows(days.len());
        Ok(classify_trend(&days))
    }

    /// Defect quantity and percentage of the period total per defect type
    pub fn defects_by_type(&self, start: NaiveDate, end: NaiveDate) -> ReportingResult<Vec<DefectTypeShare>> {
        let range = Self::validate_range(start, end)?;
        let conn = self.session()?;
        let mut perf = PerfGuard::for_range("defects_by_type", &range);

        let counts = InspectionRepository::new(conn).get_defect_count_by_type(range.start(), range.end())?;
        perf.rows(counts.len());
        Ok(defect_shares(&counts))
    }

    // ==========================================
    // Shipments
    // ==========================================

    /// Shipment status and defect total of every lot, by lot_code
    pub fn shipped_lots_summary(&self) -> ReportingResult<Vec<LotShipmentSummary>> {
        let conn = self.session()?;
        let mut perf = PerfGuard::new("shipped_lots_summary");
        let lot_repo = LotRepository::new(conn);

        let lots = lot_repo.get_all_lots()?;
        let mut rows = Vec::with_capacity(lots.len());
        for lot in lots {
            // the lot may vanish between the two reads
            let summary = lot_repo.get_lot_summary(lot.id)?;
            let total_defects = summary.as_ref().map_or(0, |s| s.total_defects);
            let shipment = summary.and_then(|s| s.shipment);

            rows.push(LotShipmentSummary {
                lot_code: lot.lot_code,
                is_shipped: shipment.as_ref().is_some_and(|s| s.is_shipped),
                ship_date: shipment.as_ref().and_then(|s| s.ship_date),
                total_defects,
            });
        }

        rows.sort_by(|a, b| a.lot_code.cmp(&b.lot_code));
        perf.rows(rows.len());
        Ok(rows)
    }

    /// Lot codes with a not-yet-shipped shipment record
    pub fn pending_shipments(&self) -> ReportingResult<Vec<String>> {
        let conn = self.session()?;
        let _perf = PerfGuard::new("pending_shipments");
        Ok(ShipmentRepository::new(conn).get_pending_shipments()?)
    }

    /// Shipped lots, most recent ship date first
    pub fn shipped_lots(&self) -> ReportingResult<Vec<ShippedLot>> {
        let conn = self.session()?;
        let _perf = PerfGuard::new("shipped_lots");
        Ok(ShipmentRepository::new(conn).get_shipped_lots()?)
    }

    // ==========================================
    // Lot drill-down
    // ==========================================

    /// Production, quality and shipment view of one lot
    ///
    /// # Returns
    /// - Ok(None): no lot with this code
    /// - Ok(Some(report)): `days_to_ship` is set only for a shipped lot with
    ///   production history; a negative value is logged as an anomaly
    pub fn lot_report(&self, lot_code: &str) -> ReportingResult<Option<LotReport>> {
        let conn = self.session()?;
        let mut perf = PerfGuard::for_lot("lot_report", lot_code);
        let lot_repo = LotRepository::new(conn);

        let Some(lot) = lot_repo.get_lot_by_code(lot_code)? else {
            tracing::debug!(lot_code, "lot not found");
            return Ok(None);
        };
        let Some(summary) = lot_repo.get_lot_summary(lot.id)? else {
            return Ok(None);
        };

        perf.rows(summary.production_info.len() + summary.defects.len());

        let days = days_to_ship(summary.first_production_date(), summary.shipment.as_ref());
        if is_lead_time_anomaly(days) {
            tracing::warn!(
                lot_code = %summary.lot_code,
                days_to_ship = days.unwrap_or_default(),
                "ship date precedes first production date"
            );
        }

        let shipment_info = match &summary.shipment {
            Some(s) => ShipmentInfo {
                is_shipped: s.is_shipped,
                ship_date: s.ship_date,
                days_to_ship: days,
            },
            None => ShipmentInfo::not_shipped(),
        };

        let production_info = summary
            .production_info
            .into_iter()
            .map(|p| ProductionInfo {
                line: p.line_code,
                date: p.record_date,
            })
            .collect();

        let defects = summary
            .defects
            .into_iter()
            .map(|d| DefectEntry {
                defect_code: d.defect_code,
                qty: d.qty,
                date: d.inspection_date,
            })
            .collect();

        Ok(Some(LotReport {
            lot_code: summary.lot_code,
            production_info,
            quality_info: QualityInfo {
                total_defects: summary.total_defects,
                defects,
            },
            shipment_info,
        }))
    }

    // ==========================================
    // Production
    // ==========================================

    /// Production events in the period, by date then line
    pub fn production_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ReportingResult<Vec<ProductionSummaryRow>> {
        let range = Self::validate_range(start, end)?;
        let conn = self.session()?;
        let mut perf = PerfGuard::for_range("production_summary", &range);

        let mut rows: Vec<ProductionSummaryRow> = ProductionRepository::new(conn)
            .get_production_by_date_range(range.start(), range.end())?
            .into_iter()
            .map(|e| ProductionSummaryRow {
                date: e.record_date,
                line_code: e.line_code,
                lot_code: e.lot_code,
            })
            .collect();

        // stable: lots on the same (date, line) keep their query order
        rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.line_code.cmp(&b.line_code)));
        perf.rows(rows.len());
        Ok(rows)
    }

    // ==========================================
    // Dashboard
    // ==========================================

    /// Landing view: worst lines, daily trend, shipped and pending counts
    pub fn dashboard_overview(&self, start: NaiveDate, end: NaiveDate) -> ReportingResult<DashboardOverview> {
        let range = Self::validate_range(start, end)?;
        self.session()?;
        let _perf = PerfGuard::for_range("dashboard_overview", &range);

        let lines_with_most_defects = self.lines_with_most_defects(range.start(), range.end())?;
        let defect_trend = self.defect_trend_over_time(range.start(), range.end())?;
        let shipped_count = self.shipped_lots()?.len();
        let pending_count = self.pending_shipments()?.len();

        Ok(DashboardOverview {
            period_start: range.start(),
            period_end: range.end(),
            lines_with_most_defects,
            defect_trend,
            shipped_count,
            pending_count,
        })
    }
}

impl Drop for ReportingService {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(store = %self.target, error = %e, "reporting session close failed on drop");
        }
    }
}
