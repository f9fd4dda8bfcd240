// ==========================================
// SteelWorks Operations - inspection / defect queries
// ==========================================
// Aggregations over inspection_records: by defect type, by line, by day.
// Every date filter is on inspection_date and inclusive on both ends.
// ==========================================

use crate::domain::entities::InspectionRecord;
use crate::repository::error::RepositoryResult;
use crate::repository::rows::{DailyDefectCount, DefectTypeCount, LineDefectCount};
use crate::repository::sql_builder::{date_between, SqlQueryBuilder};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult};

/// Inspection record repository
pub struct InspectionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> InspectionRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All inspection records of a lot, ordered by inspection_date
    pub fn get_inspection_records_by_lot(&self, lot_id: i64) -> RepositoryResult<Vec<InspectionRecord>> {
        let sql = SqlQueryBuilder::select(&[
            "id",
            "lot_id",
            "defect_type_id",
            "inspection_date",
            "qty_defects",
        ])
        .from("inspection_records")
        .where_clause("lot_id = ?")
        .order_by("inspection_date ASC")
        .then_by("id ASC")
        .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![lot_id], |row| {
                Ok(InspectionRecord {
                    id: row.get(0)?,
                    lot_id: row.get(1)?,
                    defect_type_id: row.get(2)?,
                    inspection_date: row.get(3)?,
                    qty_defects: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<InspectionRecord>>>()?;

        tracing::debug!(lot_id, count = records.len(), "inspection records by lot");
        Ok(records)
    }

    /// SUM(qty_defects) per defect_code in the period
    ///
    /// # Returns
    /// Ordered by total descending; ties broken by defect_code ascending
    pub fn get_defect_count_by_type(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Vec<DefectTypeCount>> {
        let sql = SqlQueryBuilder::select(&["dt.defect_code", "SUM(ir.qty_defects) AS total_qty"])
            .from("inspection_records ir")
            .join("defect_types dt ON dt.id = ir.defect_type_id")
            .where_clause(&date_between("ir.inspection_date"))
            .group_by("dt.defect_code")
            .order_by("total_qty DESC")
            .then_by("dt.defect_code ASC")
            .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let counts = stmt
            .query_map(params![start_date, end_date], |row| {
                Ok(DefectTypeCount {
                    defect_code: row.get(0)?,
                    total_qty: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<DefectTypeCount>>>()?;

        tracing::debug!(%start_date, %end_date, groups = counts.len(), "defect count by type");
        Ok(counts)
    }

    /// SUM(qty_defects) per production line in the period
    ///
    /// Defects are attributed to a line through the lot, not through a
    /// specific production event: an inspection row joins every production
    /// record of its lot. A lot produced on LINE-A and LINE-C counts its
    /// defects on both lines, and a lot produced twice on one line counts
    /// them twice on that line.
    ///
    /// # Returns
    /// Ordered by total descending; ties broken by line_code ascending
    pub fn get_defect_count_by_line(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Vec<LineDefectCount>> {
        let sql = SqlQueryBuilder::select(&["pl.line_code", "SUM(ir.qty_defects) AS total_defects"])
            .from("production_lines pl")
            .join("production_records pr ON pr.production_line_id = pl.id")
            .join("inspection_records ir ON ir.lot_id = pr.lot_id")
            .where_clause(&date_between("ir.inspection_date"))
            .group_by("pl.line_code")
            .order_by("total_defects DESC")
            .then_by("pl.line_code ASC")
            .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let counts = stmt
            .query_map(params![start_date, end_date], |row| {
                Ok(LineDefectCount {
                    line_code: row.get(0)?,
                    total_defects: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<LineDefectCount>>>()?;

        tracing::debug!(%start_date, %end_date, groups = counts.len(), "defect count by line");
        Ok(counts)
    }

    /// SUM(qty_defects) per inspection_date in the period
    ///
    /// Only dates with at least one inspection appear; no zero-filling.
    pub fn get_defect_trend(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Vec<DailyDefectCount>> {
        let sql = SqlQueryBuilder::select(&["ir.inspection_date", "SUM(ir.qty_defects) AS daily_defects"])
            .from("inspection_records ir")
            .where_clause(&date_between("ir.inspection_date"))
            .group_by("ir.inspection_date")
            .order_by("ir.inspection_date ASC")
            .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let days = stmt
            .query_map(params![start_date, end_date], |row| {
                Ok(DailyDefectCount {
                    inspection_date: row.get(0)?,
                    total_defects: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<DailyDefectCount>>>()?;

        tracing::debug!(%start_date, %end_date, days = days.len(), "defect trend");
        Ok(days)
    }
}
