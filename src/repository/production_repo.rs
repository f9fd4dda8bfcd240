// ==========================================
// SteelWorks Operations - production queries
// ==========================================
// No business logic here: filter, join, order.
// ==========================================

use crate::domain::entities::ProductionRecord;
use crate::repository::error::RepositoryResult;
use crate::repository::rows::ProductionEvent;
use crate::repository::sql_builder::{date_between, SqlQueryBuilder};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};

/// Production record repository
pub struct ProductionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ProductionRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All production records of a lot
    ///
    /// # Returns
    /// Records ordered by record_date, then id; empty when the lot has none
    pub fn get_production_records_by_lot(&self, lot_id: i64) -> RepositoryResult<Vec<ProductionRecord>> {
        let sql = SqlQueryBuilder::select(&["id", "lot_id", "production_line_id", "record_date"])
            .from("production_records")
            .where_clause("lot_id = ?")
            .order_by("record_date ASC")
            .then_by("id ASC")
            .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![lot_id], map_production_record)?
            .collect::<SqliteResult<Vec<ProductionRecord>>>()?;

        tracing::debug!(lot_id, count = records.len(), "production records by lot");
        Ok(records)
    }

    /// Production events in [start_date, end_date] with lot and line codes
    ///
    /// # Arguments
    /// - start_date / end_date: inclusive; start <= end is the caller's job
    ///
    /// # Returns
    /// Events ordered by record_date, then lot_code, then line_code
    pub fn get_production_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Vec<ProductionEvent>> {
        let sql = SqlQueryBuilder::select(&["l.lot_code", "pl.line_code", "pr.record_date"])
            .from("production_records pr")
            .join("lots l ON l.id = pr.lot_id")
            .join("production_lines pl ON pl.id = pr.production_line_id")
            .where_clause(&date_between("pr.record_date"))
            .order_by("pr.record_date ASC")
            .then_by("l.lot_code ASC")
            .then_by("pl.line_code ASC")
            .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let events = stmt
            .query_map(params![start_date, end_date], |row| {
                Ok(ProductionEvent {
                    lot_code: row.get(0)?,
                    line_code: row.get(1)?,
                    record_date: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<ProductionEvent>>>()?;

        tracing::debug!(
            %start_date,
            %end_date,
            count = events.len(),
            "production by date range"
        );
        Ok(events)
    }
}

fn map_production_record(row: &Row<'_>) -> SqliteResult<ProductionRecord> {
    Ok(ProductionRecord {
        id: row.get(0)?,
        lot_id: row.get(1)?,
        production_line_id: row.get(2)?,
        record_date: row.get(3)?,
    })
}
