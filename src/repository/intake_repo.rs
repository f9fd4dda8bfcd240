// ==========================================
// SteelWorks Operations - intake (write path)
// ==========================================
// Plain inserts/deletes used by seeding and tests.
// No validation beyond the store's constraints: unique, FK
// cascade/restrict and CHECK failures come back as RepositoryError.
// ==========================================

use crate::domain::entities::{
    DefectType, InspectionRecord, Lot, ProductionLine, ProductionRecord, ShipmentRecord,
};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

/// Intake repository
pub struct IntakeRepository<'a> {
    conn: &'a Connection,
}

impl<'a> IntakeRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create_lot(&self, lot_code: &str) -> RepositoryResult<Lot> {
        self.conn
            .execute("INSERT INTO lots (lot_code) VALUES (?1)", params![lot_code])?;
        Ok(Lot {
            id: self.conn.last_insert_rowid(),
            lot_code: lot_code.to_string(),
        })
    }

    pub fn create_production_line(&self, line_code: &str) -> RepositoryResult<ProductionLine> {
        self.conn.execute(
            "INSERT INTO production_lines (line_code) VALUES (?1)",
            params![line_code],
        )?;
        Ok(ProductionLine {
            id: self.conn.last_insert_rowid(),
            line_code: line_code.to_string(),
        })
    }

    pub fn create_defect_type(&self, defect_code: &str) -> RepositoryResult<DefectType> {
        self.conn.execute(
            "INSERT INTO defect_types (defect_code) VALUES (?1)",
            params![defect_code],
        )?;
        Ok(DefectType {
            id: self.conn.last_insert_rowid(),
            defect_code: defect_code.to_string(),
        })
    }

    /// Log a production event; (lot, line, date) must be new
    pub fn create_production_record(
        &self,
        lot_id: i64,
        production_line_id: i64,
        record_date: NaiveDate,
    ) -> RepositoryResult<ProductionRecord> {
        self.conn.execute(
            r#"
            INSERT INTO production_records (lot_id, production_line_id, record_date)
            VALUES (?1, ?2, ?3)
            "#,
            params![lot_id, production_line_id, record_date],
        )?;
        Ok(ProductionRecord {
            id: self.conn.last_insert_rowid(),
            lot_id,
            production_line_id,
            record_date,
        })
    }

    /// Log an inspection; qty_defects < 0 is rejected by the store
    pub fn create_inspection_record(
        &self,
        lot_id: i64,
        defect_type_id: i64,
        inspection_date: NaiveDate,
        qty_defects: i64,
    ) -> RepositoryResult<InspectionRecord> {
        self.conn.execute(
            r#"
            INSERT INTO inspection_records (lot_id, defect_type_id, inspection_date, qty_defects)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![lot_id, defect_type_id, inspection_date, qty_defects],
        )?;
        Ok(InspectionRecord {
            id: self.conn.last_insert_rowid(),
            lot_id,
            defect_type_id,
            inspection_date,
            qty_defects,
        })
    }

    /// Record the shipment status of a lot (one per lot)
    pub fn create_shipment_record(
        &self,
        lot_id: i64,
        is_shipped: bool,
        ship_date: Option<NaiveDate>,
    ) -> RepositoryResult<ShipmentRecord> {
        self.conn.execute(
            r#"
            INSERT INTO shipment_records (lot_id, is_shipped, ship_date)
            VALUES (?1, ?2, ?3)
            "#,
            params![lot_id, is_shipped, ship_date],
        )?;
        Ok(ShipmentRecord {
            id: self.conn.last_insert_rowid(),
            lot_id,
            is_shipped,
            ship_date,
        })
    }

    /// Delete a lot and, by cascade, all of its records
    ///
    /// # Returns
    /// false when no lot had this id
    pub fn delete_lot(&self, lot_id: i64) -> RepositoryResult<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM lots WHERE id = ?1", params![lot_id])?;
        if affected > 0 {
            tracing::info!(lot_id, "lot deleted with its records");
        }
        Ok(affected > 0)
    }

    /// Delete a production line; fails while production history references it
    pub fn delete_production_line(&self, production_line_id: i64) -> RepositoryResult<bool> {
        let affected = self.conn.execute(
            "DELETE FROM production_lines WHERE id = ?1",
            params![production_line_id],
        )?;
        Ok(affected > 0)
    }

    /// Delete a defect type; fails while inspections reference it
    pub fn delete_defect_type(&self, defect_type_id: i64) -> RepositoryResult<bool> {
        let affected = self.conn.execute(
            "DELETE FROM defect_types WHERE id = ?1",
            params![defect_type_id],
        )?;
        Ok(affected > 0)
    }
}
