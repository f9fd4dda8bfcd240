// ==========================================
// SteelWorks Operations - shipment queries
// ==========================================

use crate::domain::entities::ShipmentRecord;
use crate::repository::error::RepositoryResult;
use crate::repository::rows::ShippedLot;
use crate::repository::sql_builder::SqlQueryBuilder;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};

/// Shipment record repository
pub struct ShipmentRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ShipmentRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Shipment record of a lot
    ///
    /// # Returns
    /// - Ok(Some(ShipmentRecord)): the lot's (unique) shipment record
    /// - Ok(None): the lot has no shipment record
    pub fn get_shipment_status(&self, lot_id: i64) -> RepositoryResult<Option<ShipmentRecord>> {
        let sql = SqlQueryBuilder::select(&["id", "lot_id", "is_shipped", "ship_date"])
            .from("shipment_records")
            .where_clause("lot_id = ?")
            .build();

        let record = self
            .conn
            .query_row(&sql, params![lot_id], |row| {
                Ok(ShipmentRecord {
                    id: row.get(0)?,
                    lot_id: row.get(1)?,
                    is_shipped: row.get(2)?,
                    ship_date: row.get(3)?,
                })
            })
            .optional()?;

        Ok(record)
    }

    /// Shipped lots, most recent ship_date first (ties by lot_code)
    pub fn get_shipped_lots(&self) -> RepositoryResult<Vec<ShippedLot>> {
        let sql = SqlQueryBuilder::select(&["l.lot_code", "sr.ship_date"])
            .from("lots l")
            .join("shipment_records sr ON sr.lot_id = l.id")
            .where_clause("sr.is_shipped = 1")
            .order_by("sr.ship_date DESC")
            .then_by("l.lot_code ASC")
            .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let lots = stmt
            .query_map([], |row| {
                Ok(ShippedLot {
                    lot_code: row.get(0)?,
                    ship_date: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<ShippedLot>>>()?;

        tracing::debug!(count = lots.len(), "shipped lots");
        Ok(lots)
    }

    /// Lot codes with a shipment record that is not yet shipped
    ///
    /// Lots without any shipment record are not listed.
    pub fn get_pending_shipments(&self) -> RepositoryResult<Vec<String>> {
        let sql = SqlQueryBuilder::select(&["l.lot_code"])
            .from("lots l")
            .join("shipment_records sr ON sr.lot_id = l.id")
            .where_clause("sr.is_shipped = 0")
            .order_by("l.lot_code ASC")
            .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<String>>>()?;

        tracing::debug!(count = codes.len(), "pending shipments");
        Ok(codes)
    }
}
