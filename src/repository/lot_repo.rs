// ==========================================
// SteelWorks Operations - lot queries and drill-down
// ==========================================
// Lot lookups plus the per-lot summary that pulls production,
// inspection and shipment facts together.
// ==========================================

use crate::domain::entities::Lot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::rows::{LotDefectEntry, LotProductionEntry, LotSummary};
use crate::repository::shipment_repo::ShipmentRepository;
use crate::repository::sql_builder::SqlQueryBuilder;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};

/// Lot repository
pub struct LotRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LotRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Exact-match lookup by lot_code
    pub fn get_lot_by_code(&self, lot_code: &str) -> RepositoryResult<Option<Lot>> {
        let sql = SqlQueryBuilder::select(&["id", "lot_code"])
            .from("lots")
            .where_clause("lot_code = ?")
            .build();

        let lot = self
            .conn
            .query_row(&sql, params![lot_code], map_lot)
            .optional()?;
        Ok(lot)
    }

    /// Lookup by surrogate key
    pub fn get_lot_by_id(&self, lot_id: i64) -> RepositoryResult<Option<Lot>> {
        let sql = SqlQueryBuilder::select(&["id", "lot_code"])
            .from("lots")
            .where_clause("id = ?")
            .build();

        let lot = self
            .conn
            .query_row(&sql, params![lot_id], map_lot)
            .optional()?;
        Ok(lot)
    }

    /// Every lot, ordered by lot_code
    pub fn get_all_lots(&self) -> RepositoryResult<Vec<Lot>> {
        let sql = SqlQueryBuilder::select(&["id", "lot_code"])
            .from("lots")
            .order_by("lot_code ASC")
            .build();

        let mut stmt = self.conn.prepare(&sql)?;
        let lots = stmt
            .query_map([], map_lot)?
            .collect::<SqliteResult<Vec<Lot>>>()?;

        tracing::debug!(count = lots.len(), "all lots");
        Ok(lots)
    }

    /// Production, inspection and shipment facts for one lot
    ///
    /// # Returns
    /// - Ok(None): no lot with this id
    /// - Ok(Some(LotSummary)): production ordered by (date, line),
    ///   defects by (date, defect_code); total_defects sums every inspection
    ///
    /// The sub-queries are not wrapped in a transaction.
    /// A defect total beyond i64 is a `ValueOverflow` error.
    pub fn get_lot_summary(&self, lot_id: i64) -> RepositoryResult<Option<LotSummary>> {
        let lot = match self.get_lot_by_id(lot_id)? {
            Some(lot) => lot,
            None => return Ok(None),
        };

        let production_sql = SqlQueryBuilder::select(&["pl.line_code", "pr.record_date"])
            .from("production_records pr")
            .join("production_lines pl ON pl.id = pr.production_line_id")
            .where_clause("pr.lot_id = ?")
            .order_by("pr.record_date ASC")
            .then_by("pl.line_code ASC")
            .build();

        let mut stmt = self.conn.prepare(&production_sql)?;
        let production_info = stmt
            .query_map(params![lot_id], |row| {
                Ok(LotProductionEntry {
                    line_code: row.get(0)?,
                    record_date: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<LotProductionEntry>>>()?;

        let defects_sql = SqlQueryBuilder::select(&["dt.defect_code", "ir.qty_defects", "ir.inspection_date"])
            .from("inspection_records ir")
            .join("defect_types dt ON dt.id = ir.defect_type_id")
            .where_clause("ir.lot_id = ?")
            .order_by("ir.inspection_date ASC")
            .then_by("dt.defect_code ASC")
            .then_by("ir.id ASC")
            .build();

        let mut stmt = self.conn.prepare(&defects_sql)?;
        let defects = stmt
            .query_map(params![lot_id], |row| {
                Ok(LotDefectEntry {
                    defect_code: row.get(0)?,
                    qty: row.get(1)?,
                    inspection_date: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<LotDefectEntry>>>()?;

        let total_defects = defects
            .iter()
            .try_fold(0_i64, |acc, d| acc.checked_add(d.qty))
            .ok_or_else(|| RepositoryError::ValueOverflow {
                field: "total_defects".to_string(),
                context: format!("lot {}", lot.lot_code),
            })?;
        let shipment = ShipmentRepository::new(self.conn).get_shipment_status(lot_id)?;

        tracing::debug!(
            lot_id,
            lot_code = %lot.lot_code,
            production = production_info.len(),
            inspections = defects.len(),
            total_defects,
            "lot summary"
        );

        Ok(Some(LotSummary {
            lot_id: lot.id,
            lot_code: lot.lot_code,
            production_info,
            defects,
            total_defects,
            shipment,
        }))
    }
}

fn map_lot(row: &Row<'_>) -> SqliteResult<Lot> {
    Ok(Lot {
        id: row.get(0)?,
        lot_code: row.get(1)?,
    })
}
