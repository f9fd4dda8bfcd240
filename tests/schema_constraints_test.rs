// ==========================================
// Store constraint tests
// ==========================================
// Uniqueness, referential actions and CHECK rules enforced by
// scripts/schema.sql, observed through IntakeRepository.
// ==========================================


use steelworks_ops::db;
use steelworks_ops::repository::{
    InspectionRepository, LotRepository, ProductionRepository, RepositoryError, ShipmentRepository,
};
use test_helpers::{d, Fixture};

#[test]
fn test_duplicate_codes_are_rejected() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let fx = Fixture::new(&conn);
    let intake = fx.intake();

    intake.create_lot("LOT-1").unwrap();
    let err = intake.create_lot("LOT-1").unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)), "{:?}", err);
    assert!(err.is_constraint_violation());

    intake.create_production_line("LINE-A").unwrap();
    assert!(matches!(
        intake.create_production_line("LINE-A"),
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));

    intake.create_defect_type("SURFACE-SCRATCH").unwrap();
    assert!(matches!(
        intake.create_defect_type("SURFACE-SCRATCH"),
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));
}

#[test]
fn test_duplicate_production_event_is_rejected() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.produce("LOT-1", "LINE-A", d(2024, 1, 5));
    let (lot, line) = (fx.lot("LOT-1"), fx.line("LINE-A"));

    let err = fx
        .intake()
        .create_production_record(lot, line, d(2024, 1, 5))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

    // same lot and line on another day is a separate event
    fx.intake()
        .create_production_record(lot, line, d(2024, 1, 6))
        .unwrap();
}

#[test]
fn test_one_shipment_record_per_lot() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.hold("LOT-1");
    let lot = fx.lot("LOT-1");

    assert!(matches!(
        fx.intake().create_shipment_record(lot, true, Some(d(2024, 1, 9))),
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));
}

#[test]
fn test_check_constraints() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    let lot = fx.lot("LOT-1");
    let other = fx.lot("LOT-2");
    let defect = fx.defect_type("SURFACE-SCRATCH");

    assert!(matches!(
        fx.intake().create_inspection_record(lot, defect, d(2024, 1, 3), -1),
        Err(RepositoryError::CheckConstraintViolation(_))
    ));
    // zero defects is a clean inspection, not an error
    fx.intake()
        .create_inspection_record(lot, defect, d(2024, 1, 3), 0)
        .unwrap();

    assert!(matches!(
        fx.intake().create_shipment_record(lot, true, None),
        Err(RepositoryError::CheckConstraintViolation(_))
    ));
    assert!(matches!(
        fx.intake().create_shipment_record(other, false, Some(d(2024, 1, 9))),
        Err(RepositoryError::CheckConstraintViolation(_))
    ));
}

#[test]
fn test_unknown_references_are_rejected() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    let lot = fx.lot("LOT-1");

    assert!(matches!(
        fx.intake().create_production_record(lot, 404, d(2024, 1, 1)),
        Err(RepositoryError::ForeignKeyViolation(_))
    ));
    assert!(matches!(
        fx.intake().create_inspection_record(404, 1, d(2024, 1, 1), 1),
        Err(RepositoryError::ForeignKeyViolation(_))
    ));
}

#[test]
fn test_referenced_dimensions_cannot_be_deleted() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.produce("LOT-1", "LINE-A", d(2024, 1, 2))
        .inspect("LOT-1", "DIMENSION-OOT", d(2024, 1, 4), 1);
    let line = fx.line("LINE-A");
    let defect = fx.defect_type("DIMENSION-OOT");
    let unused = fx.line("LINE-UNUSED");

    assert!(matches!(
        fx.intake().delete_production_line(line),
        Err(RepositoryError::ForeignKeyViolation(_))
    ));
    assert!(matches!(
        fx.intake().delete_defect_type(defect),
        Err(RepositoryError::ForeignKeyViolation(_))
    ));

    assert!(fx.intake().delete_production_line(unused).unwrap());
    assert!(!fx.intake().delete_production_line(unused).unwrap());
}

#[test]
fn test_deleting_a_lot_cascades_to_its_records() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.produce("LOT-1", "LINE-A", d(2024, 1, 2))
        .produce("LOT-1", "LINE-B", d(2024, 1, 3))
        .inspect("LOT-1", "SURFACE-SCRATCH", d(2024, 1, 4), 4)
        .ship("LOT-1", d(2024, 1, 9))
        .produce("LOT-2", "LINE-A", d(2024, 1, 2));
    let lot = fx.lot("LOT-1");

    assert!(fx.intake().delete_lot(lot).unwrap());

    assert!(LotRepository::new(&conn).get_lot_by_id(lot).unwrap().is_none());
    assert!(ProductionRepository::new(&conn)
        .get_production_records_by_lot(lot)
        .unwrap()
        .is_empty());
    assert!(InspectionRepository::new(&conn)
        .get_inspection_records_by_lot(lot)
        .unwrap()
        .is_empty());
    assert!(ShipmentRepository::new(&conn)
        .get_shipment_status(lot)
        .unwrap()
        .is_none());

    // the other lot and the lines survive
    let remaining = ProductionRepository::new(&conn)
        .get_production_by_date_range(d(2024, 1, 1), d(2024, 1, 31))
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].lot_code, "LOT-2");
}

#[test]
fn test_schema_and_seed_reapply_cleanly() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();

    db::apply_schema(&conn).unwrap();
    db::apply_seed(&conn).unwrap();

    let lots: i64 = conn
        .query_row("SELECT COUNT(*) FROM lots", [], |row| row.get(0))
        .unwrap();
    let inspections: i64 = conn
        .query_row("SELECT COUNT(*) FROM inspection_records", [], |row| row.get(0))
        .unwrap();
    let shipments: i64 = conn
        .query_row("SELECT COUNT(*) FROM shipment_records", [], |row| row.get(0))
        .unwrap();
    assert_eq!((lots, inspections, shipments), (5, 7, 4));
    assert_eq!(db::read_schema_version(&conn).unwrap(), Some(db::CURRENT_SCHEMA_VERSION));
}
