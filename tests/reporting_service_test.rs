// ==========================================
// ReportingService integration tests
// ==========================================
// Report payloads over the seed data set and hand-built fixtures,
// date range validation and session lifecycle.
// ==========================================


use steelworks_ops::config::{DatabaseSettings, PerfSettings};
use steelworks_ops::domain::{ShipmentInfo, TrendIndicator};
use steelworks_ops::logging;
use steelworks_ops::{RepositoryError, ReportingError, ReportingService};
use test_helpers::{d, Fixture};

// ==========================================
// Seed data set
// ==========================================

#[test]
fn test_lines_with_most_defects_on_seed() {
    logging::init_test();
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);

    let lines: Vec<_> = service
        .lines_with_most_defects(d(2024, 1, 1), d(2024, 1, 31))
        .unwrap()
        .into_iter()
        .map(|l| (l.line_code, l.total_defects))
        .collect();

    // LOT-2024-01-003 (7 defects) counts on LINE-A and LINE-C
    assert_eq!(
        lines,
        vec![
            ("LINE-A".to_string(), 12),
            ("LINE-C".to_string(), 7),
            ("LINE-B".to_string(), 6),
        ]
    );
}

#[test]
fn test_defects_by_type_reference_scenario() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);

    let shares = service.defects_by_type(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
    let got: Vec<_> = shares
        .iter()
        .map(|s| (s.defect_code.as_str(), s.total_qty, s.percentage))
        .collect();
    assert_eq!(
        got,
        vec![
            ("SURFACE-SCRATCH", 10, 55.56),
            ("DIMENSION-OOT", 5, 27.78),
            ("MATERIAL-FLAW", 3, 16.67),
        ]
    );

    let sum: f64 = shares.iter().map(|s| s.percentage).sum();
    assert!((sum - 100.0).abs() <= 0.5);
}

#[test]
fn test_defects_by_type_empty_range() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);

    assert!(service.defects_by_type(d(2023, 6, 1), d(2023, 6, 30)).unwrap().is_empty());
    // only a clean inspection (qty 0) on 2024-01-16
    assert!(service.defects_by_type(d(2024, 1, 16), d(2024, 1, 16)).unwrap().is_empty());
}

#[test]
fn test_defects_by_type_total_beyond_i64() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.inspect("LOT-1", "SURFACE-SCRATCH", d(2024, 1, 3), 5_000_000_000_000_000_000)
        .inspect("LOT-2", "DIMENSION-OOT", d(2024, 1, 3), 5_000_000_000_000_000_000);

    let service = test_helpers::open_service(&db_path);
    let shares = service.defects_by_type(d(2024, 1, 3), d(2024, 1, 3)).unwrap();

    let got: Vec<_> = shares
        .iter()
        .map(|s| (s.defect_code.as_str(), s.percentage))
        .collect();
    assert_eq!(got, vec![("DIMENSION-OOT", 50.0), ("SURFACE-SCRATCH", 50.0)]);

    // the per-lot total still fits; the drill-down is unaffected
    let report = service.lot_report("LOT-1").unwrap().unwrap();
    assert_eq!(report.quality_info.total_defects, 5_000_000_000_000_000_000);
}

#[test]
fn test_lot_total_overflow_surfaces_as_error() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.inspect("LOT-BIG", "SURFACE-SCRATCH", d(2024, 1, 3), 5_000_000_000_000_000_000)
        .inspect("LOT-BIG", "MATERIAL-FLAW", d(2024, 1, 4), 5_000_000_000_000_000_000);

    let service = test_helpers::open_service(&db_path);
    assert!(matches!(
        service.lot_report("LOT-BIG"),
        Err(ReportingError::Repository(RepositoryError::ValueOverflow { .. }))
    ));
    assert!(matches!(
        service.shipped_lots_summary(),
        Err(ReportingError::Repository(RepositoryError::ValueOverflow { .. }))
    ));
}

#[test]
fn test_shipped_lots_summary_covers_every_lot() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);

    let rows: Vec<_> = service
        .shipped_lots_summary()
        .unwrap()
        .into_iter()
        .map(|r| (r.lot_code, r.is_shipped, r.ship_date, r.total_defects))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("LOT-2024-01-001".to_string(), true, Some(d(2024, 1, 9)), 5),
            ("LOT-2024-01-002".to_string(), true, Some(d(2024, 1, 11)), 2),
            ("LOT-2024-01-003".to_string(), false, None, 7),
            ("LOT-2024-01-004".to_string(), false, None, 4),
            ("LOT-2024-01-005".to_string(), false, None, 0),
        ]
    );
}

#[test]
fn test_shipment_lists_on_seed() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);

    let shipped: Vec<_> = service
        .shipped_lots()
        .unwrap()
        .into_iter()
        .map(|s| s.lot_code)
        .collect();
    assert_eq!(shipped, vec!["LOT-2024-01-002", "LOT-2024-01-001"]);

    // LOT-2024-01-005 has no shipment record and is not pending
    assert_eq!(
        service.pending_shipments().unwrap(),
        vec!["LOT-2024-01-003", "LOT-2024-01-004"]
    );
}

#[test]
fn test_production_summary_sorted_by_date_then_line() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);

    let rows: Vec<_> = service
        .production_summary(d(2024, 1, 3), d(2024, 1, 10))
        .unwrap()
        .into_iter()
        .map(|r| (r.date, r.line_code, r.lot_code))
        .collect();

    assert_eq!(
        rows,
        vec![
            (d(2024, 1, 3), "LINE-B".to_string(), "LOT-2024-01-002".to_string()),
            (d(2024, 1, 5), "LINE-A".to_string(), "LOT-2024-01-003".to_string()),
            (d(2024, 1, 6), "LINE-C".to_string(), "LOT-2024-01-003".to_string()),
            (d(2024, 1, 10), "LINE-B".to_string(), "LOT-2024-01-004".to_string()),
        ]
    );
}

#[test]
fn test_dashboard_overview_on_seed() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);

    let overview = service.dashboard_overview(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
    assert_eq!(overview.period_start, d(2024, 1, 1));
    assert_eq!(overview.period_end, d(2024, 1, 31));
    assert_eq!(overview.lines_with_most_defects[0].line_code, "LINE-A");
    assert_eq!(overview.defect_trend.len(), 5);
    assert_eq!(overview.defect_trend[0].trend_indicator, TrendIndicator::Baseline);
    assert_eq!(overview.shipped_count, 2);
    assert_eq!(overview.pending_count, 2);
}

#[test]
fn test_reports_are_idempotent() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);
    let (start, end) = (d(2024, 1, 1), d(2024, 1, 31));

    assert_eq!(
        service.lines_with_most_defects(start, end).unwrap(),
        service.lines_with_most_defects(start, end).unwrap()
    );
    assert_eq!(
        service.defect_trend_over_time(start, end).unwrap(),
        service.defect_trend_over_time(start, end).unwrap()
    );
    assert_eq!(
        service.lot_report("LOT-2024-01-003").unwrap(),
        service.lot_report("LOT-2024-01-003").unwrap()
    );
}

// ==========================================
// Defect trend
// ==========================================

#[test]
fn test_trend_reference_sequence() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.inspect("LOT-1", "SURFACE-SCRATCH", d(2024, 3, 1), 5)
        .inspect("LOT-1", "SURFACE-SCRATCH", d(2024, 3, 2), 8)
        .inspect("LOT-2", "DIMENSION-OOT", d(2024, 3, 3), 2)
        .inspect("LOT-2", "MATERIAL-FLAW", d(2024, 3, 3), 4)
        .inspect("LOT-3", "SURFACE-SCRATCH", d(2024, 3, 4), 6);

    let service = test_helpers::open_service(&db_path);
    let trend = service.defect_trend_over_time(d(2024, 3, 1), d(2024, 3, 31)).unwrap();

    let got: Vec<_> = trend.iter().map(|p| (p.total_defects, p.trend_indicator)).collect();
    assert_eq!(
        got,
        vec![
            (5, TrendIndicator::Baseline),
            (8, TrendIndicator::Increasing),
            (6, TrendIndicator::Decreasing),
            (6, TrendIndicator::Stable),
        ]
    );
}

// ==========================================
// Lot drill-down
// ==========================================

#[test]
fn test_lot_report_one_week_to_ship() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.produce("LOT-W", "LINE-A", d(2024, 1, 1))
        .inspect("LOT-W", "SURFACE-SCRATCH", d(2024, 1, 3), 2)
        .ship("LOT-W", d(2024, 1, 8));

    let service = test_helpers::open_service(&db_path);
    let report = service.lot_report("LOT-W").unwrap().unwrap();

    assert_eq!(report.lot_code, "LOT-W");
    assert_eq!(report.production_info[0].line, "LINE-A");
    assert_eq!(report.production_info[0].date, d(2024, 1, 1));
    assert_eq!(report.quality_info.total_defects, 2);
    assert_eq!(report.quality_info.defects[0].defect_code, "SURFACE-SCRATCH");
    assert_eq!(report.quality_info.defects[0].date, d(2024, 1, 3));
    assert!(report.shipment_info.is_shipped);
    assert_eq!(report.shipment_info.days_to_ship, Some(7));
}

#[test]
fn test_lot_report_lead_time_uses_first_production_date() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.produce("LOT-M", "LINE-C", d(2024, 1, 6))
        .produce("LOT-M", "LINE-A", d(2024, 1, 5))
        .ship("LOT-M", d(2024, 1, 15));

    let service = test_helpers::open_service(&db_path);
    let report = service.lot_report("LOT-M").unwrap().unwrap();
    assert_eq!(report.production_info.len(), 2);
    assert_eq!(report.shipment_info.days_to_ship, Some(10));
}

#[test]
fn test_lot_report_without_shipment_record() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.produce("LOT-N", "LINE-B", d(2024, 1, 2));

    let service = test_helpers::open_service(&db_path);
    let report = service.lot_report("LOT-N").unwrap().unwrap();
    assert_eq!(report.shipment_info, ShipmentInfo::not_shipped());
    assert!(report.quality_info.defects.is_empty());
    assert_eq!(report.quality_info.total_defects, 0);
}

#[test]
fn test_lot_report_shipped_without_production() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.ship("LOT-S", d(2024, 1, 8));

    let service = test_helpers::open_service(&db_path);
    let report = service.lot_report("LOT-S").unwrap().unwrap();
    assert!(report.shipment_info.is_shipped);
    assert_eq!(report.shipment_info.ship_date, Some(d(2024, 1, 8)));
    assert_eq!(report.shipment_info.days_to_ship, None);
}

#[test]
fn test_lot_report_negative_lead_time_is_returned() {
    logging::init_test();
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let mut fx = Fixture::new(&conn);
    fx.produce("LOT-BAD", "LINE-A", d(2024, 1, 10))
        .ship("LOT-BAD", d(2024, 1, 7));

    let service = test_helpers::open_service(&db_path);
    let report = service.lot_report("LOT-BAD").unwrap().unwrap();
    assert_eq!(report.shipment_info.days_to_ship, Some(-3));
}

#[test]
fn test_lot_report_unknown_code() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);
    assert!(service.lot_report("LOT-1999-12-999").unwrap().is_none());
}

// ==========================================
// Validation
// ==========================================

#[test]
fn test_inverted_range_rejected_by_every_ranged_operation() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let service = test_helpers::open_service(&db_path);
    let (start, end) = (d(2024, 1, 31), d(2024, 1, 1));

    let is_invalid = |err: ReportingError| {
        matches!(err, ReportingError::InvalidDateRange { start: s, end: e } if s == start && e == end)
    };

    assert!(is_invalid(service.lines_with_most_defects(start, end).unwrap_err()));
    assert!(is_invalid(service.defect_trend_over_time(start, end).unwrap_err()));
    assert!(is_invalid(service.defects_by_type(start, end).unwrap_err()));
    assert!(is_invalid(service.production_summary(start, end).unwrap_err()));
    assert!(is_invalid(service.dashboard_overview(start, end).unwrap_err()));
}

// ==========================================
// Session lifecycle
// ==========================================

#[test]
fn test_close_twice_then_operations_fail() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let mut service = test_helpers::open_service(&db_path);

    service.close().unwrap();
    service.close().unwrap();
    assert!(!service.is_open());

    assert!(matches!(service.shipped_lots(), Err(ReportingError::SessionClosed)));
    assert!(matches!(
        service.lot_report("LOT-2024-01-001"),
        Err(ReportingError::SessionClosed)
    ));
    assert!(matches!(
        service.defects_by_type(d(2024, 1, 1), d(2024, 1, 31)),
        Err(ReportingError::SessionClosed)
    ));
}

#[test]
fn test_open_from_settings() {
    let (_tmp, db_path) = test_helpers::create_seeded_db().unwrap();
    let settings = DatabaseSettings::file(&db_path);
    let perf = PerfSettings {
        enabled: true,
        slow_sql_ms: 1_000,
    };

    let mut service = ReportingService::open_with(&settings, &perf).unwrap();
    assert!(service.is_open());
    assert_eq!(service.pending_shipments().unwrap().len(), 2);
    service.close().unwrap();
}

#[test]
fn test_open_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("ops.db");
    let settings = DatabaseSettings::file(&db_path);

    let service = ReportingService::open_with(&settings, &PerfSettings::default()).unwrap();
    assert!(db_path.parent().unwrap().exists());

    // no schema yet: queries fail, they do not panic
    assert!(matches!(
        service.shipped_lots(),
        Err(ReportingError::Repository(_))
    ));
}

#[test]
fn test_independent_sessions_see_committed_writes() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let reader = test_helpers::open_service(&db_path);
    assert!(reader.shipped_lots_summary().unwrap().is_empty());

    let writer = test_helpers::open_test_connection(&db_path).unwrap();
    Fixture::new(&writer).hold("LOT-LATE");

    assert_eq!(reader.pending_shipments().unwrap(), vec!["LOT-LATE"]);
}
