// ==========================================
// SteelWorks Operations - report commands
// ==========================================
// <command> [args...]; dates are YYYY-MM-DD.
// Date-ranged commands default to today minus 30 days through today.
// ==========================================

use crate::domain::report::{
    DashboardOverview, DefectTypeShare, LotReport, LotShipmentSummary, ProductionSummaryRow,
    TrendPoint,
};
use crate::repository::rows::{LineDefectCount, ShippedLot};
use crate::service::{ReportingError, ReportingService};
use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// Days between the default window's start and today (both ends inclusive)
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("report '{0}' has no tabular form, use JSON output")]
    NotTabular(&'static str),

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Reporting(#[from] ReportingError),
}

/// A parsed report request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lines { start: NaiveDate, end: NaiveDate },
    Trend { start: NaiveDate, end: NaiveDate },
    Types { start: NaiveDate, end: NaiveDate },
    Shipments,
    Lot { lot_code: String },
    Production { start: NaiveDate, end: NaiveDate },
    Pending,
    Shipped,
    Overview { start: NaiveDate, end: NaiveDate },
}

/// Command names with a one-line description, for usage output
pub const COMMANDS: &[(&str, &str)] = &[
    ("overview [start] [end]", "dashboard: worst lines, trend, shipment counts"),
    ("lines [start] [end]", "production lines ranked by defects"),
    ("trend [start] [end]", "daily defect totals with trend"),
    ("types [start] [end]", "defects per type with percentage"),
    ("production [start] [end]", "production events by date and line"),
    ("shipments", "shipment status and defect total per lot"),
    ("shipped", "shipped lots, most recent first"),
    ("pending", "lots awaiting shipment"),
    ("lot <lot_code>", "drill-down for one lot"),
];

impl Command {
    /// Parse against the local calendar date
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        Self::parse_at(args, chrono::Local::now().date_naive())
    }

    /// Parse with an explicit "today" for the default window
    pub fn parse_at(args: &[String], today: NaiveDate) -> Result<Self, CommandError> {
        let (name, rest) = args
            .split_first()
            .ok_or(CommandError::MissingArgument("command"))?;

        let command = match name.as_str() {
            "lines" => {
                let (start, end) = parse_window(rest, today)?;
                Command::Lines { start, end }
            }
            "trend" => {
                let (start, end) = parse_window(rest, today)?;
                Command::Trend { start, end }
            }
            "types" => {
                let (start, end) = parse_window(rest, today)?;
                Command::Types { start, end }
            }
            "production" => {
                let (start, end) = parse_window(rest, today)?;
                Command::Production { start, end }
            }
            "overview" => {
                let (start, end) = parse_window(rest, today)?;
                Command::Overview { start, end }
            }
            "lot" => match rest {
                [code] => Command::Lot {
                    lot_code: code.trim().to_string(),
                },
                [] => return Err(CommandError::MissingArgument("lot_code")),
                [_, extra, ..] => return Err(CommandError::UnexpectedArgument(extra.clone())),
            },
            "shipments" | "pending" | "shipped" => {
                if let Some(extra) = rest.first() {
                    return Err(CommandError::UnexpectedArgument(extra.clone()));
                }
                match name.as_str() {
                    "shipments" => Command::Shipments,
                    "pending" => Command::Pending,
                    _ => Command::Shipped,
                }
            }
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Lines { .. } => "lines",
            Command::Trend { .. } => "trend",
            Command::Types { .. } => "types",
            Command::Shipments => "shipments",
            Command::Lot { .. } => "lot",
            Command::Production { .. } => "production",
            Command::Pending => "pending",
            Command::Shipped => "shipped",
            Command::Overview { .. } => "overview",
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| CommandError::InvalidDate(value.to_string()))
}

/// `[start] [end]`; a missing end is today, a missing start opens the default window
///
/// start > end is passed through; the service rejects it.
fn parse_window(args: &[String], today: NaiveDate) -> Result<(NaiveDate, NaiveDate), CommandError> {
    match args {
        [] => Ok((today - Duration::days(DEFAULT_WINDOW_DAYS), today)),
        [start] => Ok((parse_date(start)?, today)),
        [start, end] => Ok((parse_date(start)?, parse_date(end)?)),
        [_, _, extra, ..] => Err(CommandError::UnexpectedArgument(extra.clone())),
    }
}

/// Result of one command, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Lines(Vec<LineDefectCount>),
    Trend(Vec<TrendPoint>),
    Types(Vec<DefectTypeShare>),
    Shipments(Vec<LotShipmentSummary>),
    Lot {
        lot_code: String,
        report: Option<LotReport>,
    },
    Production(Vec<ProductionSummaryRow>),
    Pending(Vec<String>),
    Shipped(Vec<ShippedLot>),
    Overview(DashboardOverview),
}

/// Execute a command against an open service
pub fn run(service: &ReportingService, command: &Command) -> Result<Report, CommandError> {
    tracing::debug!(command = command.name(), "running report");

    let report = match command {
        Command::Lines { start, end } => Report::Lines(service.lines_with_most_defects(*start, *end)?),
        Command::Trend { start, end } => Report::Trend(service.defect_trend_over_time(*start, *end)?),
        Command::Types { start, end } => Report::Types(service.defects_by_type(*start, *end)?),
        Command::Shipments => Report::Shipments(service.shipped_lots_summary()?),
        Command::Lot { lot_code } => Report::Lot {
            lot_code: lot_code.clone(),
            report: service.lot_report(lot_code)?,
        },
        Command::Production { start, end } => {
            Report::Production(service.production_summary(*start, *end)?)
        }
        Command::Pending => Report::Pending(service.pending_shipments()?),
        Command::Shipped => Report::Shipped(service.shipped_lots()?),
        Command::Overview { start, end } => Report::Overview(service.dashboard_overview(*start, *end)?),
    };

    Ok(report)
}
