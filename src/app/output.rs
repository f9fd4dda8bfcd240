// ==========================================
// SteelWorks Operations - report rendering
// ==========================================
// JSON: any report, pretty printed.
// CSV: list reports only, one row per record with a header line.
// ==========================================

use crate::app::commands::{CommandError, Report};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Pull `--csv` / `--json` out of the argument list
    pub fn take_from(args: Vec<String>) -> (Vec<String>, Self) {
        let mut format = OutputFormat::default();
        let rest = args
            .into_iter()
            .filter(|a| match a.as_str() {
                "--csv" => {
                    format = OutputFormat::Csv;
                    false
                }
                "--json" => {
                    format = OutputFormat::Json;
                    false
                }
                _ => true,
            })
            .collect();
        (rest, format)
    }
}

#[derive(Serialize)]
struct PendingRow<'a> {
    lot_code: &'a str,
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String, CommandError> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Csv => render_csv(report),
    }
}

fn render_json(report: &Report) -> Result<String, CommandError> {
    let text = match report {
        Report::Lines(rows) => to_json(rows),
        Report::Trend(rows) => to_json(rows),
        Report::Types(rows) => to_json(rows),
        Report::Shipments(rows) => to_json(rows),
        Report::Lot { lot_code, report } => match report {
            Some(r) => to_json(r),
            None => to_json(&serde_json::json!({ "lot_code": lot_code, "found": false })),
        },
        Report::Production(rows) => to_json(rows),
        Report::Pending(codes) => to_json(codes),
        Report::Shipped(rows) => to_json(rows),
        Report::Overview(overview) => to_json(overview),
    }?;
    Ok(text)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CommandError> {
    serde_json::to_string_pretty(value).map_err(|e| CommandError::Render(e.to_string()))
}

fn render_csv(report: &Report) -> Result<String, CommandError> {
    match report {
        Report::Lines(rows) => to_csv(rows),
        Report::Trend(rows) => to_csv(rows),
        Report::Types(rows) => to_csv(rows),
        Report::Shipments(rows) => to_csv(rows),
        Report::Production(rows) => to_csv(rows),
        Report::Shipped(rows) => to_csv(rows),
        Report::Pending(codes) => {
            let rows: Vec<PendingRow<'_>> = codes.iter().map(|c| PendingRow { lot_code: c }).collect();
            to_csv(&rows)
        }
        Report::Lot { .. } => Err(CommandError::NotTabular("lot")),
        Report::Overview(_) => Err(CommandError::NotTabular("overview")),
    }
}

fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, CommandError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| CommandError::Render(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CommandError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CommandError::Render(e.to_string()))
}
