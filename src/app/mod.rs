// ==========================================
// SteelWorks Operations - presentation layer
// ==========================================
// Maps command-line requests onto ReportingService operations and
// renders the payloads. Owns no business logic.
// ==========================================

pub mod commands;
pub mod output;

pub use commands::{run, Command, CommandError, Report};
pub use output::{render, OutputFormat};
