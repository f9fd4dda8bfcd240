// ==========================================
// SteelWorks Operations - report runner
// ==========================================
// steelworks-ops <command> [args...] [--csv | --json]
// Report on stdout, logs on stderr.
// ==========================================

use steelworks_ops::app::commands::COMMANDS;
use steelworks_ops::app::{self, Command, OutputFormat};
use steelworks_ops::config::{load_dotenv, DatabaseSettings};
use steelworks_ops::{logging, ReportingService};

fn print_usage() {
    eprintln!("{} {}", steelworks_ops::APP_NAME, steelworks_ops::VERSION);
    eprintln!();
    eprintln!("usage: steelworks-ops <command> [args...] [--csv | --json]");
    eprintln!("dates are YYYY-MM-DD; ranges default to today minus 30 days through today");
    eprintln!();
    for (usage, about) in COMMANDS {
        eprintln!("  {:<26} {}", usage, about);
    }
}

fn main() -> anyhow::Result<()> {
    load_dotenv()?;
    logging::init();

    let (args, format) = OutputFormat::take_from(std::env::args().skip(1).collect());
    if args.is_empty() || matches!(args[0].as_str(), "-h" | "--help" | "help") {
        print_usage();
        return Ok(());
    }

    let command = Command::parse(&args)?;
    let settings = DatabaseSettings::from_env()?;
    tracing::debug!(store = %settings.describe(), command = command.name(), "starting");

    let mut service = ReportingService::open(&settings)?;
    let report = app::run(&service, &command)?;
    println!("{}", app::render(&report, format)?);

    service.close()?;
    Ok(())
}
