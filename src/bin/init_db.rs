// ==========================================
// SteelWorks Operations - store initialisation
// ==========================================
// init_db [db_path] [--seed] [--reset]
//   db_path  overrides DATABASE_URL / DB_DIR / DB_NAME
//   --seed   load scripts/seed.sql after the schema
//   --reset  back up and remove an existing database file first
// ==========================================

use anyhow::Context;
use chrono::Local;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

use steelworks_ops::config::{load_dotenv, DatabaseSettings, StoreLocation};
use steelworks_ops::{db, logging};

const TABLES: &[&str] = &[
    "schema_version",
    "lots",
    "production_lines",
    "defect_types",
    "production_records",
    "inspection_records",
    "shipment_records",
];

fn main() -> anyhow::Result<()> {
    load_dotenv()?;
    logging::init();

    let mut seed = false;
    let mut reset = false;
    let mut path_arg: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--seed" => seed = true,
            "--reset" => reset = true,
            other if other.starts_with("--") => anyhow::bail!("unknown flag: {}", other),
            other => path_arg = Some(other.to_string()),
        }
    }

    let settings = match path_arg {
        Some(path) => DatabaseSettings::file(path),
        None => DatabaseSettings::from_env()?,
    };

    let path = match &settings.location {
        StoreLocation::File(path) => path.clone(),
        StoreLocation::Memory => anyhow::bail!("an in-memory store cannot be initialised, set DB_DIR or DATABASE_URL"),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    if reset {
        backup_and_remove(&path)?;
    }

    let conn = db::open_sqlite_connection(&path, settings.busy_timeout_ms)
        .with_context(|| format!("opening {}", path.display()))?;

    db::apply_schema(&conn).context("applying schema")?;
    tracing::info!(store = %settings.describe(), "schema applied");

    if seed {
        db::apply_seed(&conn).context("loading seed data")?;
        tracing::info!("seed data loaded");
    }

    print_counts(&conn)?;
    Ok(())
}

fn backup_and_remove(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup = format!("{}.bak.{}", path.display(), ts);
    fs::copy(path, &backup).with_context(|| format!("backing up {}", path.display()))?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", path.display(), backup);
    Ok(())
}

fn print_counts(conn: &Connection) -> anyhow::Result<()> {
    eprintln!("Row counts:");
    for t in TABLES {
        let sql = format!("SELECT COUNT(*) FROM {}", t);
        let c: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        eprintln!("  {:<20} {}", t, c);
    }
    Ok(())
}
