use crate::config::ReportConfig;
use crate::db::connection::{init_db, Database};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod db;
mod domain;
mod errors;
mod metrics;
mod report;
mod stats;
mod templates;
mod valuation;

#[cfg(test)]
mod tests;

/// Renders the Halifax listings report from a scraped database.
#[derive(Parser)]
struct Args {
    /// SQLite database populated by the scraper.
    #[arg(long, default_value = "listings.sqlite3")]
    db: PathBuf,

    /// Where the rendered page goes.
    #[arg(long, default_value = "report.html")]
    out: PathBuf,

    /// Optional TOML config (palette, regions, thresholds).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ReportConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return ExitCode::FAILURE;
            }
        },
        None => ReportConfig::default(),
    };

    let db = Database::new(args.db.to_string_lossy().into_owned());
    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("❌ Database initialization failed: {e}");
        return ExitCode::FAILURE;
    }

    println!("Generating report from {}", args.db.display());
    let html = match report::generate(&db, &config, Utc::now().naive_utc()) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("❌ Report generation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&args.out, html).map_err(errors::ReportError::from) {
        eprintln!("❌ Failed to write {}: {e}", args.out.display());
        return ExitCode::FAILURE;
    }

    println!("✅ Report written to {}", args.out.display());
    ExitCode::SUCCESS
}
