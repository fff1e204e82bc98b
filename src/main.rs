//! Rent Budget CLI
//!
//! Prices a batch of rental budget requests, stores one report per request
//! and prints a summary; or prints a previously stored report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- quote requests.csv [report-dir] > summary.csv
//! cargo run -- fetch budget_Ana_house_1a2b3c4d.csv [report-dir] > report.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `RENT_BUDGET_REPORT_DIR`: Report directory when none is given (default `reports`)

use rent_budget::{write_summary, BudgetError, PricingEngine, Quoter, ReportStore, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

const DEFAULT_REPORT_DIR: &str = "reports";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(BudgetError::MissingArgument);
    }

    let command: fn(&str, &ReportStore) -> Result<()> = match args[1].as_str() {
        "quote" => quote,
        "fetch" => fetch,
        _ => return Err(BudgetError::MissingArgument),
    };

    let store = ReportStore::open(report_dir(args.get(3)))?;
    command(&args[2], &store)
}

fn report_dir(arg: Option<&String>) -> PathBuf {
    arg.cloned()
        .or_else(|| env::var("RENT_BUDGET_REPORT_DIR").ok())
        .unwrap_or_else(|| DEFAULT_REPORT_DIR.to_string())
        .into()
}

fn quote(input_path: &str, store: &ReportStore) -> Result<()> {
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let engine = PricingEngine::default();
    let rows = Quoter::new(&engine, store).process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    write_summary(&rows, handle)?;

    Ok(())
}

fn fetch(name: &str, store: &ReportStore) -> Result<()> {
    let content = store.load(name)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(&content)?;
    handle.flush()?;

    Ok(())
}
