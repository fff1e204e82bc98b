//! Tabular report serialization and storage.
//!
//! Reports are semicolon-delimited UTF-8 text with CRLF line endings, the
//! layout spreadsheet imports expect:
//!
//! ```text
//! Month;Rent;Contract Installment;Monthly Total
//! 1;700.00;2000.00;2700.00
//! ...
//! 12;700.00;0.00;700.00
//!
//! Annual Total;;;10400.00
//! ```

use crate::decimal::Money;
use crate::error::{BudgetError, Result};
use crate::pricing::MonthEntry;
use crate::property::PropertyType;
use csv::{Terminator, Writer, WriterBuilder};
use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::fs::File;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Column labels of the report header.
pub const HEADER: [&str; 4] = ["Month", "Rent", "Contract Installment", "Monthly Total"];

/// Label of the footer row.
pub const ANNUAL_TOTAL_LABEL: &str = "Annual Total";

/// Writes the report for a schedule to `writer`.
///
/// The footer total is recomputed from the rounded monthly totals.
pub fn write_report<W: Write>(schedule: &[MonthEntry], writer: W) -> Result<()> {
    let mut csv_writer = report_writer(writer);

    csv_writer.write_record(HEADER)?;

    for entry in schedule {
        csv_writer.write_record([
            entry.month.to_string(),
            entry.rent.to_string(),
            entry.installment.to_string(),
            entry.total.to_string(),
        ])?;
    }

    let annual_total: Money = schedule.iter().map(|m| m.total).sum();

    // An empty record would be written as `""`, so the blank separator goes
    // straight to the underlying writer.
    let mut inner = csv_writer.into_inner().map_err(|e| e.into_error())?;
    inner.write_all(b"\r\n")?;

    let mut footer_writer = report_writer(inner);
    footer_writer.write_record([ANNUAL_TOTAL_LABEL, "", "", &annual_total.to_string()])?;

    footer_writer.flush()?;
    Ok(())
}

fn report_writer<W: Write>(writer: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b';')
        .terminator(Terminator::CRLF)
        .from_writer(writer)
}

/// Serializes a schedule into report bytes.
pub fn serialize(schedule: &[MonthEntry]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_report(schedule, &mut buf)?;
    Ok(buf)
}

/// Reduces a client name to characters safe for a file name.
///
/// Keeps alphanumerics, `.`, `_`, `-` and spaces, trims the result and turns
/// the remaining spaces into underscores.
pub fn sanitize_client_name(client_name: &str) -> String {
    client_name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Builds a fresh report name for a client and property type.
///
/// The 8-hex-digit suffix comes from a random UUID so that reports generated
/// concurrently for the same client do not collide.
pub fn report_name(client_name: &str, property_type: PropertyType) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "budget_{}_{}_{}.csv",
        sanitize_client_name(client_name),
        property_type,
        &suffix[..8]
    )
}

/// A report written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    pub name: String,
    pub path: PathBuf,
}

/// Directory-backed storage for generated reports.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    /// Opens the store at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(ReportStore { root })
    }

    /// Serializes `schedule` and writes it under a new unique name.
    ///
    /// Files are created with create-new semantics; an existing report is
    /// never overwritten.
    pub fn save(
        &self,
        client_name: &str,
        property_type: PropertyType,
        schedule: &[MonthEntry],
    ) -> Result<StoredReport> {
        let content = serialize(schedule)?;
        let name = report_name(client_name, property_type);
        let path = self.root.join(&name);

        create_report(&path, |file| Ok(file.write_all(&content)?))?;

        info!("Stored report {} ({} bytes)", name, content.len());
        Ok(StoredReport { name, path })
    }

    /// Resolves a report name to its path.
    ///
    /// Names that are not a plain file name, or point to no existing file,
    /// yield `ArtifactNotFound`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let not_found = || BudgetError::ArtifactNotFound {
            name: name.to_string(),
        };

        let is_plain_file_name = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(|c: char| c == '/' || c == '\\');
        if !is_plain_file_name {
            debug!("Rejected report name {:?}", name);
            return Err(not_found());
        }

        let path = self.root.join(name);
        if !path.is_file() {
            return Err(not_found());
        }
        Ok(path)
    }

    /// Reads a stored report by name.
    pub fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path_for(name)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BudgetError::ArtifactNotFound {
                name: name.to_string(),
            },
            _ => BudgetError::Io(e),
        })
    }
}

/// Creates `path` and fills it with `write`. A file left incomplete by a
/// failed write is removed.
fn create_report<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;

    let result = write(&mut file).and_then(|()| Ok(file.sync_all()?));
    drop(file);

    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!("Could not remove incomplete report {}: {}", path.display(), cleanup);
        }
        return Err(e);
    }
    Ok(())
}
