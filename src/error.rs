//! Error types for budget computation and report storage.

use thiserror::Error;

/// Result type alias for budget operations
pub type Result<T> = std::result::Result<T, BudgetError>;

/// Errors that can occur while computing, storing or fetching a budget.
#[derive(Error, Debug)]
pub enum BudgetError {
    /// An input field could not be interpreted
    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    /// No stored report exists under the requested name
    #[error("Report not found: {name}")]
    ArtifactNotFound { name: String },

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing command-line argument
    #[error(
        "Missing argument. Usage: rent-budget quote <requests.csv> [report-dir] | rent-budget fetch <report-name> [report-dir]"
    )]
    MissingArgument,
}

impl BudgetError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        BudgetError::InvalidInput {
            field,
            value: value.into(),
        }
    }
}
