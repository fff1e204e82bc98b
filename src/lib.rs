//! # Rent Budget
//!
//! Computes a tenant's monthly rental budget: base rent with room and parking
//! surcharges, an optional discount, and a one-time contract fee spread over
//! up to five installments. The result is a summary plus a 12-month schedule
//! that can be exported as a semicolon-delimited report.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Currency is held at 2 decimal places via `rust_decimal`
//! - **Injected pricing**: All prices live in a [`PricingConfig`] handed to the engine
//! - **Permissive input**: Out-of-range installment counts are clamped, not rejected
//! - **Deterministic output**: Identical schedules always serialize to identical bytes
//!
//! ## Example
//!
//! ```
//! use rent_budget::{report, PricingEngine};
//!
//! let engine = PricingEngine::default();
//! let budget = engine.compute_budget("apartment", 3, 1, false, 1).unwrap();
//! assert_eq!(budget.summary.base_rent.to_string(), "1330.00");
//!
//! let bytes = report::serialize(&budget.schedule).unwrap();
//! assert!(bytes.starts_with(b"Month;Rent;Contract Installment;Monthly Total\r\n"));
//! ```

pub mod decimal;
pub mod error;
pub mod pricing;
pub mod property;
pub mod quote;
pub mod report;
pub mod request;

pub use decimal::Money;
pub use error::{BudgetError, Result};
pub use pricing::{
    Budget, BudgetSummary, MonthEntry, ParkingRate, PricingConfig, PricingEngine, PropertyPricing,
    MONTHS,
};
pub use property::PropertyType;
pub use quote::{write_summary, QuoteRow, Quoter};
pub use report::{ReportStore, StoredReport};
pub use request::{BudgetForm, BudgetRequest};
