//! Budget request models for CSV parsing and internal representation.

use crate::error::{BudgetError, Result};
use crate::property::PropertyType;
use serde::Deserialize;

/// Client name used when the input leaves it blank.
pub const DEFAULT_CLIENT_NAME: &str = "Client";

/// Raw budget request as read from CSV.
///
/// Every field is optional; blank or missing fields fall back to the
/// defaults applied by [`BudgetForm::into_request`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BudgetForm {
    /// Free-text client name, used only for report naming
    pub client_name: Option<String>,

    /// apartment, house or studio (any case)
    pub property_type: Option<String>,

    /// Number of rooms
    pub rooms: Option<String>,

    /// Number of parking spots
    pub parking: Option<String>,

    /// yes/no style flag
    pub has_children: Option<String>,

    /// Number of contract fee installments
    pub installments: Option<String>,
}

impl BudgetForm {
    /// Applies defaults and parses the raw fields into a typed request.
    ///
    /// Returns the trimmed client name alongside the request. Fails with
    /// `InvalidInput` on an unknown property type or a non-integer count.
    pub fn into_request(self) -> Result<(String, BudgetRequest)> {
        let client_name = non_blank(&self.client_name)
            .unwrap_or(DEFAULT_CLIENT_NAME)
            .to_string();

        let property_type = non_blank(&self.property_type)
            .unwrap_or("apartment")
            .parse::<PropertyType>()?;

        let request = BudgetRequest {
            property_type,
            rooms: parse_count("rooms", &self.rooms, 1)?,
            parking: parse_count("parking", &self.parking, 0)?,
            has_children: non_blank(&self.has_children).map_or(true, parse_flag),
            installments: parse_count("installments", &self.installments, 1)?,
        };

        Ok((client_name, request))
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_count(field: &'static str, raw: &Option<String>, default: i32) -> Result<i32> {
    match non_blank(raw) {
        Some(s) => s.parse().map_err(|_| BudgetError::invalid(field, s)),
        None => Ok(default),
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(
        s.to_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "sim"
    )
}

/// A typed budget request ready for pricing.
///
/// Counts are kept as given: negative rooms or parking spots are not rejected
/// and simply earn no surcharge. Installments are clamped by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetRequest {
    pub property_type: PropertyType,
    pub rooms: i32,
    pub parking: i32,
    pub has_children: bool,
    pub installments: i32,
}

impl BudgetRequest {
    pub fn new(
        property_type: PropertyType,
        rooms: i32,
        parking: i32,
        has_children: bool,
        installments: i32,
    ) -> Self {
        BudgetRequest {
            property_type,
            rooms,
            parking,
            has_children,
            installments,
        }
    }
}
