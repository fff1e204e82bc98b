//! Property types accepted by the pricing engine.

use crate::error::BudgetError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The kind of property being rented.
///
/// Parsing is case-insensitive and ignores surrounding whitespace; the
/// canonical form is the lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
}

impl PropertyType {
    /// Canonical lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Studio => "studio",
        }
    }

    /// Whether the room count affects pricing for this type.
    pub fn has_rooms(&self) -> bool {
        !matches!(self, PropertyType::Studio)
    }
}

impl FromStr for PropertyType {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apartment" => Ok(PropertyType::Apartment),
            "house" => Ok(PropertyType::House),
            "studio" => Ok(PropertyType::Studio),
            _ => Err(BudgetError::invalid("property_type", s)),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
