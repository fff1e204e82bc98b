//! Rent pricing engine.
//!
//! Turns a [`BudgetRequest`] into a [`BudgetSummary`] and a fixed 12-month
//! schedule. Pricing rules come from an injected [`PricingConfig`], selected
//! per property type by exhaustive match.

use crate::decimal::Money;
use crate::error::Result;
use crate::property::PropertyType;
use crate::request::BudgetRequest;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

/// Number of months in a budget schedule.
pub const MONTHS: usize = 12;

/// How parking spots are charged for a property type.
#[derive(Debug, Clone, PartialEq)]
pub enum ParkingRate {
    /// Linear price per spot, no cap.
    PerSpot(Decimal),

    /// The first `included` spots cost a flat `bundle` price together,
    /// each spot beyond that costs `extra`.
    Bundled {
        included: i32,
        bundle: Decimal,
        extra: Decimal,
    },
}

impl ParkingRate {
    /// Surcharge for the given number of spots. Zero or negative counts cost nothing.
    pub fn surcharge(&self, spots: i32) -> Decimal {
        if spots <= 0 {
            return Decimal::ZERO;
        }

        match self {
            ParkingRate::PerSpot(price) => *price * Decimal::from(spots),
            ParkingRate::Bundled {
                included,
                bundle,
                extra,
            } => {
                if spots <= *included {
                    *bundle
                } else {
                    *bundle + *extra * Decimal::from(spots - included)
                }
            }
        }
    }
}

/// Pricing rules for a single property type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPricing {
    /// Monthly rent before surcharges and discounts.
    pub base_rent: Decimal,

    /// Price of each room beyond the first. `None` means rooms are not priced.
    pub room_step: Option<Decimal>,

    /// Parking charge rule.
    pub parking: ParkingRate,

    /// Discount rate applied when the tenant has no children.
    pub childless_discount: Option<Decimal>,
}

impl PropertyPricing {
    /// Room surcharge: `room_step × (rooms − 1)` from the second room on.
    pub fn room_surcharge(&self, rooms: i32) -> Decimal {
        match self.room_step {
            Some(step) if rooms >= 2 => step * Decimal::from(rooms - 1),
            _ => Decimal::ZERO,
        }
    }
}

/// Immutable pricing table injected into the engine.
///
/// `PricingConfig::default()` carries the reference prices.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub apartment: PropertyPricing,
    pub house: PropertyPricing,
    pub studio: PropertyPricing,

    /// One-time contract fee spread over the installments.
    pub contract_total: Decimal,

    /// Upper bound for the installment count; the lower bound is always 1.
    pub max_installments: i32,
}

impl PricingConfig {
    /// Rules for the given property type.
    pub fn pricing_for(&self, property_type: PropertyType) -> &PropertyPricing {
        match property_type {
            PropertyType::Apartment => &self.apartment,
            PropertyType::House => &self.house,
            PropertyType::Studio => &self.studio,
        }
    }

    /// Forces a requested installment count into `1..=max_installments`.
    pub fn clamp_installments(&self, requested: i32) -> u32 {
        requested.min(self.max_installments).max(1) as u32
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            apartment: PropertyPricing {
                base_rent: Decimal::from(700),
                room_step: Some(Decimal::from(200)),
                parking: ParkingRate::PerSpot(Decimal::from(300)),
                childless_discount: Some(Decimal::new(5, 2)),
            },
            house: PropertyPricing {
                base_rent: Decimal::from(900),
                room_step: Some(Decimal::from(250)),
                parking: ParkingRate::PerSpot(Decimal::from(300)),
                childless_discount: None,
            },
            studio: PropertyPricing {
                base_rent: Decimal::from(1200),
                room_step: None,
                parking: ParkingRate::Bundled {
                    included: 2,
                    bundle: Decimal::from(250),
                    extra: Decimal::from(60),
                },
                childless_discount: None,
            },
            contract_total: Decimal::from(2000),
            max_installments: 5,
        }
    }
}

/// One month of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthEntry {
    /// Month number, 1 to 12.
    pub month: u8,
    pub rent: Money,
    /// Contract fee installment, zero after the last installment month.
    pub installment: Money,
    pub total: Money,
}

/// Aggregate figures for a computed budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    pub property_type: PropertyType,
    /// Absent for studios, where rooms are not priced.
    pub rooms: Option<i32>,
    pub parking: i32,
    pub has_children: bool,
    /// Monthly rent after discount.
    pub base_rent: Money,
    pub discount: Money,
    pub contract_total: Money,
    /// Installment count actually used, after clamping.
    pub installments: u32,
    pub installment_amount: Money,
    /// Sum of the 12 monthly totals.
    pub annual_total: Money,
}

/// A computed budget: summary plus the 12-month schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    pub summary: BudgetSummary,
    pub schedule: [MonthEntry; MONTHS],
}

/// The rent pricing engine.
///
/// Holds only its immutable configuration, so one engine can serve any
/// number of concurrent callers by shared reference.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Creates an engine using the given pricing table.
    pub fn new(config: PricingConfig) -> Self {
        PricingEngine { config }
    }

    /// Validates raw fields and computes the budget.
    ///
    /// Fails with `InvalidInput` only when the property type is unknown.
    pub fn compute_budget(
        &self,
        property_type: &str,
        rooms: i32,
        parking: i32,
        has_children: bool,
        installments: i32,
    ) -> Result<Budget> {
        let property_type = property_type.parse::<PropertyType>()?;
        let request = BudgetRequest::new(property_type, rooms, parking, has_children, installments);
        Ok(self.compute(&request))
    }

    /// Computes the budget for a typed request.
    pub fn compute(&self, request: &BudgetRequest) -> Budget {
        let pricing = self.config.pricing_for(request.property_type);

        let gross = pricing.base_rent
            + pricing.room_surcharge(request.rooms)
            + pricing.parking.surcharge(request.parking);

        // Two roundings: the discount itself, then the rent after subtracting it.
        let (rent, discount) = match pricing.childless_discount {
            Some(rate) if !request.has_children => {
                let discount = Money::new(rate * gross);
                (Money::new(gross - discount.as_decimal()), discount)
            }
            _ => (Money::new(gross), Money::ZERO),
        };

        let installments = self.config.clamp_installments(request.installments);
        let installment_amount =
            Money::new(self.config.contract_total / Decimal::from(installments));

        let schedule: [MonthEntry; MONTHS] = std::array::from_fn(|idx| {
            let month = idx as u8 + 1;
            let installment = if u32::from(month) <= installments {
                installment_amount
            } else {
                Money::ZERO
            };
            MonthEntry {
                month,
                rent,
                installment,
                total: rent + installment,
            }
        });

        let annual_total: Money = schedule.iter().map(|m| m.total).sum();

        debug!(
            "Computed {} budget: rent {}, discount {}, {} x {}, annual {}",
            request.property_type, rent, discount, installments, installment_amount, annual_total
        );

        let summary = BudgetSummary {
            property_type: request.property_type,
            rooms: request.property_type.has_rooms().then_some(request.rooms),
            parking: request.parking,
            has_children: request.has_children,
            base_rent: rent,
            discount,
            contract_total: Money::new(self.config.contract_total),
            installments,
            installment_amount,
            annual_total,
        };

        Budget { summary, schedule }
    }
}
