//! Rating table: the policy constants the premium calculator applies.
//!
//! `RatingTable::default()` carries the standard rules. A table can also be
//! loaded from YAML; fields omitted from the document keep their defaults.
//!
//! ```yaml
//! base_premium: 500.00
//! experience_tiers:
//!   - { below_years: 2, factor: 1.5 }
//!   - { below_years: 5, factor: 1.2 }
//! violation_rate: 0.15
//! claim_rate: 0.10
//! accident_rate: 0.20
//! vehicle_classes:
//!   - { name: performance, types: [sports, luxury, SUV], factor: 1.5 }
//!   - { name: utility, types: [truck, van], factor: 1.2 }
//! high_risk_locations: [NY, FL, CA, MI, NJ]
//! location_factor: 1.4
//! rounding: { scale: 2, mode: half_up }
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use std::collections::BTreeSet;

use crate::errors::CoreError;

/// Largest supported rounding scale.
pub const MAX_SCALE: u32 = 10;

/// Multiplier for drivers licensed fewer than `below_years` years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceTier {
    /// Exclusive upper bound on years licensed.
    pub below_years: u32,
    /// Multiplier applied when the tier matches.
    pub factor: Decimal,
}

/// Named set of vehicle types sharing a multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleClass {
    /// Class label, reported in quote steps.
    pub name: String,
    /// Vehicle types (case-sensitive) belonging to the class.
    pub types: BTreeSet<String>,
    /// Multiplier applied to members of the class.
    pub factor: Decimal,
}

/// How the final premium is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties round away from zero.
    HalfUp,
    /// Ties round to the even neighbour.
    Bankers,
}

/// Rounding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rounding {
    /// Decimal places kept.
    pub scale: u32,
    /// Tie-breaking rule.
    pub mode: RoundingMode,
}

impl Rounding {
    /// Rounds `value` to the configured scale.
    pub fn apply(&self, value: Decimal) -> Decimal {
        let strategy = match self.mode {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Bankers => RoundingStrategy::MidpointNearestEven,
        };
        value.round_dp_with_strategy(self.scale, strategy)
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Self {
            scale: 2,
            mode: RoundingMode::HalfUp,
        }
    }
}

/// Policy constants consumed by the premium calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingTable {
    /// Starting premium before any factor.
    pub base_premium: Decimal,
    /// Experience tiers, ascending by `below_years`; first match wins.
    pub experience_tiers: Vec<ExperienceTier>,
    /// Added to the multiplier per prior violation.
    pub violation_rate: Decimal,
    /// Added to the multiplier per prior claim.
    pub claim_rate: Decimal,
    /// Added to the multiplier per recorded accident.
    pub accident_rate: Decimal,
    /// Vehicle classes; a type belongs to at most one.
    pub vehicle_classes: Vec<VehicleClass>,
    /// Jurisdictions rated as high risk.
    pub high_risk_locations: BTreeSet<String>,
    /// Multiplier for high-risk jurisdictions.
    pub location_factor: Decimal,
    /// Final rounding.
    pub rounding: Rounding,
}

impl Default for RatingTable {
    fn default() -> Self {
        Self {
            base_premium: Decimal::new(500, 0),
            experience_tiers: vec![
                ExperienceTier {
                    below_years: 2,
                    factor: Decimal::new(15, 1),
                },
                ExperienceTier {
                    below_years: 5,
                    factor: Decimal::new(12, 1),
                },
            ],
            violation_rate: Decimal::new(15, 2),
            claim_rate: Decimal::new(10, 2),
            accident_rate: Decimal::new(20, 2),
            vehicle_classes: vec![
                VehicleClass {
                    name: "performance".to_string(),
                    types: set(&["sports", "luxury", "SUV"]),
                    factor: Decimal::new(15, 1),
                },
                VehicleClass {
                    name: "utility".to_string(),
                    types: set(&["truck", "van"]),
                    factor: Decimal::new(12, 1),
                },
            ],
            high_risk_locations: set(&["NY", "FL", "CA", "MI", "NJ"]),
            location_factor: Decimal::new(14, 1),
            rounding: Rounding::default(),
        }
    }
}

impl RatingTable {
    /// Parses and validates a YAML rating table.
    pub fn from_yaml_str(text: &str) -> Result<Self, CoreError> {
        let table: RatingTable = serde_yaml::from_str(text)
            .map_err(|e| CoreError::InvalidRatingTable(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// YAML rendering of the table.
    pub fn to_yaml_string(&self) -> Result<String, CoreError> {
        serde_yaml::to_string(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Checks the invariants the calculator relies on: a positive base,
    /// positive multipliers and non-negative per-count rates keep every
    /// premium positive and monotone in the counts.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_premium <= Decimal::ZERO {
            return Err(invalid("base_premium must be positive"));
        }
        let mut previous: Option<u32> = None;
        for tier in &self.experience_tiers {
            if tier.factor <= Decimal::ZERO {
                return Err(invalid(format!(
                    "experience tier below {} years has a non-positive factor",
                    tier.below_years
                )));
            }
            if previous.is_some_and(|p| tier.below_years <= p) {
                return Err(invalid("experience tiers must be strictly ascending"));
            }
            previous = Some(tier.below_years);
        }
        for (name, rate) in [
            ("violation_rate", self.violation_rate),
            ("claim_rate", self.claim_rate),
            ("accident_rate", self.accident_rate),
        ] {
            if rate < Decimal::ZERO {
                return Err(invalid(format!("{} must not be negative", name)));
            }
        }
        let mut seen = BTreeSet::new();
        for class in &self.vehicle_classes {
            if class.factor <= Decimal::ZERO {
                return Err(invalid(format!(
                    "vehicle class {} has a non-positive factor",
                    class.name
                )));
            }
            for kind in &class.types {
                if !seen.insert(kind.as_str()) {
                    return Err(invalid(format!(
                        "vehicle type {} appears in more than one class",
                        kind
                    )));
                }
            }
        }
        if self.location_factor <= Decimal::ZERO {
            return Err(invalid("location_factor must be positive"));
        }
        if self.rounding.scale > MAX_SCALE {
            return Err(invalid(format!(
                "rounding scale {} exceeds {}",
                self.rounding.scale, MAX_SCALE
            )));
        }
        Ok(())
    }

    /// Experience multiplier for a driver, `1` when no tier matches.
    pub fn experience_factor(&self, years_licensed: u32) -> Decimal {
        self.experience_tiers
            .iter()
            .find(|tier| years_licensed < tier.below_years)
            .map(|tier| tier.factor)
            .unwrap_or(Decimal::ONE)
    }

    /// Class a vehicle type belongs to, if any.
    pub fn vehicle_class(&self, vehicle_type: &str) -> Option<&VehicleClass> {
        self.vehicle_classes
            .iter()
            .find(|class| class.types.contains(vehicle_type))
    }

    /// Whether the jurisdiction is rated high risk.
    pub fn is_high_risk(&self, location: &str) -> bool {
        self.high_risk_locations.contains(location)
    }
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn invalid(reason: impl Into<String>) -> CoreError {
    CoreError::InvalidRatingTable(reason.into())
}
