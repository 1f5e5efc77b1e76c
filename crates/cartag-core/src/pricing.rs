//! Premium calculator.
//!
//! The premium starts at the table's base and is multiplied, in a fixed
//! order, by one factor per risk dimension:
//!
//! 1. experience (years licensed)
//! 2. prior violations
//! 3. prior claims
//! 4. recorded accidents
//! 5. vehicle class
//! 6. high-risk jurisdiction
//!
//! The product is rounded once, at the end. Arithmetic is exact decimal;
//! a product beyond the decimal range saturates at [`Decimal::MAX`] instead
//! of failing.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::CoreError;
use crate::rating::RatingTable;
use crate::record::Record;

/// One applied factor in a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Risk dimension (`base`, `experience`, `violations`, ...).
    pub kind: String,
    /// What matched, e.g. the tier or class name.
    pub name: String,
    /// Multiplier applied at this step.
    pub factor: Decimal,
    /// Running premium before the step.
    pub before: Decimal,
    /// Running premium after the step.
    pub after: Decimal,
}

/// Premium plus the audit trail that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// NFT token of the priced record.
    pub token: String,
    /// Final, rounded premium.
    pub premium: Decimal,
    /// Steps in evaluation order.
    pub steps: Vec<Step>,
}

/// Deterministic premium calculator over a validated rating table.
#[derive(Debug, Clone, Default)]
pub struct PremiumCalculator {
    table: RatingTable,
}

impl PremiumCalculator {
    /// Creates a calculator, validating the table first.
    pub fn new(table: RatingTable) -> Result<Self, CoreError> {
        table.validate()?;
        Ok(Self { table })
    }

    /// Rating table in use.
    pub fn table(&self) -> &RatingTable {
        &self.table
    }

    /// Premium for a record.
    pub fn price(&self, record: &Record) -> Decimal {
        self.quote(record).premium
    }

    /// Premium for a record with every applied step.
    pub fn quote(&self, record: &Record) -> Quote {
        let table = &self.table;
        let history = record.history();
        let mut trail = Trail::new(table.base_premium);

        let years = record.years_licensed();
        trail.apply(
            "experience",
            format!("{} years licensed", years),
            table.experience_factor(years),
        );
        trail.apply(
            "violations",
            format!("{} violations", record.violations()),
            per_count(table.violation_rate, record.violations()),
        );
        trail.apply(
            "claims",
            format!("{} claims", record.claims()),
            per_count(table.claim_rate, record.claims()),
        );
        trail.apply(
            "accidents",
            format!("{} accidents", history.accident_count()),
            per_count(table.accident_rate, history.accident_count()),
        );

        let vehicle_type = history.vehicle_type();
        match table.vehicle_class(vehicle_type) {
            Some(class) => trail.apply(
                "vehicle_type",
                format!("{} ({})", vehicle_type, class.name),
                class.factor,
            ),
            None => trail.apply("vehicle_type", vehicle_type.to_string(), Decimal::ONE),
        }

        let location = record.location();
        let location_factor = if table.is_high_risk(location) {
            table.location_factor
        } else {
            Decimal::ONE
        };
        trail.apply("location", location.to_string(), location_factor);

        let unrounded = trail.current;
        let premium = table.rounding.apply(unrounded);
        trail.steps.push(Step {
            kind: "rounding".to_string(),
            name: format!("{:?} to {} places", table.rounding.mode, table.rounding.scale),
            factor: Decimal::ONE,
            before: unrounded,
            after: premium,
        });

        Quote {
            token: record.token().to_string(),
            premium,
            steps: trail.steps,
        }
    }
}

/// Premium for a record under the standard rating table.
pub fn price(record: &Record) -> Decimal {
    PremiumCalculator::default().price(record)
}

struct Trail {
    current: Decimal,
    steps: Vec<Step>,
}

impl Trail {
    fn new(base: Decimal) -> Self {
        Self {
            current: base,
            steps: vec![Step {
                kind: "base".to_string(),
                name: "base premium".to_string(),
                factor: Decimal::ONE,
                before: base,
                after: base,
            }],
        }
    }

    fn apply(&mut self, kind: &str, name: String, factor: Decimal) {
        let before = self.current;
        self.current = before.checked_mul(factor).unwrap_or(Decimal::MAX);
        self.steps.push(Step {
            kind: kind.to_string(),
            name,
            factor,
            before,
            after: self.current,
        });
    }
}

/// `1 + rate * count`, saturating.
fn per_count(rate: Decimal, count: u32) -> Decimal {
    rate.checked_mul(Decimal::from(count))
        .and_then(|extra| Decimal::ONE.checked_add(extra))
        .unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{Rounding, RoundingMode};

    fn driver(years: u32, violations: u32, claims: u32, accidents: u32) -> Record {
        Record::builder("NFT-TEST")
            .location("OR")
            .years_licensed(years)
            .violations(violations)
            .claims(claims)
            .accident_count(accidents)
            .build()
            .unwrap()
    }

    #[test]
    fn scenario_sedan_in_california() {
        let record = driver(2, 1, 0, 1)
            .to_builder()
            .vehicle_type("sedan")
            .location("CA")
            .build()
            .unwrap();
        // 500 x 1.2 x 1.15 x 1.0 x 1.2 x 1.0 x 1.4
        assert_eq!(price(&record), Decimal::new(115920, 2));
    }

    #[test]
    fn scenario_suv_in_new_york() {
        let record = driver(5, 0, 0, 0)
            .to_builder()
            .vehicle_type("SUV")
            .location("NY")
            .build()
            .unwrap();
        assert_eq!(price(&record), Decimal::new(105000, 2));
    }

    #[test]
    fn clean_experienced_driver_pays_base() {
        assert_eq!(price(&driver(10, 0, 0, 0)), Decimal::new(500, 0));
    }

    #[test]
    fn novice_with_truck() {
        let record = driver(0, 0, 0, 0)
            .to_builder()
            .vehicle_type("truck")
            .build()
            .unwrap();
        // 500 x 1.5 x 1.2
        assert_eq!(price(&record), Decimal::new(900, 0));
    }

    #[test]
    fn missing_history_uses_defaults() {
        let record = Record::builder("NFT-BARE")
            .years_licensed(7)
            .location("FL")
            .build()
            .unwrap();
        assert_eq!(price(&record), Decimal::new(700, 0));
    }

    #[test]
    fn counts_never_lower_the_premium() {
        let calc = PremiumCalculator::default();
        let mut previous = Decimal::ZERO;
        for n in 0..25 {
            let p = calc.price(&driver(3, n, 0, 0));
            assert!(p >= previous);
            previous = p;
        }
        for n in 0..25 {
            assert!(calc.price(&driver(3, 2, n + 1, 1)) >= calc.price(&driver(3, 2, n, 1)));
            assert!(calc.price(&driver(3, 2, 1, n + 1)) >= calc.price(&driver(3, 2, 1, n)));
        }
    }

    #[test]
    fn extreme_counts_saturate_instead_of_failing() {
        let p = price(&driver(0, u32::MAX, u32::MAX, u32::MAX));
        assert!(p > Decimal::ZERO);
    }

    #[test]
    fn quote_steps_chain() {
        let record = driver(1, 2, 1, 0)
            .to_builder()
            .vehicle_type("luxury")
            .location("NJ")
            .build()
            .unwrap();
        let quote = PremiumCalculator::default().quote(&record);
        let kinds: Vec<&str> = quote.steps.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(
            kinds,
            [
                "base",
                "experience",
                "violations",
                "claims",
                "accidents",
                "vehicle_type",
                "location",
                "rounding"
            ]
        );
        for pair in quote.steps.windows(2) {
            assert_eq!(pair[0].after, pair[1].before);
        }
        assert_eq!(quote.steps.last().unwrap().after, quote.premium);
        assert_eq!(quote.token, "NFT-TEST");
        // 500 x 1.5 x 1.3 x 1.1 x 1 x 1.5 x 1.4
        assert_eq!(quote.premium, Decimal::new(225225, 2));
    }

    #[test]
    fn custom_table_changes_rounding() {
        let table = RatingTable {
            base_premium: Decimal::new(100005, 4),
            experience_tiers: vec![],
            rounding: Rounding {
                scale: 3,
                mode: RoundingMode::Bankers,
            },
            ..RatingTable::default()
        };
        let calc = PremiumCalculator::new(table).unwrap();
        // 10.0005 -> 10.000 under half-even
        assert_eq!(calc.price(&driver(1, 0, 0, 0)), Decimal::new(10000, 3));
    }

    #[test]
    fn invalid_table_is_refused() {
        let table = RatingTable {
            base_premium: Decimal::ZERO,
            ..RatingTable::default()
        };
        assert!(matches!(
            PremiumCalculator::new(table),
            Err(CoreError::InvalidRatingTable(_))
        ));
    }
}
