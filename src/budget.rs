//! Fixed-percentage budget allocation.

use crate::{
    error::{PlannerError, Result},
    types::{request::check_duration, BudgetBreakdown, BudgetCategory, BudgetLevel, TravelStyle},
};
use std::collections::BTreeMap;

const LUXURY_THRESHOLD: f64 = 200.0;
const COMFORT_THRESHOLD: f64 = 120.0;

/// (destination, base daily cost, destination multiplier)
const DESTINATION_RATES: &[(&str, f64, f64)] = &[
    ("paris", 150.0, 1.3),
    ("tokyo", 180.0, 1.5),
    ("bali", 80.0, 0.8),
    ("islamabad", 60.0, 1.1),
    ("karachi", 50.0, 1.0),
    ("lahore", 45.0, 0.9),
    ("hunza", 40.0, 0.8),
    ("swat", 35.0, 0.7),
];

const DEFAULT_RATE: (f64, f64) = (120.0, 1.0);

pub fn style_multiplier(style: TravelStyle) -> f64 {
    match style {
        TravelStyle::Luxury => 1.8,
        TravelStyle::Comfort => 1.2,
        TravelStyle::Cultural => 1.0,
        TravelStyle::Adventure => 0.9,
        TravelStyle::Relaxation => 1.3,
        TravelStyle::Budget => 0.6,
        TravelStyle::Mixed => 1.0,
    }
}

fn destination_rate(destination: &str) -> (f64, f64) {
    let wanted = destination.trim();
    DESTINATION_RATES
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(wanted))
        .map(|(_, base, multiplier)| (*base, *multiplier))
        .unwrap_or(DEFAULT_RATE)
}

/// Expected per-person daily spend for a destination and style.
pub fn reference_daily_cost(destination: &str, style: TravelStyle) -> f64 {
    let (base, multiplier) = destination_rate(destination);
    base * style_multiplier(style) * multiplier
}

pub fn budget_level(reference_daily_cost: f64) -> BudgetLevel {
    if reference_daily_cost > LUXURY_THRESHOLD {
        BudgetLevel::Luxury
    } else if reference_daily_cost > COMFORT_THRESHOLD {
        BudgetLevel::Comfort
    } else {
        BudgetLevel::Budget
    }
}

/// Round to cents, ties to even.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Split `total_budget` across the fixed categories.
///
/// Each amount is rounded on its own, so the categories may not add up to the
/// total to the cent. The reference daily cost only classifies the budget tier.
pub fn allocate(
    destination: &str,
    duration: u32,
    total_budget: f64,
    style: TravelStyle,
    traveler_count: u32,
) -> Result<BudgetBreakdown> {
    check_duration(duration)?;
    if traveler_count == 0 {
        return Err(PlannerError::InvalidArgument(
            "traveler count must be at least 1".to_string(),
        ));
    }
    if !total_budget.is_finite() || total_budget <= 0.0 {
        return Err(PlannerError::InvalidArgument(format!(
            "total budget must be a positive amount, got {}",
            total_budget
        )));
    }
    if !(total_budget * 100.0).is_finite() {
        return Err(PlannerError::InvalidArgument(format!(
            "total budget {} is too large to split into cents",
            total_budget
        )));
    }

    let days = f64::from(duration);
    let categories: BTreeMap<BudgetCategory, f64> = BudgetCategory::ALL
        .into_iter()
        .map(|category| (category, round2(total_budget * category.share())))
        .collect();
    let daily_breakdown = categories
        .iter()
        .map(|(category, amount)| (*category, round2(amount / days)))
        .collect();

    let reference = reference_daily_cost(destination, style);

    Ok(BudgetBreakdown {
        destination: destination.to_string(),
        total_budget,
        trip_duration: duration,
        traveler_count,
        categories,
        daily_breakdown,
        budget_per_day: round2(total_budget / days),
        budget_per_person: round2(total_budget / f64::from(traveler_count)),
        reference_daily_cost: reference,
        budget_level: budget_level(reference),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.06 + 1e-9;

    #[test]
    fn test_paris_cultural_split() {
        let budget = allocate("Paris", 3, 1500.0, TravelStyle::Cultural, 2).unwrap();

        assert_eq!(budget.total_budget, 1500.0);
        assert_eq!(budget.amount(BudgetCategory::Accommodation), 525.0);
        assert_eq!(budget.amount(BudgetCategory::FoodDining), 375.0);
        assert_eq!(budget.amount(BudgetCategory::EmergencyMisc), 45.0);
        assert_eq!(budget.daily_amount(BudgetCategory::Accommodation), 175.0);
        assert_eq!(budget.budget_per_day, 500.0);
        assert_eq!(budget.budget_per_person, 750.0);
        assert!((budget.reference_daily_cost - 195.0).abs() < 1e-9);
        assert_eq!(budget.budget_level, BudgetLevel::Comfort);
    }

    #[test]
    fn test_amounts_sum_to_total_within_rounding() {
        let budgets = [0.01, 1.0, 99.99, 333.33, 1234.57, 1500.0, 98765.43];
        let durations = [1, 2, 3, 7, 11, 30];

        for &total in &budgets {
            for &days in &durations {
                let budget = allocate("tokyo", days, total, TravelStyle::Mixed, 3).unwrap();
                assert!(
                    (budget.allocated_total() - total).abs() <= TOLERANCE,
                    "total {} over {} days drifted to {}",
                    total,
                    days,
                    budget.allocated_total()
                );

                for category in BudgetCategory::ALL {
                    let rebuilt = budget.daily_amount(category) * f64::from(days);
                    assert!(
                        (rebuilt - budget.amount(category)).abs() <= TOLERANCE * f64::from(days),
                        "{:?} per-day drift for {} over {} days",
                        category,
                        total,
                        days
                    );
                }
            }
        }
    }

    #[test]
    fn test_budget_levels() {
        let tokyo_luxury = allocate("tokyo", 2, 5000.0, TravelStyle::Luxury, 1).unwrap();
        assert_eq!(tokyo_luxury.budget_level, BudgetLevel::Luxury);

        let swat_budget = allocate("swat", 2, 200.0, TravelStyle::Budget, 1).unwrap();
        assert_eq!(swat_budget.budget_level, BudgetLevel::Budget);

        assert_eq!(
            reference_daily_cost("Atlantis", TravelStyle::Mixed),
            120.0
        );
        assert_eq!(budget_level(120.0), BudgetLevel::Budget);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            allocate("paris", 0, 1500.0, TravelStyle::Mixed, 1),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(matches!(
            allocate("paris", 3, 1500.0, TravelStyle::Mixed, 0),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(matches!(
            allocate("paris", 3, -1.0, TravelStyle::Mixed, 1),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(allocate("paris", 3, f64::NAN, TravelStyle::Mixed, 1).is_err());
        assert!(matches!(
            allocate("paris", 366, 1500.0, TravelStyle::Mixed, 1),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(matches!(
            allocate("paris", 3, 1e307, TravelStyle::Mixed, 1),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(allocate("paris", 3, 1e300, TravelStyle::Mixed, 1)
            .unwrap()
            .categories
            .values()
            .all(|amount| amount.is_finite()));
    }

    #[test]
    fn test_cent_ties_round_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);

        let budget = allocate("paris", 1, 2.5, TravelStyle::Mixed, 1).unwrap();
        assert_eq!(budget.amount(BudgetCategory::ShoppingSouvenirs), 0.12);
    }

    #[test]
    fn test_allocate_is_idempotent() {
        let first = allocate("bali", 5, 2100.0, TravelStyle::Relaxation, 2).unwrap();
        let second = allocate("bali", 5, 2100.0, TravelStyle::Relaxation, 2).unwrap();
        assert_eq!(first, second);
    }
}
