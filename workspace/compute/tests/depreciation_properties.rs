//! Property-based tests for the depreciation calculator and schedules.
//!
//! Amounts are generated in whole cents so every input is representable
//! exactly; comparisons that go through division allow a tiny tolerance.

use std::collections::BTreeMap;

use compute::depreciation::{AssetFinancials, calculate};
use compute::schedule::build_schedule;
use model::entities::asset::DepreciationMethod;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

fn epsilon() -> Decimal {
    Decimal::new(1, 10)
}

fn close(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= epsilon()
}

fn arb_method() -> impl Strategy<Value = DepreciationMethod> {
    prop_oneof![
        Just(DepreciationMethod::StraightLine),
        Just(DepreciationMethod::DecliningBalance),
        Just(DepreciationMethod::UnitsOfProduction),
    ]
}

/// (cost, salvage value, useful life) with `0 <= salvage <= cost`.
fn arb_parameters() -> impl Strategy<Value = (Decimal, Decimal, i32)> {
    (0i64..1_000_000_000, 0u32..=100, 1i32..=40).prop_map(|(cost_cents, salvage_pct, life)| {
        let cost = Decimal::new(cost_cents, 2);
        let salvage = (cost * Decimal::from(salvage_pct) / Decimal::ONE_HUNDRED).round_dp(2);
        (cost, salvage.min(cost), life)
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Book value plus accumulated depreciation is always the cost.
    #[test]
    fn prop_book_value_conserves_cost(
        (cost, salvage, life) in arb_parameters(),
        method in arb_method(),
        year in 1i32..=60,
        units_pct in 0u32..=100,
    ) {
        let total = Decimal::from(50_000);
        let units = total * Decimal::from(units_pct) / Decimal::ONE_HUNDRED;
        let result = calculate(cost, salvage, life, method, year, Some(units), Some(total)).unwrap();

        prop_assert!(close(result.book_value + result.accumulated_depreciation, cost));
    }

    /// Straight line never depreciates past the base and reaches it at the end of the life.
    #[test]
    fn prop_straight_line_is_capped_at_base(
        (cost, salvage, life) in arb_parameters(),
        year in 1i32..=60,
    ) {
        let result = calculate(cost, salvage, life, DepreciationMethod::StraightLine, year, None, None).unwrap();
        let base = cost - salvage;

        prop_assert!(result.accumulated_depreciation <= base);
        prop_assert!(result.book_value >= salvage);
        if year >= life {
            prop_assert_eq!(result.accumulated_depreciation, base);
            prop_assert_eq!(result.book_value, salvage);
        }
    }

    /// Declining balance never goes below salvage and never charges a negative amount.
    #[test]
    fn prop_declining_balance_floors_at_salvage(
        (cost, salvage, life) in arb_parameters(),
        year in 1i32..=60,
    ) {
        let result = calculate(cost, salvage, life, DepreciationMethod::DecliningBalance, year, None, None).unwrap();

        prop_assert!(result.book_value >= salvage);
        prop_assert!(result.yearly_depreciation >= Decimal::ZERO);
        if year >= life {
            prop_assert!(close(result.book_value, salvage));
        }
    }

    /// Units-of-production charges are linear in the units produced.
    #[test]
    fn prop_units_of_production_is_linear(
        (cost, salvage, life) in arb_parameters(),
        first in 0u32..=25_000,
        second in 0u32..=25_000,
    ) {
        let total = Some(Decimal::from(50_000));
        let charge = |units: u32| {
            calculate(cost, salvage, life, DepreciationMethod::UnitsOfProduction, 1, Some(Decimal::from(units)), total)
                .unwrap()
                .yearly_depreciation
        };

        prop_assert!(close(charge(first) + charge(second), charge(first + second)));
    }

    /// Schedules are contiguous and their yearly amounts add up to the accumulated figure.
    #[test]
    fn prop_schedule_amounts_sum_to_accumulated(
        (cost, salvage, life) in arb_parameters(),
        method in arb_method(),
        purchase_year in 1990i32..=2024,
        usage in proptest::collection::vec(0u32..=5_000, 0..40),
    ) {
        let financials = AssetFinancials {
            cost,
            salvage_value: salvage,
            useful_life: life,
            method,
            purchase_year,
            total_estimated_units: Some(Decimal::from(50_000)),
        };
        let usage: BTreeMap<i32, Decimal> = usage
            .into_iter()
            .enumerate()
            .map(|(offset, units)| (purchase_year + offset as i32, Decimal::from(units)))
            .collect();

        let schedule = build_schedule(&financials, 2024, &usage).unwrap();

        prop_assert_eq!(schedule.len() as i32, 2024 - purchase_year + 1);
        let mut running = Decimal::ZERO;
        for (offset, entry) in schedule.iter().enumerate() {
            prop_assert_eq!(entry.year, purchase_year + offset as i32);
            prop_assert!(entry.amount >= Decimal::ZERO);
            running += entry.amount;
            prop_assert!(close(running, entry.accumulated_depreciation));
            prop_assert!(entry.book_value >= salvage);
        }
    }
}
