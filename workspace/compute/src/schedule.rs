//! Year-by-year depreciation schedules.
//!
//! A schedule runs from the purchase year through the current calendar year.
//! Every method goes through the calculator in [`crate::depreciation`], so the
//! schedule and single-year calculations never disagree.

use std::collections::BTreeMap;

use model::entities::asset::DepreciationMethod;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::depreciation::{
    AssetFinancials, DecliningBalance, straight_line, units_of_production,
};
use crate::error::Result;

/// One immutable year of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Absolute calendar year
    pub year: i32,
    /// Depreciation charged in this year
    pub amount: Decimal,
    pub accumulated_depreciation: Decimal,
    pub book_value: Decimal,
}

/// Number of rows in a schedule; at least one even for a future purchase date.
pub fn years_to_calculate(purchase_year: i32, current_year: i32) -> i32 {
    (current_year - purchase_year + 1).max(1)
}

/// Builds the full schedule for an asset.
///
/// `usage` maps calendar years to units produced and is only read for the
/// units-of-production method. Years without usage are charged nothing.
#[instrument(level = "debug", skip(usage))]
pub fn build_schedule(
    financials: &AssetFinancials,
    current_year: i32,
    usage: &BTreeMap<i32, Decimal>,
) -> Result<Vec<ScheduleEntry>> {
    financials.validate()?;

    let years = years_to_calculate(financials.purchase_year, current_year);
    let cumulative = cumulative_depreciation(financials, years, usage);

    let entries: Vec<ScheduleEntry> = cumulative
        .into_iter()
        .zip(financials.purchase_year..)
        .scan(Decimal::ZERO, |previous, (accumulated, year)| {
            let amount = accumulated - *previous;
            *previous = accumulated;
            Some(ScheduleEntry {
                year,
                amount,
                accumulated_depreciation: accumulated,
                book_value: financials.cost - accumulated,
            })
        })
        .collect();

    debug!(
        rows = entries.len(),
        first_year = financials.purchase_year,
        "Schedule built"
    );
    Ok(entries)
}

/// Accumulated depreciation at the end of each of the first `years` years of service.
fn cumulative_depreciation(
    financials: &AssetFinancials,
    years: i32,
    usage: &BTreeMap<i32, Decimal>,
) -> Vec<Decimal> {
    let AssetFinancials {
        cost,
        salvage_value,
        useful_life,
        ..
    } = *financials;

    match financials.method {
        DepreciationMethod::StraightLine => (1..=years)
            .map(|year| straight_line(cost, salvage_value, useful_life, year).accumulated_depreciation)
            .collect(),
        DepreciationMethod::DecliningBalance => DecliningBalance::new(cost, salvage_value, useful_life)
            .take(years as usize)
            .map(|step| step.accumulated_depreciation)
            .collect(),
        DepreciationMethod::UnitsOfProduction => {
            let Some(total) = financials.total_estimated_units else {
                warn!("Units-of-production asset has no total estimated units, schedule stays at zero");
                return vec![Decimal::ZERO; years as usize];
            };
            let purchase_year = financials.purchase_year;
            (0..years)
                .scan(Decimal::ZERO, |units_so_far, offset| {
                    let produced = usage
                        .get(&(purchase_year + offset))
                        .copied()
                        .unwrap_or(Decimal::ZERO);
                    *units_so_far = (*units_so_far + produced).min(total);
                    Some(
                        units_of_production(cost, salvage_value, *units_so_far, total)
                            .accumulated_depreciation,
                    )
                })
                .collect()
        }
    }
}
