//! Depreciation calculator.
//!
//! Pure functions mapping an asset's financial parameters and an ordinal year
//! of service (or a period's usage) to that year's charge, the accumulated
//! depreciation and the resulting book value. No I/O and no rounding happens
//! here; rounding is left to presentation.

use common::DepreciationMethodInfo;
use model::entities::asset::{self, DepreciationMethod};
use rust_decimal::Decimal;
use tracing::{instrument, trace};

use crate::error::{ComputeError, Result};

/// Figures for a single year of service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepreciationResult {
    /// Charge for the requested year
    pub yearly_depreciation: Decimal,
    /// Cumulative depreciation through the requested year
    pub accumulated_depreciation: Decimal,
    /// `cost - accumulated_depreciation`
    pub book_value: Decimal,
}

impl DepreciationResult {
    fn from_accumulated(cost: Decimal, yearly: Decimal, accumulated: Decimal) -> Self {
        Self {
            yearly_depreciation: yearly,
            accumulated_depreciation: accumulated,
            book_value: cost - accumulated,
        }
    }
}

/// Exclusive upper bound for costs and unit estimates; stored columns hold
/// twelve integer digits.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Read-only projection of the asset fields the calculator needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetFinancials {
    pub cost: Decimal,
    pub salvage_value: Decimal,
    pub useful_life: i32,
    pub method: DepreciationMethod,
    pub purchase_year: i32,
    pub total_estimated_units: Option<Decimal>,
}

impl AssetFinancials {
    pub fn from_asset(asset: &asset::Model) -> Self {
        Self {
            cost: asset.cost,
            salvage_value: asset.salvage_value,
            useful_life: asset.useful_life,
            method: asset.depreciation_method,
            purchase_year: asset.purchase_year(),
            total_estimated_units: asset.total_estimated_units,
        }
    }

    /// The amount that may be depreciated over the asset's life.
    pub fn depreciable_base(&self) -> Decimal {
        self.cost - self.salvage_value
    }

    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.cost, self.salvage_value, self.useful_life)?;
        if let Some(total) = self.total_estimated_units {
            if total <= Decimal::ZERO {
                return Err(ComputeError::invalid(format!(
                    "total estimated units must be positive, got {}",
                    total
                )));
            }
            check_amount("total estimated units", total)?;
        }
        Ok(())
    }
}

/// Parses the wire representation of a depreciation method.
pub fn parse_method(value: &str) -> Result<DepreciationMethod> {
    match value {
        "STRAIGHT_LINE" => Ok(DepreciationMethod::StraightLine),
        "DECLINING_BALANCE" => Ok(DepreciationMethod::DecliningBalance),
        "UNITS_OF_PRODUCTION" => Ok(DepreciationMethod::UnitsOfProduction),
        other => Err(ComputeError::invalid(format!(
            "unknown depreciation method: {}",
            other
        ))),
    }
}

/// Catalogue of the supported methods, in the order they are offered to users.
pub fn method_catalogue() -> Vec<DepreciationMethodInfo> {
    vec![
        DepreciationMethodInfo {
            code: "STRAIGHT_LINE".to_string(),
            name: "Straight line".to_string(),
            description: "Equal charge every year: (cost - salvage value) / useful life".to_string(),
            requires_units: false,
        },
        DepreciationMethodInfo {
            code: "DECLINING_BALANCE".to_string(),
            name: "Double declining balance".to_string(),
            description: "Charges 2 / useful life of the remaining book value, switching to \
                          straight line once that is larger"
                .to_string(),
            requires_units: false,
        },
        DepreciationMethodInfo {
            code: "UNITS_OF_PRODUCTION".to_string(),
            name: "Units of production".to_string(),
            description: "Charge proportional to units produced in the period".to_string(),
            requires_units: true,
        },
    ]
}

/// Rejects parameters that would divide by zero or yield a negative depreciable base.
pub fn validate_parameters(cost: Decimal, salvage_value: Decimal, useful_life: i32) -> Result<()> {
    if useful_life <= 0 {
        return Err(ComputeError::invalid(format!(
            "useful life must be positive, got {}",
            useful_life
        )));
    }
    if cost < Decimal::ZERO {
        return Err(ComputeError::invalid(format!(
            "cost must not be negative, got {}",
            cost
        )));
    }
    if salvage_value < Decimal::ZERO {
        return Err(ComputeError::invalid(format!(
            "salvage value must not be negative, got {}",
            salvage_value
        )));
    }
    if salvage_value > cost {
        return Err(ComputeError::invalid(format!(
            "salvage value {} exceeds cost {}",
            salvage_value, cost
        )));
    }
    check_amount("cost", cost)
}

fn check_amount(name: &str, value: Decimal) -> Result<()> {
    if value >= Decimal::from(MAX_AMOUNT) {
        return Err(ComputeError::invalid(format!(
            "{} must be below {}, got {}",
            name, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Computes one year's depreciation.
///
/// `year` is the 1-based ordinal year of service, not a calendar year.
/// Units-of-production needs both `units_produced` and `total_estimated_units`
/// and is a single-period calculation: the accumulated figure equals the
/// period charge. Callers tracking usage over several periods pass cumulative
/// units instead.
#[instrument(level = "debug")]
pub fn calculate(
    cost: Decimal,
    salvage_value: Decimal,
    useful_life: i32,
    method: DepreciationMethod,
    year: i32,
    units_produced: Option<Decimal>,
    total_estimated_units: Option<Decimal>,
) -> Result<DepreciationResult> {
    validate_parameters(cost, salvage_value, useful_life)?;
    if year < 1 {
        return Err(ComputeError::invalid(format!(
            "year of service must be at least 1, got {}",
            year
        )));
    }

    let result = match method {
        DepreciationMethod::StraightLine => straight_line(cost, salvage_value, useful_life, year),
        DepreciationMethod::DecliningBalance => {
            declining_balance(cost, salvage_value, useful_life, year)
        }
        DepreciationMethod::UnitsOfProduction => {
            let (units, total) = require_units(units_produced, total_estimated_units)?;
            units_of_production(cost, salvage_value, units, total)
        }
    };

    trace!(
        yearly = %result.yearly_depreciation,
        accumulated = %result.accumulated_depreciation,
        book_value = %result.book_value,
        "Depreciation computed"
    );
    Ok(result)
}

fn require_units(
    units_produced: Option<Decimal>,
    total_estimated_units: Option<Decimal>,
) -> Result<(Decimal, Decimal)> {
    let (Some(units), Some(total)) = (units_produced, total_estimated_units) else {
        return Err(ComputeError::invalid("units required for this method"));
    };
    if total <= Decimal::ZERO {
        return Err(ComputeError::invalid(
            "units required for this method: total estimated units must be positive",
        ));
    }
    check_amount("total estimated units", total)?;
    if units < Decimal::ZERO {
        return Err(ComputeError::invalid(format!(
            "units produced must not be negative, got {}",
            units
        )));
    }
    if units > total {
        return Err(ComputeError::invalid(format!(
            "units produced {} exceed total estimated units {}",
            units, total
        )));
    }
    Ok((units, total))
}

/// Straight-line depreciation. Accumulated depreciation is capped at the
/// depreciable base and equals it exactly from the last year of useful life on.
pub(crate) fn straight_line(
    cost: Decimal,
    salvage_value: Decimal,
    useful_life: i32,
    year: i32,
) -> DepreciationResult {
    let base = cost - salvage_value;
    let yearly = base / Decimal::from(useful_life);
    let accumulated = if year >= useful_life {
        base
    } else {
        (yearly * Decimal::from(year)).min(base)
    };
    DepreciationResult::from_accumulated(cost, yearly, accumulated)
}

/// Double-declining-balance depreciation through `year`, walking from year 1.
///
/// The walk never goes past the useful life: the book value sits on the
/// salvage floor from then on and every later charge is zero.
pub(crate) fn declining_balance(
    cost: Decimal,
    salvage_value: Decimal,
    useful_life: i32,
    year: i32,
) -> DepreciationResult {
    let steps = usize::try_from(year.min(useful_life)).unwrap_or(0);
    let last_step = DecliningBalance::new(cost, salvage_value, useful_life)
        .nth(steps.saturating_sub(1))
        .unwrap_or(DepreciationResult::from_accumulated(
            cost,
            Decimal::ZERO,
            Decimal::ZERO,
        ));

    if year > useful_life {
        DepreciationResult {
            yearly_depreciation: Decimal::ZERO,
            ..last_step
        }
    } else {
        last_step
    }
}

/// Single-period units-of-production depreciation.
pub(crate) fn units_of_production(
    cost: Decimal,
    salvage_value: Decimal,
    units_produced: Decimal,
    total_estimated_units: Decimal,
) -> DepreciationResult {
    let per_unit = (cost - salvage_value) / total_estimated_units;
    let yearly = per_unit * units_produced;
    DepreciationResult::from_accumulated(cost, yearly, yearly)
}

/// Year-by-year double-declining-balance walk.
///
/// Each step charges `book_value * 2 / useful_life`, switches to straight line
/// over the remaining years when that is larger, and never lets the book
/// value fall below the salvage value. Once the useful life is over the
/// charge is whatever is left above salvage, which is zero.
#[derive(Debug, Clone)]
pub struct DecliningBalance {
    cost: Decimal,
    salvage_value: Decimal,
    useful_life: i32,
    rate: Decimal,
    year: i32,
    book_value: Decimal,
}

impl DecliningBalance {
    /// `useful_life` must be positive; see [`validate_parameters`].
    pub fn new(cost: Decimal, salvage_value: Decimal, useful_life: i32) -> Self {
        Self {
            cost,
            salvage_value,
            useful_life,
            rate: Decimal::TWO / Decimal::from(useful_life),
            year: 0,
            book_value: cost,
        }
    }
}

impl Iterator for DecliningBalance {
    type Item = DepreciationResult;

    fn next(&mut self) -> Option<Self::Item> {
        self.year = self.year.checked_add(1)?;

        let mut charge = self.book_value * self.rate;

        let remaining_years = self.useful_life - self.year + 1;
        if remaining_years > 0 {
            let straight_line_amount =
                (self.book_value - self.salvage_value) / Decimal::from(remaining_years);
            if straight_line_amount > charge {
                charge = straight_line_amount;
            }
        }

        if self.book_value - charge < self.salvage_value {
            charge = self.book_value - self.salvage_value;
        }

        self.book_value -= charge;

        // Derived from the book value so `cost - accumulated` never dips below salvage
        Some(DepreciationResult {
            yearly_depreciation: charge,
            accumulated_depreciation: self.cost - self.book_value,
            book_value: self.book_value,
        })
    }
}
