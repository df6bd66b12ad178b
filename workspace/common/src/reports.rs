use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kinds of financial report the service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    /// Current book value of assets purchased in the period
    AssetValue,
    /// Depreciation charged in the calendar years covered by the period
    Depreciation,
    /// Disposals dated within the period
    Disposal,
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset-value" => Ok(ReportType::AssetValue),
            "depreciation" => Ok(ReportType::Depreciation),
            "disposal" => Ok(ReportType::Disposal),
            other => Err(format!("Invalid report type: {}", other)),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ReportType::AssetValue => "asset-value",
            ReportType::Depreciation => "depreciation",
            ReportType::Disposal => "disposal",
        };
        f.write_str(value)
    }
}

/// One asset in the asset-value report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AssetValueReportRow {
    pub asset_id: i32,
    pub name: String,
    pub purchase_date: NaiveDate,
    pub original_cost: Decimal,
    /// Book value of the latest schedule year, or the cost when no schedule exists
    pub current_value: Decimal,
    pub status: String,
}

/// One schedule year in the depreciation report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DepreciationReportRow {
    pub asset_id: i32,
    pub asset_name: String,
    pub year: i32,
    pub amount: Decimal,
    pub accumulated_depreciation: Decimal,
    pub book_value: Decimal,
}

/// One disposal in the disposal report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DisposalReportRow {
    pub disposal_id: i32,
    pub asset_id: i32,
    pub asset_name: String,
    pub disposal_date: NaiveDate,
    pub disposal_value: Decimal,
    pub reason: String,
    pub status: String,
    /// Book value for the disposal year (latest schedule year not after it)
    pub book_value: Decimal,
    /// `disposal_value - book_value`; negative means a loss on disposal
    pub gain_or_loss: Decimal,
}

/// Report payload; the variant follows the requested [`ReportType`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum ReportData {
    AssetValue(Vec<AssetValueReportRow>),
    Depreciation(Vec<DepreciationReportRow>),
    Disposal(Vec<DisposalReportRow>),
}

impl ReportData {
    pub fn len(&self) -> usize {
        match self {
            ReportData::AssetValue(rows) => rows.len(),
            ReportData::Depreciation(rows) => rows.len(),
            ReportData::Disposal(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
