//! Common transport-layer types shared between the compute crate and the
//! HTTP handlers, so report rows and the response envelope have one shape.

mod reports;

pub use reports::{
    AssetValueReportRow, DepreciationReportRow, DisposalReportRow, ReportData, ReportType,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Description of a supported depreciation method.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DepreciationMethodInfo {
    /// Wire value, e.g. "STRAIGHT_LINE"
    pub code: String,
    /// Human readable name
    pub name: String,
    pub description: String,
    /// Whether calculations need `units_produced` and `total_estimated_units`
    pub requires_units: bool,
}
