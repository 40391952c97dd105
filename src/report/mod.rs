//! Report generation: turns the sales dataset and a selection into four charts.

pub mod aggregate;
pub mod chart;
pub mod recession;
pub mod selection;
pub mod yearly;

pub use chart::{ChartSpec, SeriesPoint};
pub use selection::SelectionState;

use crate::sales::{Dataset, VehicleType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum ReportType {
    /// Single year drill-down plus the all-years trend
    #[default]
    Yearly,
    /// Aggregates over recession periods only
    Recession,
}

impl ReportType {
    pub fn display(&self) -> &'static str {
        match self {
            ReportType::Yearly => "Yearly Statistics",
            ReportType::Recession => "Recession Period Statistics",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportType::Yearly => "yearly",
            ReportType::Recession => "recession",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("invalid report type {0:?}, expected \"yearly\" or \"recession\"")]
    InvalidReportType(String),
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yearly" => Ok(ReportType::Yearly),
            "recession" => Ok(ReportType::Recession),
            _ => Err(ReportError::InvalidReportType(s.to_string())),
        }
    }
}

/// What the user asked to see. `year` only matters for yearly reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Selection {
    pub report_type: ReportType,
    pub year: Option<i32>,
}

impl Selection {
    pub fn yearly(year: i32) -> Self {
        Selection {
            report_type: ReportType::Yearly,
            year: Some(year),
        }
    }

    pub fn recession() -> Self {
        Selection {
            report_type: ReportType::Recession,
            year: None,
        }
    }
}

/// Build the four charts for `selection`.
///
/// Never fails: an empty dataset or a year with no records produces charts
/// with empty series.
pub fn generate_report(dataset: &Dataset, selection: &Selection) -> [ChartSpec; 4] {
    match selection.report_type {
        ReportType::Recession => recession::charts(dataset.records()),
        ReportType::Yearly => yearly::charts(dataset.records(), selection.year),
    }
}

/// A generated report together with the selection it was built for.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Report {
    pub selection: Selection,
    pub charts: [ChartSpec; 4],
}

impl Report {
    pub fn generate(dataset: &Dataset, selection: Selection) -> Self {
        Report {
            charts: generate_report(dataset, &selection),
            selection,
        }
    }
}

/// Year-keyed aggregates as points sorted by year.
fn by_year(mut values: Vec<(i32, f64)>) -> Vec<SeriesPoint> {
    values.sort_by_key(|(year, _)| *year);
    values
        .into_iter()
        .map(|(year, value)| SeriesPoint::new(year, value))
        .collect()
}

/// Vehicle-type aggregates as points labelled with display names.
fn by_vehicle_type(values: Vec<(VehicleType, f64)>) -> Vec<SeriesPoint> {
    values
        .into_iter()
        .map(|(vehicle_type, value)| SeriesPoint::new(vehicle_type.label(), value))
        .collect()
}
